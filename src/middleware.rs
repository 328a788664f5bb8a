//! HTTP 中间件
//! 应用状态、请求追踪、CORS

use crate::{config::AppConfig, error::AppError};
use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 服务使用 Arc 包装，多个请求共享同一实例，Clone 成本低廉
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: mongodb::Database,
    pub jwt_service: Arc<crate::auth::jwt::JwtService>,
    pub auth_service: Arc<crate::services::AuthService>,
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    // 生成或提取 trace_id
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 记录指标
        metrics::counter!(
            "http_requests_total",
            "method" => method.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        // 记录日志
        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        // 在响应头中添加追踪标识
        let mut response = response;
        if let Ok(value) = trace_id.parse() {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 构建 CORS 层
/// 只放行配置中的 web 与 iOS 客户端源
pub fn cors_layer(config: &AppConfig) -> Result<CorsLayer, AppError> {
    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in [
        &config.cors.frontend_api_base_url,
        &config.cors.ios_api_base_url,
    ] {
        origins.push(
            origin
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid CORS origin: {}", origin)))?,
        );
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id_passthrough() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace-id", "abc-123".parse().unwrap());

        assert_eq!(extract_or_generate_trace_id(&headers), "abc-123");
    }

    #[test]
    fn test_trace_id_generated_when_absent() {
        let headers = HeaderMap::new();
        let trace_id = extract_or_generate_trace_id(&headers);
        assert!(Uuid::parse_str(&trace_id).is_ok());
    }
}
