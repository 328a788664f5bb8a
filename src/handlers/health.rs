//! 健康检查处理器
//! 提供 /、/api/v1/health 和 /api/v1/ready 端点

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::{db, middleware::AppState};

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// 记录应用启动时间
pub fn set_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// 应用运行时长（秒）
pub fn get_uptime() -> u64 {
    START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// 存活探针响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// 就绪探针响应
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// 健康检查项
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
}

/// 根端点
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "FIT-AI API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 存活探针
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime(),
    })
}

/// 就绪探针（检查 MongoDB 连通性）
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (mongo_status, ready) = match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => ("ok".to_string(), true),
        db::HealthStatus::Unhealthy(reason) => (reason, false),
    };

    let response = ReadinessResponse {
        ready,
        checks: vec![HealthCheck {
            name: "mongodb".to_string(),
            status: mongo_status,
        }],
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
