//! 路由层认证测试
//!
//! 不依赖运行中的 MongoDB：mongodb 客户端惰性连接，以下用例只覆盖
//! 在触达数据库之前就能判定的路径（公开端点、令牌缺失/非法）

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fitai_service::{
    auth::jwt::JwtService,
    config::{
        AppConfig, CorsConfig, DatabaseConfig, LoggingConfig, OpenAiConfig, SecurityConfig,
        ServerConfig,
    },
    middleware::AppState,
    routes,
    services::AuthService,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use std::sync::Arc;
use tower::ServiceExt;

/// 创建测试配置
fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            uri: Secret::new("mongodb://localhost:27017/fitai_test".to_string()),
            default_database: "fitai_test".to_string(),
            server_selection_timeout_secs: 1,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            jwt_algorithm: "HS256".to_string(),
            access_token_exp_secs: 900,
            refresh_token_exp_secs: 604800,
        },
        cors: CorsConfig {
            frontend_api_base_url: "http://localhost:5173".to_string(),
            ios_api_base_url: "http://localhost:8000".to_string(),
        },
        openai: OpenAiConfig {
            api_key: Secret::new(String::new()),
        },
        environment: "test".to_string(),
    }
}

async fn create_test_app() -> Router {
    let config = create_test_config();

    let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("client options should parse");
    let db = client.database("fitai_test");

    let jwt_service = Arc::new(JwtService::from_config(&config).unwrap());
    let auth_service = Arc::new(AuthService::new(
        db.clone(),
        jwt_service.clone(),
        Arc::new(config.clone()),
    ));

    let state = Arc::new(AppState {
        config,
        db,
        jwt_service,
        auth_service,
    });

    routes::create_router(state).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_root_returns_banner() {
    let app = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "FIT-AI API");
}

#[tokio::test]
async fn test_docs_page_is_served() {
    let app = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_endpoint_without_token() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // 401 必须携带 Bearer 质询
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_protected_endpoint_with_malformed_token() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/users/onboarding")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_rejected() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"refresh_token":"garbage"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // 签名校验在触达数据库之前失败
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = create_test_app().await;

    // 用访问令牌冒充刷新令牌
    let jwt_service = JwtService::from_config(&create_test_config()).unwrap();
    let access_token = jwt_service
        .generate_access_token(&mongodb::bson::oid::ObjectId::new())
        .unwrap();

    let body = format!(r#"{{"refresh_token":"{}"}}"#, access_token);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_responses_carry_trace_headers() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-trace-id"));
    assert!(response.headers().contains_key("x-request-id"));
}
