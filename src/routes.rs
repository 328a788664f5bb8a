//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{error::AppError, handlers, middleware, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Result<Router, AppError> {
    let cors = middleware::cors_layer(&state.config)?;

    // 公开端点（根、文档、健康检查）
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/docs", get(handlers::docs::docs_page))
        .route("/api/v1/health", get(handlers::health::health_check))
        .route("/api/v1/ready", get(handlers::health::readiness_check));

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/refresh", post(handlers::auth::refresh_token));

    // 动作库（公开只读）
    let exercise_routes = Router::new()
        .route("/api/v1/exercises", get(handlers::exercises::list_exercises))
        .route(
            "/api/v1/exercises/search",
            get(handlers::exercises::search_exercises),
        );

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route("/api/v1/auth/logout-all", post(handlers::auth::logout_all))
        .route("/api/v1/users/me", get(handlers::users::get_me))
        .route(
            "/api/v1/users/onboarding",
            post(handlers::users::submit_onboarding),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Ok(Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(exercise_routes)
        .merge(authenticated_routes)
        .layer(cors)
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state))
}
