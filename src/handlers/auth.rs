//! 认证相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::auth::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// 刷新令牌
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.refresh(req).await?;

    Ok(Json(response))
}

/// 登出
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service
        .logout(&req.refresh_token, auth_context.user_id)
        .await?;

    Ok(Json(json!({ "message": "Logged out" })))
}

/// 从所有设备登出
pub async fn logout_all(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let revoked_count = state.auth_service.logout_all(auth_context.user_id).await?;

    Ok(Json(json!({
        "message": format!("Logged out from {} sessions", revoked_count)
    })))
}
