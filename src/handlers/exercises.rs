//! 动作库的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::exercise::ExercisePublic,
    repository::ExerciseRepository,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}

fn default_list_limit() -> i64 {
    100
}

/// 检索查询参数
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_limit() -> i64 {
    50
}

/// 分页列出动作
pub async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.limit < 1 || query.limit > 500 {
        return Err(AppError::BadRequest("limit must be 1-500".to_string()));
    }

    let repo = ExerciseRepository::new(state.db.clone());
    let exercises = repo.list(query.skip, query.limit).await?;

    let response: Vec<ExercisePublic> = exercises.into_iter().map(Into::into).collect();

    Ok(Json(response))
}

/// 按名称、肌群或器械检索动作
pub async fn search_exercises(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.q.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".to_string()));
    }
    if query.limit < 1 || query.limit > 200 {
        return Err(AppError::BadRequest("limit must be 1-200".to_string()));
    }

    let repo = ExerciseRepository::new(state.db.clone());
    let exercises = repo.search(&query.q, query.skip, query.limit).await?;

    let response: Vec<ExercisePublic> = exercises.into_iter().map(Into::into).collect();

    Ok(Json(response))
}
