//! 用户相关的 HTTP 处理器（含 onboarding）

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::user::{MacroTargets, UserProfile, UserPublic},
    repository::UserRepository,
    services::macros::calculate_macros,
};
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Onboarding 请求
#[derive(Debug, Deserialize, Validate)]
pub struct OnboardingRequest {
    pub goal: String,
    pub experience: String,
    #[validate(range(min = 0, max = 7, message = "training_days_per_week must be 0-7"))]
    pub training_days_per_week: i32,
    pub equipment_style: String,
    pub check_in_day: String,
    #[validate(range(min = 3, max = 8, message = "height_feet must be 3-8"))]
    pub height_feet: i32,
    #[validate(range(min = 0, max = 11, message = "height_inches must be 0-11"))]
    pub height_inches: i32,
    #[validate(range(min = 50.0, max = 1000.0, message = "weight_pounds must be 50-1000"))]
    pub weight_pounds: f64,
    #[validate(range(min = 13, max = 120, message = "age must be 13-120"))]
    pub age: i32,
    pub gender: Option<String>,
    #[serde(default)]
    pub food_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[validate(range(min = 1, max = 10, message = "meals_per_day must be 1-10"))]
    pub meals_per_day: i32,
    pub wake_time: Option<String>,
    pub sleep_time: Option<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
    pub budget_tier: String,
    pub current_cardio: String,
    pub motivation_style: String,
}

/// 获取当前用户
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user_repo = UserRepository::new(state.db.clone());

    let user = user_repo
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(UserPublic::from(user)))
}

/// 提交 onboarding 数据
/// 计算宏量目标并写入用户档案
pub async fn submit_onboarding(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<OnboardingRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user_repo = UserRepository::new(state.db.clone());

    // 用户必须存在
    user_repo
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // 计算宏量目标
    let total_height_inches = req.height_feet * 12 + req.height_inches;
    let is_male = req.gender.as_deref() == Some("male");

    let breakdown = calculate_macros(
        req.weight_pounds,
        total_height_inches,
        req.age,
        is_male,
        &req.goal,
        req.training_days_per_week,
    );

    let macro_targets = MacroTargets {
        calories: breakdown.calories,
        protein_g: breakdown.protein_g,
        carbs_g: breakdown.carbs_g,
        fat_g: breakdown.fat_g,
        updated_at: Utc::now(),
    };

    let profile = UserProfile {
        goal: req.goal,
        experience: req.experience,
        training_days_per_week: req.training_days_per_week,
        equipment_style: req.equipment_style,
        check_in_day: req.check_in_day,
        height_feet: req.height_feet,
        height_inches: req.height_inches,
        weight_pounds: req.weight_pounds,
        age: req.age,
        gender: req.gender,
        food_preferences: req.food_preferences,
        allergies: req.allergies,
        meals_per_day: req.meals_per_day,
        wake_time: req.wake_time,
        sleep_time: req.sleep_time,
        injuries: req.injuries,
        budget_tier: req.budget_tier,
        current_cardio: req.current_cardio,
        motivation_style: req.motivation_style,
    };

    user_repo
        .set_profile(auth_context.user_id, &profile, &macro_targets)
        .await?;

    // 返回更新后的档案
    let updated = user_repo
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = %auth_context.user_id, "Onboarding completed");

    Ok(Json(UserPublic::from(updated)))
}
