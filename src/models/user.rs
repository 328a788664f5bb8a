//! User domain models

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Daily macronutrient targets, recomputed on onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub updated_at: DateTime<Utc>,
}

/// Onboarding profile. The store keeps this schema-flexible; here it is a
/// typed record so additions go through a versioned struct change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub goal: String,
    pub experience: String,
    pub training_days_per_week: i32,
    pub equipment_style: String,
    pub check_in_day: String,
    pub height_feet: i32,
    pub height_inches: i32,
    pub weight_pounds: f64,
    pub age: i32,
    pub gender: Option<String>,
    #[serde(default)]
    pub food_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub meals_per_day: i32,
    pub wake_time: Option<String>,
    pub sleep_time: Option<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
    pub budget_tier: String,
    pub current_cardio: String,
    pub motivation_style: String,
}

/// User document (`users` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub profile: Option<UserProfile>,
    pub macro_targets: Option<MacroTargets>,
    // Macros may be recalculated on weekly check-in
    #[serde(default = "default_true")]
    pub macros_can_change_weekly: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email,
            password_hash,
            profile: None,
            macro_targets: None,
            macros_can_change_weekly: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public user profile (no sensitive data)
#[derive(Debug, Serialize)]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub profile: Option<UserProfile>,
    pub macro_targets: Option<MacroTargets>,
    pub macros_can_change_weekly: bool,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            profile: user.profile,
            macro_targets: user.macro_targets,
            macros_can_change_weekly: user.macros_can_change_weekly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_strips_password_hash() {
        let user = User::new("user@example.com".to_string(), "$argon2id$stub".to_string());
        let public = UserPublic::from(user.clone());

        assert_eq!(public.id, user.id.to_hex());
        assert_eq!(public.email, "user@example.com");

        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
