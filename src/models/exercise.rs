//! Exercise library models

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const MUSCLE_GROUPS: &[&str] = &[
    // Upper body
    "chest",
    "back",
    "shoulders",
    "biceps",
    "triceps",
    "forearms",
    "traps",
    // Lower body
    "quads",
    "hamstrings",
    "glutes",
    "calves",
    "abductors",
    "adductors",
    // Core
    "abs",
    "obliques",
    "lower_back",
    // Full body
    "full_body",
];

pub const EQUIPMENT_TYPES: &[&str] = &[
    "barbell",
    "dumbbell",
    "cable",
    "machine",
    "bodyweight",
    "kettlebell",
    "resistance_band",
    "medicine_ball",
    "other",
];

pub const MOVEMENT_PATTERNS: &[&str] = &[
    "push",
    "pull",
    "squat",
    "hinge",
    "lunge",
    "carry",
    "rotation",
    "isolation",
];

pub const DIFFICULTY_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

/// Exercise document (`exercises` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub primary_muscle: String,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    pub equipment: String,
    pub movement_pattern: String,
    pub difficulty: String,
    pub notes: Option<String>,
    pub how_to_video_url: Option<String>,
    pub demo_media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    /// Check field values against the fixed vocabularies.
    /// Used when seeding; the read paths trust the stored corpus.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !MUSCLE_GROUPS.contains(&self.primary_muscle.as_str()) {
            return Err(format!("unknown primary_muscle: {}", self.primary_muscle));
        }
        for muscle in &self.secondary_muscles {
            if !MUSCLE_GROUPS.contains(&muscle.as_str()) {
                return Err(format!("unknown secondary muscle: {}", muscle));
            }
        }
        if !EQUIPMENT_TYPES.contains(&self.equipment.as_str()) {
            return Err(format!("unknown equipment: {}", self.equipment));
        }
        if !MOVEMENT_PATTERNS.contains(&self.movement_pattern.as_str()) {
            return Err(format!("unknown movement_pattern: {}", self.movement_pattern));
        }
        if !DIFFICULTY_LEVELS.contains(&self.difficulty.as_str()) {
            return Err(format!("unknown difficulty: {}", self.difficulty));
        }
        Ok(())
    }
}

/// Public exercise model (for API responses)
#[derive(Debug, Serialize)]
pub struct ExercisePublic {
    pub id: String,
    pub name: String,
    pub primary_muscle: String,
    pub secondary_muscles: Vec<String>,
    pub equipment: String,
    pub movement_pattern: String,
    pub difficulty: String,
    pub notes: Option<String>,
    pub how_to_video_url: Option<String>,
    pub demo_media_url: Option<String>,
}

impl From<Exercise> for ExercisePublic {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id.to_hex(),
            name: exercise.name,
            primary_muscle: exercise.primary_muscle,
            secondary_muscles: exercise.secondary_muscles,
            equipment: exercise.equipment,
            movement_pattern: exercise.movement_pattern,
            difficulty: exercise.difficulty,
            notes: exercise.notes,
            how_to_video_url: exercise.how_to_video_url,
            demo_media_url: exercise.demo_media_url,
        }
    }
}
