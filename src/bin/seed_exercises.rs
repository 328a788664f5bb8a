//! 动作库种子导入工具
//!
//! 用法: seed_exercises [JSON 文件路径]，默认 data/exercises.json
//! 按名称幂等导入：已有动作更新，新动作插入

use anyhow::Context;
use chrono::Utc;
use fitai_service::{
    config::AppConfig, db, models::exercise::Exercise, repository::ExerciseRepository, telemetry,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

/// 种子文件中的动作条目（不含 ID 与时间戳）
#[derive(Debug, Deserialize)]
struct ExerciseSeed {
    name: String,
    primary_muscle: String,
    #[serde(default)]
    secondary_muscles: Vec<String>,
    equipment: String,
    movement_pattern: String,
    difficulty: String,
    notes: Option<String>,
    how_to_video_url: Option<String>,
    demo_media_url: Option<String>,
}

impl ExerciseSeed {
    fn into_exercise(self) -> Exercise {
        let now = Utc::now();
        Exercise {
            id: ObjectId::new(),
            name: self.name,
            primary_muscle: self.primary_muscle,
            secondary_muscles: self.secondary_muscles,
            equipment: self.equipment,
            movement_pattern: self.movement_pattern,
            difficulty: self.difficulty,
            notes: self.notes,
            how_to_video_url: self.how_to_video_url,
            demo_media_url: self.demo_media_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::from_filename(".env.local").ok();
    dotenv::from_filename(".env.development").ok();
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/exercises.json".to_string());

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read exercises file: {}", path))?;
    let seeds: Vec<ExerciseSeed> =
        serde_json::from_str(&content).context("Failed to parse exercises file")?;

    tracing::info!(count = seeds.len(), file = %path, "Loading exercises");

    let database = db::connect(&config.database).await?;
    db::ensure_indexes(&database).await?;

    let repo = ExerciseRepository::new(database);

    let mut inserted = 0u32;
    let mut updated = 0u32;
    let mut skipped = 0u32;

    for seed in seeds {
        let exercise = seed.into_exercise();

        if let Err(reason) = exercise.validate() {
            tracing::warn!(name = %exercise.name, %reason, "Skipping invalid exercise");
            skipped += 1;
            continue;
        }

        match repo.upsert_by_name(&exercise).await {
            Ok(true) => {
                tracing::info!(name = %exercise.name, "Inserted");
                inserted += 1;
            }
            Ok(false) => {
                tracing::info!(name = %exercise.name, "Updated");
                updated += 1;
            }
            Err(e) => {
                tracing::error!(name = %exercise.name, error = %e, "Failed to upsert");
                skipped += 1;
            }
        }
    }

    tracing::info!(inserted, updated, skipped, "Seeding completed");

    Ok(())
}
