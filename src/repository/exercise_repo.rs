//! Exercise repository (动作库数据访问)

use crate::{error::AppError, models::exercise::Exercise};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    Collection, Database,
};

pub struct ExerciseRepository {
    collection: Collection<Exercise>,
}

impl ExerciseRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("exercises"),
        }
    }

    /// 按名称排序分页列出动作
    pub async fn list(&self, skip: u64, limit: i64) -> Result<Vec<Exercise>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .skip(skip)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 按名称、主要肌群或器械做大小写不敏感的模糊检索
    pub async fn search(&self, query: &str, skip: u64, limit: i64) -> Result<Vec<Exercise>, AppError> {
        let filter = doc! {
            "$or": [
                { "name": { "$regex": query, "$options": "i" } },
                { "primary_muscle": { "$regex": query, "$options": "i" } },
                { "equipment": { "$regex": query, "$options": "i" } },
            ]
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "name": 1 })
            .skip(skip)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 按名称插入或更新（种子导入用）
    /// 返回 true 表示新插入，false 表示更新了已有文档
    pub async fn upsert_by_name(&self, exercise: &Exercise) -> Result<bool, AppError> {
        match self
            .collection
            .find_one(doc! { "name": exercise.name.as_str() })
            .await?
        {
            Some(existing) => {
                let secondary = to_bson(&exercise.secondary_muscles)
                    .map_err(|e| AppError::Internal(format!("Failed to serialize exercise: {}", e)))?;
                let updated_at = to_bson(&Utc::now())
                    .map_err(|e| AppError::Internal(format!("Failed to serialize timestamp: {}", e)))?;

                self.collection
                    .update_one(
                        doc! { "_id": existing.id },
                        doc! { "$set": {
                            "primary_muscle": exercise.primary_muscle.as_str(),
                            "secondary_muscles": secondary,
                            "equipment": exercise.equipment.as_str(),
                            "movement_pattern": exercise.movement_pattern.as_str(),
                            "difficulty": exercise.difficulty.as_str(),
                            "notes": exercise.notes.as_deref(),
                            "how_to_video_url": exercise.how_to_video_url.as_deref(),
                            "demo_media_url": exercise.demo_media_url.as_deref(),
                            "updated_at": updated_at,
                        }},
                    )
                    .await?;
                Ok(false)
            }
            None => {
                self.collection.insert_one(exercise).await?;
                Ok(true)
            }
        }
    }
}
