//! User repository (用户数据访问)

use crate::{
    error::AppError,
    models::user::{MacroTargets, User, UserProfile},
};
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    Collection, Database,
};

pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// 按邮箱查找用户
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    /// 按 ID 查找用户
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// 插入新用户
    pub async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    /// 写入 onboarding 结果（档案 + 宏量目标）
    pub async fn set_profile(
        &self,
        id: ObjectId,
        profile: &UserProfile,
        macro_targets: &MacroTargets,
    ) -> Result<(), AppError> {
        let profile_bson = to_bson(profile)
            .map_err(|e| AppError::Internal(format!("Failed to serialize profile: {}", e)))?;
        let targets_bson = to_bson(macro_targets)
            .map_err(|e| AppError::Internal(format!("Failed to serialize macro targets: {}", e)))?;
        let updated_at = to_bson(&Utc::now())
            .map_err(|e| AppError::Internal(format!("Failed to serialize timestamp: {}", e)))?;

        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "profile": profile_bson,
                    "macro_targets": targets_bson,
                    "macros_can_change_weekly": true,
                    "updated_at": updated_at,
                }},
            )
            .await?;

        Ok(())
    }
}
