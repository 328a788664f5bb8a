//! Refresh token repository (刷新令牌数据访问)
//!
//! Backs refresh token rotation. Tokens are stored hashed; redemption is a
//! single atomic update so that under concurrent refresh attempts exactly one
//! caller wins.

use crate::{error::AppError, models::auth::RefreshTokenDoc};
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, DateTime},
    options::ReturnDocument,
    Collection, Database,
};
use sha2::{Digest, Sha256};

pub struct TokenRepository {
    collection: Collection<RefreshTokenDoc>,
}

impl TokenRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("refresh_tokens"),
        }
    }

    /// SHA-256 hex digest; the plaintext token never reaches the database
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 存储刷新令牌
    pub async fn store(&self, token: &RefreshTokenDoc) -> Result<(), AppError> {
        self.collection.insert_one(token).await?;
        Ok(())
    }

    /// 原子兑换：将 revoked_at 从 null 翻转并记录继任者
    ///
    /// Returns the document as it was before redemption, or `None` when no
    /// active document matches — i.e. the token was already redeemed, revoked,
    /// or never issued. The caller treats `None` as a suspected replay.
    pub async fn redeem(
        &self,
        token_hash: &str,
        replaced_by: ObjectId,
    ) -> Result<Option<RefreshTokenDoc>, AppError> {
        let previous = self
            .collection
            .find_one_and_update(
                doc! { "token_hash": token_hash, "revoked_at": Bson::Null },
                doc! { "$set": {
                    "revoked_at": DateTime::now(),
                    "replaced_by": replaced_by,
                }},
            )
            .return_document(ReturnDocument::Before)
            .await?;

        Ok(previous)
    }

    /// 按哈希撤销刷新令牌（登出）
    pub async fn revoke_by_hash(
        &self,
        token_hash: &str,
        user_id: ObjectId,
    ) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "token_hash": token_hash,
                    "user_id": user_id,
                    "revoked_at": Bson::Null,
                },
                doc! { "$set": { "revoked_at": DateTime::now() } },
            )
            .await?;

        Ok(result.modified_count > 0)
    }

    /// 撤销用户的所有刷新令牌（从所有设备登出）
    pub async fn revoke_all_for_user(&self, user_id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection
            .update_many(
                doc! { "user_id": user_id, "revoked_at": Bson::Null },
                doc! { "$set": { "revoked_at": DateTime::now() } },
            )
            .await?;

        Ok(result.modified_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = TokenRepository::hash_token("some.jwt.token");
        assert_eq!(hash, TokenRepository::hash_token("some.jwt.token"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_token_differs_per_token() {
        assert_ne!(
            TokenRepository::hash_token("token-a"),
            TokenRepository::hash_token("token-b")
        );
    }
}
