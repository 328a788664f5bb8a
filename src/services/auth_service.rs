//! 认证服务：注册、登录、令牌刷新与登出

use crate::{
    auth::jwt::{JwtService, TokenPair},
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest, RefreshTokenDoc, TokenResponse},
    models::user::User,
    repository::{TokenRepository, UserRepository},
};
use mongodb::{
    bson::{oid::ObjectId, DateTime},
    Database,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    db: Database,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(db: Database, jwt_service: Arc<JwtService>, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            jwt_service,
            config,
        }
    }

    /// 用户注册
    /// 邮箱重复返回 400，成功返回令牌对（注册即登录）
    pub async fn register(&self, req: RegisterRequest) -> Result<TokenResponse, AppError> {
        req.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let user_repo = UserRepository::new(self.db.clone());

        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user = User::new(req.email, password_hash);
        user_repo.insert(&user).await?;

        let token_pair = self.issue_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(token_pair.into())
    }

    /// 用户登录
    /// 未知邮箱与密码错误对外同样表现为 401
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AppError> {
        req.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let hasher = PasswordHasher::new();
        hasher.verify(&req.password, &user.password_hash)?;

        let token_pair = self.issue_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token_pair.into())
    }

    /// 刷新令牌（轮换）
    ///
    /// 旧令牌的兑换是单次原子更新：并发兑换只有一个成功，其余视为疑似重放。
    pub async fn refresh(&self, req: RefreshTokenRequest) -> Result<TokenResponse, AppError> {
        // 签名、算法、过期与类型检查
        let claims = self.jwt_service.validate_refresh_token(&req.refresh_token)?;
        let user_id = ObjectId::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        let token_repo = TokenRepository::new(self.db.clone());
        let token_hash = TokenRepository::hash_token(&req.refresh_token);

        // 预生成继任文档 ID，旧文档的 replaced_by 指向它
        let successor_id = ObjectId::new();

        let previous = match token_repo.redeem(&token_hash, successor_id).await? {
            Some(doc) => doc,
            None => {
                // 已兑换、已撤销或从未签发
                tracing::warn!(user_id = %user_id, "Refresh token replay or unknown token");
                return Err(AppError::Unauthorized);
            }
        };

        if previous.user_id != user_id {
            tracing::warn!(user_id = %user_id, "Refresh token subject mismatch");
            return Err(AppError::Unauthorized);
        }

        // JWT 过期已校验；文档侧的镜像时间戳再挡一层
        if previous.expires_at < DateTime::now() {
            return Err(AppError::Unauthorized);
        }

        // 用户必须仍然存在
        let user_repo = UserRepository::new(self.db.clone());
        user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let token_pair = self.jwt_service.generate_token_pair(&user_id)?;
        self.store_refresh_token(successor_id, user_id, &token_pair.refresh_token)
            .await?;

        tracing::debug!(user_id = %user_id, "Refresh token rotated");

        Ok(token_pair.into())
    }

    /// 登出（撤销呈交的刷新令牌）
    pub async fn logout(&self, refresh_token: &str, user_id: ObjectId) -> Result<(), AppError> {
        let token_repo = TokenRepository::new(self.db.clone());
        let token_hash = TokenRepository::hash_token(refresh_token);

        token_repo.revoke_by_hash(&token_hash, user_id).await?;

        Ok(())
    }

    /// 从所有设备登出
    pub async fn logout_all(&self, user_id: ObjectId) -> Result<u64, AppError> {
        let token_repo = TokenRepository::new(self.db.clone());
        token_repo.revoke_all_for_user(user_id).await
    }

    /// 生成令牌对并持久化刷新令牌
    async fn issue_session(&self, user_id: ObjectId) -> Result<TokenPair, AppError> {
        let token_pair = self.jwt_service.generate_token_pair(&user_id)?;
        self.store_refresh_token(ObjectId::new(), user_id, &token_pair.refresh_token)
            .await?;
        Ok(token_pair)
    }

    async fn store_refresh_token(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        refresh_token: &str,
    ) -> Result<(), AppError> {
        let token_repo = TokenRepository::new(self.db.clone());

        let expires_at = chrono::Utc::now()
            + chrono::Duration::seconds(self.config.security.refresh_token_exp_secs as i64);

        let doc = RefreshTokenDoc {
            id,
            user_id,
            token_hash: TokenRepository::hash_token(refresh_token),
            expires_at: DateTime::from_chrono(expires_at),
            created_at: DateTime::now(),
            revoked_at: None,
            replaced_by: None,
        };

        token_repo.store(&doc).await
    }
}
