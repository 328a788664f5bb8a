//! JWT token generation and validation
//! Implements access token + refresh token pattern

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use mongodb::bson::oid::ObjectId;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a presented token was rejected. Logged with the rejection; callers
/// only ever see a generic 401.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,

    #[error("signature mismatch")]
    InvalidSignature,

    #[error("unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("unexpected token type")]
    WrongTokenType,
}

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID, ObjectId hex)
    pub sub: String,

    /// Token type (access or refresh)
    pub token_type: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

/// Token pair response
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64, // seconds until access token expires
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
    refresh_token_exp_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        // The algorithm is pinned; anything else is a configuration error
        if config.security.jwt_algorithm != "HS256" {
            return Err(AppError::Config(format!(
                "Unsupported JWT algorithm: {}",
                config.security.jwt_algorithm
            )));
        }

        let secret = config.security.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        Ok(Self {
            encoding_key,
            decoding_key,
            access_token_exp_secs: config.security.access_token_exp_secs,
            refresh_token_exp_secs: config.security.refresh_token_exp_secs,
        })
    }

    /// Generate access token
    pub fn generate_access_token(&self, user_id: &ObjectId) -> Result<String, AppError> {
        self.generate_token(user_id, "access", self.access_token_exp_secs)
    }

    /// Generate refresh token
    pub fn generate_refresh_token(&self, user_id: &ObjectId) -> Result<String, AppError> {
        self.generate_token(user_id, "refresh", self.refresh_token_exp_secs)
    }

    /// Generate token pair
    pub fn generate_token_pair(&self, user_id: &ObjectId) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(user_id)?;
        let refresh_token = self.generate_refresh_token(user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_token_exp_secs,
        })
    }

    fn generate_token(
        &self,
        user_id: &ObjectId,
        token_type: &str,
        exp_secs: u64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(exp_secs as i64);

        let claims = Claims {
            sub: user_id.to_hex(),
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode {} token: {:?}", token_type, e);
            AppError::Internal(format!("Failed to encode {} token: {}", token_type, e))
        })
    }

    /// Validate access token specifically
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, "access", Utc::now().timestamp())
    }

    /// Validate refresh token specifically
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, "refresh", Utc::now().timestamp())
    }

    /// Signature, algorithm, expiry and type checks against an explicit clock.
    ///
    /// Expiry is checked here instead of by the decoder: the decoder's default
    /// 60 s leeway and exclusive comparison do not match the contract that a
    /// token expiring at the current second is already expired.
    fn validate_at(&self, token: &str, expected_type: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
                    _ => TokenError::Malformed,
                };
                tracing::debug!("Token validation failed: {:?}", e);
                reason
            })?
            .claims;

        // Inclusive boundary: exp == now is already expired
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        if claims.token_type != expected_type {
            tracing::debug!(
                "Token type mismatch: expected '{}', got '{}'",
                expected_type,
                claims.token_type
            );
            return Err(TokenError::WrongTokenType);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CorsConfig, DatabaseConfig, LoggingConfig, OpenAiConfig, SecurityConfig, ServerConfig,
    };
    use secrecy::Secret;

    // Mock config for testing
    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:8000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                uri: Secret::new("mongodb://localhost:27017/fitai_test".to_string()),
                default_database: "fitai_test".to_string(),
                server_selection_timeout_secs: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                jwt_algorithm: "HS256".to_string(),
                access_token_exp_secs: 900,
                refresh_token_exp_secs: 604800,
            },
            cors: CorsConfig {
                frontend_api_base_url: "http://localhost:5173".to_string(),
                ios_api_base_url: "http://localhost:8000".to_string(),
            },
            openai: OpenAiConfig {
                api_key: Secret::new(String::new()),
            },
            environment: "test".to_string(),
        }
    }

    #[test]
    fn test_round_trip_recovers_subject() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = ObjectId::new();

        let token = service.generate_access_token(&user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_hex());
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = ObjectId::new();
        let token = service.generate_access_token(&user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        // At exactly exp the token is already expired
        assert_eq!(
            service.validate_at(&token, "access", claims.exp),
            Err(TokenError::Expired)
        );
        // One second before exp it is still valid
        assert!(service.validate_at(&token, "access", claims.exp - 1).is_ok());
        // One second after exp it stays expired
        assert_eq!(
            service.validate_at(&token, "access", claims.exp + 1),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_fifteen_minute_access_window() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = ObjectId::new();
        let token = service.generate_access_token(&user_id).unwrap();
        let issued_at = service.validate_access_token(&token).unwrap().iat;

        // Verifies at t0 + 14m59s, fails at t0 + 15m1s
        assert!(service.validate_at(&token, "access", issued_at + 899).is_ok());
        assert_eq!(
            service.validate_at(&token, "access", issued_at + 901),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_type_confusion_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = ObjectId::new();

        let access_token = service.generate_access_token(&user_id).unwrap();
        let refresh_token = service.generate_refresh_token(&user_id).unwrap();

        assert_eq!(
            service.validate_refresh_token(&access_token),
            Err(TokenError::WrongTokenType)
        );
        assert_eq!(
            service.validate_access_token(&refresh_token),
            Err(TokenError::WrongTokenType)
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert_eq!(
            service.validate_access_token("not-a-jwt"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_refresh_token_uses_longer_expiry() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let user_id = ObjectId::new();

        let pair = service.generate_token_pair(&user_id).unwrap();
        let access = service.validate_access_token(&pair.access_token).unwrap();
        let refresh = service.validate_refresh_token(&pair.refresh_token).unwrap();

        assert_eq!(access.exp - access.iat, 900);
        assert_eq!(refresh.exp - refresh.iat, 604800);
        assert_eq!(pair.expires_in, 900);
    }
}
