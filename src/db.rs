//! MongoDB 连接与索引管理
//! 提供客户端初始化、启动 ping、索引创建和健康检查

use crate::config::DatabaseConfig;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};
use secrecy::ExposeSecret;
use std::time::Duration;

/// 连接 MongoDB 并返回数据库句柄
/// 数据库名取自 URI 路径，缺省时回退到配置的默认库名
pub async fn connect(config: &DatabaseConfig) -> Result<Database, DbError> {
    tracing::debug!("Connecting to MongoDB...");

    let mut options = ClientOptions::parse(config.uri.expose_secret())
        .await
        .map_err(|e| DbError::InvalidUri(e.to_string()))?;
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = Some(format!("fitai-service/{}", env!("CARGO_PKG_VERSION")));

    let client =
        Client::with_options(options).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(&config.default_database));

    // 启动时验证连通性
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| {
            tracing::error!("MongoDB ping failed: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(database = %database.name(), "MongoDB connected");

    Ok(database)
}

/// 创建集合索引
/// users.email 与 refresh_tokens.token_hash 唯一；refresh_tokens.expires_at 上的
/// TTL 索引让到期文档由服务器自动清除
pub async fn ensure_indexes(db: &Database) -> Result<(), DbError> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<Document>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
        )
        .await
        .map_err(|e| DbError::IndexFailed(e.to_string()))?;

    db.collection::<Document>("refresh_tokens")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "token_hash": 1 })
                .options(unique)
                .build(),
        )
        .await
        .map_err(|e| DbError::IndexFailed(e.to_string()))?;

    db.collection::<Document>("refresh_tokens")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "expires_at": 1 })
                .options(
                    IndexOptions::builder()
                        .expire_after(Duration::from_secs(0))
                        .build(),
                )
                .build(),
        )
        .await
        .map_err(|e| DbError::IndexFailed(e.to_string()))?;

    db.collection::<Document>("exercises")
        .create_index(IndexModel::builder().keys(doc! { "name": 1 }).build())
        .await
        .map_err(|e| DbError::IndexFailed(e.to_string()))?;

    tracing::info!("MongoDB indexes ensured");
    Ok(())
}

/// 数据库健康检查（就绪探针）
pub async fn health_check(db: &Database) -> HealthStatus {
    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => {
            tracing::debug!("Database health check: OK");
            HealthStatus::Healthy
        }
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Invalid MongoDB URI: {0}")]
    InvalidUri(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Index creation failed: {0}")]
    IndexFailed(String),
}

/// 健康状态
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status() {
        let unhealthy = HealthStatus::Unhealthy("Connection refused".to_string());

        match unhealthy {
            HealthStatus::Unhealthy(msg) => assert_eq!(msg, "Connection refused"),
            _ => panic!("expected unhealthy"),
        }
    }
}
