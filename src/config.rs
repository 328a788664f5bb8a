//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:8000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB 连接 URI（使用 Secret 包装，防止日志泄露）
    pub uri: Secret<String>,
    /// URI 中没有数据库名时使用的默认库名
    pub default_database: String,
    /// 服务器选择超时时间（秒）
    pub server_selection_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 密钥（使用 Secret 包装，防止日志泄露）
    /// 没有默认值：缺失即启动失败
    pub jwt_secret: Secret<String>,
    /// JWT 签名算法，固定为 HS256
    pub jwt_algorithm: String,
    /// 访问令牌过期时间（秒）
    pub access_token_exp_secs: u64,
    /// 刷新令牌过期时间（秒）
    pub refresh_token_exp_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Web 客户端源（Vite 开发服务器）
    pub frontend_api_base_url: String,
    /// iOS 客户端源
    pub ios_api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// OpenAI API 凭证（部署契约的一部分，后端当前没有调用点）
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
    pub openai: OpenAiConfig,
    /// 环境标签: development, staging, production
    pub environment: String,
}

/// 部署契约环境变量（与 web/iOS 客户端共享的扁平命名）
/// 优先级高于 FITAI_ 前缀的配置项
const CONTRACT_ENV_VARS: &[(&str, &str)] = &[
    ("MONGODB_URI", "database.uri"),
    ("MONGODB_URL", "database.uri"),
    ("OPENAI_API_KEY", "openai.api_key"),
    ("JWT_SECRET", "security.jwt_secret"),
    ("JWT_ALGORITHM", "security.jwt_algorithm"),
    ("FRONTEND_API_BASE_URL", "cors.frontend_api_base_url"),
    ("IOS_API_BASE_URL", "cors.ios_api_base_url"),
];

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:8000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.uri", "mongodb://localhost:27017/fitai")?
            .set_default("database.default_database", "fitai")?
            .set_default("database.server_selection_timeout_secs", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.jwt_algorithm", "HS256")?
            .set_default("security.access_token_exp_secs", 900)?
            .set_default("security.refresh_token_exp_secs", 604800)?
            .set_default("cors.frontend_api_base_url", "http://localhost:5173")?
            .set_default("cors.ios_api_base_url", "http://localhost:8000")?
            .set_default("openai.api_key", "")?
            .set_default("environment", "development")?;

        // 从环境变量加载配置（前缀为 FITAI_）
        settings = settings.add_source(
            Environment::with_prefix("FITAI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 部署契约变量覆盖
        for (var, key) in CONTRACT_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                settings = settings.set_override(*key, value)?;
            }
        }

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证 MongoDB URI 方案
        let uri = self.database.uri.expose_secret();
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::Message(
                "database.uri must be a mongodb:// or mongodb+srv:// URI".to_string(),
            ));
        }

        // 签名算法固定为 HS256，拒绝其他值（防算法混淆）
        if self.security.jwt_algorithm != "HS256" {
            return Err(ConfigError::Message(format!(
                "Unsupported JWT algorithm: {}. Only HS256 is supported",
                self.security.jwt_algorithm
            )));
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        // 验证令牌过期时间
        if self.security.access_token_exp_secs < 60 || self.security.access_token_exp_secs > 86400 {
            return Err(ConfigError::Message(
                "access_token_exp_secs must be between 60 and 86400 (1 minute to 24 hours)"
                    .to_string(),
            ));
        }

        if self.security.refresh_token_exp_secs < 3600
            || self.security.refresh_token_exp_secs > 2592000
        {
            return Err(ConfigError::Message(
                "refresh_token_exp_secs must be between 3600 and 2592000 (1 hour to 30 days)"
                    .to_string(),
            ));
        }

        // 验证 CORS 源
        for origin in [&self.cors.frontend_api_base_url, &self.cors.ios_api_base_url] {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Message(format!(
                    "CORS origin must start with http:// or https://: {}",
                    origin
                )));
            }
        }

        Ok(())
    }
}
