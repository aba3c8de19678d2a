//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub subscription: SubscriptionConfig,
    pub llm: LlmConfig,
    pub image: ImageConfig,
    pub media: MediaConfig,
    pub quota: QuotaConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve Swagger UI at /docs
    pub enable_docs: bool,
    /// Per-request timeout applied by the timeout layer
    pub request_timeout_seconds: u64,
    /// Multipart body ceiling; the 5 MiB resume rule is enforced per-handler
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 120,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// PostgreSQL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: Option<u32>,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: Option<u64>,
    pub max_lifetime_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_idle: None,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via RUST_LOG
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Session token verification configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider's session tokens
    pub jwt_secret: String,
    /// Expected issuer claim, checked when set
    pub issuer: Option<String>,
}

/// Subscription provider (Clerk-style user API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    pub base_url: String,
    pub secret_key: String,
    /// Plan slug that grants unmetered access
    pub premium_plan: String,
    pub timeout_seconds: u64,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.clerk.com/v1".to_string(),
            secret_key: String::new(),
            premium_plan: "premium".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Text-generation provider configuration (OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

/// Text-to-image provider configuration (Clipdrop)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://clipdrop-api.co".to_string(),
            api_key: String::new(),
            timeout_seconds: 60,
        }
    }
}

/// Media store configuration (Cloudinary)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_seconds: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_seconds: 60,
        }
    }
}

/// Usage metering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Metered operations allowed per free-tier identity
    pub free_limit: u32,
    /// Upper bound on resume uploads, checked before any provider call
    pub max_resume_bytes: usize,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            free_limit: 10,
            max_resume_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from config files and ATELIER__* environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ATELIER_ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        let settings = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("ATELIER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = Config::default();
        assert_eq!(config.quota.free_limit, 10);
        assert_eq!(config.quota.max_resume_bytes, 5 * 1024 * 1024);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.subscription.premium_plan, "premium");
    }

    #[test]
    fn upload_ceiling_admits_a_full_resume() {
        let config = Config::default();
        assert!(config.server.max_upload_bytes > config.quota.max_resume_bytes);
    }
}
