//! Configuration validation module

use crate::config::{AuthConfig, Config, DatabaseConfig, QuotaConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Database configuration error: {message}")]
    Database { message: String },

    #[error("Authentication configuration error: {message}")]
    Auth { message: String },

    #[error("Quota configuration error: {message}")]
    Quota { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn quota(message: impl Into<String>) -> Self {
        Self::Quota {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::server("Port must be in range 1-65535"));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server("Request timeout must be positive"));
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::database(
                "Database URL is required. Set ATELIER__DATABASE__URL or DATABASE_URL",
            ));
        }

        if self.max_connections == 0 {
            return Err(ValidationError::database(
                "max_connections must be positive",
            ));
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::auth(
                "jwt_secret is required for session verification",
            ));
        }

        if self.jwt_secret.len() < 16 {
            return Err(ValidationError::auth(
                "jwt_secret must be at least 16 characters",
            ));
        }

        Ok(())
    }
}

impl Validate for QuotaConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.free_limit == 0 {
            return Err(ValidationError::quota("free_limit must be positive"));
        }

        if self.max_resume_bytes == 0 {
            return Err(ValidationError::quota("max_resume_bytes must be positive"));
        }

        Ok(())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.quota.validate()?;
        Ok(())
    }
}
