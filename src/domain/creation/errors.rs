//! Creation domain errors

/// Errors from the creation store
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("Database error: {message}")]
    Database { message: String },
}

impl CreationError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
