//! Entitlement domain errors

/// Errors from the subscription provider or its metadata store
#[derive(Debug, thiserror::Error)]
pub enum EntitlementError {
    #[error("Subscription provider error: {message}")]
    Provider { message: String },

    #[error("Usage metadata error: {message}")]
    UsageStore { message: String },
}

impl EntitlementError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn usage_store(message: impl Into<String>) -> Self {
        Self::UsageStore {
            message: message.into(),
        }
    }
}
