//! Clerk-style identity provider client
//!
//! Implements both entitlement interfaces against the provider's user API:
//! the plan flag is read from the user's public metadata and the free-usage
//! counter lives in private metadata.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::SubscriptionConfig;
use crate::domain::entitlement::{EntitlementError, Plan, SubscriptionProvider, UsageStore};
use crate::domain::identity::UserId;

const FREE_USAGE_KEY: &str = "free_usage";

/// REST client for the subscription provider's user API.
pub struct ClerkClient {
    client: Client,
    base_url: String,
    secret_key: String,
    premium_plan: String,
}

impl ClerkClient {
    pub fn new(config: &SubscriptionConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            premium_plan: config.premium_plan.clone(),
        }
    }

    async fn fetch_user(&self, user: &UserId) -> Result<ProviderUser, EntitlementError> {
        let response = self
            .client
            .get(format!("{}/users/{}", self.base_url, user))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| EntitlementError::provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Subscription provider error: {}", text);
            return Err(EntitlementError::provider(format!(
                "API error {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EntitlementError::provider(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl SubscriptionProvider for ClerkClient {
    async fn plan(&self, user: &UserId) -> Result<Plan, EntitlementError> {
        let provider_user = self.fetch_user(user).await?;

        let plan = provider_user
            .public_metadata
            .get("plan")
            .and_then(|value| value.as_str())
            .filter(|plan| *plan == self.premium_plan)
            .map(|_| Plan::Premium)
            .unwrap_or(Plan::Free);

        debug!(user_id = %user, plan = plan.as_str(), "Resolved subscription plan");
        Ok(plan)
    }
}

#[async_trait]
impl UsageStore for ClerkClient {
    async fn usage(&self, user: &UserId) -> Result<Option<u32>, EntitlementError> {
        let provider_user = self
            .fetch_user(user)
            .await
            .map_err(|e| EntitlementError::usage_store(e.to_string()))?;

        Ok(provider_user
            .private_metadata
            .get(FREE_USAGE_KEY)
            .and_then(|value| value.as_u64())
            .map(|count| count as u32))
    }

    async fn set_usage(&self, user: &UserId, value: u32) -> Result<(), EntitlementError> {
        let body = json!({ "private_metadata": { "free_usage": value } });

        let response = self
            .client
            .patch(format!("{}/users/{}/metadata", self.base_url, user))
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EntitlementError::usage_store(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Usage metadata write failed: {}", text);
            return Err(EntitlementError::usage_store(format!(
                "API error {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    #[serde(default)]
    public_metadata: serde_json::Value,
    #[serde(default)]
    private_metadata: serde_json::Value,
}
