//! Entitlement provider interfaces
//!
//! Both the plan flag and the usage counter live with the external identity
//! provider. The gate only sees these two narrow interfaces, which keeps it
//! unit-testable without the real provider.

use async_trait::async_trait;

use crate::domain::entitlement::entities::Plan;
use crate::domain::entitlement::errors::EntitlementError;
use crate::domain::identity::UserId;

/// Authoritative plan lookup. Never cached beyond the request.
#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
    async fn plan(&self, user: &UserId) -> Result<Plan, EntitlementError>;
}

/// Per-identity free-usage counter held in the provider's metadata store.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// `Ok(None)` means the counter was never initialized for this identity.
    async fn usage(&self, user: &UserId) -> Result<Option<u32>, EntitlementError>;

    async fn set_usage(&self, user: &UserId, value: u32) -> Result<(), EntitlementError>;
}
