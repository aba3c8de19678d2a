//! Entitlement gate and usage metering use cases

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::entitlement::{Entitlement, EntitlementError, SubscriptionProvider, UsageStore};
use crate::domain::identity::UserId;

/// Resolves `(plan, free_usage)` for an authenticated identity before the
/// request proceeds.
///
/// The plan lookup is the single source of truth and is never cached beyond
/// the request. Free-tier identities with no recorded counter get it
/// initialized to 0; premium identities are left untouched in the metadata
/// store.
pub struct ResolveEntitlementUseCase {
    subscription: Arc<dyn SubscriptionProvider>,
    usage: Arc<dyn UsageStore>,
}

impl ResolveEntitlementUseCase {
    pub fn new(subscription: Arc<dyn SubscriptionProvider>, usage: Arc<dyn UsageStore>) -> Self {
        Self { subscription, usage }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user))]
    pub async fn execute(&self, user: UserId) -> Result<Entitlement, EntitlementError> {
        let plan = self.subscription.plan(&user).await?;

        if plan.is_premium() {
            return Ok(Entitlement {
                user_id: user,
                plan,
                free_usage: 0,
            });
        }

        let free_usage = match self.usage.usage(&user).await? {
            Some(count) => count,
            None => {
                self.usage.set_usage(&user, 0).await?;
                0
            }
        };

        Ok(Entitlement {
            user_id: user,
            plan,
            free_usage,
        })
    }
}

/// Quota enforcement and the post-persistence counter increment shared by all
/// quota-limited operations.
pub struct UsageMeter {
    usage: Arc<dyn UsageStore>,
    free_limit: u32,
}

impl UsageMeter {
    pub fn new(usage: Arc<dyn UsageStore>, free_limit: u32) -> Self {
        Self { usage, free_limit }
    }

    /// Reject a quota-limited operation before any external call is made.
    /// No state is mutated on rejection.
    pub fn ensure_within_quota(&self, entitlement: &Entitlement) -> Result<(), ApplicationError> {
        if entitlement.within_quota(self.free_limit) {
            Ok(())
        } else {
            Err(ApplicationError::QuotaExceeded)
        }
    }

    /// Increment the counter after successful persistence. Premium identities
    /// are never incremented.
    pub async fn record(&self, entitlement: &Entitlement) -> Result<(), ApplicationError> {
        if entitlement.plan.is_premium() {
            return Ok(());
        }

        self.usage
            .set_usage(&entitlement.user_id, entitlement.free_usage + 1)
            .await?;
        Ok(())
    }
}

/// Reject premium-only operations for free-tier callers.
pub fn ensure_premium(entitlement: &Entitlement) -> Result<(), ApplicationError> {
    if entitlement.plan.is_premium() {
        Ok(())
    } else {
        Err(ApplicationError::PremiumRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::Plan;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixedPlanProvider(Plan);

    #[async_trait]
    impl SubscriptionProvider for FixedPlanProvider {
        async fn plan(&self, _user: &UserId) -> Result<Plan, EntitlementError> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct InMemoryUsageStore {
        counters: Mutex<HashMap<String, u32>>,
        writes: Mutex<u32>,
    }

    impl InMemoryUsageStore {
        fn with_usage(user: &str, value: u32) -> Self {
            let store = Self::default();
            store
                .counters
                .lock()
                .unwrap()
                .insert(user.to_string(), value);
            store
        }

        fn write_count(&self) -> u32 {
            *self.writes.lock().unwrap()
        }
    }

    #[async_trait]
    impl UsageStore for InMemoryUsageStore {
        async fn usage(&self, user: &UserId) -> Result<Option<u32>, EntitlementError> {
            Ok(self.counters.lock().unwrap().get(user.as_str()).copied())
        }

        async fn set_usage(&self, user: &UserId, value: u32) -> Result<(), EntitlementError> {
            *self.writes.lock().unwrap() += 1;
            self.counters
                .lock()
                .unwrap()
                .insert(user.as_str().to_string(), value);
            Ok(())
        }
    }

    #[tokio::test]
    async fn free_identity_with_recorded_usage_is_read_as_is() {
        let usage = Arc::new(InMemoryUsageStore::with_usage("user_1", 7));
        let gate =
            ResolveEntitlementUseCase::new(Arc::new(FixedPlanProvider(Plan::Free)), usage.clone());

        let entitlement = gate.execute(UserId::new("user_1")).await.unwrap();

        assert_eq!(entitlement.plan, Plan::Free);
        assert_eq!(entitlement.free_usage, 7);
        assert_eq!(usage.write_count(), 0, "no initialization write expected");
    }

    #[tokio::test]
    async fn unseen_free_identity_gets_counter_initialized_to_zero() {
        let usage = Arc::new(InMemoryUsageStore::default());
        let gate =
            ResolveEntitlementUseCase::new(Arc::new(FixedPlanProvider(Plan::Free)), usage.clone());

        let entitlement = gate.execute(UserId::new("user_new")).await.unwrap();

        assert_eq!(entitlement.free_usage, 0);
        assert_eq!(usage.write_count(), 1);
        assert_eq!(
            usage.usage(&UserId::new("user_new")).await.unwrap(),
            Some(0)
        );
    }

    #[tokio::test]
    async fn premium_identity_skips_the_metadata_write() {
        let usage = Arc::new(InMemoryUsageStore::with_usage("user_p", 4));
        let gate = ResolveEntitlementUseCase::new(
            Arc::new(FixedPlanProvider(Plan::Premium)),
            usage.clone(),
        );

        let entitlement = gate.execute(UserId::new("user_p")).await.unwrap();

        assert_eq!(entitlement.plan, Plan::Premium);
        assert_eq!(entitlement.free_usage, 0);
        assert_eq!(usage.write_count(), 0);
        // the stale counter is left alone, not reset
        assert_eq!(usage.usage(&UserId::new("user_p")).await.unwrap(), Some(4));
    }

    #[tokio::test]
    async fn meter_rejects_at_the_limit_without_mutation() {
        let usage = Arc::new(InMemoryUsageStore::with_usage("user_1", 10));
        let meter = UsageMeter::new(usage.clone(), 10);
        let entitlement = Entitlement {
            user_id: UserId::new("user_1"),
            plan: Plan::Free,
            free_usage: 10,
        };

        let result = meter.ensure_within_quota(&entitlement);

        assert!(matches!(result, Err(ApplicationError::QuotaExceeded)));
        assert_eq!(usage.write_count(), 0);
    }

    #[tokio::test]
    async fn meter_records_exactly_one_increment_for_free_tier() {
        let usage = Arc::new(InMemoryUsageStore::with_usage("user_1", 3));
        let meter = UsageMeter::new(usage.clone(), 10);
        let entitlement = Entitlement {
            user_id: UserId::new("user_1"),
            plan: Plan::Free,
            free_usage: 3,
        };

        meter.record(&entitlement).await.unwrap();

        assert_eq!(usage.usage(&UserId::new("user_1")).await.unwrap(), Some(4));
        assert_eq!(usage.write_count(), 1);
    }

    #[tokio::test]
    async fn meter_never_touches_premium_counters() {
        let usage = Arc::new(InMemoryUsageStore::default());
        let meter = UsageMeter::new(usage.clone(), 10);
        let entitlement = Entitlement {
            user_id: UserId::new("user_p"),
            plan: Plan::Premium,
            free_usage: 0,
        };

        meter.record(&entitlement).await.unwrap();

        assert_eq!(usage.write_count(), 0);
    }

    #[test]
    fn premium_check_matches_plan() {
        let free = Entitlement {
            user_id: UserId::new("u"),
            plan: Plan::Free,
            free_usage: 0,
        };
        let premium = Entitlement {
            user_id: UserId::new("u"),
            plan: Plan::Premium,
            free_usage: 0,
        };

        assert!(matches!(
            ensure_premium(&free),
            Err(ApplicationError::PremiumRequired)
        ));
        assert!(ensure_premium(&premium).is_ok());
    }
}
