//! Entitlement gate and usage metering

pub mod use_cases;

pub use use_cases::{ResolveEntitlementUseCase, UsageMeter, ensure_premium};
