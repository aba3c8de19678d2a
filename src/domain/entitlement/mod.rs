//! Entitlement domain: subscription plans and the free-tier usage counter

pub mod entities;
pub mod errors;
pub mod services;

pub use entities::{Entitlement, Plan};
pub use errors::EntitlementError;
pub use services::{SubscriptionProvider, UsageStore};
