//! Use cases and shared application services

pub mod creations;
pub mod entitlement;
pub mod errors;

pub use errors::ApplicationError;
