//! Atelier - AI creation studio backend
//!
//! Authenticated users invoke third-party AI services (text generation, image
//! generation, background/object removal, resume review), results are
//! persisted as creations, and published creations can be browsed and liked.
//! The entitlement gate in front of every paid operation meters free-tier
//! usage against the subscription provider's per-user metadata.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
