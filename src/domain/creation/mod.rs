//! Creation domain: persisted records of AI-generated artifacts

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{Creation, NewCreation};
pub use errors::CreationError;
pub use repositories::ICreationRepository;
pub use value_objects::{CreationId, CreationKind, LikeOutcome};
