//! PostgreSQL repository implementations

pub mod creation_repository;

pub use creation_repository::SqlxCreationRepository;
