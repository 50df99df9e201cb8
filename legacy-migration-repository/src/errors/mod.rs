//! Error types for the legacy migration repository.
//! Consolidates and re-exports error types related to store operations.
mod file_store;
mod repository;

pub use file_store::FileStoreError;
pub use repository::RepositoryError;
