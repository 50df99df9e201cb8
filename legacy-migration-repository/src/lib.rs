//! # Legacy Migration Repository
//! This crate provides traits and implementations for the local store the
//! migration writes into. It includes definitions for errors, per-entity
//! repository interfaces, the binary file store, concrete implementations
//! for PostgreSQL and in-memory implementations for tests and local
//! development.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::{FileStoreError, RepositoryError};
pub use interfaces::{
    ClothingRepository, CustomerRepository, EmployeeRepository, EncounterRepository,
    EventRepository, FileStore, PaymentRepository, StoredFile, TipRepository,
};
