//! # Legacy Migration Pipeline
//! This crate defines the core traits and modules for moving records out of
//! the legacy CRM into the new store.
//! It includes the per-entity migrators, the orchestrator that runs one
//! migration cycle in dependency order, the scheduler that repeats cycles,
//! progress reporting, and error handling.
pub mod migrators;
pub mod orchestrator;
pub mod progress;
pub mod scheduler;

pub mod errors;
