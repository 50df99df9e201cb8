//! # Legacy Migration Shared
//! This crate defines the domain types shared across the legacy migration
//! workspace: the stored and insert shapes of every migrated entity family,
//! the id pair handed to nested child migrations, and the stored-file id.
pub mod types;
