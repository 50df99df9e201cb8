//! # Legacy Migration
//!
//! Scheduled service that moves the dating agency's records out of the
//! legacy CRM API and into the new PostgreSQL store.
//!
//! ## Architecture
//!
//! Each migration cycle authenticates once, then runs a fixed plan of
//! per-entity migrators:
//!
//! 1. **Employees**: the staff directory and profile photos
//! 2. **Customers**: profiles with photos, wardrobes and payment history
//! 3. **Encounters**: dating reports, remapped to the migrated customers
//! 4. **Tips**: coaching advice
//! 5. **Events**: planned activities, remapped to the migrated employees
//!
//! The scheduler repeats cycles once a day until shut down.
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`errors`]: Error types for the service

pub mod config;
pub mod errors;

pub use config::Dependencies;
pub use errors::MigrationError;
