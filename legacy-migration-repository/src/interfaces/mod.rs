//! This module defines and re-exports the repository interfaces of the
//! local store. It serves as a central point for accessing traits related
//! to entity persistence and binary asset storage.
mod clothing;
mod customers;
mod employees;
mod encounters;
mod events;
mod files;
mod payments;
mod tips;

pub use clothing::ClothingRepository;
pub use customers::CustomerRepository;
pub use employees::EmployeeRepository;
pub use encounters::EncounterRepository;
pub use events::EventRepository;
pub use files::{FileStore, StoredFile};
pub use payments::PaymentRepository;
pub use tips::TipRepository;
