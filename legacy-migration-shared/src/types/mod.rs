mod clothing;
mod customer;
mod employee;
mod encounter;
mod event;
mod id_pair;
mod payment;
mod tip;

pub use clothing::{ClothingItem, NewClothingItem};
pub use customer::{Customer, NewCustomer};
pub use employee::{Employee, NewEmployee};
pub use encounter::{Encounter, NewEncounter};
pub use event::{Event, NewEvent};
pub use id_pair::IdPair;
pub use payment::{NewPayment, Payment};
pub use tip::{NewTip, Tip};

/// Identifier of a binary asset held by the file store.
pub type FileId = uuid::Uuid;
