use chrono::{DateTime, Utc};

/// A dating encounter reported for a customer.
///
/// Encounters do not record a legacy id: nothing references them across
/// migration passes, so nothing ever needs to look one up.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub id: i32,
    pub date: String,
    pub rating: i32,
    pub comment: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
}

/// Insert shape for an encounter. `customer_id` must already be remapped
/// to the new-store id of the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEncounter {
    pub date: String,
    pub rating: i32,
    pub comment: String,
    pub source: String,
    pub customer_id: i32,
}
