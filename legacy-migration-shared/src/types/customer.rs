use chrono::{DateTime, Utc};

use super::FileId;

/// A customer row as held by the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub legacy_id: Option<i32>,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub description: String,
    pub astrological_sign: String,
    pub phone_number: String,
    pub address: String,
    pub image_id: Option<FileId>,
    pub created_at: DateTime<Utc>,
    /// The coach assigned to this customer. Migration leaves it unset;
    /// assignment happens through the CRUD surface afterwards.
    pub employee_id: Option<i32>,
}

/// Insert shape for a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub legacy_id: Option<i32>,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub description: String,
    pub astrological_sign: String,
    pub phone_number: String,
    pub address: String,
    pub employee_id: Option<i32>,
}
