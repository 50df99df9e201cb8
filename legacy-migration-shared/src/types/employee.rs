use chrono::{DateTime, Utc};

use super::FileId;

/// An employee row as held by the local store.
///
/// `legacy_id` records the identifier the record carried in the remote
/// legacy API so later passes can resolve references to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub legacy_id: Option<i32>,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub work: String,
    pub image_id: Option<FileId>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for an employee. The store assigns `id` and `created_at`;
/// `image_id` is attached by the asset phase afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub legacy_id: Option<i32>,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub work: String,
}
