use chrono::{DateTime, Utc};

use super::FileId;

/// A clothing item belonging to a customer's wardrobe.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothingItem {
    pub id: i32,
    pub legacy_id: Option<i32>,
    /// Garment category, e.g. "hat/cap" or "shoes".
    pub kind: String,
    pub image_id: Option<FileId>,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
}

/// Insert shape for a clothing item. `customer_id` must be the new-store
/// id of the owning customer, never the legacy one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClothingItem {
    pub legacy_id: Option<i32>,
    pub kind: String,
    pub customer_id: i32,
}
