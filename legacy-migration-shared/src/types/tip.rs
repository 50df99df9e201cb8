use chrono::{DateTime, Utc};

/// A coaching tip shown to employees.
#[derive(Debug, Clone, PartialEq)]
pub struct Tip {
    pub id: i32,
    pub title: String,
    pub tip: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a tip.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTip {
    pub title: String,
    pub tip: String,
}
