use chrono::{DateTime, Utc};

/// A planned activity hosted by an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub date: String,
    pub max_participants: i32,
    pub location_x: String,
    pub location_y: String,
    /// Event category, e.g. "speed dating".
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub employee_id: i32,
}

/// Insert shape for an event. `employee_id` must already be remapped to
/// the new-store id of the hosting employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub max_participants: i32,
    pub location_x: String,
    pub location_y: String,
    pub kind: String,
    pub employee_id: i32,
}
