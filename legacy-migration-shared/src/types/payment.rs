use chrono::{DateTime, Utc};

/// A payment in a customer's payment history.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub legacy_id: Option<i32>,
    pub date: String,
    pub payment_method: String,
    pub amount: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
}

/// Insert shape for a payment. `customer_id` must be the new-store id of
/// the paying customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub legacy_id: Option<i32>,
    pub date: String,
    pub payment_method: String,
    pub amount: f64,
    pub comment: String,
    pub customer_id: i32,
}
