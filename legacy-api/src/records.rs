//! Typed records served by the legacy API.
//!
//! List endpoints serve trimmed summary shapes; detail endpoints serve the
//! full record. Field names mirror the wire keys (snake_case); `type` is a
//! Rust keyword, so clothing and event categories decode into `kind`.

use serde::Deserialize;

/// Entry of the `/api/employees` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEmployeeSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
}

/// Full employee record from `/api/employees/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEmployee {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub work: String,
}

/// Entry of the `/api/customers` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyCustomerSummary {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
}

/// Full customer record from `/api/customers/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyCustomer {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub birth_date: String,
    pub gender: String,
    pub description: String,
    pub astrological_sign: String,
    pub phone_number: String,
    pub address: String,
}

/// Wardrobe entry from `/api/customers/{id}/clothes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyClothingItem {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Payment entry from `/api/customers/{id}/payments_history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyPayment {
    pub id: i32,
    pub date: String,
    pub payment_method: String,
    pub amount: f64,
    pub comment: String,
}

/// Entry of the `/api/encounters` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEncounterSummary {
    pub id: i32,
    pub customer_id: i32,
    pub date: String,
    pub rating: i32,
}

/// Full encounter record from `/api/encounters/{id}`.
///
/// `customer_id` is a legacy customer id; the migration remaps it before
/// insert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEncounter {
    pub date: String,
    pub rating: i32,
    pub comment: String,
    pub source: String,
    pub customer_id: i32,
}

/// Entry of the `/api/events` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEventSummary {
    pub id: i32,
    pub name: String,
    pub date: String,
    pub duration: i32,
    pub max_participants: i32,
}

/// Full event record from `/api/events/{id}`.
///
/// `employee_id` is a legacy employee id; the migration remaps it before
/// insert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyEvent {
    pub name: String,
    pub date: String,
    pub max_participants: i32,
    pub location_x: String,
    pub location_y: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub employee_id: i32,
}

/// Tip record from `/api/tips`. Tips have no detail endpoint; the listing
/// carries the whole record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyTip {
    pub title: String,
    pub tip: String,
}
