//! Mock legacy API client for testing and local development.
//!
//! The `MockLegacyApi` is pre-populated with typed records through
//! `register_*` calls, so tests run without network access. Endpoints are
//! identified by the same relative paths the live client requests
//! (`"employees"`, `"customers/7/clothes"`, ...); failures are injected per
//! endpoint and every call is appended to a request log tests can inspect.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::records::{
    LegacyClothingItem, LegacyCustomer, LegacyCustomerSummary, LegacyEmployee,
    LegacyEmployeeSummary, LegacyEncounter, LegacyEncounterSummary, LegacyEvent,
    LegacyEventSummary, LegacyPayment, LegacyTip,
};
use crate::{ApiError, LegacyApi, Result, Session};

const MOCK_TOKEN: &str = "mock-session-token";

/// Mock legacy API that serves registered records.
///
/// Use this for testing and local development without network access.
#[derive(Default)]
pub struct MockLegacyApi {
    employees: RwLock<Vec<LegacyEmployee>>,
    customers: RwLock<Vec<LegacyCustomer>>,
    /// Wardrobes keyed by legacy customer id.
    clothes: RwLock<HashMap<i32, Vec<LegacyClothingItem>>>,
    /// Payment histories keyed by legacy customer id.
    payments: RwLock<HashMap<i32, Vec<LegacyPayment>>>,
    encounters: RwLock<Vec<(i32, LegacyEncounter)>>,
    events: RwLock<Vec<(i32, LegacyEvent)>>,
    tips: RwLock<Vec<LegacyTip>>,
    employee_images: RwLock<HashMap<i32, Vec<u8>>>,
    customer_images: RwLock<HashMap<i32, Vec<u8>>>,
    clothing_images: RwLock<HashMap<i32, Vec<u8>>>,
    login_rejection: RwLock<Option<String>>,
    failing: RwLock<HashSet<String>>,
    malformed: RwLock<HashSet<String>>,
    requests: RwLock<Vec<String>>,
}

impl MockLegacyApi {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an employee; it appears in the listing and as a detail.
    pub fn register_employee(&self, employee: LegacyEmployee) {
        self.employees.write().unwrap().push(employee);
    }

    /// Register the profile image of an employee.
    pub fn register_employee_image(&self, id: i32, bytes: Vec<u8>) {
        self.employee_images.write().unwrap().insert(id, bytes);
    }

    /// Register a customer; it appears in the listing and as a detail.
    pub fn register_customer(&self, customer: LegacyCustomer) {
        self.customers.write().unwrap().push(customer);
    }

    /// Register the profile image of a customer.
    pub fn register_customer_image(&self, id: i32, bytes: Vec<u8>) {
        self.customer_images.write().unwrap().insert(id, bytes);
    }

    /// Register a clothing item in the wardrobe of a customer.
    pub fn register_clothing(&self, customer_id: i32, item: LegacyClothingItem) {
        self.clothes
            .write()
            .unwrap()
            .entry(customer_id)
            .or_default()
            .push(item);
    }

    /// Register the image of a clothing item.
    pub fn register_clothing_image(&self, id: i32, bytes: Vec<u8>) {
        self.clothing_images.write().unwrap().insert(id, bytes);
    }

    /// Register a payment in the history of a customer.
    pub fn register_payment(&self, customer_id: i32, payment: LegacyPayment) {
        self.payments
            .write()
            .unwrap()
            .entry(customer_id)
            .or_default()
            .push(payment);
    }

    /// Register an encounter under the given legacy id.
    pub fn register_encounter(&self, id: i32, encounter: LegacyEncounter) {
        self.encounters.write().unwrap().push((id, encounter));
    }

    /// Register an event under the given legacy id.
    pub fn register_event(&self, id: i32, event: LegacyEvent) {
        self.events.write().unwrap().push((id, event));
    }

    /// Register a tip.
    pub fn register_tip(&self, tip: LegacyTip) {
        self.tips.write().unwrap().push(tip);
    }

    /// Make `login` fail with the given rejection detail.
    pub fn reject_login(&self, detail: impl Into<String>) {
        *self.login_rejection.write().unwrap() = Some(detail.into());
    }

    /// Make the given endpoint respond with status 500.
    pub fn fail_endpoint(&self, endpoint: impl Into<String>) {
        self.failing.write().unwrap().insert(endpoint.into());
    }

    /// Make the given endpoint respond with an undecodable body.
    pub fn malform_endpoint(&self, endpoint: impl Into<String>) {
        self.malformed.write().unwrap().insert(endpoint.into());
    }

    /// Every endpoint requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    /// How many times the given endpoint was requested.
    pub fn requests_to(&self, endpoint: &str) -> usize {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|path| path.as_str() == endpoint)
            .count()
    }

    /// Record the call and apply any injected failure for the endpoint.
    fn touch(&self, endpoint: &str) -> Result<()> {
        self.requests.write().unwrap().push(endpoint.to_string());
        if self.failing.read().unwrap().contains(endpoint) {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
            });
        }
        if self.malformed.read().unwrap().contains(endpoint) {
            return Err(ApiError::Decode {
                endpoint: endpoint.to_string(),
                reason: "expected value at line 1 column 1".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LegacyApi for MockLegacyApi {
    async fn login(&self) -> Result<Session> {
        self.touch("employees/login")?;
        if let Some(detail) = self.login_rejection.read().unwrap().clone() {
            return Err(ApiError::AuthenticationRejected(detail));
        }
        Ok(Session {
            token: MOCK_TOKEN.to_string(),
        })
    }

    async fn employees(&self, _session: &Session) -> Result<Vec<LegacyEmployeeSummary>> {
        self.touch("employees")?;
        Ok(self
            .employees
            .read()
            .unwrap()
            .iter()
            .map(|e| LegacyEmployeeSummary {
                id: e.id,
                email: e.email.clone(),
                name: e.name.clone(),
                surname: e.surname.clone(),
            })
            .collect())
    }

    async fn employee(&self, _session: &Session, id: i32) -> Result<LegacyEmployee> {
        let endpoint = format!("employees/{id}");
        self.touch(&endpoint)?;
        self.employees
            .read()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn employee_image(&self, _session: &Session, id: i32) -> Result<Vec<u8>> {
        let endpoint = format!("employees/{id}/image");
        self.touch(&endpoint)?;
        self.employee_images
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn customers(&self, _session: &Session) -> Result<Vec<LegacyCustomerSummary>> {
        self.touch("customers")?;
        Ok(self
            .customers
            .read()
            .unwrap()
            .iter()
            .map(|c| LegacyCustomerSummary {
                id: c.id,
                email: c.email.clone(),
                name: c.name.clone(),
                surname: c.surname.clone(),
            })
            .collect())
    }

    async fn customer(&self, _session: &Session, id: i32) -> Result<LegacyCustomer> {
        let endpoint = format!("customers/{id}");
        self.touch(&endpoint)?;
        self.customers
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn customer_image(&self, _session: &Session, id: i32) -> Result<Vec<u8>> {
        let endpoint = format!("customers/{id}/image");
        self.touch(&endpoint)?;
        self.customer_images
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn customer_clothes(
        &self,
        _session: &Session,
        id: i32,
    ) -> Result<Vec<LegacyClothingItem>> {
        self.touch(&format!("customers/{id}/clothes"))?;
        Ok(self
            .clothes
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn customer_payments(&self, _session: &Session, id: i32) -> Result<Vec<LegacyPayment>> {
        self.touch(&format!("customers/{id}/payments_history"))?;
        Ok(self
            .payments
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn clothing_image(&self, _session: &Session, id: i32) -> Result<Vec<u8>> {
        let endpoint = format!("clothes/{id}/image");
        self.touch(&endpoint)?;
        self.clothing_images
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn encounters(&self, _session: &Session) -> Result<Vec<LegacyEncounterSummary>> {
        self.touch("encounters")?;
        Ok(self
            .encounters
            .read()
            .unwrap()
            .iter()
            .map(|(id, e)| LegacyEncounterSummary {
                id: *id,
                customer_id: e.customer_id,
                date: e.date.clone(),
                rating: e.rating,
            })
            .collect())
    }

    async fn encounter(&self, _session: &Session, id: i32) -> Result<LegacyEncounter> {
        let endpoint = format!("encounters/{id}");
        self.touch(&endpoint)?;
        self.encounters
            .read()
            .unwrap()
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e.clone())
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn events(&self, _session: &Session) -> Result<Vec<LegacyEventSummary>> {
        self.touch("events")?;
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .map(|(id, e)| LegacyEventSummary {
                id: *id,
                name: e.name.clone(),
                date: e.date.clone(),
                // The listing's duration is not carried into the detail
                // record, so the mock serves zero.
                duration: 0,
                max_participants: e.max_participants,
            })
            .collect())
    }

    async fn event(&self, _session: &Session, id: i32) -> Result<LegacyEvent> {
        let endpoint = format!("events/{id}");
        self.touch(&endpoint)?;
        self.events
            .read()
            .unwrap()
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e.clone())
            .ok_or(ApiError::Status {
                endpoint,
                status: 404,
            })
    }

    async fn tips(&self, _session: &Session) -> Result<Vec<LegacyTip>> {
        self.touch("tips")?;
        Ok(self.tips.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_customer(id: i32) -> LegacyCustomer {
        LegacyCustomer {
            id,
            email: format!("customer{id}@example.com"),
            name: "Test".to_string(),
            surname: "Customer".to_string(),
            birth_date: "1990-01-01".to_string(),
            gender: "Female".to_string(),
            description: "".to_string(),
            astrological_sign: "Aries".to_string(),
            phone_number: "000".to_string(),
            address: "1 Test Street".to_string(),
        }
    }

    async fn session(api: &MockLegacyApi) -> Session {
        api.login().await.unwrap()
    }

    #[tokio::test]
    async fn test_registered_customers_are_listed_and_fetchable() {
        let api = MockLegacyApi::new();
        api.register_customer(test_customer(7));
        api.register_customer(test_customer(8));

        let session = session(&api).await;
        let listed = api.customers(&session).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 7);

        let detail = api.customer(&session, 8).await.unwrap();
        assert_eq!(detail.email, "customer8@example.com");
    }

    #[tokio::test]
    async fn test_unknown_detail_is_a_404() {
        let api = MockLegacyApi::new();
        let session = session(&api).await;

        let result = api.customer(&session, 99).await;
        match result {
            Err(ApiError::Status { endpoint, status }) => {
                assert_eq!(endpoint, "customers/99");
                assert_eq!(status, 404);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_login_carries_the_detail() {
        let api = MockLegacyApi::new();
        api.reject_login("Invalid Email and Password combination.");

        let result = api.login().await;
        match result {
            Err(ApiError::AuthenticationRejected(detail)) => {
                assert!(detail.contains("Invalid Email"));
            }
            other => panic!("expected authentication rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_endpoint_returns_500() {
        let api = MockLegacyApi::new();
        api.register_customer(test_customer(7));
        api.fail_endpoint("customers");

        let session = session(&api).await;
        let result = api.customers(&session).await;
        assert!(matches!(
            result,
            Err(ApiError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_endpoint_returns_decode_error() {
        let api = MockLegacyApi::new();
        api.register_customer(test_customer(7));
        api.malform_endpoint("customers/7");

        let session = session(&api).await;
        let result = api.customer(&session, 7).await;
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_request_log_records_every_call() {
        let api = MockLegacyApi::new();
        api.register_customer(test_customer(7));

        let session = session(&api).await;
        let _ = api.customers(&session).await;
        let _ = api.customer_clothes(&session, 7).await;
        let _ = api.customer_clothes(&session, 7).await;

        assert_eq!(
            api.requests(),
            vec![
                "employees/login",
                "customers",
                "customers/7/clothes",
                "customers/7/clothes",
            ]
        );
        assert_eq!(api.requests_to("customers/7/clothes"), 2);
        assert_eq!(api.requests_to("customers/7/payments_history"), 0);
    }

    #[tokio::test]
    async fn test_empty_wardrobe_lists_as_empty() {
        let api = MockLegacyApi::new();
        let session = session(&api).await;

        let items = api.customer_clothes(&session, 7).await.unwrap();
        assert!(items.is_empty());
    }
}
