//! Client for the legacy REST API the migration drains.
//!
//! This crate provides:
//! - [`LegacyApi`] trait abstracting authenticated access to the legacy service
//! - [`HttpLegacyApi`] production client backed by reqwest
//! - [`MockLegacyApi`] mock client for testing with registered records,
//!   failure injection and a request log
//! - [`records`] typed wire records for every served endpoint
//!
//! Every data fetch carries the tenant group key (`X-Group-Authorization`)
//! and a bearer token obtained from [`LegacyApi::login`]. Callers
//! authenticate once per migration cycle and pass the [`Session`] into each
//! fetch; the client itself never re-authenticates.

mod mock;
pub mod records;

pub use mock::MockLegacyApi;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::records::{
    LegacyClothingItem, LegacyCustomer, LegacyCustomerSummary, LegacyEmployee,
    LegacyEmployeeSummary, LegacyEncounter, LegacyEncounterSummary, LegacyEvent,
    LegacyEventSummary, LegacyPayment, LegacyTip,
};

/// Header carrying the tenant group key on every request.
const GROUP_AUTH_HEADER: &str = "X-Group-Authorization";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("could not authenticate to api: {0}")]
    AuthenticationRejected(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Credentials for the legacy API: the tenant group key plus the service
/// account used to log in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub group_key: String,
    pub email: String,
    pub password: String,
}

/// Bearer token returned by [`LegacyApi::login`].
///
/// Acquired once per migration cycle and passed by reference into every
/// subsequent fetch of that cycle.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
}

/// Trait for authenticated access to the legacy API.
///
/// This trait abstracts the remote service to enable dependency injection
/// and mocking for testing. Production code uses [`HttpLegacyApi`], tests
/// use [`MockLegacyApi`].
#[async_trait]
pub trait LegacyApi: Send + Sync {
    /// Authenticate the service account and obtain a session token.
    async fn login(&self) -> Result<Session>;

    /// List employee summaries.
    async fn employees(&self, session: &Session) -> Result<Vec<LegacyEmployeeSummary>>;

    /// Fetch one full employee record.
    async fn employee(&self, session: &Session, id: i32) -> Result<LegacyEmployee>;

    /// Fetch the raw profile image bytes of an employee.
    async fn employee_image(&self, session: &Session, id: i32) -> Result<Vec<u8>>;

    /// List customer summaries.
    async fn customers(&self, session: &Session) -> Result<Vec<LegacyCustomerSummary>>;

    /// Fetch one full customer record.
    async fn customer(&self, session: &Session, id: i32) -> Result<LegacyCustomer>;

    /// Fetch the raw profile image bytes of a customer.
    async fn customer_image(&self, session: &Session, id: i32) -> Result<Vec<u8>>;

    /// List the wardrobe of a customer.
    async fn customer_clothes(&self, session: &Session, id: i32)
        -> Result<Vec<LegacyClothingItem>>;

    /// List the payment history of a customer.
    async fn customer_payments(&self, session: &Session, id: i32) -> Result<Vec<LegacyPayment>>;

    /// Fetch the raw image bytes of a clothing item.
    async fn clothing_image(&self, session: &Session, id: i32) -> Result<Vec<u8>>;

    /// List encounter summaries.
    async fn encounters(&self, session: &Session) -> Result<Vec<LegacyEncounterSummary>>;

    /// Fetch one full encounter record.
    async fn encounter(&self, session: &Session, id: i32) -> Result<LegacyEncounter>;

    /// List event summaries.
    async fn events(&self, session: &Session) -> Result<Vec<LegacyEventSummary>>;

    /// Fetch one full event record.
    async fn event(&self, session: &Session, id: i32) -> Result<LegacyEvent>;

    /// List tips. Tips have no detail endpoint.
    async fn tips(&self, session: &Session) -> Result<Vec<LegacyTip>>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Production client that talks to a live legacy API deployment.
pub struct HttpLegacyApi {
    base_url: String,
    client: ReqwestClient,
    credentials: Credentials,
}

impl HttpLegacyApi {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        HttpLegacyApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
            credentials,
        }
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// Decoding goes through the response bytes rather than the reqwest
    /// JSON shortcut so decode failures carry the endpoint name.
    async fn get_json<T: DeserializeOwned>(&self, session: &Session, endpoint: &str) -> Result<T> {
        let bytes = self.get_bytes(session, endpoint).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// GET an endpoint and return the raw response bytes.
    async fn get_bytes(&self, session: &Session, endpoint: &str) -> Result<Vec<u8>> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        let res = self
            .client
            .get(&url)
            .header(GROUP_AUTH_HEADER, &self.credentials.group_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", session.token),
            )
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl LegacyApi for HttpLegacyApi {
    async fn login(&self) -> Result<Session> {
        let url = format!("{}/api/employees/login", self.base_url);
        let res = self
            .client
            .post(&url)
            .header(GROUP_AUTH_HEADER, &self.credentials.group_key)
            .json(&LoginRequest {
                email: &self.credentials.email,
                password: &self.credentials.password,
            })
            .send()
            .await?;

        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            // The service explains rejections in a `detail` field.
            let detail = serde_json::from_slice::<ErrorBody>(&bytes)
                .map(|body| body.detail)
                .unwrap_or_else(|_| "could not authenticate to api".to_string());
            return Err(ApiError::AuthenticationRejected(detail));
        }

        let body: LoginResponse =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
                endpoint: "employees/login".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Session {
            token: body.access_token,
        })
    }

    async fn employees(&self, session: &Session) -> Result<Vec<LegacyEmployeeSummary>> {
        self.get_json(session, "employees").await
    }

    async fn employee(&self, session: &Session, id: i32) -> Result<LegacyEmployee> {
        self.get_json(session, &format!("employees/{id}")).await
    }

    async fn employee_image(&self, session: &Session, id: i32) -> Result<Vec<u8>> {
        self.get_bytes(session, &format!("employees/{id}/image")).await
    }

    async fn customers(&self, session: &Session) -> Result<Vec<LegacyCustomerSummary>> {
        self.get_json(session, "customers").await
    }

    async fn customer(&self, session: &Session, id: i32) -> Result<LegacyCustomer> {
        self.get_json(session, &format!("customers/{id}")).await
    }

    async fn customer_image(&self, session: &Session, id: i32) -> Result<Vec<u8>> {
        self.get_bytes(session, &format!("customers/{id}/image")).await
    }

    async fn customer_clothes(
        &self,
        session: &Session,
        id: i32,
    ) -> Result<Vec<LegacyClothingItem>> {
        self.get_json(session, &format!("customers/{id}/clothes")).await
    }

    async fn customer_payments(&self, session: &Session, id: i32) -> Result<Vec<LegacyPayment>> {
        self.get_json(session, &format!("customers/{id}/payments_history"))
            .await
    }

    async fn clothing_image(&self, session: &Session, id: i32) -> Result<Vec<u8>> {
        self.get_bytes(session, &format!("clothes/{id}/image")).await
    }

    async fn encounters(&self, session: &Session) -> Result<Vec<LegacyEncounterSummary>> {
        self.get_json(session, "encounters").await
    }

    async fn encounter(&self, session: &Session, id: i32) -> Result<LegacyEncounter> {
        self.get_json(session, &format!("encounters/{id}")).await
    }

    async fn events(&self, session: &Session) -> Result<Vec<LegacyEventSummary>> {
        self.get_json(session, "events").await
    }

    async fn event(&self, session: &Session, id: i32) -> Result<LegacyEvent> {
        self.get_json(session, &format!("events/{id}")).await
    }

    async fn tips(&self, session: &Session) -> Result<Vec<LegacyTip>> {
        self.get_json(session, "tips").await
    }
}
