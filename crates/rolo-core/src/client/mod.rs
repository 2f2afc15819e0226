//! API client for the rolo backend.
//!
//! The client is the single place where transport outcomes are classified:
//!
//! - 2xx: success, body decoded as JSON (raw text for the export endpoint)
//! - 401: the session is force-cleared and the navigator is pointed at the
//!   login surface before the caller sees [`Error::Unauthorized`]
//! - other non-2xx: [`Error::Api`] carrying the server's `detail` message
//! - no response at all: [`Error::Network`]
//!
//! Every request re-reads the bearer token from the session store at issue
//! time, so a cleared session is never followed by a stale header.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::types::*;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Navigation side effect raised when a request comes back 401. The analog
/// of redirecting the UI to its login entry point.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// Navigator for consumers with no login surface to jump to.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn to_login(&self) {
        warn!("session expired, login required");
    }
}

/// Non-2xx error body; the backend reports failures as `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// API client for the rolo backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new API client from config.
    pub fn new(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an account.
    pub async fn register(&self, req: &RegisterRequest) -> Result<User> {
        self.post("/auth/register", req).await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse> {
        self.post("/auth/login", req).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Contact Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List contacts, optionally filtered by a search term.
    pub async fn list_contacts(&self, search: Option<&str>) -> Result<Vec<ContactListItem>> {
        let mut req = self.builder(Method::GET, "/contacts");
        if let Some(q) = search {
            req = req.query(&[("search", q)]);
        }
        let resp = self.execute(req).await?;
        Self::decode(resp).await
    }

    /// Create a contact.
    pub async fn create_contact(&self, req: &NewContact) -> Result<Contact> {
        self.post("/contacts", req).await
    }

    /// Get a full contact record.
    pub async fn get_contact(&self, id: i64) -> Result<Contact> {
        self.get(&format!("/contacts/{}", id)).await
    }

    /// Partially update a contact.
    pub async fn update_contact(&self, id: i64, req: &UpdateContact) -> Result<Contact> {
        self.put(&format!("/contacts/{}", id), req).await
    }

    /// Remove a contact along with its meetings and playbook.
    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        self.delete(&format!("/contacts/{}", id)).await
    }

    /// Get a contact bundled with its timeline and action playbook.
    pub async fn contact_timeline(&self, id: i64) -> Result<ContactWithTimeline> {
        self.get(&format!("/contacts/{}/timeline", id)).await
    }

    /// Fetch the server-rendered markdown export of a contact.
    pub async fn export_markdown(&self, id: i64) -> Result<String> {
        let resp = self
            .execute(self.builder(Method::GET, &format!("/contacts/{}/export", id)))
            .await?;
        resp.text().await.map_err(|e| Error::Decode(e.to_string()))
    }

    /// Create a meeting under a known contact.
    pub async fn add_meeting(&self, contact_id: i64, req: &NewMeeting) -> Result<Meeting> {
        self.post(&format!("/contacts/{}/meetings", contact_id), req)
            .await
    }

    /// List the meetings of one contact.
    pub async fn contact_meetings(&self, contact_id: i64) -> Result<Vec<MeetingSummary>> {
        self.get(&format!("/contacts/{}/meetings", contact_id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Meeting Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a meeting, letting the backend resolve the contact by name.
    pub async fn create_meeting(&self, req: &NewMeeting) -> Result<Meeting> {
        self.post("/meetings", req).await
    }

    /// List meetings, optionally restricted to one contact.
    pub async fn list_meetings(&self, contact_id: Option<i64>) -> Result<Vec<MeetingSummary>> {
        let mut req = self.builder(Method::GET, "/meetings");
        if let Some(id) = contact_id {
            req = req.query(&[("contact_id", id.to_string())]);
        }
        let resp = self.execute(req).await?;
        Self::decode(resp).await
    }

    /// Get a single meeting.
    pub async fn get_meeting(&self, id: i64) -> Result<Meeting> {
        self.get(&format!("/meetings/{}", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a request, attaching the bearer token when a session exists.
    fn builder(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Send a request and classify the outcome. The 401 path clears the
    /// session and triggers navigation here, so every caller benefits
    /// uniformly.
    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let resp = req.send().await.map_err(|e| Error::Network(e.to_string()))?;

        let status = resp.status();
        debug!("API response: {} {}", status, resp.url());

        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("request rejected with 401, clearing session");
            self.session.clear();
            self.navigator.to_login();
            return Err(Error::Unauthorized);
        }

        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Err(Error::api(status.as_u16(), detail))
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        resp.json().await.map_err(|e| Error::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.execute(self.builder(Method::GET, path)).await?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self
            .execute(self.builder(Method::POST, path).json(body))
            .await?;
        Self::decode(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self
            .execute(self.builder(Method::PUT, path).json(body))
            .await?;
        Self::decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.builder(Method::DELETE, path)).await?;
        Ok(())
    }
}
