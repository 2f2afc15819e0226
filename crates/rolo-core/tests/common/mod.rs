//! Shared test support: an in-process mock of the rolo backend plus
//! recording doubles for the notifier, navigator, and export sink.
#![allow(dead_code)]

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rolo_core::client::{ApiClient, Navigator};
use rolo_core::config::ApiConfig;
use rolo_core::error::{Error, Result};
use rolo_core::export::ExportSink;
use rolo_core::notify::{Notifier, ToastKind};
use rolo_core::session::SessionStore;
use rolo_core::store::ContactStore;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub recorded: Mutex<Vec<RecordedRequest>>,
}

/// In-process mock of the rolo backend on an ephemeral port.
///
/// Behavior knobs, used by individual tests:
/// - contact list search `boom` responds 500, `slow` delays 300ms; the
///   returned contact is named after the search term
/// - contact name `boom` on create responds 400
/// - contact id 99 responds 401, id 88 responds 404, id 6 delays 300ms
pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .route("/api/contacts", get(list_contacts).post(create_contact))
            .route(
                "/api/contacts/{id}",
                get(get_contact).put(update_contact).delete(delete_contact),
            )
            .route("/api/contacts/{id}/timeline", get(contact_timeline))
            .route("/api/contacts/{id}/export", get(export_contact))
            .route(
                "/api/contacts/{id}/meetings",
                get(contact_meetings).post(add_meeting),
            )
            .route("/api/meetings", get(list_meetings).post(create_meeting))
            .route("/api/meetings/{id}", get(get_meeting))
            .layer(middleware::from_fn_with_state(Arc::clone(&state), record));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().unwrap().clone()
    }

    /// Number of recorded requests matching method and exact path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let entry = RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().unwrap_or("").to_string(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    };
    state.recorded.lock().unwrap().push(entry);
    next.run(req).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Canned Bodies
// ─────────────────────────────────────────────────────────────────────────────

pub fn contact_item_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "current_company": "Acme",
        "current_position": "Engineer",
        "last_meeting_date": null,
        "relationship_stage": "friend",
        "temperature_score": 72.5
    })
}

pub fn contact_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "nickname": null,
        "gender": null,
        "age_group": null,
        "hometown": null,
        "city": null,
        "phone": null,
        "email": null,
        "wechat": null,
        "linkedin": null,
        "education_school": null,
        "education_major": null,
        "education_degree": null,
        "career_summary": null,
        "preferred_contact_method": null,
        "preferred_contact_time": null,
        "communication_style": null,
        "current_company": "Acme",
        "current_position": "Engineer",
        "current_industry": null,
        "current_location": null,
        "startup_status": null,
        "focus_topics": null,
        "current_projects": null,
        "short_term_goals": null,
        "long_term_goals": null,
        "resource_needs": null,
        "resource_offers": null,
        "excitement_points": null,
        "anxiety_points": null,
        "sensitive_points": null,
        "last_meeting_date": null,
        "last_verified_at": null,
        "relationship_stage": "friend",
        "temperature_score": 72.5,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": null
    })
}

pub fn meeting_summary_json(id: i64) -> Value {
    json!({
        "id": id,
        "meeting_date": "2024-03-02T18:30:00Z",
        "location": "cafe",
        "scenario": null,
        "topics": ["startup"],
        "sentiment": "positive",
        "status": "completed"
    })
}

pub fn meeting_json(id: i64, contact_id: i64) -> Value {
    json!({
        "id": id,
        "contact_id": contact_id,
        "meeting_date": "2024-03-02T18:30:00Z",
        "location": "cafe",
        "scenario": null,
        "raw_text": "met at cafe",
        "topics": null,
        "key_facts": null,
        "sentiment": null,
        "my_commitments": null,
        "their_commitments": null,
        "open_loops": null,
        "next_conversation_hooks": null,
        "status": "processing",
        "error_message": null,
        "created_at": "2024-03-02T18:31:00Z"
    })
}

pub fn timeline_json(id: i64, name: &str) -> Value {
    json!({
        "contact": contact_json(id, name),
        "meetings": [meeting_summary_json(1)],
        "action_playbook": null
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Contact not found"})),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn register(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or("a@b.com");
    Json(json!({
        "id": 1,
        "email": email,
        "created_at": "2024-03-01T10:00:00Z"
    }))
    .into_response()
}

async fn login() -> Response {
    Json(json!({"access_token": "t1", "token_type": "bearer"})).into_response()
}

async fn list_contacts(Query(params): Query<HashMap<String, String>>) -> Response {
    let search = params.get("search").cloned().unwrap_or_default();
    if search == "boom" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "server exploded"})),
        )
            .into_response();
    }
    if search == "slow" {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    let name = if search.is_empty() { "Alice".to_string() } else { search };
    Json(json!([contact_item_json(1, &name)])).into_response()
}

async fn create_contact(Json(body): Json<Value>) -> Response {
    if body["name"].as_str() == Some("boom") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "bad contact"})),
        )
            .into_response();
    }
    let name = body["name"].as_str().unwrap_or("Alice");
    (StatusCode::CREATED, Json(contact_json(1, name))).into_response()
}

async fn get_contact(Path(id): Path<i64>) -> Response {
    match id {
        99 => unauthorized(),
        88 => not_found(),
        _ => Json(contact_json(id, "Alice")).into_response(),
    }
}

async fn update_contact(Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    match id {
        99 => unauthorized(),
        88 => not_found(),
        _ => {
            let name = body["name"].as_str().unwrap_or("Alice");
            Json(contact_json(id, name)).into_response()
        }
    }
}

async fn delete_contact(Path(id): Path<i64>) -> Response {
    match id {
        99 => unauthorized(),
        88 => not_found(),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn contact_timeline(Path(id): Path<i64>) -> Response {
    match id {
        99 => unauthorized(),
        88 => not_found(),
        6 => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Json(timeline_json(6, "Slowpoke")).into_response()
        }
        _ => Json(timeline_json(id, "Alice")).into_response(),
    }
}

async fn export_contact(Path(id): Path<i64>) -> Response {
    match id {
        99 => unauthorized(),
        88 => not_found(),
        _ => "# Alice\n- met at cafe\n".into_response(),
    }
}

async fn contact_meetings(Path(_id): Path<i64>) -> Response {
    Json(json!([meeting_summary_json(1)])).into_response()
}

async fn add_meeting(Path(id): Path<i64>, Json(_body): Json<Value>) -> Response {
    (StatusCode::CREATED, Json(meeting_json(2, id))).into_response()
}

async fn create_meeting(Json(body): Json<Value>) -> Response {
    if body["raw_text"].as_str() == Some("boom") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "text too short"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(meeting_json(2, 1))).into_response()
}

async fn list_meetings(Query(_params): Query<HashMap<String, String>>) -> Response {
    Json(json!([meeting_summary_json(1)])).into_response()
}

async fn get_meeting(Path(id): Path<i64>) -> Response {
    Json(meeting_json(id, 1)).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Doubles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<(ToastKind, String)>>,
    pub modals: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        self.toasts
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }

    fn modal(&self, title: &str, body: &str) {
        self.modals
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub redirects: AtomicUsize,
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub deliveries: Mutex<Vec<(String, String)>>,
}

impl ExportSink for RecordingSink {
    fn deliver(&self, file_name: &str, text: &str) -> Result<()> {
        self.deliveries
            .lock()
            .unwrap()
            .push((file_name.to_string(), text.to_string()));
        Ok(())
    }
}

/// Sink whose delivery always fails, for the swallowed-error path.
#[derive(Debug, Default)]
pub struct FailingSink;

impl ExportSink for FailingSink {
    fn deliver(&self, _file_name: &str, _text: &str) -> Result<()> {
        Err(Error::Clipboard("no clipboard available".to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wired-up Context
// ─────────────────────────────────────────────────────────────────────────────

pub struct TestCtx {
    pub server: MockServer,
    pub session: Arc<SessionStore>,
    pub client: Arc<ApiClient>,
    pub store: Arc<ContactStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub sink: Arc<RecordingSink>,
    pub dir: tempfile::TempDir,
}

impl TestCtx {
    pub async fn new() -> Self {
        let server = MockServer::spawn().await;
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::new(dir.path().join("token")));
        let navigator = Arc::new(RecordingNavigator::default());
        let client = Arc::new(
            ApiClient::new(
                &ApiConfig {
                    base_url: server.base_url.clone(),
                    timeout_secs: 5,
                },
                Arc::clone(&session),
                Arc::clone(&navigator) as Arc<dyn Navigator>,
            )
            .unwrap(),
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let sink = Arc::new(RecordingSink::default());
        let store = Arc::new(ContactStore::new(
            Arc::clone(&client),
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            Arc::clone(&sink) as Arc<dyn ExportSink>,
        ));

        Self {
            server,
            session,
            client,
            store,
            notifier,
            navigator,
            sink,
            dir,
        }
    }

    pub fn token_path(&self) -> std::path::PathBuf {
        self.dir.path().join("token")
    }
}
