//! Fake receipt backend for client tests
//!
//! An axum router with in-memory state, bound to a random local port.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tempfile::TempDir;

use receiptdesk_client::{ApiClient, Page};
use receiptdesk_config::Config;

#[derive(Debug, Default)]
pub struct BackendState {
    pub authenticated: bool,
    /// Become authenticated once this many status checks have been made
    pub authenticate_after: Option<u32>,
    pub status_checks: u32,
    pub transactions: Vec<Value>,
    pub receipts: BTreeSet<String>,
    pub checked_receipts: Vec<String>,
    pub organization: Option<Value>,
    pub organization_writes: Vec<(String, Value)>,
    pub logo: Option<Value>,
    pub logo_offline: bool,
    pub email_settings: Option<Value>,
    pub saved_email_settings: Vec<Value>,
    pub test_emails: Vec<String>,
    pub sent_receipts: Vec<Value>,
    pub options: BTreeMap<String, Value>,
    pub options_offline: bool,
    pub items: Vec<Value>,
    pub feedback: Vec<Value>,
    pub beta_signups: Vec<Value>,
    pub disconnected: bool,
}

pub type Shared = Arc<Mutex<BackendState>>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn ok() -> Response {
    Json(json!({ "success": true })).into_response()
}

// ---- receipts ----

async fn check_receipt(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.checked_receipts.push(id.clone());
    Json(json!({ "exists": state.receipts.contains(&id) })).into_response()
}

async fn generate_receipt(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    state.lock().unwrap().receipts.insert(id);
    ok()
}

async fn generate_all(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    let ids: Vec<String> = state
        .transactions
        .iter()
        .filter_map(|t| t["id"].as_str().map(str::to_string))
        .collect();
    let mut generated = 0;
    let mut skipped = 0;
    for id in ids {
        if state.receipts.insert(id) {
            generated += 1;
        } else {
            skipped += 1;
        }
    }
    Json(json!({ "results": { "generated": generated, "skipped": skipped } })).into_response()
}

async fn email_receipt(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().contains("bounce") {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "SMTP rejected recipient");
    }
    state.lock().unwrap().sent_receipts.push(body);
    ok()
}

// ---- organizations ----

async fn current_organization(State(state): State<Shared>) -> Response {
    match state.lock().unwrap().organization.clone() {
        Some(org) => Json(org).into_response(),
        None => error(StatusCode::NOT_FOUND, "No organization found"),
    }
}

async fn create_organization(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    body["id"] = json!(1);
    state.organization_writes.push(("POST".to_string(), body.clone()));
    state.organization = Some(body.clone());
    Json(body).into_response()
}

async fn update_organization(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    body["id"] = json!(id);
    state.organization_writes.push(("PUT".to_string(), body.clone()));
    state.organization = Some(body.clone());
    Json(body).into_response()
}

// ---- logos ----

async fn get_logo(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.logo_offline {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Database offline");
    }
    match state.logo.clone() {
        Some(logo) => Json(logo).into_response(),
        None => error(StatusCode::NOT_FOUND, "No logo"),
    }
}

async fn upload_logo(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().logo = Some(body);
    ok()
}

async fn delete_logo(State(state): State<Shared>) -> Response {
    state.lock().unwrap().logo = None;
    ok()
}

// ---- email ----

async fn get_email_settings(State(state): State<Shared>) -> Response {
    match state.lock().unwrap().email_settings.clone() {
        Some(settings) => Json(settings).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not configured"),
    }
}

async fn save_email_settings(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let mut stored = body.clone();
    if let Some(map) = stored.as_object_mut() {
        map.remove("smtpPassword");
    }
    state.email_settings = Some(stored);
    state.saved_email_settings.push(body);
    ok()
}

async fn test_email(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let address = body["email"].as_str().unwrap_or_default().to_string();
    state.lock().unwrap().test_emails.push(address);
    Json(json!({ "success": true, "message": "Test email sent" })).into_response()
}

// ---- quickbooks ----

async fn quickbooks_status(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.status_checks += 1;
    if let Some(after) = state.authenticate_after {
        if state.status_checks >= after {
            state.authenticated = true;
        }
    }
    Json(json!({ "isAuthenticated": state.authenticated })).into_response()
}

async fn transactions(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if !state.authenticated {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated with QuickBooks");
    }
    Json(json!({ "transactions": state.transactions })).into_response()
}

async fn disconnect(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.authenticated = false;
    state.disconnected = true;
    ok()
}

// ---- options ----

async fn get_option(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    let state = state.lock().unwrap();
    if state.options_offline {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Options unavailable");
    }
    match state.options.get(&name) {
        Some(value) => Json(json!({ "name": name, "value": value })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Option not found"),
    }
}

async fn set_option(
    State(state): State<Shared>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if state.options_offline {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Options unavailable");
    }
    state.options.insert(name, body["value"].clone());
    ok()
}

// ---- items ----

async fn get_items(State(state): State<Shared>, Path(_transaction_id): Path<String>) -> Response {
    Json(json!({ "items": state.lock().unwrap().items })).into_response()
}

async fn update_item(
    State(state): State<Shared>,
    Path((_transaction_id, item_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if body["description"].as_str() == Some("reject") {
        return (StatusCode::UNPROCESSABLE_ENTITY, "nope").into_response();
    }
    let mut state = state.lock().unwrap();
    if let Some(item) = state.items.iter_mut().find(|i| i["id"] == json!(item_id)) {
        *item = body.clone();
    }
    Json(json!({ "item": body })).into_response()
}

// ---- feedback ----

async fn feedback(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().feedback.push(body);
    ok()
}

async fn beta_signup(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().beta_signups.push(body);
    ok()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/receipts/check/:id", get(check_receipt))
        .route("/api/receipts/generate/:id", post(generate_receipt))
        .route("/api/receipts/generate-all", post(generate_all))
        .route("/api/receipts/email", post(email_receipt))
        .route("/api/organizations", post(create_organization))
        .route("/api/organizations/current", get(current_organization))
        .route("/api/organizations/:id", put(update_organization))
        .route("/api/logos", get(get_logo).post(upload_logo).delete(delete_logo))
        .route("/api/email/settings", get(get_email_settings).post(save_email_settings))
        .route("/api/email/test", post(test_email))
        .route("/api/quickbooks/status", get(quickbooks_status))
        .route("/api/quickbooks/transactions", get(transactions))
        .route("/api/quickbooks/disconnect", post(disconnect))
        .route("/api/options/:name", get(get_option).post(set_option))
        .route("/api/transaction-items/:transaction_id", get(get_items))
        .route("/api/transaction-items/:transaction_id/:item_id", put(update_item))
        .route("/api/feedback", post(feedback))
        .route("/api/beta/submit", post(beta_signup))
        .with_state(state)
}

pub fn donation(id: &str, date: &str, name: &str, email: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "date": date,
        "donorName": name,
        "donorEmail": email,
        "amount": amount,
        "docNumber": format!("DOC-{}", id),
    })
}

/// Backend with three 2024 donations, already connected
pub fn connected_state() -> BackendState {
    BackendState {
        authenticated: true,
        transactions: vec![
            donation("1", "2024-03-05", "Jane Smith", "jane@example.org", 1200.0),
            donation("2", "2023-11-20", "Bob Jones", "bob@example.org", 50.0),
            donation("3", "2024-06-10", "Ann Smithers", "ann@example.org", 999.0),
        ],
        ..Default::default()
    }
}

/// Test fixture for client tests
pub struct TestBackend {
    pub state: Shared,
    pub base_url: String,
    temp_dir: TempDir,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self::with_state(BackendState::default()).await
    }

    pub async fn with_state(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = router(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestBackend {
            state,
            base_url: format!("http://{}", addr),
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.server.base_url = self.base_url.clone();
        config.server.timeout_secs = 5;
        config.storage.dir = self.temp_dir.path().to_path_buf();
        config.quickbooks.status_poll_attempts = 3;
        config.quickbooks.status_poll_interval_ms = 10;
        config
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::from_config(&self.config().server).expect("Failed to build client")
    }

    /// Page wired to this backend with "today" pinned to 2024-06-15
    pub fn page(&self) -> Page {
        let mut page = Page::from_config(self.config()).expect("Failed to build page");
        page.set_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        page
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}
