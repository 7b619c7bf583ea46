//! In-process stand-ins for the queue IDP and the desk REST API.
//!
//! Serves the token endpoint, the ticket queue and the account
//! directory with canned data, so pulls can be developed and tested
//! without real credentials or network access.  Request counters on
//! the shared state make "exactly one POST, no retry" observable from
//! tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

/// Shared state: the credentials the mock accepts, the token it issues,
/// and per-endpoint request counters.
#[derive(Clone)]
pub struct DeskState {
    inner: Arc<StateInner>,
}

struct StateInner {
    client_id: String,
    client_secret: String,
    session_cookie: String,
    rest_api_key: String,
    issued_token: String,
    token_posts: AtomicU64,
    ticket_gets: AtomicU64,
}

impl DeskState {
    /// State with the fixed demo credentials used by local runs.
    pub fn new() -> Self {
        Self::with_credentials("demo-client", "demo-secret", "session=demo", "demo-rest-key")
    }

    /// State accepting a specific credential set.
    pub fn with_credentials(
        client_id: &str,
        client_secret: &str,
        session_cookie: &str,
        rest_api_key: &str,
    ) -> Self {
        Self {
            inner: Arc::new(StateInner {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                session_cookie: session_cookie.to_string(),
                rest_api_key: rest_api_key.to_string(),
                // Derived from the client id so two mock instances never
                // accept each other's tokens.
                issued_token: format!("{client_id}-access-token"),
                token_posts: AtomicU64::new(0),
                ticket_gets: AtomicU64::new(0),
            }),
        }
    }

    /// The client id the token endpoint accepts.
    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// The client secret the token endpoint accepts.
    pub fn client_secret(&self) -> &str {
        &self.inner.client_secret
    }

    /// The session cookie the token endpoint requires.
    pub fn session_cookie(&self) -> &str {
        &self.inner.session_cookie
    }

    /// The key the directory endpoints accept (`Token token=<key>`).
    pub fn rest_api_key(&self) -> &str {
        &self.inner.rest_api_key
    }

    /// The access token handed out on a successful exchange.
    pub fn issued_token(&self) -> &str {
        &self.inner.issued_token
    }

    /// How many POSTs the token endpoint has seen.
    pub fn token_posts(&self) -> u64 {
        self.inner.token_posts.load(Ordering::SeqCst)
    }

    /// How many GETs the ticket endpoint has seen.
    pub fn ticket_gets(&self) -> u64 {
        self.inner.ticket_gets.load(Ordering::SeqCst)
    }
}

impl Default for DeskState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the router serving all mock endpoints.
pub fn router(state: DeskState) -> Router {
    Router::new()
        .route("/oauth2/v1/token", post(issue_token))
        .route("/api/v2/tickets", get(open_tickets))
        .route("/users", get(users))
        .route("/licenses", get(licenses))
        .route("/license_allocations", get(license_allocations))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Canned data
// ---------------------------------------------------------------------------

/// Canned open tickets, shaped like a real queue export.
pub fn sample_tickets() -> Value {
    json!([
        {
            "id": 101,
            "status": "Open",
            "subject": "printer reports PC LOAD LETTER",
            "user_email": "ops@example.com",
            "latest_customer_comment": "still on fire",
            "priority": 2
        },
        {
            "id": 102,
            "status": "Open",
            "subject": "vpn drops every hour",
            "user_email": "sales@example.com",
            "latest_customer_comment": null,
            "priority": 3
        },
        {
            "id": 103,
            "status": "Open",
            "subject": "report export hangs at 99%",
            "user_email": "finance@example.com",
            "latest_customer_comment": "happens on Mondays",
            "priority": 1
        }
    ])
}

/// Canned directory records for a given endpoint; unknown endpoints
/// yield an empty list.
pub fn sample_directory(endpoint: &str) -> Value {
    match endpoint {
        "users" => json!([
            {"id": "U1", "name": "Ada Ops", "email": "ada@example.com", "role": "admin"},
            {"id": "U2", "name": "Sam Support", "email": "sam@example.com", "role": "responder"},
            {"id": "U3", "name": "Obs Erver", "email": "obs@example.com", "role": "observer"}
        ]),
        "licenses" => json!([
            {"id": "L1", "name": "Full User", "allocations_available": 5},
            {"id": "L2", "name": "Stakeholder", "allocations_available": 40}
        ]),
        "license_allocations" => json!([
            {"user": {"id": "U1"}, "license": {"id": "L1"}},
            {"user": {"id": "U2"}, "license": {"id": "L1"}},
            {"user": {"id": "U3"}, "license": {"id": "L2"}}
        ]),
        _ => json!([]),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Body of `POST /oauth2/v1/token`.
#[derive(Deserialize)]
struct TokenForm {
    client_id: String,
    client_secret: String,
    grant_type: String,
    #[serde(default)]
    scope: String,
}

/// `POST /oauth2/v1/token` — client-credentials exchange.
async fn issue_token(
    State(state): State<DeskState>,
    headers: HeaderMap,
    Form(form): Form<TokenForm>,
) -> Response {
    state.inner.token_posts.fetch_add(1, Ordering::SeqCst);

    if form.grant_type != "client_credentials" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type"})),
        )
            .into_response();
    }

    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    if cookie != Some(state.inner.session_cookie.as_str())
        || form.client_id != state.inner.client_id
        || form.client_secret != state.inner.client_secret
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": state.inner.issued_token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": form.scope,
    }))
    .into_response()
}

/// `GET /api/v2/tickets` — raw-token authorization, fixed status filter.
async fn open_tickets(
    State(state): State<DeskState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.inner.ticket_gets.fetch_add(1, Ordering::SeqCst);

    // The real queue API takes the token verbatim, no `Bearer ` prefix.
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if authorization != Some(state.inner.issued_token.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_token"})),
        )
            .into_response();
    }

    if params.get("status").map(String::as_str) == Some("'Open'") {
        Json(sample_tickets()).into_response()
    } else {
        Json(json!([])).into_response()
    }
}

async fn users(State(state): State<DeskState>, headers: HeaderMap) -> Response {
    directory_endpoint(&state, &headers, "users")
}

async fn licenses(State(state): State<DeskState>, headers: HeaderMap) -> Response {
    directory_endpoint(&state, &headers, "licenses")
}

async fn license_allocations(State(state): State<DeskState>, headers: HeaderMap) -> Response {
    directory_endpoint(&state, &headers, "license_allocations")
}

/// Shared body of the three directory endpoints: `Token token=` auth,
/// records nested under the endpoint name.
fn directory_endpoint(state: &DeskState, headers: &HeaderMap, endpoint: &str) -> Response {
    let expected = format!("Token token={}", state.inner.rest_api_key);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if authorization != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_api_key"})),
        )
            .into_response();
    }

    let mut body = serde_json::Map::new();
    body.insert(endpoint.to_string(), sample_directory(endpoint));
    Json(Value::Object(body)).into_response()
}
