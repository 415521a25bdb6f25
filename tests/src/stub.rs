//! In-process stand-in for the REST backend.
//!
//! Serves the two tables the store client talks to under `/rest/v1`.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

use analytics_core::IntegrationSetting;
use event_store::StoreConfig;

#[derive(Default)]
struct StubInner {
    rows: Mutex<Vec<Value>>,
    settings: Mutex<Vec<IntegrationSetting>>,
    api_keys: Mutex<Vec<String>>,
    insert_status: Mutex<Option<u16>>,
    settings_reads: Mutex<usize>,
}

#[derive(Clone, Default)]
struct StubState(Arc<StubInner>);

/// A running stub bound to an ephemeral local port.
pub struct RestStub {
    pub url: String,
    state: StubState,
    server: JoinHandle<()>,
}

impl RestStub {
    pub async fn start() -> Self {
        Self::with_settings(Vec::new()).await
    }

    /// Start with `settings` as the settings table contents.
    pub async fn with_settings(settings: Vec<IntegrationSetting>) -> Self {
        let state = StubState::default();
        *state.0.settings.lock() = settings;

        let app = Router::new()
            .route("/rest/v1/analytics_events", get(probe_events).post(insert_events))
            .route(
                "/rest/v1/analytics_settings",
                get(select_settings).patch(update_setting),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub has no local address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{}", addr),
            state,
            server,
        }
    }

    /// Store config pointing at this stub.
    pub fn store_config(&self, api_key: &str) -> StoreConfig {
        StoreConfig::new(self.url.clone(), api_key)
    }

    /// Rows inserted into the events table.
    pub fn rows(&self) -> Vec<Value> {
        self.state.0.rows.lock().clone()
    }

    pub fn settings(&self) -> Vec<IntegrationSetting> {
        self.state.0.settings.lock().clone()
    }

    /// `apikey` headers seen so far.
    pub fn api_keys(&self) -> Vec<String> {
        self.state.0.api_keys.lock().clone()
    }

    /// Number of settings table reads.
    pub fn settings_reads(&self) -> usize {
        *self.state.0.settings_reads.lock()
    }

    /// Make inserts answer with `status` (None restores success).
    pub fn fail_inserts_with(&self, status: Option<u16>) {
        *self.state.0.insert_status.lock() = status;
    }
}

impl Drop for RestStub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn remember_key(state: &StubState, headers: &HeaderMap) {
    if let Some(key) = headers.get("apikey").and_then(|v| v.to_str().ok()) {
        state.0.api_keys.lock().push(key.to_string());
    }
}

async fn probe_events(State(state): State<StubState>, headers: HeaderMap) -> Json<Vec<Value>> {
    remember_key(&state, &headers);
    Json(Vec::new())
}

async fn insert_events(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> StatusCode {
    remember_key(&state, &headers);

    if let Some(status) = *state.0.insert_status.lock() {
        return StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    }

    state.0.rows.lock().extend(rows);
    StatusCode::CREATED
}

async fn select_settings(State(state): State<StubState>) -> Json<Vec<IntegrationSetting>> {
    *state.0.settings_reads.lock() += 1;
    Json(state.0.settings.lock().clone())
}

#[derive(Deserialize)]
struct KeyFilter {
    key: String,
}

#[derive(Deserialize)]
struct SettingPatch {
    value: Option<String>,
    enabled: bool,
}

async fn update_setting(
    State(state): State<StubState>,
    Query(filter): Query<KeyFilter>,
    Json(patch): Json<SettingPatch>,
) -> StatusCode {
    let key = filter.key.strip_prefix("eq.").unwrap_or(&filter.key);

    let mut settings = state.0.settings.lock();
    match settings.iter_mut().find(|s| s.key == key) {
        Some(row) => {
            row.value = patch.value;
            row.enabled = patch.enabled;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
