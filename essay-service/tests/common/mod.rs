#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Response, StatusCode},
    routing::{get, post},
    Json, Router,
};
use essay_service::config::{EssayConfig, GoogleConfig, ModelConfig, DEFAULT_API_BASE_URL};
use essay_service::services::TextProvider;
use essay_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-test";

pub fn test_config(api_base_url: &str) -> EssayConfig {
    EssayConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        models: ModelConfig {
            text_model: TEST_MODEL.to_string(),
        },
        google: GoogleConfig {
            api_key: TEST_API_KEY.to_string(),
            api_base_url: api_base_url.to_string(),
        },
    }
}

/// Router wired to `provider`, for in-process `oneshot` tests.
pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState {
        config: Arc::new(test_config(DEFAULT_API_BASE_URL)),
        text_provider: provider,
    })
}

/// Spawn the full application around `provider` and return its base address.
pub async fn spawn_app_with(provider: Arc<dyn TextProvider>) -> String {
    let app = Application::build_with_provider(test_config(DEFAULT_API_BASE_URL), provider)
        .await
        .expect("Failed to build test application");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    wait_until_healthy(&address).await;
    address
}

/// Spawn the application with its real Gemini provider pointed at `api_base_url`.
pub async fn spawn_app_against(api_base_url: &str) -> String {
    let app = Application::build(test_config(api_base_url))
        .await
        .expect("Failed to build test application");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    wait_until_healthy(&address).await;
    address
}

async fn wait_until_healthy(address: &str) {
    // Wait for HTTP server to be ready by polling health endpoint
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}

/// Split a response into status and decoded JSON body.
pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Body was not JSON");
    (status, body)
}

// ============================================================================
// Local stand-in for the Gemini REST API
// ============================================================================

#[derive(Clone)]
struct FakeGeminiState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A `generateContent` call as seen by the fake API.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call: String,
    pub key: Option<String>,
    pub body: Value,
}

pub struct FakeGemini {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeGemini {
    /// Serve `body` with `status` for every `generateContent` call.
    pub async fn start(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeGeminiState {
            status,
            body,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1beta/models", get(list_models))
            .route("/v1beta/models/:call", post(generate_content))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Gemini listener");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1beta", port),
            requests,
        }
    }

    /// Successful response whose only candidate text is `text`.
    pub async fn replying(text: &str) -> Self {
        Self::start(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 300, "candidatesTokenCount": 120 }
            }),
        )
        .await
    }

    pub fn requests(&self) -> Vec<RecordedCall> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list_models() -> Json<Value> {
    Json(json!({ "models": [{ "name": format!("models/{}", TEST_MODEL) }] }))
}

async fn generate_content(
    State(state): State<FakeGeminiState>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedCall {
        call,
        key: query.get("key").cloned(),
        body,
    });
    (state.status, Json(state.body.clone()))
}
