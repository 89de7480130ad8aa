//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use swatchpick::assets::AssetLoader;
use swatchpick::server::{build_router, create_app_state, AppState};
use swatchpick::services::InMemoryPaletteStore;

/// Test application with router and direct access to the palette store
pub struct TestApp {
    router: axum::Router,
    pub palette_store: Arc<InMemoryPaletteStore>,
}

impl TestApp {
    /// Create a new test application using embedded assets
    pub fn new() -> Self {
        Self::from_state(Self::create_state())
    }

    /// Create a test application reading its palette from `path`
    pub fn with_palette_file(path: impl Into<PathBuf>) -> Self {
        let asset_loader = Arc::new(AssetLoader::new(None, Some(path.into())));
        let state = create_app_state(asset_loader).expect("Failed to create app state");
        Self::from_state(state)
    }

    /// Build a test application from prepared state
    pub fn from_state(state: AppState) -> Self {
        let palette_store = state.palette_store.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            palette_store,
        }
    }

    /// Create state from embedded assets for custom configuration
    pub fn create_state() -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        create_app_state(asset_loader).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Make a POST request with a raw body sent as JSON
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Ids of a ranked list field (`matches`, `primary`, `secondary`)
    pub fn ids(&self, field: &str) -> Vec<String> {
        let json: serde_json::Value = self.json();
        json[field]
            .as_array()
            .unwrap_or_else(|| panic!("Expected array field {field}: {}", self.text()))
            .iter()
            .map(|m| m["id"].as_str().unwrap().to_string())
            .collect()
    }
}
