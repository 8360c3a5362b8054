//! Common test utilities for xavyo-connector-pandadoc integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Once;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xavyo_connector_pandadoc::PandaDocConfig;

pub const TEST_API_KEY: &str = "test-api-key";

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

/// Config pointing at a mock server.
pub fn test_config(base_url: &str) -> PandaDocConfig {
    PandaDocConfig::builder()
        .api_key(TEST_API_KEY)
        .base_url(base_url)
        .request_timeout_secs(5)
        .build()
        .expect("valid test config")
}

/// Loads a recorded response from `tests/fixtures`.
pub fn load_fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let raw = std::fs::read_to_string(&path).expect("fixture exists");
    serde_json::from_str(&raw).expect("fixture is valid JSON")
}

/// Test data factory for PandaDoc users.
pub fn create_test_user(id: &str, memberships: Vec<Value>) -> Value {
    json!({
        "user_id": id,
        "email": format!("{}@test.com", id),
        "first_name": "Test",
        "last_name": id,
        "phone_number": "",
        "is_organization_owner": false,
        "license": "Business",
        "workspaces": memberships
    })
}

/// Test data factory for a workspace membership.
pub fn create_membership(role: &str, workspace_id: &str, membership_id: &str) -> Value {
    json!({
        "role": role,
        "workspace_id": workspace_id,
        "membership_id": membership_id
    })
}

/// Test data factory for PandaDoc workspaces.
pub fn create_test_workspace(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "owner": "testUser01",
        "date_created": "2025-02-25T13:46:12Z"
    })
}

/// Wraps items in the PandaDoc list envelope.
pub fn create_list_response(items: Vec<Value>, total: usize) -> Value {
    json!({ "results": items, "total": total })
}

/// Mock server wrapper with common setup helpers.
pub struct MockPandaDocServer {
    pub server: MockServer,
}

impl MockPandaDocServer {
    /// Creates a new mock PandaDoc API server.
    pub async fn new() -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        Self { server }
    }

    /// Returns the mock server's base URL.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> PandaDocConfig {
        test_config(&self.url())
    }

    /// Serves `body` for any page of `endpoint`.
    pub async fn mock_endpoint(&self, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", endpoint)))
            .and(header("Authorization", format!("API-Key {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serves `items` split into pages of `page_size`, one mock per page,
    /// each expected to be requested exactly once.
    pub async fn mock_paginated_endpoint(&self, endpoint: &str, items: Vec<Value>, page_size: usize) {
        let total = items.len();
        let pages: Vec<Vec<Value>> = items.chunks(page_size).map(|c| c.to_vec()).collect();

        for (i, page) in pages.into_iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(format!("/{}", endpoint)))
                .and(query_param("page", (i + 1).to_string()))
                .and(query_param("count", page_size.to_string()))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(create_list_response(page, total)),
                )
                .expect(1)
                .mount(&self.server)
                .await;
        }
    }

    /// Serves the recorded users fixture, expected to be fetched `times`.
    pub async fn mock_users_fixture(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("mock_users.json")))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Serves the recorded workspaces fixture, expected to be fetched `times`.
    pub async fn mock_workspaces_fixture(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/workspaces"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(load_fixture("mock_workspaces.json")),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Responds to `endpoint` with an error status.
    pub async fn mock_error(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", endpoint)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}
