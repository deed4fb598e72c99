//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use makerhub_api::{AppState, build_app};
use makerhub_auth::jwt::{Claims, JwtEncoder};
use makerhub_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, MailConfig, ServerConfig, StoreBackend,
};
use makerhub_database::MemoryMakerspaceStore;
use makerhub_service::LogMailer;

/// Signing secret shared by the app under test and forged test tokens.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: MemoryMakerspaceStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                backend: StoreBackend::Memory,
                ..DatabaseConfig::default()
            },
            auth: AuthConfig {
                jwt_secret: TEST_SECRET.to_string(),
                claim_token_ttl_hours: 24,
                leeway_seconds: 0,
            },
            mail: MailConfig::default(),
            logging: LoggingConfig::default(),
        };
        config.validate().expect("Test config must be valid");

        let store = MemoryMakerspaceStore::new();
        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(LogMailer::new("no-reply@test")),
        );

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Make a JSON request, optionally with a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, auth.as_deref())
            .await
    }

    /// Make a JSON request with a raw Authorization header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Start onboarding and return the claim token
    pub async fn onboard(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/makerspace/onboard",
                Some(json!({ "email": email })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in onboarding response")
            .to_string()
    }

    /// Finalize with the given claim token
    pub async fn finalize(&self, token: &str, payload: Value) -> TestResponse {
        self.request("POST", "/api/makerspace", Some(payload), Some(token))
            .await
    }

    /// Onboard and finalize in one go; returns the record id
    pub async fn create_active(&self, email: &str, name: &str, city: &str) -> String {
        let token = self.onboard(email).await;
        let response = self.finalize(&token, profile_payload(name, city)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"]
            .as_str()
            .expect("id in finalize response")
            .to_string()
    }

    /// Sign arbitrary claims with the app's secret
    pub fn sign(&self, claims: &Claims) -> String {
        JwtEncoder::new(&self.config.auth)
            .encode(claims)
            .expect("Failed to sign test claims")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A complete, valid makerspace profile payload
pub fn profile_payload(name: &str, city: &str) -> Value {
    json!({
        "type": "community",
        "usage": ["3d printing", "woodworking"],
        "name": name,
        "email": "hello@space.test",
        "number": "+91 98765 43210",
        "inChargeName": "Grace Hopper",
        "timings": {
            "monday": "9:00 AM - 6:00 PM",
            "tuesday": "9:00 AM - 6:00 PM",
            "wednesday": "9:00 AM - 6:00 PM",
            "thursday": "9:00 AM - 6:00 PM",
            "friday": "9:00 AM - 6:00 PM",
            "saturday": "10:00 AM - 2:00 PM",
            "sunday": "Closed"
        },
        "city": city,
        "state": "Maharashtra",
        "address": "12 Workshop Road",
        "zipcode": "411001",
        "country": "India",
        "amenities": ["wifi", "laser cutter"],
        "mentors": [
            {
                "name": "Ada Lovelace",
                "designation": "Electronics lead",
                "linkedin": "https://linkedin.com/in/ada",
                "image": "https://img.test/ada.png"
            }
        ]
    })
}
