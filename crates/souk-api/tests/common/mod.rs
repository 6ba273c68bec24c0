//! Shared setup for the HTTP-level tests
//!
//! Builds the full router over in-memory stores and drives it with
//! `tower::ServiceExt::oneshot`, no sockets involved.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use souk_api::{router, AppState};
use souk_auth::{AuthEngine, TokenCodec};
use souk_config::Config;
use souk_store::{MemorySessionStore, MemoryTenantStore, MemoryUserStore, UserStore};
use souk_types::{Role, Tenant};
use tower::ServiceExt;

pub const PASSWORD: &str = "hunter2hunter2";

pub struct TestApp {
    pub router: Router,
    pub tenant: Tenant,
    pub users: Arc<MemoryUserStore>,
}

pub async fn spawn() -> TestApp {
    let users = Arc::new(MemoryUserStore::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let tenants = Arc::new(MemoryTenantStore::new());

    let tenant = Tenant::new("shop1", "Shop One");
    tenants.insert(tenant.clone()).await;

    let codec = TokenCodec::new(b"integration-test-secret-32-bytes!", "souk-id");
    let engine = AuthEngine::new(
        users.clone(),
        sessions,
        codec,
        Duration::from_secs(900),
        Duration::from_secs(604_800),
    )
    .unwrap();

    let state = AppState {
        engine: Arc::new(engine),
        tenants,
        config: Arc::new(Config::default()),
    };

    TestApp {
        router: router(state),
        tenant,
        users,
    }
}

impl TestApp {
    /// Fire a JSON request and decode the JSON response
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Register a user under the seeded tenant
    pub async fn register(&self, email: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/auth/register",
            &[("x-tenant-id", &self.tenant.id.to_string())],
            Some(json!({ "email": email, "password": PASSWORD })),
        )
        .await
    }

    /// Register and log in, returning the login response body
    pub async fn login(&self, email: &str) -> Value {
        self.register(email).await;
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                &[("x-tenant-id", &self.tenant.id.to_string())],
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body
    }

    /// Flip a registered user's role directly in the store
    pub async fn promote(&self, email: &str, role: Role) {
        let mut user = self
            .users
            .find_by_email(self.tenant.id, email)
            .await
            .unwrap()
            .expect("user must be registered before promotion");
        user.role = role;
        self.users.update(user).await.unwrap();
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
