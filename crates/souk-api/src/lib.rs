//! # Souk API - HTTP Layer
//!
//! Exposes the auth engine over REST: registration, login, refresh, logout,
//! and protected routes guarded by bearer-token and role middleware.

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::from_fn,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use souk_auth::{AuthEngine, AuthError};
use souk_config::Config;
use souk_store::TenantStore;
use souk_types::Role;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod tenant;

use crate::middleware::{authenticate, require_roles};
use tenant::{enforce_tenant_match, require_tenant, resolve_tenant_layer};

/// Routes under `/admin` require one of these roles
const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("User with this email already exists")]
    AlreadyExists,

    /// Deliberately unspecific; which factor failed is never exposed
    #[error("{0}")]
    Unauthorized(String),

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Tenant context is required")]
    TenantRequired,

    #[error("Not found")]
    NotFound,

    #[error("Service unavailable")]
    Unavailable(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => ApiError::Validation(msg),
            AuthError::AlreadyExists => ApiError::AlreadyExists,
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidToken => ApiError::Unauthorized(err.to_string()),
            AuthError::Forbidden => ApiError::Forbidden,
            AuthError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, headers) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string(), None),
            ApiError::AlreadyExists => (StatusCode::CONFLICT, self.to_string(), None),
            ApiError::Unauthorized(_) => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer realm=\"souk\", error=\"invalid_token\""),
                );
                (StatusCode::UNAUTHORIZED, self.to_string(), Some(headers))
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string(), None),
            ApiError::TenantRequired => (StatusCode::BAD_REQUEST, self.to_string(), None),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string(), None),
            // The detailed cause stays server-side
            ApiError::Unavailable(cause) => {
                tracing::error!(cause = %cause, "dependency failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Service unavailable".to_string(), None)
            }
        };

        let mut response = (status, Json(ErrorResponse { error: message })).into_response();
        if let Some(h) = headers {
            response.headers_mut().extend(h);
        }
        response
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Application state
///
/// Everything is constructed at startup and injected; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AuthEngine>,
    pub tenants: Arc<dyn TenantStore>,
    pub config: Arc<Config>,
}

/// Build the service router
///
/// Layering, outside in: tenant resolution runs on every request; the auth
/// middleware guards `/auth/me` and `/admin`; `/admin` additionally
/// enforces the role allow-list and the resolved-tenant/token-tenant match.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/tenant", get(handlers::admin::get_tenant))
        .route_layer(from_fn(|req, next| require_roles(ADMIN_ROLES, req, next)))
        .route_layer(from_fn_with_state(state.clone(), enforce_tenant_match));

    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .nest("/admin", admin)
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    // Login derives its tenant from the request; reject tenant-less calls
    let tenant_scoped = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route_layer(from_fn(require_tenant));

    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(tenant_scoped)
        .merge(protected)
        .layer(from_fn(resolve_tenant_layer))
        .layer(cors)
        .with_state(state)
}
