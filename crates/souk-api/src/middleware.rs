//! Request guards: bearer-token authentication and role allow-lists
//!
//! The auth middleware validates the access token, attaches the resulting
//! [`AuthContext`] to the request's extensions, and short-circuits with 401
//! before the protected handler runs. The role guard compares the attached
//! role against a per-route allow-list.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use souk_types::{AuthContext, Role};

use crate::{ApiError, AppState};

/// Extract the token from a `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::Unauthorized("Authorization header required".into()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header encoding".into()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))
        .ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must use Bearer scheme".into())
        })?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized("Bearer token is empty".into()));
    }

    Ok(token.to_string())
}

/// Validate the bearer token and attach the identity to the request scope
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let auth = state.engine.validate(&token)?;

    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}

/// Check the attached role against a route allow-list
pub fn require_role(auth: &AuthContext, allowed: &[Role]) -> Result<(), ApiError> {
    if !auth.has_role(allowed) {
        tracing::info!(user_id = %auth.user_id, role = %auth.role, "role denied");
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// Middleware form of [`require_role`]; runs after [`authenticate`]
pub async fn require_roles(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;

    require_role(auth, allowed)?;
    Ok(next.run(request).await)
}
