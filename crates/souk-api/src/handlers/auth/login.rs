//! Login endpoint

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use souk_types::User;

use crate::{
    tenant::{lookup_tenant_id, TenantContext},
    ApiError, AppState, Result,
};

/// Request format for the login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload: both tokens plus the sanitized user
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Authenticate against the resolved tenant and issue a token pair
///
/// The route is guarded by [`crate::tenant::require_tenant`], so a tenant
/// reference is always present here; it may still name a tenant that does
/// not exist.
#[tracing::instrument(skip(state, request), fields(tenant = %tenant_ctx.tenant))]
pub async fn login(
    State(state): State<AppState>,
    Extension(tenant_ctx): Extension<TenantContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let tenant_id = lookup_tenant_id(&state, &tenant_ctx)
        .await?
        .ok_or_else(|| ApiError::Validation("unknown tenant".into()))?;

    let outcome = state
        .engine
        .login(tenant_id, &request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
        expires_at: outcome.tokens.expires_at,
        user: outcome.user,
    }))
}
