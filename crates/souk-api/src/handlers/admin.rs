//! Admin endpoints
//!
//! Everything under `/admin` sits behind the role allow-list and the
//! tenant-match guard wired up in the router.

use axum::{extract::State, Json};
use souk_types::Tenant;

use crate::{extractor::RequireAuth, ApiError, AppState, Result};

/// Return the authenticated admin's tenant record
#[tracing::instrument(skip(state), fields(tenant_id = %auth.tenant_id))]
pub async fn get_tenant(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<Tenant>> {
    let tenant = state
        .tenants
        .find_by_id(auth.tenant_id)
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(tenant))
}
