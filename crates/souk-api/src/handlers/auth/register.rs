//! Registration endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use souk_types::NewUser;
use uuid::Uuid;

use crate::{
    tenant::{lookup_tenant_id, TenantContext},
    ApiError, AppState, Result,
};

/// Request format for the registration endpoint
///
/// `tenant_id` in the body wins over the tenant resolved from headers,
/// host, or path.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Register a new account under the given tenant
///
/// Returns 201 with the created user; the password hash is never included.
#[tracing::instrument(skip(state, request), fields(tenant = %tenant_ctx.tenant))]
pub async fn register(
    State(state): State<AppState>,
    Extension(tenant_ctx): Extension<TenantContext>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let tenant_id = match request.tenant_id {
        Some(id) => id,
        None => {
            if tenant_ctx.is_default() {
                return Err(ApiError::TenantRequired);
            }
            lookup_tenant_id(&state, &tenant_ctx)
                .await?
                .ok_or_else(|| ApiError::Validation("unknown tenant".into()))?
        }
    };

    let user = state
        .engine
        .register(
            tenant_id,
            &request.email,
            &request.password,
            NewUser {
                full_name: request.full_name,
                phone: request.phone,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
