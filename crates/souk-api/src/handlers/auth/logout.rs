//! Logout endpoint

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState, Result};

/// Request format for the logout endpoint
///
/// Logout identifies the session by the refresh token itself rather than by
/// an authenticated identity, so an expired access token never blocks it.
/// The token may arrive in the JSON body or as a query parameter; the query
/// wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

/// Revoke the session named by the presented refresh token
#[tracing::instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    Query(query): Query<LogoutRequest>,
    body: Bytes,
) -> Result<Json<LogoutResponse>> {
    // The body is parsed by hand so a query-only request needs no JSON
    // payload or content type
    let from_body = serde_json::from_slice::<LogoutRequest>(&body)
        .ok()
        .and_then(|r| r.refresh_token);

    let token = query
        .refresh_token
        .or(from_body)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("refresh_token is required".into()))?;

    let user_id = state.engine.refresh_token_owner(&token)?;
    state.engine.logout(user_id).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out",
    }))
}
