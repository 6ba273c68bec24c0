//! Current-user endpoint

use axum::{extract::State, Json};
use souk_types::User;

use crate::{extractor::RequireAuth, AppState, Result};

/// Return the authenticated user's profile
///
/// Reads the store rather than echoing the token claims, so the response
/// reflects profile changes made after the token was issued.
#[tracing::instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<User>> {
    let user = state.engine.get_user(auth.user_id).await?;
    Ok(Json(user))
}
