//! Axum extractors for authentication
//!
//! `RequireAuth` hands handlers the identity the auth middleware attached;
//! it rejects with 401 if the middleware did not run or failed.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use souk_types::AuthContext;

use crate::ApiError;

/// Extractor that requires an authenticated identity
///
/// # Example
///
/// ```rust,no_run
/// use souk_api::extractor::RequireAuth;
///
/// async fn protected_handler(RequireAuth(auth): RequireAuth) {
///     println!("authenticated as {}", auth.email);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| {
                ApiError::Unauthorized("Authentication required".into()).into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use souk_types::Role;
    use uuid::Uuid;

    use super::*;

    fn test_context() -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            role: Role::Customer,
            issued_at: Utc::now(),
            expires_at: Utc::now() + Duration::seconds(900),
        }
    }

    #[tokio::test]
    async fn test_require_auth_with_context() {
        let auth = test_context();
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut().insert(auth.clone());

        let (mut parts, _) = req.into_parts();
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
        let RequireAuth(extracted) = result.unwrap();
        assert_eq!(extracted.user_id, auth.user_id);
    }

    #[tokio::test]
    async fn test_require_auth_without_context() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
    }
}
