use souk_types::StoreError;
use thiserror::Error;

/// Authentication and authorization errors
///
/// The credential variants are deliberately unspecific: callers cannot tell
/// which factor failed. Detailed causes go to server-side logs only.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration conflict: email already taken within the tenant
    #[error("User with this email already exists")]
    AlreadyExists,

    /// Login failed: unknown user, disabled account, or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh failed: bad signature, wrong type, expired, or revoked
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Access-token validation failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Role not in the route's allow-list
    #[error("Insufficient permissions")]
    Forbidden,

    /// Store or dependency failure; retryable by the caller
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::AlreadyExists,
            other => AuthError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::InvalidRefreshToken.to_string(), "Invalid refresh token");
        assert_eq!(
            AuthError::Validation("email is required".into()).to_string(),
            "Validation error: email is required"
        );
    }

    #[test]
    fn test_store_conflict_maps_to_already_exists() {
        let err: AuthError = StoreError::Conflict.into();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[test]
    fn test_store_backend_failure_maps_to_unavailable() {
        let err: AuthError = StoreError::Backend("connection refused".into()).into();
        assert!(matches!(err, AuthError::Unavailable(_)));
    }
}
