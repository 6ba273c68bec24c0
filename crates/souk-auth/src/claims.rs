//! Token claims
//!
//! A closed tagged structure: every field is required and the `type`
//! discriminant is validated at deserialization, so malformed or unknown
//! claim shapes are rejected before any business logic runs.

use serde::{Deserialize, Serialize};
use souk_types::{Role, TokenType};
use uuid::Uuid;

/// The signed payload inside every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id
    pub sub: Uuid,

    /// Tenant the token was issued under
    pub tenant_id: Uuid,

    pub email: String,

    pub role: Role,

    /// Access/refresh discriminant
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Unique token id; keeps two tokens minted within the same second
    /// distinct and makes rotation observable
    pub jti: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_discriminant_round_trip() {
        let claims = TokenClaims {
            sub: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            role: Role::Customer,
            token_type: TokenType::Refresh,
            iat: 1_700_000_000,
            exp: 1_700_604_800,
            iss: "souk-id".into(),
            jti: Uuid::new_v4(),
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");

        let parsed: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_missing_type_rejected() {
        let json = serde_json::json!({
            "sub": Uuid::new_v4(),
            "tenant_id": Uuid::new_v4(),
            "email": "alice@example.com",
            "role": "customer",
            "iat": 1_700_000_000,
            "exp": 1_700_604_800,
            "iss": "souk-id",
            "jti": Uuid::new_v4(),
        });

        let parsed: Result<TokenClaims, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}
