//! Token codec: HS256 sign and verify
//!
//! Stateless, pure-function component. The signing secret is injected at
//! construction and immutable afterwards; tests run with distinct secrets.
//!
//! All verification failures (malformed structure, signature mismatch,
//! unexpected algorithm, expired) collapse to a single `InvalidToken`
//! error so callers cannot be used as a verification oracle. The specific
//! cause is logged at debug level.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use souk_types::{TokenType, User};
use uuid::Uuid;

use crate::{claims::TokenClaims, error::AuthError};

/// The only algorithm this service signs with or accepts
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenCodec {
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        }
    }

    /// Sign a token for `user` with `iat = now` and `exp = now + lifetime`
    pub fn issue(
        &self,
        user: &User,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id,
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            role: user.role,
            token_type,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Unavailable(format!("token signing failed: {e}")))
    }

    /// Verify signature, algorithm, issuer, and expiry; return the claims
    ///
    /// Expiry is checked with zero leeway: a token is invalid the second
    /// its `exp` passes.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        // Inspect the header before decoding so an unexpected algorithm is
        // rejected even if it would otherwise validate
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(cause = %e, "token rejected: malformed header");
            AuthError::InvalidToken
        })?;

        if header.alg != SIGNING_ALGORITHM {
            tracing::debug!(alg = ?header.alg, "token rejected: unexpected algorithm");
            return Err(AuthError::InvalidToken);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(cause = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        Ok(data.claims)
    }
}
