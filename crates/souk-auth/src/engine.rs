//! Auth engine: registration, login, refresh, logout, validation
//!
//! The stateful core. Holds injected store handles and the token codec;
//! keeps no in-process cache of user or session data, so refresh-token
//! revocation is observable across instances immediately while access-token
//! validation stays a pure local check.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use souk_store::{keys::refresh_token_key, SessionStore, UserStore};
use souk_types::{AuthContext, NewUser, TokenType, User};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::{codec::TokenCodec, error::AuthError, password};

/// Access and refresh tokens issued together by one authentication event
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub tokens: TokenPair,
    pub user: User,
}

pub struct AuthEngine {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    codec: TokenCodec,
    access_ttl: StdDuration,
    refresh_ttl: StdDuration,
    /// Verified against when the email is unknown, so both login failure
    /// paths pay the same argon2 cost
    dummy_hash: String,
}

impl AuthEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        codec: TokenCodec,
        access_ttl: StdDuration,
        refresh_ttl: StdDuration,
    ) -> Result<Self, AuthError> {
        let dummy_hash = password::hash_password("souk-timing-equalizer")?;
        Ok(Self {
            users,
            sessions,
            codec,
            access_ttl,
            refresh_ttl,
            dummy_hash,
        })
    }

    fn access_lifetime(&self) -> Duration {
        Duration::seconds(self.access_ttl.as_secs() as i64)
    }

    fn refresh_lifetime(&self) -> Duration {
        Duration::seconds(self.refresh_ttl.as_secs() as i64)
    }

    /// Register a new user under a tenant
    ///
    /// The plaintext password is hashed immediately and never stored. The
    /// created user is `active`, `unverified`, and `customer`-roled; the
    /// returned value has its hash cleared.
    pub async fn register(
        &self,
        tenant_id: Uuid,
        email: &str,
        password_plain: &str,
        profile: NewUser,
    ) -> Result<User, AuthError> {
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Validation("a valid email is required".into()));
        }
        if password_plain.len() < 8 {
            return Err(AuthError::Validation(
                "password must be at least 8 characters".into(),
            ));
        }

        // Exact-match, per-tenant uniqueness; case policy documented in DESIGN.md
        if self.users.find_by_email(tenant_id, email).await?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let hash = password::hash_password(password_plain)?;
        let user = User::new(tenant_id, email.to_string(), hash, profile);

        let created = self.users.create(user).await?;

        tracing::info!(user_id = %created.id, tenant_id = %tenant_id, "user registered");
        Ok(created.sanitized())
    }

    /// Authenticate a user and issue a token pair
    ///
    /// Unknown email, disabled account, and wrong password are
    /// indistinguishable to the caller. On success the refresh token
    /// becomes the user's single valid session entry, replacing any prior
    /// one.
    pub async fn login(
        &self,
        tenant_id: Uuid,
        email: &str,
        password_plain: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let user = match self.users.find_by_email(tenant_id, email).await? {
            Some(user) => user,
            None => {
                // Burn the same hashing cost as the found-user path
                let _ = password::verify_password(password_plain, &self.dummy_hash);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !password::verify_password(password_plain, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "login rejected: account disabled");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&user).await?;

        // Best-effort; a failed timestamp update must not fail the login
        let now = Utc::now();
        if let Err(e) = self.users.update_last_login(user.id, now).await {
            tracing::warn!(user_id = %user.id, error = %e, "failed to update last login");
        }

        tracing::info!(user_id = %user.id, tenant_id = %tenant_id, "login succeeded");
        Ok(LoginOutcome {
            tokens,
            user: user.sanitized(),
        })
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The session store holds the revocation ground truth: the presented
    /// token must byte-equal the stored entry, compared in constant time.
    /// The refresh token rotates on every call; the overwrite of the
    /// session entry is the commit point.
    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .codec
            .verify(presented)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.token_type != TokenType::Refresh {
            tracing::debug!(token_type = %claims.token_type, "refresh rejected: wrong token type");
            return Err(AuthError::InvalidRefreshToken);
        }

        let key = refresh_token_key(claims.sub);
        let stored = self
            .sessions
            .get(&key)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if stored.as_bytes().ct_eq(presented.as_bytes()).unwrap_u8() != 1 {
            tracing::info!(user_id = %claims.sub, "refresh rejected: token superseded or revoked");
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !user.is_active {
            return Err(AuthError::InvalidRefreshToken);
        }

        let tokens = self.issue_pair(&user).await?;
        tracing::debug!(user_id = %user.id, "refresh token rotated");
        Ok(tokens)
    }

    /// Revoke a user's session entry; idempotent
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.sessions.delete(&refresh_token_key(user_id)).await?;
        tracing::info!(user_id = %user_id, "logged out");
        Ok(())
    }

    /// Validate an access token and build the request identity
    ///
    /// Never consults the session store: access tokens are not individually
    /// revocable and expire on their own short TTL.
    pub fn validate(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self.codec.verify(token)?;

        if claims.token_type != TokenType::Access {
            tracing::debug!(token_type = %claims.token_type, "validation rejected: wrong token type");
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthContext {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
            email: claims.email,
            role: claims.role,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_else(Utc::now),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }

    /// Fetch a user by id with the hash cleared
    ///
    /// Backs profile routes; a valid token whose subject no longer exists
    /// is treated as invalid.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        Ok(user.sanitized())
    }

    /// Extract the user id from a refresh token without touching the store
    ///
    /// Used by the logout route, which receives the refresh token rather
    /// than an authenticated identity.
    pub fn refresh_token_owner(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = self
            .codec
            .verify(token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }
        Ok(claims.sub)
    }

    /// Mint both tokens and commit the refresh token as the session entry
    async fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_token = self
            .codec
            .issue(user, TokenType::Access, self.access_lifetime())?;
        let refresh_token = self
            .codec
            .issue(user, TokenType::Refresh, self.refresh_lifetime())?;

        // Single atomic overwrite; any prior refresh token is now revoked
        self.sessions
            .set(&refresh_token_key(user.id), &refresh_token, self.refresh_ttl)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at: Utc::now() + self.access_lifetime(),
        })
    }
}
