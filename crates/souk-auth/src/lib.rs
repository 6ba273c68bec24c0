//! # Souk Auth
//!
//! Token lifecycle and tenant-scoped authentication engine.
//!
//! ## Components
//!
//! - [`codec::TokenCodec`]: stateless HS256 sign/verify of access and
//!   refresh token claims
//! - [`engine::AuthEngine`]: registration, login, refresh, logout, and
//!   access-token validation over injected credential and session stores
//! - [`password`]: Argon2id password hashing
//!
//! ## Security
//!
//! - Only HS256 is accepted on verification; tokens carrying any other
//!   algorithm in their header are rejected
//! - Credential failures are deliberately uniform: unknown email, disabled
//!   account, and wrong password all surface [`error::AuthError::InvalidCredentials`]
//! - Refresh-token revocation is enforced against the session store with a
//!   constant-time comparison

pub mod claims;
pub mod codec;
pub mod engine;
pub mod error;
pub mod password;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use engine::{AuthEngine, LoginOutcome, TokenPair};
pub use error::AuthError;
