//! Authentication endpoints

mod login;
mod logout;
mod me;
mod refresh;
mod register;

pub use login::{login, LoginRequest, LoginResponse};
pub use logout::{logout, LogoutRequest};
pub use me::me;
pub use refresh::{refresh, RefreshRequest, TokenResponse};
pub use register::{register, RegisterRequest};
