//! Session store key conventions

use uuid::Uuid;

/// Key under which a user's currently valid refresh token is stored
///
/// `refresh_token:<user_id>` -> refresh token string, TTL = refresh lifetime.
pub fn refresh_token_key(user_id: Uuid) -> String {
    format!("refresh_token:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key_format() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            refresh_token_key(id),
            "refresh_token:550e8400-e29b-41d4-a716-446655440000"
        );
    }
}
