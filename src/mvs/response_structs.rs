//! Deserialization structures for MultiVersus API responses.
//!
//! These structs mirror the JSON payloads returned by the stats server and are
//! converted into the internal representations of [`crate::mvs::structs`]
//! before the rest of the bot sees them.

use serde::Deserialize;

/// Response of the session creation call.
///
/// ```json
/// { "token": "abc123", "accountId": "account1" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Access token to authenticate all subsequent API calls
    pub token: String,
    /// Account id of the bot session
    pub account_id: String,
}

/// Response of the account lookup call.
///
/// ```json
/// {
///   "id": "account2",
///   "username": "alice",
///   "level": 7,
///   "wins": 42,
///   "losses": 13
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: String,
    /// Public username of the player
    pub username: String,
    /// Account level
    pub level: u32,
    /// Total number of won matches
    pub wins: u32,
    /// Total number of lost matches
    pub losses: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_response_from_json() {
        let body = r#"{"token": "abc123", "accountId": "account1"}"#;
        let session: SessionResponse = serde_json::from_str(body).unwrap();

        assert_eq!(session.token, "abc123");
        assert_eq!(session.account_id, "account1");
    }

    #[test]
    fn test_account_response_from_json() {
        let body = serde_json::json!({
            "id": "account2",
            "username": "alice",
            "level": 7,
            "wins": 42,
            "losses": 13,
        });
        let account: AccountResponse = serde_json::from_value(body).unwrap();

        assert_eq!(account.id, "account2");
        assert_eq!(account.username, "alice");
        assert_eq!(account.level, 7);
        assert_eq!(account.wins, 42);
        assert_eq!(account.losses, 13);
    }
}
