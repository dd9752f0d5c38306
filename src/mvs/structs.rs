//! Internal representations of MultiVersus data.

use std::fmt;

use crate::mvs::response_structs::AccountResponse;

/// Player profile as surfaced to Discord users.
///
/// Built from an [`AccountResponse`]; only keeps the fields the bot actually
/// displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    /// Public username of the player
    pub username: String,
    /// Account level
    pub level: u32,
    /// Total number of won matches
    pub wins: u32,
    /// Total number of lost matches
    pub losses: u32,
}

impl PlayerProfile {
    /// Returns a one-line human-readable summary of the profile.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvsbot::mvs::structs::PlayerProfile;
    ///
    /// let profile = PlayerProfile {
    ///     username: "alice".to_string(),
    ///     level: 7,
    ///     wins: 42,
    ///     losses: 13,
    /// };
    /// assert_eq!(profile.summary(), "alice (level 7): 42 wins, 13 losses");
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "{} (level {}): {} wins, {} losses",
            self.username, self.level, self.wins, self.losses
        )
    }
}

impl From<AccountResponse> for PlayerProfile {
    fn from(account: AccountResponse) -> Self {
        PlayerProfile {
            username: account.username,
            level: account.level,
            wins: account.wins,
            losses: account.losses,
        }
    }
}

impl fmt::Display for PlayerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let profile = PlayerProfile {
            username: "alice".to_string(),
            level: 7,
            wins: 42,
            losses: 13,
        };

        assert_eq!(profile.summary(), "alice (level 7): 42 wins, 13 losses");
    }

    #[test]
    fn test_from_account_response() {
        let account = AccountResponse {
            id: "account2".to_string(),
            username: "bob".to_string(),
            level: 3,
            wins: 10,
            losses: 20,
        };

        let profile = PlayerProfile::from(account);
        assert_eq!(profile.username, "bob");
        assert_eq!(profile.level, 3);
        assert_eq!(profile.wins, 10);
        assert_eq!(profile.losses, 20);
    }
}
