//! Response formatters for bot commands.
//!
//! This module provides functions to format the text replies sent back to
//! Discord users. Keeping them as plain functions makes the user-visible
//! wording testable without a gateway connection.

use crate::mvs::PlayerProfile;
use crate::retry::SyncOutcome;
use crate::state::Readiness;

/// Formats the reply for a successful player lookup.
///
/// # Arguments
///
/// * `username` - The username as typed by the invoking user.
/// * `profile` - The profile returned by the stats API.
///
/// # Examples
///
/// ```
/// # use mvsbot::commands::responses::format_player_info;
/// let reply = format_player_info("alice", &profile);
/// assert!(reply.contains("alice"));
/// ```
pub fn format_player_info(username: &str, profile: &PlayerProfile) -> String {
    format!("Player info for {}: {}", username, profile.summary())
}

/// Formats the reply sent when the stats API is not available.
///
/// Used both before the first successful initialization and after a failed
/// one; the lookup is not attempted in either case.
pub fn format_api_unavailable() -> String {
    "Sorry, the API is not available at the moment.".to_owned()
}

/// Formats the reply for a lookup that was attempted and failed.
///
/// # Arguments
///
/// * `error` - Description of the failure.
pub fn format_lookup_error(error: &str) -> String {
    format!("An error occurred while fetching player info: {}", error)
}

/// Formats the reply of the `/sync` admin command.
///
/// # Arguments
///
/// * `outcome` - Terminal state of the synchronization retry loop.
pub fn format_sync_outcome(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Succeeded { attempts: 1 } => "Commands synced!".to_owned(),
        SyncOutcome::Succeeded { attempts } => {
            format!("Commands synced after {} attempts!", attempts)
        }
        SyncOutcome::Exhausted {
            attempts,
            last_error,
        } => format!(
            "Command sync failed after {} attempts: {}",
            attempts, last_error
        ),
    }
}

/// Formats the reply of the `/init_api` admin command.
///
/// # Arguments
///
/// * `readiness` - Readiness reported by the initialization attempt.
pub fn format_init_outcome(readiness: Readiness) -> String {
    match readiness {
        Readiness::ApiReady => "API initialized successfully.".to_owned(),
        Readiness::ApiUnavailable => {
            "API initialization failed, see the bot logs for details.".to_owned()
        }
        Readiness::Starting => "API initialization has not run yet.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_player_info_contains_name_and_stats() {
        let profile = PlayerProfile {
            username: "alice".to_string(),
            level: 7,
            wins: 42,
            losses: 13,
        };

        let reply = format_player_info("alice", &profile);
        assert!(reply.contains("alice"));
        assert!(reply.contains("42"));
    }

    #[test]
    fn test_format_api_unavailable() {
        assert_eq!(
            format_api_unavailable(),
            "Sorry, the API is not available at the moment."
        );
    }

    #[test]
    fn test_format_lookup_error_contains_description() {
        let reply = format_lookup_error("account not found");
        assert!(reply.contains("account not found"));
    }

    #[test]
    fn test_format_sync_outcome_first_attempt() {
        let outcome = SyncOutcome::Succeeded { attempts: 1 };
        assert_eq!(format_sync_outcome(&outcome), "Commands synced!");
    }

    #[test]
    fn test_format_sync_outcome_after_retries() {
        let outcome = SyncOutcome::Succeeded { attempts: 3 };
        assert_eq!(
            format_sync_outcome(&outcome),
            "Commands synced after 3 attempts!"
        );
    }

    #[test]
    fn test_format_sync_outcome_exhausted() {
        let outcome = SyncOutcome::Exhausted {
            attempts: 3,
            last_error: "rate limited".to_string(),
        };
        let reply = format_sync_outcome(&outcome);
        assert!(reply.contains("failed after 3 attempts"));
        assert!(reply.contains("rate limited"));
    }

    #[test]
    fn test_format_init_outcome() {
        assert_eq!(
            format_init_outcome(Readiness::ApiReady),
            "API initialized successfully."
        );
        assert!(format_init_outcome(Readiness::ApiUnavailable).contains("failed"));
    }
}
