//! Bounded retry loop for Discord command synchronization.
//!
//! Publishing the slash command set to Discord can fail transiently, so the
//! bot retries it a fixed number of times with a fixed delay between attempts.
//! There is no backoff, no jitter and no overall deadline: the loop either
//! ends in [`SyncOutcome::Succeeded`] or gives up in [`SyncOutcome::Exhausted`]
//! after the configured attempt ceiling, leaving recovery to the `/sync`
//! admin command.
//!
//! The loop is deterministic:
//!
//! ```text
//! Attempting(n) --success--> Succeeded
//! Attempting(n) --failure, n < max_attempts--> wait delay --> Attempting(n+1)
//! Attempting(max_attempts) --failure--> Exhausted
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{error, info, warn};

/// Retry parameters for command synchronization.
///
/// Built from the `[discord.sync]` section of the configuration, see
/// [`crate::config::SyncConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up.
    ///
    /// At least one attempt is always made, even with a value of 0.
    pub max_attempts: u32,
    /// Fixed delay between two consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a new [RetryPolicy].
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Attempt ceiling.
    /// * `delay_seconds` - Seconds to wait between two attempts.
    pub fn new(max_attempts: u32, delay_seconds: u64) -> Self {
        RetryPolicy {
            max_attempts,
            delay: Duration::from_secs(delay_seconds),
        }
    }
}

/// Terminal state of a synchronization retry loop.
///
/// Exhaustion is not an error: the bot keeps running and an operator can
/// re-trigger the synchronization with the `/sync` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The operation succeeded, possibly after retries.
    Succeeded {
        /// Number of attempts performed, including the successful one
        attempts: u32,
    },
    /// All attempts failed.
    Exhausted {
        /// Number of attempts performed
        attempts: u32,
        /// Description of the last failure
        last_error: String,
    },
}

/// Runs `operation` until it succeeds or the policy's attempt ceiling is hit.
///
/// Each failed attempt is logged; after exhaustion a terminal error message
/// asks for manual intervention. The function never returns an error, the
/// caller inspects the returned [`SyncOutcome`] if it needs the result.
///
/// # Arguments
///
/// * `policy` - Attempt ceiling and inter-attempt delay.
/// * `operation` - The fallible async operation to retry.
///
/// # Examples
///
/// ```no_run
/// use mvsbot::retry::{RetryPolicy, sync_with_retry};
///
/// # async fn example() {
/// let policy = RetryPolicy::new(3, 5);
/// let outcome = sync_with_retry(&policy, || async { register_commands().await }).await;
/// println!("sync outcome: {:?}", outcome);
/// # }
/// ```
pub async fn sync_with_retry<F, Fut, E>(policy: &RetryPolicy, mut operation: F) -> SyncOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(()) => {
                info!("command sync succeeded on attempt {}", attempt);
                return SyncOutcome::Succeeded { attempts: attempt };
            }
            Err(e) if attempt < policy.max_attempts => {
                warn!(
                    "command sync attempt {}/{} failed: {}, retrying in {:?}",
                    attempt, policy.max_attempts, e, policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(
                    "command sync failed after {} attempt(s): {}. Commands may be stale, run /sync manually once the issue is resolved",
                    attempt, e
                );
                return SyncOutcome::Exhausted {
                    attempts: attempt,
                    last_error: e.to_string(),
                };
            }
        }
    }
}
