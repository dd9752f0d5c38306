//! Shared application state and stats API lifecycle.
//!
//! This module provides [`AppState`], the single state struct constructed at
//! startup and injected into every command handler and the background
//! initialization task. It owns the connection to the MultiVersus stats API
//! and exposes an explicit readiness value instead of relying on incidental
//! null checks.
//!
//! # Lifecycle
//!
//! ```text
//! Starting --initialize_api() ok--> ApiReady
//! Starting --initialize_api() err--> ApiUnavailable
//! ApiReady/ApiUnavailable --initialize_api()--> ApiReady | ApiUnavailable
//! ```
//!
//! At most one API session is live at a time: `initialize_api` closes the
//! previous session before opening a new one, so a stale token is never used
//! concurrently with a fresh one.
//!
//! # Thread Safety
//!
//! The session is behind a `tokio::sync::RwLock`: `initialize_api` is the
//! single writer, command handlers are concurrent readers. Handlers copy the
//! token out of the lock before calling the API so the lock is never held
//! across a network call on the read path.

use log::{error, info, warn};
use tokio::sync::RwLock;

use crate::mvs::{PlayerProfile, Requester};
use crate::retry::RetryPolicy;

/// Readiness of the stats API connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The bot has not attempted to connect yet
    Starting,
    /// A session is open and lookups can be served
    ApiReady,
    /// The last connection attempt failed, lookups are refused
    ApiUnavailable,
}

/// Result of a player lookup, as seen by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// No API session is available, the lookup was not attempted
    Unavailable,
    /// The player was found
    Found(PlayerProfile),
    /// The lookup was attempted and failed
    Failed(String),
}

/// An open session with the stats API.
///
/// Holds the token returned by the session creation call. Dropping the struct
/// does not close the session on the server, [`AppState::initialize_api`] and
/// [`AppState::shutdown`] release it explicitly.
#[derive(Debug, Clone)]
struct ApiSession {
    /// Access token for authenticated API calls
    token: String,
}

/// Inner state guarded by the lock: readiness and the optional session move
/// together so readers never observe one without the other.
struct ApiState {
    readiness: Readiness,
    session: Option<ApiSession>,
}

/// Shared application state for the bot.
///
/// Constructed once at startup and shared (behind an `Arc`) between the
/// Discord command handlers and the background initialization task. Generic
/// over the [`Requester`] implementation so tests can inject a mock.
pub struct AppState<R: Requester> {
    /// HTTP requester for the stats API
    requester: R,
    /// Retry parameters for command synchronization
    sync_policy: RetryPolicy,
    /// Current readiness and API session
    api: RwLock<ApiState>,
}

impl<R: Requester> AppState<R> {
    /// Create a new [AppState] in the [`Readiness::Starting`] state.
    ///
    /// # Arguments
    ///
    /// * `requester` - An implementation of the [Requester] trait for the stats API.
    /// * `sync_policy` - Retry parameters for command synchronization.
    pub fn new(requester: R, sync_policy: RetryPolicy) -> Self {
        AppState {
            requester,
            sync_policy,
            api: RwLock::new(ApiState {
                readiness: Readiness::Starting,
                session: None,
            }),
        }
    }

    /// Returns the retry policy for command synchronization.
    pub fn sync_policy(&self) -> &RetryPolicy {
        &self.sync_policy
    }

    /// Returns the current readiness of the stats API connection.
    pub async fn readiness(&self) -> Readiness {
        self.api.read().await.readiness
    }

    /// Opens a session with the stats API, replacing any previous one.
    ///
    /// The previous session, if any, is closed first so only one session is
    /// ever live. A connection failure is recovered: the state moves to
    /// [`Readiness::ApiUnavailable`], the error is logged and the bot keeps
    /// serving commands.
    ///
    /// Safe to call repeatedly, each call fully replaces the prior state.
    ///
    /// # Returns
    ///
    /// The readiness after the attempt, for reporting in the `/init_api`
    /// admin command.
    pub async fn initialize_api(&self) -> Readiness {
        let mut api = self.api.write().await;

        // Release the previous session before installing a new one
        if let Some(previous) = api.session.take()
            && let Err(e) = self.requester.delete_session(&previous.token).await
        {
            warn!("failed to close previous api session: {}", e);
        }

        match self.requester.create_session().await {
            Ok(session) => {
                info!("stats api session opened for account {}", session.account_id);
                api.session = Some(ApiSession {
                    token: session.token,
                });
                api.readiness = Readiness::ApiReady;
            }
            Err(e) => {
                error!("failed to initialize stats api: {}", e);
                api.session = None;
                api.readiness = Readiness::ApiUnavailable;
            }
        }

        api.readiness
    }

    /// Looks up a player by username through the stats API.
    ///
    /// If no session is available the lookup is not attempted and
    /// [`Lookup::Unavailable`] is returned. A failed lookup is converted to
    /// [`Lookup::Failed`] with the error description, it never propagates to
    /// the command handler.
    ///
    /// # Arguments
    ///
    /// * `username` - The username to look up.
    pub async fn lookup_player(&self, username: &str) -> Lookup {
        let token = {
            let api = self.api.read().await;
            match &api.session {
                Some(session) => session.token.clone(),
                None => return Lookup::Unavailable,
            }
        };

        match self.requester.get_account(&token, username).await {
            Ok(account) => Lookup::Found(PlayerProfile::from(account)),
            Err(e) => {
                warn!("player lookup failed for {}: {}", username, e);
                Lookup::Failed(e.to_string())
            }
        }
    }

    /// Closes the API session as part of the ordered shutdown.
    ///
    /// Called before the gateway connection is released so the stats API sees
    /// a clean logout. Close failures are logged only.
    pub async fn shutdown(&self) {
        let mut api = self.api.write().await;

        if let Some(session) = api.session.take() {
            if let Err(e) = self.requester.delete_session(&session.token).await {
                warn!("failed to close api session on shutdown: {}", e);
            } else {
                info!("stats api session closed");
            }
        }
        api.readiness = Readiness::ApiUnavailable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvs::{AccountResponse, MockRequester, SessionResponse};
    use mockall::predicate::eq;

    fn session_response(token: &str) -> SessionResponse {
        SessionResponse {
            token: token.to_string(),
            account_id: "bot_account".to_string(),
        }
    }

    fn alice() -> AccountResponse {
        AccountResponse {
            id: "account2".to_string(),
            username: "alice".to_string(),
            level: 7,
            wins: 42,
            losses: 13,
        }
    }

    #[tokio::test]
    async fn test_starts_in_starting_state() {
        let state = AppState::new(MockRequester::new(), RetryPolicy::new(3, 5));
        assert_eq!(state.readiness().await, Readiness::Starting);
    }

    #[tokio::test]
    async fn test_initialize_api_success() {
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Ok(session_response("abc123")));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiReady);
        assert_eq!(state.readiness().await, Readiness::ApiReady);
    }

    #[tokio::test]
    async fn test_initialize_api_failure_is_recovered() {
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("timeout")));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiUnavailable);
        assert_eq!(state.readiness().await, Readiness::ApiUnavailable);
    }

    #[tokio::test]
    async fn test_reinitialize_closes_previous_session() {
        let mut requester = MockRequester::new();
        let mut tokens = vec!["token2", "token1"];
        requester
            .expect_create_session()
            .times(2)
            .returning(move || Ok(session_response(tokens.pop().unwrap())));
        // The first session must be released before the second is installed
        requester
            .expect_delete_session()
            .with(eq("token1"))
            .times(1)
            .returning(|_| Ok(()));
        // The lookup after re-initialization uses the new token only
        requester
            .expect_get_account()
            .with(eq("token2"), eq("alice"))
            .times(1)
            .returning(|_, _| Ok(alice()));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiReady);
        assert_eq!(state.initialize_api().await, Readiness::ApiReady);

        let lookup = state.lookup_player("alice").await;
        assert!(matches!(lookup, Lookup::Found(_)));
    }

    #[tokio::test]
    async fn test_reinitialize_failure_replaces_session_with_none() {
        let mut requester = MockRequester::new();
        let mut results = vec![Err(anyhow::anyhow!("timeout")), Ok(session_response("token1"))];
        requester
            .expect_create_session()
            .times(2)
            .returning(move || results.pop().unwrap());
        requester
            .expect_delete_session()
            .with(eq("token1"))
            .times(1)
            .returning(|_| Ok(()));
        // The stale session must never be consulted after the failed re-init
        requester.expect_get_account().times(0);

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiReady);
        assert_eq!(state.initialize_api().await, Readiness::ApiUnavailable);
        assert_eq!(state.lookup_player("alice").await, Lookup::Unavailable);
    }

    #[tokio::test]
    async fn test_lookup_without_session_does_not_call_api() {
        let mut requester = MockRequester::new();
        requester.expect_get_account().times(0);

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.lookup_player("bob").await, Lookup::Unavailable);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_converted() {
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Ok(session_response("abc123")));
        requester
            .expect_get_account()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("account not found")));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));
        state.initialize_api().await;

        match state.lookup_player("ghost").await {
            Lookup::Failed(message) => assert!(message.contains("account not found")),
            other => panic!("expected Lookup::Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_success_then_lookup() {
        // End-to-end: connect succeeds, lookup returns the player profile
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Ok(session_response("abc123")));
        requester
            .expect_get_account()
            .with(eq("abc123"), eq("alice"))
            .times(1)
            .returning(|_, _| Ok(alice()));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiReady);
        match state.lookup_player("alice").await {
            Lookup::Found(profile) => {
                assert_eq!(profile.username, "alice");
                assert_eq!(profile.wins, 42);
            }
            other => panic!("expected Lookup::Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_failure_then_lookup_is_unavailable() {
        // End-to-end: connect fails with a timeout, no lookup call is made
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("timeout")));
        requester.expect_get_account().times(0);

        let state = AppState::new(requester, RetryPolicy::new(3, 5));

        assert_eq!(state.initialize_api().await, Readiness::ApiUnavailable);
        assert_eq!(state.lookup_player("bob").await, Lookup::Unavailable);
    }

    #[tokio::test]
    async fn test_shutdown_closes_session() {
        let mut requester = MockRequester::new();
        requester
            .expect_create_session()
            .times(1)
            .returning(|| Ok(session_response("abc123")));
        requester
            .expect_delete_session()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(()));

        let state = AppState::new(requester, RetryPolicy::new(3, 5));
        state.initialize_api().await;
        state.shutdown().await;

        assert_eq!(state.readiness().await, Readiness::ApiUnavailable);
        assert_eq!(state.lookup_player("alice").await, Lookup::Unavailable);
    }
}
