//! HTTP client for the MultiVersus stats API.
//!
//! This module provides the [`MvsRequester`] struct for making HTTP requests
//! to the stats server: opening and closing authenticated sessions and looking
//! up player accounts.

use log::{debug, info};
use mockall::automock;
use reqwest::Client;

use crate::mvs::response_structs::{AccountResponse, SessionResponse};

/// Name of the header carrying the API key on session creation.
const API_KEY_HEADER: &str = "x-hydra-api-key";

/// Name of the header carrying the session token on authenticated calls.
const ACCESS_TOKEN_HEADER: &str = "x-hydra-access-token";

/// HTTP client for requesting data from the MultiVersus stats server.
///
/// # Examples
///
/// ```no_run
/// let requester = MvsRequester::new("https://stats.server", "your_api_key");
/// let session = requester.create_session().await.unwrap();
/// println!("Session token: {}", session.token);
/// ```
pub struct MvsRequester {
    /// Stats server base url
    url: String,
    /// API key used to open sessions
    ///
    /// The key is issued by the stats service and read from the bot
    /// configuration.
    api_key: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the stats server.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// All methods return [`anyhow::Error`] so callers see one error type whether
/// the failure comes from the transport or from the API itself.
#[automock]
pub trait Requester {
    /// Opens an authenticated session and returns its token.
    async fn create_session(&self) -> Result<SessionResponse, anyhow::Error>;
    /// Looks up a player account by username.
    async fn get_account(
        &self,
        token: &str,
        username: &str,
    ) -> Result<AccountResponse, anyhow::Error>;
    /// Closes a previously opened session.
    async fn delete_session(&self, token: &str) -> Result<(), anyhow::Error>;
}

impl MvsRequester {
    /// Create a new [MvsRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the stats server.
    /// * `api_key` - The API key used to open sessions.
    pub fn new(url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::new();
        MvsRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }
}

impl Requester for MvsRequester {
    /// Request `POST /sessions` to open an authenticated session.
    ///
    /// This api call returns a json object with the session token:
    /// ```
    /// { token: "abc123", accountId: "account1" }
    /// ```
    /// This method transforms this json into a [`SessionResponse`].
    async fn create_session(&self) -> Result<SessionResponse, anyhow::Error> {
        let url = format!("{}/sessions", &self.url);
        info!("request new session");
        debug!("request POST {}", &url);

        let session_response: SessionResponse = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("session opened for account {}", &session_response.account_id);

        Ok(session_response)
    }

    /// Request `/profiles/search?username={username}` to look up a player.
    ///
    /// This api call returns a json object representing the account:
    /// ```
    /// { id: "account2", username: "alice", level: 7, wins: 42, losses: 13 }
    /// ```
    /// This method transforms this json into an [`AccountResponse`].
    ///
    /// # Arguments
    ///
    /// * `token` - The session token obtained from [`Self::create_session`].
    /// * `username` - The username to look up.
    async fn get_account(
        &self,
        token: &str,
        username: &str,
    ) -> Result<AccountResponse, anyhow::Error> {
        let url = format!("{}/profiles/search", &self.url);
        info!("request account for username {}", username);
        debug!("request {}?username={}", &url, username);

        let account_response: AccountResponse = self
            .client
            .get(&url)
            .header(ACCESS_TOKEN_HEADER, token)
            .query(&[("username", username)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            "response from {}?username={} -> {:?}",
            &url, username, &account_response
        );

        Ok(account_response)
    }

    /// Request `DELETE /sessions/current` to close the session.
    ///
    /// # Arguments
    ///
    /// * `token` - The token of the session to close.
    async fn delete_session(&self, token: &str) -> Result<(), anyhow::Error> {
        let url = format!("{}/sessions/current", &self.url);
        info!("close session");
        debug!("request DELETE {}", &url);

        self.client
            .delete(&url)
            .header(ACCESS_TOKEN_HEADER, token)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
