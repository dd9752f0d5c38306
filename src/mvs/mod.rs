//! MultiVersus stats API integration.
//!
//! This module provides the HTTP client used to talk to the stats server and
//! the data structures exchanged with it.
//!
//! # Modules
//!
//! - `requester` - HTTP client for making API requests to the stats server
//! - `response_structs` - Deserialization structures for API responses
//! - `structs` - Internal data structures representing player profiles
//!
//! # Examples
//!
//! ```no_run
//! use mvsbot::mvs::MvsRequester;
//!
//! let requester = MvsRequester::new("https://stats.example.com", "api_key");
//! // Open a session and look up players
//! ```

mod requester;
mod response_structs;
mod structs;

#[cfg(test)]
pub use crate::mvs::requester::MockRequester;
pub use crate::mvs::requester::{MvsRequester, Requester};
pub use crate::mvs::response_structs::{AccountResponse, SessionResponse};
pub use crate::mvs::structs::PlayerProfile;
