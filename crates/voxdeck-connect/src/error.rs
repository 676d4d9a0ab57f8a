//! Error types for the voxdeck-connect crate.
//!
//! Failures fall into two groups that callers treat differently:
//!
//! - [`Error::Connectivity`]: the request never produced a usable response
//!   (connection refused, timeout, non-2xx status). Anki is most likely not
//!   running, so nothing else will work either.
//! - [`Error::Remote`]: AnkiConnect answered, but the action itself failed
//!   (deck not found, duplicate note, invalid query). Other actions may
//!   still succeed.
//!
//! # Example
//!
//! ```no_run
//! use voxdeck_connect::{CardStoreClient, Error};
//!
//! # async fn example() -> voxdeck_connect::Result<()> {
//! let client = CardStoreClient::builder().build()?;
//!
//! match client.decks().names().await {
//!     Ok(decks) => println!("Found {} decks", decks.len()),
//!     Err(e) if e.is_connectivity() => {
//!         eprintln!("Please start Anki with AnkiConnect installed: {e}");
//!     }
//!     Err(Error::Remote(msg)) => eprintln!("AnkiConnect refused: {msg}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange failed before a response body could be read.
    ///
    /// Covers refused connections, timeouts and non-2xx status codes.
    #[error("could not reach AnkiConnect: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// AnkiConnect returned an error message.
    ///
    /// Common messages include:
    /// - "cannot create note because it is a duplicate"
    /// - "deck was not found"
    /// - "model was not found"
    #[error("AnkiConnect error: {0}")]
    Remote(String),

    /// Response carried neither a result nor an error.
    #[error("AnkiConnect returned empty response")]
    EmptyResponse,

    /// The response body was not the JSON shape expected for the action.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure happened at the transport level.
    ///
    /// A connectivity failure means the store is unreachable; callers should
    /// stop rather than move on to the next operation.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity(_))
    }
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
