//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::actions::{DeckActions, MediaActions, MiscActions, NoteActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Default URL for AnkiConnect.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a local AnkiConnect endpoint.
///
/// Every call is a single POST carrying `{action, version, params}`; the
/// client keeps no state between calls.
///
/// # Example
///
/// ```no_run
/// use voxdeck_connect::CardStoreClient;
///
/// # async fn example() -> voxdeck_connect::Result<()> {
/// let client = CardStoreClient::builder().build()?;
///
/// let decks = client.decks().names().await?;
/// println!("Decks: {:?}", decks);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardStoreClient {
    http_client: Client,
    base_url: String,
}

impl CardStoreClient {
    /// Create a builder for client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access note operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access media operations.
    pub fn media(&self) -> MediaActions<'_> {
        MediaActions { client: self }
    }

    /// Access miscellaneous operations.
    pub fn misc(&self) -> MiscActions<'_> {
        MiscActions { client: self }
    }

    /// Execute an arbitrary action with parameters.
    ///
    /// The typed action groups are thin wrappers over this method; use it
    /// directly for actions they don't cover.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use voxdeck_connect::CardStoreClient;
    /// # async fn example() -> voxdeck_connect::Result<()> {
    /// let client = CardStoreClient::builder().build()?;
    /// let ids: Vec<i64> = client
    ///     .invoke("findNotes", serde_json::json!({"query": "deck:Spanish"}))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params);
        self.send_request(&request).await
    }

    /// Execute an arbitrary action that takes no parameters.
    pub async fn invoke_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = AnkiRequest::<()>::without_params(action);
        self.send_request(&request).await
    }

    /// Send a request to AnkiConnect and process the response.
    async fn send_request<T, R>(&self, request: &AnkiRequest<'_, T>) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        debug!(action = request.action, url = %self.base_url, "invoking AnkiConnect");

        let body = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let anki_response: AnkiResponse<R> = serde_json::from_slice(&body)?;

        match (anki_response.result, anki_response.error) {
            (_, Some(err)) => {
                debug!(action = request.action, error = %err, "AnkiConnect reported an error");
                Err(Error::Remote(err))
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }
}

/// Builder for creating a [`CardStoreClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use voxdeck_connect::CardStoreClient;
///
/// # fn example() -> voxdeck_connect::Result<()> {
/// let client = CardStoreClient::builder()
///     .url("http://localhost:8765")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://127.0.0.1:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CardStoreClient> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("AnkiConnect URL is empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(CardStoreClient {
            http_client,
            base_url: self.base_url,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
