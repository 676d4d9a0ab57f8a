//! Deck-related AnkiConnect actions.

use crate::client::CardStoreClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`CardStoreClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a CardStoreClient,
}

impl<'a> DeckActions<'a> {
    /// List the names of all decks in the collection.
    ///
    /// This is a read-only call, which makes it a good connectivity probe.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use voxdeck_connect::CardStoreClient;
    /// # async fn example() -> voxdeck_connect::Result<()> {
    /// let client = CardStoreClient::builder().build()?;
    /// let decks = client.decks().names().await?;
    /// assert!(decks.iter().any(|d| d == "Default"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("deckNames").await
    }
}
