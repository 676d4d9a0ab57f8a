//! Media-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use voxdeck_connect::{CardStoreClient, StoreMediaParams};
//!
//! # async fn example() -> voxdeck_connect::Result<()> {
//! let client = CardStoreClient::builder().build()?;
//!
//! let params = StoreMediaParams::from_base64("hola.mp3", "SUQzBAAAAAAA");
//! let filename = client.media().store(params).await?;
//! println!("stored as {filename}");
//! # Ok(())
//! # }
//! ```

use crate::client::CardStoreClient;
use crate::error::Result;
use crate::types::StoreMediaParams;

/// Provides access to media-related AnkiConnect operations.
///
/// Obtained via [`CardStoreClient::media()`].
#[derive(Debug)]
pub struct MediaActions<'a> {
    pub(crate) client: &'a CardStoreClient,
}

impl<'a> MediaActions<'a> {
    /// Store a file in Anki's media folder.
    ///
    /// Returns the filename that was used. An existing file with the same
    /// name is overwritten unless the params say otherwise.
    pub async fn store(&self, params: StoreMediaParams) -> Result<String> {
        self.client.invoke("storeMediaFile", params).await
    }
}
