//! Miscellaneous AnkiConnect actions.

use crate::client::CardStoreClient;
use crate::error::Result;

/// Provides access to miscellaneous AnkiConnect operations.
///
/// Obtained via [`CardStoreClient::misc()`].
#[derive(Debug)]
pub struct MiscActions<'a> {
    pub(crate) client: &'a CardStoreClient,
}

impl<'a> MiscActions<'a> {
    /// Get the AnkiConnect API version.
    ///
    /// Useful for verifying that AnkiConnect is running and accessible.
    pub async fn version(&self) -> Result<u8> {
        self.client.invoke_without_params("version").await
    }
}
