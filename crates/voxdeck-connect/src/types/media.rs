//! Media-related types.

use serde::Serialize;

/// Parameters for storing a media file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMediaParams {
    /// Filename to save as.
    pub filename: String,
    /// Base64-encoded file data.
    pub data: String,
    /// Delete existing file with same name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_existing: Option<bool>,
}

impl StoreMediaParams {
    /// Create params for storing base64-encoded data.
    pub fn from_base64(filename: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
            delete_existing: None,
        }
    }

    /// Set whether to delete an existing file with the same name.
    pub fn delete_existing(mut self, delete: bool) -> Self {
        self.delete_existing = Some(delete);
        self
    }
}
