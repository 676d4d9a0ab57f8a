//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use voxdeck_connect::{CardStoreClient, NoteBuilder, QueryBuilder};
//!
//! # async fn example() -> voxdeck_connect::Result<()> {
//! let client = CardStoreClient::builder().build()?;
//!
//! let query = QueryBuilder::new().deck("Spanish").field("Front", "Hola").build();
//! if client.notes().find(&query).await?.is_empty() {
//!     let note = NoteBuilder::new("Spanish", "Basic")
//!         .field("Front", "Hola")
//!         .field("Back", "Hello")
//!         .build();
//!     client.notes().add(&note).await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::CardStoreClient;
use crate::error::Result;
use crate::types::Note;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`CardStoreClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a CardStoreClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

#[derive(Serialize)]
struct FindNotesParams<'a> {
    query: &'a str,
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. AnkiConnect rejects notes whose
    /// first field duplicates an existing note of the same model.
    pub async fn add(&self, note: &Note) -> Result<i64> {
        self.client.invoke("addNote", AddNoteParams { note }).await
    }

    /// Find notes matching a search query.
    ///
    /// Returns the matching note IDs, empty when nothing matches. See
    /// [`QueryBuilder`](crate::QueryBuilder) for building queries.
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findNotes", FindNotesParams { query })
            .await
    }
}
