//! Action groups for AnkiConnect operations.
//!
//! Each group wraps [`CardStoreClient::invoke`](crate::CardStoreClient::invoke)
//! with typed parameters and results for one domain.

mod decks;
mod media;
mod misc;
mod notes;

pub use decks::DeckActions;
pub use media::MediaActions;
pub use misc::MiscActions;
pub use notes::NoteActions;
