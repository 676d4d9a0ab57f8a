//! A small async client for the AnkiConnect API.
//!
//! Covers the actions needed to populate a deck from outside Anki: listing
//! decks, searching for notes, storing media files and adding notes. Any
//! other action is reachable through [`CardStoreClient::invoke`].
//!
//! # Quick Start
//!
//! ```no_run
//! use voxdeck_connect::{CardStoreClient, NoteBuilder};
//!
//! # async fn example() -> voxdeck_connect::Result<()> {
//! let client = CardStoreClient::builder().build()?;
//!
//! let note = NoteBuilder::new("Spanish", "Basic")
//!     .field("Front", "Hola")
//!     .field("Back", "Hello")
//!     .build();
//! let id = client.notes().add(&note).await?;
//! println!("created note {id}");
//! # Ok(())
//! # }
//! ```
//!
//! # Action Groups
//!
//! - [`CardStoreClient::decks()`] - List decks
//! - [`CardStoreClient::notes()`] - Find and add notes
//! - [`CardStoreClient::media()`] - Store media files
//! - [`CardStoreClient::misc()`] - Version check
//!
//! # Requirements
//!
//! Anki must be running with the
//! [AnkiConnect](https://ankiweb.net/shared/info/2055492159) add-on. By
//! default the client connects to `http://127.0.0.1:8765`.

pub mod actions;
pub mod client;
pub mod error;
pub mod query;
mod request;
pub mod types;

pub use client::{CardStoreClient, ClientBuilder, DEFAULT_URL};
pub use error::{Error, Result};
pub use query::{OrBuilder, QueryBuilder};
pub use types::{Note, NoteBuilder, StoreMediaParams, sound_tag};
