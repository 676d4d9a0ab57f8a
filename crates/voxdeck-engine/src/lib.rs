//! Batch creation of audio flashcards in Anki.
//!
//! This crate reads a delimited phrase list, synthesizes pronunciation audio
//! for each front text and adds the resulting notes through AnkiConnect,
//! skipping phrases that already have a note in the target deck. It is
//! built on the [`voxdeck_connect`] client.
//!
//! # Quick Start
//!
//! ```no_run
//! use voxdeck_engine::{Engine, GoogleTranslateSpeech, RunConfig, TracingSink};
//!
//! # async fn example() -> voxdeck_engine::Result<()> {
//! let config = RunConfig::load("voxdeck.toml")?;
//! let engine = Engine::for_config(&config)?;
//! let speech = GoogleTranslateSpeech::new()?;
//!
//! let report = engine.batch(&config, &speech, &TracingSink).run().await?;
//! println!("Total cards added: {}", report.cards_added);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Settings layers and validation
//! - [`phrase`] - Phrase file parsing
//! - [`speech`] - Speech synthesis backends
//! - [`media`] - Audio artifacts and upload naming
//! - [`events`] - Progress events and sinks
//! - [`batch`] - The batch workflow
//!
//! # Feature Flags
//!
//! - `google-tts` (default) - [`GoogleTranslateSpeech`] backend

mod error;

pub mod batch;
pub mod config;
pub mod events;
pub mod media;
pub mod phrase;
pub mod speech;

pub use batch::{BatchEngine, ItemFailure, RunReport, StopReason};
pub use config::{PartialConfig, RunConfig};
pub use error::{Error, Result};
pub use events::{EventSink, MemorySink, RunEvent, Stage, TracingSink};
pub use media::{AudioArtifact, MediaNamer};
pub use phrase::PhraseLine;
#[cfg(feature = "google-tts")]
pub use speech::GoogleTranslateSpeech;
pub use speech::{SpeechSynthesizer, SynthesisError};

// Re-export client types for convenience
pub use voxdeck_connect::{CardStoreClient, ClientBuilder, Note, NoteBuilder, QueryBuilder};

/// Entry point for voxdeck workflows.
///
/// Wraps a [`CardStoreClient`] and hands out workflow engines that borrow it.
///
/// # Example
///
/// ```no_run
/// use voxdeck_engine::{CardStoreClient, Engine};
///
/// # fn example() -> voxdeck_engine::Result<()> {
/// let client = CardStoreClient::builder()
///     .url("http://localhost:8765")
///     .build()?;
/// let engine = Engine::from_client(client);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: CardStoreClient,
}

impl Engine {
    /// Create an engine from an existing client.
    pub fn from_client(client: CardStoreClient) -> Self {
        Self { client }
    }

    /// Create an engine talking to the endpoint named in `config`.
    pub fn for_config(config: &RunConfig) -> Result<Self> {
        let client = CardStoreClient::builder().url(&config.anki_url).build()?;
        Ok(Self::from_client(client))
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &CardStoreClient {
        &self.client
    }

    /// Access the batch workflow for one run.
    pub fn batch<'a, S, K>(
        &'a self,
        config: &'a RunConfig,
        speech: &'a S,
        sink: &'a K,
    ) -> BatchEngine<'a, S, K>
    where
        S: SpeechSynthesizer,
        K: EventSink,
    {
        BatchEngine::new(&self.client, config, speech, sink)
    }
}
