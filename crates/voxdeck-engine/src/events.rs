//! Progress events emitted during a batch run.
//!
//! The batch never writes output itself; it hands each [`RunEvent`] to an
//! [`EventSink`]. [`TracingSink`] forwards events to `tracing`, and
//! [`MemorySink`] keeps them for inspection by tests or an embedding UI.

use std::fmt;
use std::sync::Mutex;

use tracing::{error, info, warn};

/// Step of the per-phrase pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Searching the deck for an existing note with the same front.
    DuplicateCheck,
    /// Generating speech audio.
    Synthesis,
    /// Storing the audio in Anki's media folder.
    Upload,
    /// Adding the note.
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::DuplicateCheck => "duplicate check",
            Stage::Synthesis => "audio synthesis",
            Stage::Upload => "media upload",
            Stage::Submit => "note submission",
        };
        f.write_str(name)
    }
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The run began.
    Started {
        /// Destination deck.
        deck: String,
        /// Card limit for the run.
        limit: usize,
    },
    /// AnkiConnect answered the connectivity probe.
    Probed {
        /// Number of decks in the collection.
        decks: usize,
    },
    /// The phrase file was read.
    LinesLoaded {
        /// Usable lines found.
        count: usize,
    },
    /// Work on a phrase started.
    Processing {
        /// Line number in the phrase file.
        line: usize,
        /// 1-based number of the card being attempted.
        position: usize,
        /// Card limit for the run.
        limit: usize,
        /// Front text.
        front: String,
    },
    /// A note with the same front already exists.
    DuplicateSkipped {
        /// Front text.
        front: String,
    },
    /// Audio for a phrase was stored.
    AudioStored {
        /// Front text.
        front: String,
        /// Stored media filename.
        filename: String,
    },
    /// A note was created.
    NoteAdded {
        /// Front text.
        front: String,
        /// ID of the new note.
        note_id: i64,
    },
    /// A phrase was abandoned.
    ItemFailed {
        /// Front text.
        front: String,
        /// Step that failed.
        stage: Stage,
        /// Failure description.
        error: String,
    },
    /// The card limit was reached; remaining lines are left alone.
    LimitReached {
        /// Card limit for the run.
        limit: usize,
    },
    /// AnkiConnect stopped responding mid-run.
    ConnectionLost {
        /// Failure description.
        error: String,
    },
    /// The run was aborted before any phrase was processed.
    Aborted {
        /// Failure description.
        error: String,
    },
    /// The run ended.
    Finished {
        /// Notes created during the run.
        cards_added: usize,
    },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Started { deck, limit } => {
                write!(f, "Adding up to {} cards to deck '{}'", limit, deck)
            }
            RunEvent::Probed { decks } => {
                write!(f, "Connected to AnkiConnect ({} decks)", decks)
            }
            RunEvent::LinesLoaded { count } => write!(f, "Loaded {} phrases", count),
            RunEvent::Processing {
                position,
                limit,
                front,
                ..
            } => write!(f, "Processing card {}/{}: '{}'", position, limit, front),
            RunEvent::DuplicateSkipped { front } => {
                write!(f, "Card for '{}' already exists. Skipping.", front)
            }
            RunEvent::AudioStored { filename, .. } => {
                write!(f, "Audio '{}' generated and stored", filename)
            }
            RunEvent::NoteAdded { front, .. } => write!(f, "Card for '{}' added", front),
            RunEvent::ItemFailed {
                front,
                stage,
                error,
            } => write!(f, "Skipping '{}': {} failed: {}", front, stage, error),
            RunEvent::LimitReached { limit } => {
                write!(f, "Card limit of {} reached", limit)
            }
            RunEvent::ConnectionLost { error } => {
                write!(f, "Lost connection to AnkiConnect: {}", error)
            }
            RunEvent::Aborted { error } => write!(f, "Run aborted: {}", error),
            RunEvent::Finished { cards_added } => {
                write!(f, "Process complete. Total cards added: {}", cards_added)
            }
        }
    }
}

/// Receives run events.
pub trait EventSink {
    /// Record one event.
    fn record(&self, event: &RunEvent);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn record(&self, event: &RunEvent) {
        (**self).record(event)
    }
}

/// Forwards events to `tracing`.
///
/// Failures are logged at WARN, lost connectivity and aborts at ERROR,
/// everything else at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &RunEvent) {
        match event {
            RunEvent::ItemFailed {
                front,
                stage,
                error,
            } => warn!(front = %front, stage = %stage, error = %error, "{}", event),
            RunEvent::ConnectionLost { error } | RunEvent::Aborted { error } => {
                error!(error = %error, "{}", event)
            }
            RunEvent::NoteAdded { front, note_id } => {
                info!(front = %front, note_id, "{}", event)
            }
            RunEvent::Finished { cards_added } => info!(cards_added, "{}", event),
            _ => info!("{}", event),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RunEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
