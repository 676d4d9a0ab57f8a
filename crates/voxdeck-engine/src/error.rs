//! Error types for voxdeck-engine.
//!
//! Only run-level failures surface as [`Error`]; they abort the run before
//! any card is created. Problems with a single phrase are recorded in the
//! [`RunReport`](crate::batch::RunReport) instead and the batch moves on.
//!
//! # Example
//!
//! ```no_run
//! use voxdeck_engine::{Engine, Error, GoogleTranslateSpeech, RunConfig, TracingSink};
//!
//! # async fn example() -> voxdeck_engine::Result<()> {
//! let config = RunConfig::load("voxdeck.toml")?;
//! let engine = Engine::for_config(&config)?;
//! let speech = GoogleTranslateSpeech::new()?;
//!
//! match engine.batch(&config, &speech, &TracingSink).run().await {
//!     Ok(report) => println!("added {}", report.cards_added),
//!     Err(Error::Connectivity(_)) => eprintln!("Is Anki running?"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Result type for voxdeck-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
#[derive(Debug)]
pub enum Error {
    /// Settings are missing, malformed or out of range.
    Config(String),

    /// The phrase file could not be read.
    Input {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// AnkiConnect could not be reached.
    Connectivity(voxdeck_connect::Error),

    /// AnkiConnect answered the connectivity probe with an error.
    Probe(voxdeck_connect::Error),

    /// An AnkiConnect request outside the probe failed after reaching the
    /// server.
    Client(voxdeck_connect::Error),

    /// The speech backend could not be set up.
    Synthesis(crate::speech::SynthesisError),
}

impl Error {
    /// Whether this error belongs to the configuration family.
    ///
    /// Both bad settings and an unreadable phrase file count.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Input { .. })
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input { source, .. } => Some(source),
            Error::Connectivity(e) | Error::Probe(e) | Error::Client(e) => Some(e),
            Error::Synthesis(e) => Some(e),
            Error::Config(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Input { path, source } => {
                write!(f, "cannot read input file '{}': {}", path.display(), source)
            }
            Error::Connectivity(e) => write!(
                f,
                "{}. Make sure Anki is running with the AnkiConnect add-on installed",
                e
            ),
            Error::Probe(e) => write!(f, "connectivity check failed: {}", e),
            Error::Client(e) => write!(f, "AnkiConnect request failed: {}", e),
            Error::Synthesis(e) => write!(f, "speech backend unavailable: {}", e),
        }
    }
}

impl From<voxdeck_connect::Error> for Error {
    fn from(err: voxdeck_connect::Error) -> Self {
        use voxdeck_connect::Error as ClientError;

        match err {
            ClientError::Connectivity(_) => Error::Connectivity(err),
            ClientError::Config(msg) => Error::Config(msg),
            ClientError::Remote(_) | ClientError::EmptyResponse | ClientError::Json(_) => {
                Error::Client(err)
            }
        }
    }
}

impl From<crate::speech::SynthesisError> for Error {
    fn from(err: crate::speech::SynthesisError) -> Self {
        Error::Synthesis(err)
    }
}
