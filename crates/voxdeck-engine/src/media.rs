//! Synthesized audio and its upload naming.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use voxdeck_connect::StoreMediaParams;

const FILENAME_PREFIX: &str = "auto_anki_";
const FILENAME_EXTENSION: &str = "mp3";

/// Hands out media filenames that never repeat within a run.
///
/// Names are `auto_anki_<n>.mp3` where `n` is the current Unix time in
/// milliseconds, bumped past the previous value when two names are requested
/// within the same millisecond (or the clock steps backwards).
#[derive(Debug, Default)]
pub struct MediaNamer {
    last: Option<u128>,
}

impl MediaNamer {
    /// Create a namer with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next filename.
    pub fn next_filename(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.next_at(now)
    }

    fn next_at(&mut self, now_ms: u128) -> String {
        let stamp = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(stamp);
        format!("{}{}.{}", FILENAME_PREFIX, stamp, FILENAME_EXTENSION)
    }
}

/// Speech audio for one front text, ready for upload.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Name the file is stored under in Anki's media folder.
    pub filename: String,
    /// Encoded audio (MP3).
    pub bytes: Vec<u8>,
}

impl AudioArtifact {
    /// Wrap synthesized audio under a filename.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Consume the artifact into `storeMediaFile` parameters.
    pub fn into_upload(self) -> StoreMediaParams {
        StoreMediaParams::from_base64(self.filename, BASE64.encode(&self.bytes))
    }
}
