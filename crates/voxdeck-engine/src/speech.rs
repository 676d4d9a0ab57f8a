//! Speech synthesis for the front side of a card.
//!
//! The batch only needs one capability, turning text into audio bytes, so
//! any backend can be plugged in by implementing [`SpeechSynthesizer`].
//! With the `google-tts` feature (on by default) the crate ships
//! [`GoogleTranslateSpeech`], which uses the public Google Translate
//! text-to-speech endpoint and returns MP3 audio.

use std::future::Future;

use thiserror::Error;

/// Errors produced while synthesizing audio for a single phrase.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Nothing to pronounce.
    #[error("no text to synthesize")]
    EmptyText,

    /// The speech service could not be reached or rejected the request.
    #[cfg(feature = "google-tts")]
    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The speech service returned no audio.
    #[error("speech service returned no audio")]
    EmptyAudio,

    /// Backend-specific failure.
    #[error("{0}")]
    Backend(String),
}

/// Turns text into encoded audio.
pub trait SpeechSynthesizer {
    /// Synthesize `text` spoken in the language `lang` (e.g. `"es"`).
    fn synthesize(
        &self,
        text: &str,
        lang: &str,
    ) -> impl Future<Output = Result<Vec<u8>, SynthesisError>> + Send;
}

#[cfg(feature = "google-tts")]
pub use google::{DEFAULT_TTS_URL, GoogleTranslateSpeech};

#[cfg(feature = "google-tts")]
mod google {
    use std::time::Duration;

    use reqwest::Client;
    use tracing::debug;

    use super::{SpeechSynthesizer, SynthesisError, split_chunks};

    /// Public Google Translate text-to-speech endpoint.
    pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

    /// The endpoint refuses longer inputs, so text is sent in pieces.
    const MAX_CHUNK_CHARS: usize = 100;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Speech synthesis backed by Google Translate.
    ///
    /// Long text is split on whitespace into pieces of at most 100
    /// characters; the MP3 responses are concatenated in order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use voxdeck_engine::{GoogleTranslateSpeech, SpeechSynthesizer};
    ///
    /// # async fn example() -> Result<(), voxdeck_engine::SynthesisError> {
    /// let speech = GoogleTranslateSpeech::new()?;
    /// let mp3 = speech.synthesize("Hola", "es").await?;
    /// std::fs::write("hola.mp3", mp3).ok();
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Debug, Clone)]
    pub struct GoogleTranslateSpeech {
        http_client: Client,
        endpoint: String,
    }

    impl GoogleTranslateSpeech {
        /// Create a synthesizer for the public endpoint.
        pub fn new() -> Result<Self, SynthesisError> {
            Self::with_endpoint(DEFAULT_TTS_URL, DEFAULT_TIMEOUT)
        }

        /// Create a synthesizer for a custom endpoint and request timeout.
        pub fn with_endpoint(
            endpoint: impl Into<String>,
            timeout: Duration,
        ) -> Result<Self, SynthesisError> {
            let http_client = Client::builder()
                .timeout(timeout)
                .user_agent(concat!("voxdeck/", env!("CARGO_PKG_VERSION")))
                .build()?;

            Ok(Self {
                http_client,
                endpoint: endpoint.into(),
            })
        }

        async fn fetch_chunk(
            &self,
            chunk: &str,
            lang: &str,
            idx: usize,
            total: usize,
        ) -> Result<Vec<u8>, SynthesisError> {
            let idx = idx.to_string();
            let total = total.to_string();
            let textlen = chunk.chars().count().to_string();

            debug!(lang, chunk, idx = %idx, total = %total, "requesting speech");

            let bytes = self
                .http_client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("q", chunk),
                    ("idx", idx.as_str()),
                    ("total", total.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;

            if bytes.is_empty() {
                return Err(SynthesisError::EmptyAudio);
            }
            Ok(bytes.to_vec())
        }
    }

    impl SpeechSynthesizer for GoogleTranslateSpeech {
        async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
            let chunks = split_chunks(text, MAX_CHUNK_CHARS);
            if chunks.is_empty() {
                return Err(SynthesisError::EmptyText);
            }

            let mut audio = Vec::new();
            for (idx, chunk) in chunks.iter().enumerate() {
                let part = self.fetch_chunk(chunk, lang, idx, chunks.len()).await?;
                audio.extend_from_slice(&part);
            }
            Ok(audio)
        }
    }
}

/// Split text on whitespace into pieces of at most `max_chars` characters.
///
/// Words longer than the limit are cut at character boundaries.
#[cfg_attr(not(feature = "google-tts"), allow(dead_code))]
fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect()));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
