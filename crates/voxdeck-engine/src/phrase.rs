//! Phrase list parsing.
//!
//! A phrase file holds one candidate card per line, front and back text
//! separated by a single character:
//!
//! ```text
//! Hola|Hello
//! ¿Dónde está el baño?|Where is the bathroom?
//! ```
//!
//! Lines without the separator, or blank once trimmed, are ignored.

use std::path::Path;

use crate::error::{Error, Result};

/// One accepted input line split into front and back text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseLine {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Text to pronounce and show on the front of the card.
    pub front: String,
    /// Text for the back of the card.
    pub back: String,
}

impl PhraseLine {
    /// Split a raw line on the first `separator`.
    ///
    /// The back may itself contain the separator. Returns `None` when the
    /// separator is absent or the front is empty after trimming.
    ///
    /// # Example
    ///
    /// ```
    /// use voxdeck_engine::PhraseLine;
    ///
    /// let phrase = PhraseLine::parse(1, " Hola | Hello|extra ", '|').unwrap();
    /// assert_eq!(phrase.front, "Hola");
    /// assert_eq!(phrase.back, "Hello|extra");
    ///
    /// assert!(PhraseLine::parse(2, "no separator here", '|').is_none());
    /// ```
    pub fn parse(line: usize, raw: &str, separator: char) -> Option<Self> {
        let (front, back) = raw.trim().split_once(separator)?;
        let front = front.trim();
        if front.is_empty() {
            return None;
        }

        Some(Self {
            line,
            front: front.to_string(),
            back: back.trim().to_string(),
        })
    }
}

/// Parse every usable line of a phrase document, in order.
pub fn parse_phrases(content: &str, separator: char) -> Vec<PhraseLine> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| PhraseLine::parse(i + 1, raw, separator))
        .collect()
}

/// Read a UTF-8 phrase file and parse it.
pub fn load_phrases(path: impl AsRef<Path>, separator: char) -> Result<Vec<PhraseLine>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_phrases(&content, separator))
}
