//! Run configuration.
//!
//! A [`RunConfig`] is assembled once per run from up to three layers, later
//! layers winning:
//!
//! 1. compiled-in defaults ([`PartialConfig::defaults`]),
//! 2. a settings file (`.json`, or TOML for any other extension),
//! 3. explicit overrides, typically command-line flags.
//!
//! # Example TOML
//!
//! ```toml
//! input_file = "frases.txt"
//! deck_name = "Spanish"
//! model_name = "Basic"
//! card_limit = 10
//! audio_lang = "es"
//!
//! # optional
//! anki_url = "http://127.0.0.1:8765"
//! separator = "|"
//! tag = "auto-gerado"
//! ```
//!
//! The JSON form uses the same keys; camelCase spellings (`inputFile`,
//! `deckName`, ...) are accepted as aliases.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Separator between front and back text when none is configured.
pub const DEFAULT_SEPARATOR: char = '|';

/// AnkiConnect endpoint when none is configured.
pub const DEFAULT_ANKI_URL: &str = voxdeck_connect::DEFAULT_URL;

/// Provenance tag attached to every created note when none is configured.
pub const DEFAULT_TAG: &str = "auto-gerado";

const DEFAULT_CARD_LIMIT: NonZeroUsize = NonZeroUsize::new(10).unwrap();
const DEFAULT_FRONT_FIELD: &str = "Front";
const DEFAULT_BACK_FIELD: &str = "Back";

/// Validated, immutable parameters for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Phrase list to read.
    pub input_file: PathBuf,
    /// Destination deck.
    pub deck_name: String,
    /// Note type used for new notes.
    pub model_name: String,
    /// Maximum number of notes added per run.
    pub card_limit: NonZeroUsize,
    /// Language code passed to the speech synthesizer.
    pub audio_lang: String,
    /// AnkiConnect endpoint.
    pub anki_url: String,
    /// Character splitting each line into front and back.
    pub separator: char,
    /// Tag attached to every created note.
    pub tag: String,
    /// Name of the model field receiving the front text and audio.
    pub front_field: String,
    /// Name of the model field receiving the back text.
    pub back_field: String,
}

impl RunConfig {
    /// Load and validate a settings file, filling optional keys with defaults.
    ///
    /// Every required key must be present in the file itself.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        PartialConfig::from_path(path)?.validate()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("frases.txt"),
            deck_name: "Spanish".to_string(),
            model_name: "Basic".to_string(),
            card_limit: DEFAULT_CARD_LIMIT,
            audio_lang: "es".to_string(),
            anki_url: DEFAULT_ANKI_URL.to_string(),
            separator: DEFAULT_SEPARATOR,
            tag: DEFAULT_TAG.to_string(),
            front_field: DEFAULT_FRONT_FIELD.to_string(),
            back_field: DEFAULT_BACK_FIELD.to_string(),
        }
    }
}

/// A configuration layer in which every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialConfig {
    /// Phrase list to read.
    #[serde(default, alias = "inputFile")]
    pub input_file: Option<PathBuf>,
    /// Destination deck.
    #[serde(default, alias = "deckName")]
    pub deck_name: Option<String>,
    /// Note type used for new notes.
    #[serde(default, alias = "modelName")]
    pub model_name: Option<String>,
    /// Maximum number of notes added per run.
    #[serde(default, alias = "cardLimit")]
    pub card_limit: Option<u64>,
    /// Language code for speech synthesis.
    #[serde(default, alias = "audioLang")]
    pub audio_lang: Option<String>,
    /// AnkiConnect endpoint.
    #[serde(default, alias = "ankiUrl")]
    pub anki_url: Option<String>,
    /// Single-character separator.
    #[serde(default)]
    pub separator: Option<String>,
    /// Provenance tag.
    #[serde(default)]
    pub tag: Option<String>,
    /// Front field name.
    #[serde(default, alias = "frontField")]
    pub front_field: Option<String>,
    /// Back field name.
    #[serde(default, alias = "backField")]
    pub back_field: Option<String>,
}

impl PartialConfig {
    /// The compiled-in defaults as a layer.
    pub fn defaults() -> Self {
        let d = RunConfig::default();
        Self {
            input_file: Some(d.input_file),
            deck_name: Some(d.deck_name),
            model_name: Some(d.model_name),
            card_limit: Some(d.card_limit.get() as u64),
            audio_lang: Some(d.audio_lang),
            anki_url: Some(d.anki_url),
            separator: Some(d.separator.to_string()),
            tag: Some(d.tag),
            front_field: Some(d.front_field),
            back_field: Some(d.back_field),
        }
    }

    /// Read a settings file, choosing the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file '{}': {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML settings document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {}", e)))
    }

    /// Parse a JSON settings document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))
    }

    /// Lay `other` on top of `self`; keys set in `other` win.
    pub fn overlay(self, other: PartialConfig) -> Self {
        Self {
            input_file: other.input_file.or(self.input_file),
            deck_name: other.deck_name.or(self.deck_name),
            model_name: other.model_name.or(self.model_name),
            card_limit: other.card_limit.or(self.card_limit),
            audio_lang: other.audio_lang.or(self.audio_lang),
            anki_url: other.anki_url.or(self.anki_url),
            separator: other.separator.or(self.separator),
            tag: other.tag.or(self.tag),
            front_field: other.front_field.or(self.front_field),
            back_field: other.back_field.or(self.back_field),
        }
    }

    /// Check required keys and value ranges, producing a [`RunConfig`].
    ///
    /// All missing required keys are reported together.
    pub fn validate(self) -> Result<RunConfig> {
        let mut missing = Vec::new();
        let input_file = self.input_file.filter(|p| !p.as_os_str().is_empty());
        let deck_name = non_blank(self.deck_name);
        let model_name = non_blank(self.model_name);
        let audio_lang = non_blank(self.audio_lang);

        if input_file.is_none() {
            missing.push("input_file");
        }
        if deck_name.is_none() {
            missing.push("deck_name");
        }
        if model_name.is_none() {
            missing.push("model_name");
        }
        if self.card_limit.is_none() {
            missing.push("card_limit");
        }
        if audio_lang.is_none() {
            missing.push("audio_lang");
        }

        let (Some(input_file), Some(deck_name), Some(model_name), Some(limit), Some(audio_lang)) =
            (input_file, deck_name, model_name, self.card_limit, audio_lang)
        else {
            return Err(Error::Config(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        };

        let card_limit = usize::try_from(limit)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                Error::Config(format!("card_limit must be a positive integer, got {}", limit))
            })?;

        let separator = match self.separator {
            None => DEFAULT_SEPARATOR,
            Some(s) => single_char(&s).ok_or_else(|| {
                Error::Config(format!(
                    "separator must be exactly one non-whitespace character, got {:?}",
                    s
                ))
            })?,
        };

        Ok(RunConfig {
            input_file,
            deck_name,
            model_name,
            card_limit,
            audio_lang,
            anki_url: non_blank(self.anki_url)
                .unwrap_or_else(|| DEFAULT_ANKI_URL.to_string()),
            separator,
            tag: non_blank(self.tag).unwrap_or_else(|| DEFAULT_TAG.to_string()),
            front_field: non_blank(self.front_field)
                .unwrap_or_else(|| DEFAULT_FRONT_FIELD.to_string()),
            back_field: non_blank(self.back_field)
                .unwrap_or_else(|| DEFAULT_BACK_FIELD.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_TOML: &str = r#"
        input_file = "phrases.txt"
        deck_name = "Italian"
        model_name = "Basic (and reversed card)"
        card_limit = 5
        audio_lang = "it"
    "#;

    #[test]
    fn test_full_toml_validates_with_defaults_for_optional_keys() {
        let config = PartialConfig::from_toml_str(FULL_TOML)
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(config.input_file, PathBuf::from("phrases.txt"));
        assert_eq!(config.deck_name, "Italian");
        assert_eq!(config.model_name, "Basic (and reversed card)");
        assert_eq!(config.card_limit.get(), 5);
        assert_eq!(config.audio_lang, "it");
        assert_eq!(config.anki_url, "http://127.0.0.1:8765");
        assert_eq!(config.separator, '|');
        assert_eq!(config.tag, "auto-gerado");
        assert_eq!(config.front_field, "Front");
        assert_eq!(config.back_field, "Back");
    }

    #[test]
    fn test_missing_keys_are_all_reported() {
        let err = PartialConfig::from_toml_str("deck_name = \"Spanish\"")
            .unwrap()
            .validate()
            .unwrap_err();

        let msg = err.to_string();
        assert!(err.is_config());
        assert!(msg.contains("input_file"));
        assert!(msg.contains("model_name"));
        assert!(msg.contains("card_limit"));
        assert!(msg.contains("audio_lang"));
        assert!(!msg.contains("deck_name"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let partial = PartialConfig::defaults().overlay(PartialConfig {
            deck_name: Some("   ".to_string()),
            ..Default::default()
        });
        // overlay keeps the blank override; validation rejects it
        let err = partial.validate().unwrap_err();
        assert!(err.to_string().contains("deck_name"));
    }

    #[test]
    fn test_zero_card_limit_rejected() {
        let partial = PartialConfig::defaults().overlay(PartialConfig {
            card_limit: Some(0),
            ..Default::default()
        });
        let err = partial.validate().unwrap_err();
        assert!(err.to_string().contains("card_limit"));
    }

    #[test]
    fn test_negative_card_limit_is_parse_error() {
        let err = PartialConfig::from_json_str(r#"{"card_limit": -3}"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_separator_must_be_single_char() {
        for bad in ["", "||", " "] {
            let partial = PartialConfig::defaults().overlay(PartialConfig {
                separator: Some(bad.to_string()),
                ..Default::default()
            });
            assert!(partial.validate().is_err(), "accepted separator {:?}", bad);
        }

        let partial = PartialConfig::defaults().overlay(PartialConfig {
            separator: Some(";".to_string()),
            ..Default::default()
        });
        assert_eq!(partial.validate().unwrap().separator, ';');
    }

    #[test]
    fn test_overlay_prefers_later_layer() {
        let base = PartialConfig::from_toml_str(FULL_TOML).unwrap();
        let merged = base.overlay(PartialConfig {
            card_limit: Some(1),
            audio_lang: Some("fr".to_string()),
            ..Default::default()
        });
        let config = merged.validate().unwrap();
        assert_eq!(config.card_limit.get(), 1);
        assert_eq!(config.audio_lang, "fr");
        assert_eq!(config.deck_name, "Italian");
    }

    #[test]
    fn test_defaults_validate_to_default_config() {
        assert_eq!(PartialConfig::defaults().validate().unwrap(), RunConfig::default());
    }

    #[test]
    fn test_load_json_file_with_original_keys() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"input_file": "frases.txt", "deck_name": "Spanish", "model_name": "Basic",
                "card_limit": 10, "audio_lang": "es"}}"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_load_json_camel_case_aliases() {
        let partial = PartialConfig::from_json_str(
            r#"{"inputFile": "a.txt", "deckName": "D", "modelName": "M",
                "cardLimit": 2, "audioLang": "de"}"#,
        )
        .unwrap();
        let config = partial.validate().unwrap();
        assert_eq!(config.deck_name, "D");
        assert_eq!(config.card_limit.get(), 2);
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(FULL_TOML.as_bytes()).unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.deck_name, "Italian");
    }

    #[test]
    fn test_missing_config_file() {
        let err = RunConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("cannot read")));
    }

    #[test]
    fn test_malformed_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = RunConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("invalid JSON")));
    }
}
