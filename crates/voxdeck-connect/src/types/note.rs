//! Note-related types.

use std::collections::HashMap;

use serde::Serialize;

/// A new note to be added to Anki.
///
/// Use [`NoteBuilder`] for a more ergonomic way to construct notes.
///
/// Field values are HTML and field names are case-sensitive; they must
/// match the model's field names exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The deck to add the note to.
    pub deck_name: String,
    /// The note type (model) name.
    pub model_name: String,
    /// Field values, keyed by field name.
    pub fields: HashMap<String, String>,
    /// Tags for the note.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Builder for creating notes with a fluent API.
///
/// # Example
///
/// ```
/// use voxdeck_connect::{NoteBuilder, sound_tag};
///
/// let note = NoteBuilder::new("Spanish", "Basic")
///     .field("Front", format!("Hola {}", sound_tag("auto_anki_1.mp3")))
///     .field("Back", "Hello")
///     .tag("auto-gerado")
///     .build();
///
/// assert_eq!(note.fields["Front"], "Hola [sound:auto_anki_1.mp3]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteBuilder {
    deck_name: String,
    model_name: String,
    fields: HashMap<String, String>,
    tags: Vec<String>,
}

impl NoteBuilder {
    /// Create a new note builder for the given deck and note type.
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: model.into(),
            ..Default::default()
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to the note.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the note.
    pub fn build(self) -> Note {
        Note {
            deck_name: self.deck_name,
            model_name: self.model_name,
            fields: self.fields,
            tags: self.tags,
        }
    }
}

/// Format the playback directive Anki recognizes inside a field value.
pub fn sound_tag(filename: &str) -> String {
    format!("[sound:{}]", filename)
}
