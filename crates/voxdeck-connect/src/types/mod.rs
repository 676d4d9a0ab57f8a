//! Domain types sent to AnkiConnect.

mod media;
mod note;

pub use media::StoreMediaParams;
pub use note::{Note, NoteBuilder, sound_tag};
