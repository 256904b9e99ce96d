//! Note Inputs
//!
//! Loaders that turn files into note collections for the renderer.

pub mod json;
pub mod midi;

use std::path::Path;

use crate::engine::note::NoteEvent;
use crate::error::{Result, WavError};

pub use json::{load_json, parse_json, to_json, NoteList};
pub use midi::{load_midi, parse_midi};

/// Supported note file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Standard MIDI File (`.mid`, `.midi`)
    Midi,
    /// JSON note list (`.json`)
    Json,
}

impl InputFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("mid") | Some("midi") => Ok(InputFormat::Midi),
            Some("json") => Ok(InputFormat::Json),
            Some(other) => Err(WavError::UnsupportedFormat {
                format: format!(".{}", other),
            }),
            None => Err(WavError::UnsupportedFormat {
                format: format!("{} (no extension)", path.display()),
            }),
        }
    }
}

/// Load notes from a MIDI or JSON file, chosen by extension
pub fn load_notes(path: &Path) -> Result<Vec<NoteEvent>> {
    match InputFormat::from_path(path)? {
        InputFormat::Midi => load_midi(path),
        InputFormat::Json => load_json(path),
    }
}
