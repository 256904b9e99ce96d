//! JSON note lists
//!
//! ```json
//! { "notes": [
//!     { "start": 0.0, "duration": 0.5, "frequency": 440.0 },
//!     { "start": 0.5, "duration": 0.5, "key": 72 }
//! ] }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::note::NoteEvent;
use crate::error::{Result, WavError};

/// A collection of notes as written by the `notes` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteList {
    pub notes: Vec<NoteEvent>,
}

#[derive(Deserialize)]
struct NoteFile {
    notes: Vec<NoteEntry>,
}

#[derive(Deserialize)]
struct NoteEntry {
    start: f32,
    duration: f32,
    #[serde(flatten)]
    pitch: Pitch,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Pitch {
    Frequency { frequency: f32 },
    Key { key: i32 },
}

impl TryFrom<NoteEntry> for NoteEvent {
    type Error = WavError;

    fn try_from(entry: NoteEntry) -> Result<Self> {
        match entry.pitch {
            Pitch::Frequency { frequency } => NoteEvent::new(entry.start, entry.duration, frequency),
            Pitch::Key { key } => NoteEvent::from_key(entry.start, entry.duration, key),
        }
    }
}

/// Parse a JSON note list
pub fn parse_json(text: &str) -> Result<Vec<NoteEvent>> {
    let file: NoteFile = serde_json::from_str(text)?;
    file.notes.into_iter().map(NoteEvent::try_from).collect()
}

/// Load a JSON note list from disk
pub fn load_json(path: &Path) -> Result<Vec<NoteEvent>> {
    if !path.exists() {
        return Err(WavError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let notes = parse_json(&std::fs::read_to_string(path)?)?;
    info!("Loaded {} notes from {}", notes.len(), path.display());
    Ok(notes)
}

/// Serialize notes in the format [`parse_json`] reads
pub fn to_json(notes: &[NoteEvent]) -> Result<String> {
    let list = NoteList {
        notes: notes.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_frequency_and_key() {
        let notes = parse_json(
            r#"{"notes": [
                {"start": 0.0, "duration": 0.5, "frequency": 440.0},
                {"start": 0.5, "duration": 0.25, "key": 81}
            ]}"#,
        )
        .unwrap();

        assert_eq!(notes.len(), 2);
        assert_relative_eq!(notes[0].frequency(), 440.0);
        assert_relative_eq!(notes[1].frequency(), 880.0, max_relative = 1e-6);
        assert_relative_eq!(notes[1].start(), 0.5);
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_json(r#"{"notes": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_note_rejected() {
        let result = parse_json(r#"{"notes": [{"start": -1.0, "duration": 0.5, "key": 60}]}"#);
        assert!(matches!(result, Err(WavError::InvalidNote { .. })));
    }

    #[test]
    fn test_extreme_key_is_accepted() {
        let notes = parse_json(
            r#"{"notes": [
                {"start": 0.0, "duration": 0.5, "key": -2147483648},
                {"start": 0.0, "duration": 0.5, "key": 2147483647}
            ]}"#,
        )
        .unwrap();

        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.frequency().is_finite() && n.frequency() > 0.0));
    }

    #[test]
    fn test_missing_pitch_rejected() {
        let result = parse_json(r#"{"notes": [{"start": 0.0, "duration": 0.5}]}"#);
        assert!(matches!(result, Err(WavError::Serialization(_))));
    }

    #[test]
    fn test_to_json_reads_back() {
        let notes = vec![
            NoteEvent::new(0.0, 1.0, 440.0).unwrap(),
            NoteEvent::new(0.25, 0.5, 329.63).unwrap(),
        ];
        let text = to_json(&notes).unwrap();
        assert!(text.contains("\"frequency\""));
        assert_eq!(parse_json(&text).unwrap(), notes);
    }
}
