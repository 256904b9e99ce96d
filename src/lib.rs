//! wavcreate - Note events to WAV
//!
//! Renders note events (start, duration, frequency) as plain sine tones,
//! mixes them into one mono stream and writes a 16-bit PCM WAV file.
//!
//! # Architecture
//!
//! Data flows one way:
//! - Input: MIDI or JSON files become a list of [`NoteEvent`]s
//! - Engine: the renderer mixes the notes into a [`SampleBuffer`]
//! - Container: the buffer is encoded as a 44-byte header plus samples
//!
//! ```
//! use wavcreate::{render_wav, NoteEvent, RenderConfig};
//!
//! let notes = vec![NoteEvent::from_key(0.0, 0.5, 69).unwrap()];
//! let bytes = render_wav(&notes, &RenderConfig::default()).unwrap();
//! assert_eq!(bytes.len(), 44 + 2 * 22050);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;

pub use config::RenderConfig;
pub use engine::{encode, key_to_frequency, render_wav, NoteEvent, Renderer, SampleBuffer};
pub use error::{Result, WavError};
