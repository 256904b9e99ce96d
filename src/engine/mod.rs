//! Rendering Engine
//!
//! The note-to-WAV pipeline:
//! - Note events and the key-to-frequency helper
//! - The additive sine renderer
//! - Sample buffers
//! - The WAV container writer

pub mod buffer;
pub mod container;
pub mod note;
pub mod render;

pub use buffer::{SampleBuffer, DEFAULT_SAMPLE_RATE};
pub use container::{decode, encode, WavHeader, HEADER_SIZE};
pub use note::{key_to_frequency, total_duration, NoteEvent};
pub use render::{sample_count, Renderer};

use crate::config::RenderConfig;
use crate::error::Result;

/// Render notes and encode them as a complete WAV file in memory
pub fn render_wav(notes: &[NoteEvent], config: &RenderConfig) -> Result<Vec<u8>> {
    let buffer = Renderer::from_config(config)?.render(notes)?;
    Ok(encode(&buffer))
}
