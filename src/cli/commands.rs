//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use log::info;
use sha2::{Digest, Sha256};

use crate::config::RenderConfig;
use crate::engine::{encode, key_to_frequency, Renderer, WavHeader};
use crate::error::{Result, WavError};
use crate::input::{load_notes, to_json};

/// What a render run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub num_notes: usize,
    pub num_samples: u32,
    pub sample_rate: u32,
    pub peak: u16,
    pub clipped_samples: usize,
    pub sha256: String,
}

/// Hex SHA-256 of a byte buffer
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Render a note file to a WAV file.
pub fn render(
    input: &Path,
    output: Option<&Path>,
    sample_rate: Option<u32>,
    config_path: Option<&Path>,
) -> Result<RenderSummary> {
    let config = match config_path {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    }
    .with_sample_rate(sample_rate)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("wav"));

    info!("Rendering {} at {} Hz", input.display(), config.sample_rate);

    let notes = load_notes(input)?;
    let buffer = Renderer::from_config(&config)?.render(&notes)?;
    let bytes = encode(&buffer);
    std::fs::write(&output, &bytes)?;

    let summary = RenderSummary {
        output,
        num_notes: notes.len(),
        num_samples: buffer.num_samples(),
        sample_rate: buffer.sample_rate(),
        peak: buffer.peak(),
        clipped_samples: buffer.clipped_samples(),
        sha256: sha256_hex(&bytes),
    };

    println!("Wrote {}", summary.output.display());
    println!("Notes: {}", summary.num_notes);
    println!(
        "Samples: {} ({:.3}s at {} Hz)",
        summary.num_samples,
        buffer.duration_secs(),
        summary.sample_rate
    );
    println!("Peak: {} ({} clipped)", summary.peak, summary.clipped_samples);
    println!("SHA-256: {}", summary.sha256);

    Ok(summary)
}

/// Check a WAV file's header and print its fields.
pub fn inspect(path: &Path) -> Result<WavHeader> {
    if !path.exists() {
        return Err(WavError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path)?;
    let header = WavHeader::parse(&bytes)?;

    // Cross-check with an independent reader
    let reader = hound::WavReader::new(Cursor::new(&bytes)).map_err(|e| {
        WavError::InvalidContainer {
            reason: format!("rejected by WAV reader: {}", e),
        }
    })?;
    let spec = reader.spec();
    if spec.sample_rate != header.sample_rate || reader.len() != header.num_samples {
        return Err(WavError::InvalidContainer {
            reason: format!(
                "WAV reader sees {} samples at {} Hz, header says {} at {} Hz",
                reader.len(),
                spec.sample_rate,
                header.num_samples,
                header.sample_rate
            ),
        });
    }

    println!("File: {}", path.display());
    println!("Format: PCM, {} channel, {}-bit", spec.channels, spec.bits_per_sample);
    println!("Sample rate: {} Hz", header.sample_rate);
    println!("Byte rate: {}", header.byte_rate());
    println!("Samples: {}", header.num_samples);
    println!("Data size: {} bytes", header.data_size());
    println!("Chunk size: {} bytes", header.chunk_size());
    println!("SHA-256: {}", sha256_hex(&bytes));

    Ok(header)
}

/// Print the notes loaded from a file as JSON.
pub fn notes(input: &Path) -> Result<()> {
    let notes = load_notes(input)?;
    println!("{}", to_json(&notes)?);
    Ok(())
}

/// Print the frequency of a MIDI key.
pub fn freq(key: i32) -> Result<()> {
    println!("{:.3} Hz", key_to_frequency(key));
    Ok(())
}
