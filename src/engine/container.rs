//! WAV container writer
//!
//! Serializes a [`SampleBuffer`] into the canonical 44-byte RIFF/WAVE header
//! (mono, 16-bit PCM) followed by the little-endian samples.

use log::debug;

use crate::engine::buffer::{validate_sample_rate, SampleBuffer, BYTES_PER_SAMPLE, MAX_SAMPLES};
use crate::error::{Result, WavError};

/// Size of the canonical header in bytes
pub const HEADER_SIZE: usize = 44;

/// RIFF chunk size minus the data payload (`4 + (8 + 16) + 8`)
const RIFF_OVERHEAD: u32 = 36;

/// Size of the `fmt ` subchunk body for PCM
const FMT_CHUNK_SIZE: u32 = 16;

/// Audio format tag for uncompressed PCM
const FORMAT_PCM: u16 = 1;

const NUM_CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Header fields of a mono 16-bit PCM WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of samples in the payload
    pub num_samples: u32,
}

impl WavHeader {
    /// Header describing a sample buffer
    pub fn for_buffer(buffer: &SampleBuffer) -> Self {
        Self {
            sample_rate: buffer.sample_rate(),
            num_samples: buffer.num_samples(),
        }
    }

    /// Payload size in bytes
    pub fn data_size(&self) -> u32 {
        self.num_samples * BYTES_PER_SAMPLE
    }

    /// RIFF chunk size (everything after the first 8 bytes)
    pub fn chunk_size(&self) -> u32 {
        RIFF_OVERHEAD + self.data_size()
    }

    /// Average bytes per second
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * BYTES_PER_SAMPLE
    }

    /// Append the 44 header bytes to `buf`
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        // RIFF chunk
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&self.chunk_size().to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt subchunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        buf.extend_from_slice(&FORMAT_PCM.to_le_bytes());
        buf.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
        buf.extend_from_slice(&self.sample_rate.to_le_bytes());
        buf.extend_from_slice(&self.byte_rate().to_le_bytes());
        buf.extend_from_slice(&(BYTES_PER_SAMPLE as u16).to_le_bytes());
        buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data subchunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&self.data_size().to_le_bytes());
    }

    /// Parse a canonical header from the start of `bytes`
    ///
    /// Accepts only the exact layout [`WavHeader::write_to`] produces, and
    /// checks the size fields against each other and against the bytes that
    /// follow.
    ///
    /// # Errors
    /// * `InvalidContainer` - on any mismatch, naming the offending field
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(invalid(format!(
                "expected at least {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        expect_field("fmt chunk size", read_u32(bytes, 16), FMT_CHUNK_SIZE)?;
        expect_field("audio format", read_u16(bytes, 20), FORMAT_PCM)?;
        expect_field("channel count", read_u16(bytes, 22), NUM_CHANNELS)?;
        expect_field("block align", read_u16(bytes, 32), BYTES_PER_SAMPLE as u16)?;
        expect_field("bits per sample", read_u16(bytes, 34), BITS_PER_SAMPLE)?;

        let sample_rate = read_u32(bytes, 24);
        validate_sample_rate(sample_rate)
            .map_err(|_| invalid(format!("unusable sample rate {}", sample_rate)))?;

        let data_size = read_u32(bytes, 40);
        if data_size % BYTES_PER_SAMPLE != 0 {
            return Err(invalid(format!("odd data size {}", data_size)));
        }
        if data_size / BYTES_PER_SAMPLE > MAX_SAMPLES {
            return Err(invalid(format!("data size {} overflows the RIFF chunk", data_size)));
        }

        let header = Self {
            sample_rate,
            num_samples: data_size / BYTES_PER_SAMPLE,
        };

        expect_field("byte rate", read_u32(bytes, 28), header.byte_rate())?;
        expect_field("chunk size", read_u32(bytes, 4), header.chunk_size())?;

        let payload = bytes.len() - HEADER_SIZE;
        if payload != data_size as usize {
            return Err(invalid(format!(
                "data size field says {} bytes but payload has {}",
                data_size, payload
            )));
        }

        Ok(header)
    }
}

/// Encode a sample buffer as a complete WAV file in memory
///
/// The output is always `HEADER_SIZE + 2 * num_samples` bytes.
pub fn encode(buffer: &SampleBuffer) -> Vec<u8> {
    let header = WavHeader::for_buffer(buffer);
    let mut bytes = Vec::with_capacity(HEADER_SIZE + header.data_size() as usize);

    header.write_to(&mut bytes);
    for sample in buffer.samples() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    debug!(
        "Encoded {} samples at {} Hz into {} bytes",
        header.num_samples,
        header.sample_rate,
        bytes.len()
    );
    bytes
}

/// Decode the payload of a canonical WAV file back into samples
pub fn decode(bytes: &[u8]) -> Result<SampleBuffer> {
    let header = WavHeader::parse(bytes)?;
    let samples = bytes[HEADER_SIZE..]
        .chunks_exact(BYTES_PER_SAMPLE as usize)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    SampleBuffer::new(samples, header.sample_rate)
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn invalid(reason: String) -> WavError {
    WavError::InvalidContainer { reason }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> Result<()> {
    let found = &bytes[offset..offset + 4];
    if found != tag {
        return Err(invalid(format!(
            "expected {:?} at offset {}, found {:?}",
            String::from_utf8_lossy(tag),
            offset,
            String::from_utf8_lossy(found)
        )));
    }
    Ok(())
}

fn expect_field<T>(name: &str, found: T, expected: T) -> Result<()>
where
    T: PartialEq + std::fmt::Display,
{
    if found != expected {
        return Err(invalid(format!("{} is {}, expected {}", name, found, expected)));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
