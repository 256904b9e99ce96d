//! Sample Buffer
//!
//! Rendered mono 16-bit audio together with its sample rate.

use crate::error::{Result, WavError};

/// Default sample rate (CD quality)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Largest sample rate whose byte rate (`rate * 2`) still fits the header
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / BYTES_PER_SAMPLE;

/// Largest sample count whose RIFF chunk size (`36 + count * 2`) fits in u32
pub const MAX_SAMPLES: u32 = (u32::MAX - 36) / BYTES_PER_SAMPLE;

/// Bytes per 16-bit mono sample
pub const BYTES_PER_SAMPLE: u32 = 2;

/// Check that a sample rate can be described by the WAV header
pub fn validate_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(WavError::InvalidSampleRate { sample_rate });
    }
    Ok(())
}

/// Mono signed 16-bit PCM samples at a fixed rate
///
/// The constructor guarantees both the sample rate and the sample count fit
/// the container's 32-bit fields, so encoding never has to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap rendered samples
    ///
    /// # Errors
    /// * `InvalidSampleRate` - if the rate is zero or too large
    /// * `InvalidDuration` - if there are more samples than a WAV file can hold
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        validate_sample_rate(sample_rate)?;

        if samples.len() > MAX_SAMPLES as usize {
            return Err(WavError::InvalidDuration {
                total_secs: samples.len() as f32 / sample_rate as f32,
                sample_rate,
            });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Empty buffer at the given rate
    pub fn silent(sample_rate: u32) -> Result<Self> {
        Self::new(Vec::new(), sample_rate)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn num_samples(&self) -> u32 {
        // Bounded by MAX_SAMPLES in the constructor
        self.samples.len() as u32
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Payload size in bytes
    pub fn data_size(&self) -> u32 {
        self.num_samples() * BYTES_PER_SAMPLE
    }

    /// Read-only access to the samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Number of samples sitting on the hard limit
    pub fn clipped_samples(&self) -> usize {
        self.samples
            .iter()
            .filter(|&&s| s.unsigned_abs() >= i16::MAX as u16)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = SampleBuffer::new(vec![0, 100, -100, 32767], 44100).unwrap();
        assert_eq!(buffer.num_samples(), 4);
        assert_eq!(buffer.data_size(), 8);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_silent_buffer() {
        let buffer = SampleBuffer::silent(DEFAULT_SAMPLE_RATE).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.data_size(), 0);
        assert_eq!(buffer.duration_secs(), 0.0);
        assert_eq!(buffer.peak(), 0);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(matches!(
            SampleBuffer::silent(0),
            Err(WavError::InvalidSampleRate { sample_rate: 0 })
        ));
        assert!(SampleBuffer::silent(MAX_SAMPLE_RATE + 1).is_err());
        assert!(SampleBuffer::silent(MAX_SAMPLE_RATE).is_ok());
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::new(vec![0; 22050], 44100).unwrap();
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_peak_and_clipping() {
        let buffer = SampleBuffer::new(vec![0, -32767, 32767, 1000, i16::MIN], 44100).unwrap();
        assert_eq!(buffer.peak(), 32768);
        assert_eq!(buffer.clipped_samples(), 3);
    }

    #[test]
    fn test_max_samples_fits_header() {
        let data_size = MAX_SAMPLES * BYTES_PER_SAMPLE;
        assert!(data_size.checked_add(36).is_some());
        assert!((MAX_SAMPLES + 1)
            .checked_mul(BYTES_PER_SAMPLE)
            .and_then(|d| d.checked_add(36))
            .is_none());
    }
}
