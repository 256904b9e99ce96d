//! Note Renderer
//!
//! Additive sine synthesis: every note is a plain sine voice at a fixed
//! amplitude, voices are summed per sample and the mix is hard-limited to
//! full scale before conversion to 16-bit.
//!
//! Two renderers produce identical output:
//! - [`Renderer::render`] sweeps the notes in start order and keeps a set of
//!   active voices, so expired notes are never rescanned.
//! - [`Renderer::render_reference`] tests every note at every sample.

use std::f32::consts::TAU;

use log::debug;
use num_traits::ToPrimitive;

use crate::config::RenderConfig;
use crate::engine::buffer::{validate_sample_rate, SampleBuffer, DEFAULT_SAMPLE_RATE, MAX_SAMPLES};
use crate::engine::note::{total_duration, NoteEvent};
use crate::error::{Result, WavError};

/// Amplitude of a single voice. Not normalized by voice count, so four or
/// more in-phase voices reach the hard limit.
pub const VOICE_AMPLITUDE: f32 = 0.3;

/// Scale factor from [-1.0, 1.0] to 16-bit samples
pub const FULL_SCALE: f32 = i16::MAX as f32;

/// Number of samples needed to cover `total_secs` at `sample_rate`
///
/// The product is truncated toward zero, so a trailing fraction of a sample
/// period is dropped.
///
/// # Errors
/// * `InvalidDuration` - if the count is not finite or exceeds what the WAV
///   size fields can describe
pub fn sample_count(total_secs: f32, sample_rate: u32) -> Result<u32> {
    let invalid = || WavError::InvalidDuration {
        total_secs,
        sample_rate,
    };

    let count = (total_secs * sample_rate as f32).to_u32().ok_or_else(invalid)?;
    if count > MAX_SAMPLES {
        return Err(invalid());
    }
    Ok(count)
}

/// Value of one voice at time `t`
#[inline]
fn voice(note: &NoteEvent, t: f32) -> f32 {
    VOICE_AMPLITUDE * (TAU * note.frequency() * (t - note.start())).sin()
}

/// Hard-limit a mixed value and convert it with a truncating cast
#[inline]
fn to_sample(y: f32) -> i16 {
    (y.clamp(-1.0, 1.0) * FULL_SCALE) as i16
}

/// Renders note collections at a fixed sample rate
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    sample_rate: u32,
}

impl Renderer {
    /// Create a renderer
    ///
    /// # Errors
    /// * `InvalidSampleRate` - if the rate is zero or too large for the header
    pub fn new(sample_rate: u32) -> Result<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self { sample_rate })
    }

    /// Create a renderer from a configuration
    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Self::new(config.sample_rate)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time in seconds of sample `i`
    #[inline]
    fn time_of(&self, i: u32) -> f32 {
        i as f32 / self.sample_rate as f32
    }

    /// Render notes into a sample buffer
    ///
    /// Notes are entered into the active set in start order and leave it once
    /// the sample time passes their end. The active set is kept in collection
    /// order so voices are summed in the same order as the reference scan,
    /// which keeps the output bit-identical.
    pub fn render(&self, notes: &[NoteEvent]) -> Result<SampleBuffer> {
        let num_samples = sample_count(total_duration(notes), self.sample_rate)?;

        let mut by_start: Vec<usize> = (0..notes.len()).collect();
        by_start.sort_by(|&a, &b| notes[a].start().total_cmp(&notes[b].start()));

        let mut next = 0;
        let mut active: Vec<usize> = Vec::new();
        let mut samples = Vec::with_capacity(num_samples as usize);

        for i in 0..num_samples {
            let t = self.time_of(i);

            while next < by_start.len() && notes[by_start[next]].start() <= t {
                let idx = by_start[next];
                let pos = active.binary_search(&idx).unwrap_or_else(|pos| pos);
                active.insert(pos, idx);
                next += 1;
            }
            active.retain(|&idx| t <= notes[idx].end());

            let y = active
                .iter()
                .fold(0.0_f32, |y, &idx| y + voice(&notes[idx], t));
            samples.push(to_sample(y));
        }

        let buffer = SampleBuffer::new(samples, self.sample_rate)?;
        debug!(
            "Rendered {} notes into {} samples ({:.3}s, {} clipped)",
            notes.len(),
            buffer.num_samples(),
            buffer.duration_secs(),
            buffer.clipped_samples()
        );
        Ok(buffer)
    }

    /// Render notes by testing every note at every sample
    ///
    /// O(samples × notes). Kept as the reference the sweep is checked against.
    pub fn render_reference(&self, notes: &[NoteEvent]) -> Result<SampleBuffer> {
        let num_samples = sample_count(total_duration(notes), self.sample_rate)?;

        let samples = (0..num_samples)
            .map(|i| {
                let t = self.time_of(i);
                let y = notes
                    .iter()
                    .filter(|note| note.is_active(t))
                    .fold(0.0_f32, |y, note| y + voice(note, t));
                to_sample(y)
            })
            .collect();

        SampleBuffer::new(samples, self.sample_rate)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}
