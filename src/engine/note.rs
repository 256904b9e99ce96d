//! Note events
//!
//! A note event is one sounding sine tone: when it starts, how long it lasts
//! and at which frequency it plays. Times are in seconds, frequencies in Hz.

use serde::Serialize;

use crate::error::{Result, WavError};

/// Concert pitch A4 in Hz
pub const CONCERT_PITCH_HZ: f32 = 440.0;

/// MIDI key number of A4
pub const CONCERT_PITCH_KEY: i32 = 69;

/// Convert a MIDI key number to a frequency in Hz (A4 = key 69 = 440 Hz)
///
/// Defined for every integer; keys far outside the MIDI range give very high
/// or very low frequencies, saturating at the positive finite `f32` range.
#[inline]
pub fn key_to_frequency(key: i32) -> f32 {
    let semitones = (i64::from(key) - i64::from(CONCERT_PITCH_KEY)) as f32;
    let frequency = CONCERT_PITCH_HZ * 2.0_f32.powf(semitones / 12.0);
    frequency.clamp(f32::MIN_POSITIVE, f32::MAX)
}

/// One sounding note
///
/// Fields are private so that every instance has passed validation in
/// [`NoteEvent::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteEvent {
    start: f32,
    duration: f32,
    frequency: f32,
}

impl NoteEvent {
    /// Create a note event
    ///
    /// # Errors
    /// * `InvalidNote` - if `start` or `duration` is negative or not finite,
    ///   or `frequency` is not a positive finite number
    pub fn new(start: f32, duration: f32, frequency: f32) -> Result<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(WavError::InvalidNote {
                reason: format!("start must be a non-negative number of seconds, got {}", start),
            });
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(WavError::InvalidNote {
                reason: format!(
                    "duration must be a non-negative number of seconds, got {}",
                    duration
                ),
            });
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(WavError::InvalidNote {
                reason: format!("frequency must be a positive number of Hz, got {}", frequency),
            });
        }

        Ok(Self {
            start,
            duration,
            frequency,
        })
    }

    /// Create a note event from a MIDI key number
    pub fn from_key(start: f32, duration: f32, key: i32) -> Result<Self> {
        Self::new(start, duration, key_to_frequency(key))
    }

    /// Onset time in seconds
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Release time in seconds (`start + duration`)
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Whether the note sounds at time `t`. Both ends are inclusive.
    #[inline]
    pub fn is_active(&self, t: f32) -> bool {
        t >= self.start && t <= self.end()
    }
}

/// Latest release time across all notes, or 0 when there are none
pub fn total_duration(notes: &[NoteEvent]) -> f32 {
    notes.iter().map(NoteEvent::end).fold(0.0, f32::max)
}
