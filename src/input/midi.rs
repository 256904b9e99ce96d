//! Standard MIDI File loading
//!
//! Turns note-on/note-off pairs into [`NoteEvent`]s with start times and
//! durations in seconds. Channels and velocities only matter for pairing; every
//! note is rendered the same way.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::engine::note::NoteEvent;
use crate::error::{Result, WavError};

/// Tempo assumed until the first tempo event (120 BPM)
pub const DEFAULT_TEMPO_US_PER_BEAT: u32 = 500_000;

/// Load a MIDI file from disk
///
/// # Errors
/// * `FileNotFound` - if the file does not exist
/// * `MidiParse` - if the file is not a valid Standard MIDI File
pub fn load_midi(path: &Path) -> Result<Vec<NoteEvent>> {
    if !path.exists() {
        return Err(WavError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path)?;
    let notes = parse(&bytes, &path.display().to_string())?;
    info!("Loaded {} notes from {}", notes.len(), path.display());
    Ok(notes)
}

/// Parse an in-memory Standard MIDI File
pub fn parse_midi(bytes: &[u8]) -> Result<Vec<NoteEvent>> {
    parse(bytes, "<memory>")
}

fn parse(bytes: &[u8], name: &str) -> Result<Vec<NoteEvent>> {
    let smf = Smf::parse(bytes).map_err(|e| WavError::MidiParse {
        path: name.to_string(),
        source: e,
    })?;

    let clock = TickClock::from_smf(&smf);
    let mut notes = Vec::new();

    for (track_nr, track) in smf.tracks.iter().enumerate() {
        let mut tick: u64 = 0;
        let mut pending: Vec<PendingNote> = Vec::new();
        let mut open: HashMap<(u8, u8), Vec<usize>> = HashMap::new();

        for event in track.iter() {
            tick += event.delta.as_int() as u64;

            let TrackEventKind::Midi { channel, message } = event.kind else {
                continue;
            };
            let (key, on) = match message {
                MidiMessage::NoteOn { key, vel } => (key.as_int(), vel.as_int() > 0),
                MidiMessage::NoteOff { key, .. } => (key.as_int(), false),
                _ => continue,
            };
            let slot = (channel.as_int(), key);

            if on {
                open.entry(slot).or_default().push(pending.len());
                pending.push(PendingNote {
                    key,
                    on_tick: tick,
                    off_tick: None,
                });
            } else if let Some(idx) = open.get_mut(&slot).and_then(Vec::pop) {
                pending[idx].off_tick = Some(tick);
            }
        }

        let mut dropped = 0;
        for note in pending {
            let Some(off_tick) = note.off_tick else {
                dropped += 1;
                continue;
            };
            let start = clock.seconds(note.on_tick) as f32;
            let end = clock.seconds(off_tick) as f32;
            notes.push(NoteEvent::from_key(start, end - start, note.key as i32)?);
        }

        if dropped > 0 {
            warn!(
                "Track {}: dropped {} notes without a matching note-off",
                track_nr, dropped
            );
        }
    }

    debug!("Parsed {} tracks into {} notes", smf.tracks.len(), notes.len());
    Ok(notes)
}

/// A note-on waiting for (or paired with) its note-off
struct PendingNote {
    key: u8,
    on_tick: u64,
    off_tick: Option<u64>,
}

/// One constant-tempo stretch of the song
#[derive(Debug, Clone, Copy)]
struct TempoSegment {
    tick: u64,
    seconds: f64,
    secs_per_tick: f64,
}

/// Converts absolute ticks to seconds
///
/// Metrical files use a tempo map collected from every track. Timecode files
/// have a fixed tick length and ignore tempo events.
#[derive(Debug, Clone)]
struct TickClock {
    segments: Vec<TempoSegment>,
}

impl TickClock {
    fn from_smf(smf: &Smf) -> Self {
        match smf.header.timing {
            Timing::Metrical(ticks_per_beat) => {
                let ticks_per_beat = ticks_per_beat.as_int().max(1) as f64;
                let mut changes = Vec::new();
                for track in &smf.tracks {
                    let mut tick: u64 = 0;
                    for event in track.iter() {
                        tick += event.delta.as_int() as u64;
                        if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                            changes.push((tick, tempo.as_int()));
                        }
                    }
                }
                Self::metrical(ticks_per_beat, changes)
            }
            Timing::Timecode(fps, subframes) => {
                let ticks_per_sec = (fps.as_f32() * subframes.max(1) as f32) as f64;
                Self::fixed(1.0 / ticks_per_sec)
            }
        }
    }

    fn fixed(secs_per_tick: f64) -> Self {
        Self {
            segments: vec![TempoSegment {
                tick: 0,
                seconds: 0.0,
                secs_per_tick,
            }],
        }
    }

    fn metrical(ticks_per_beat: f64, mut changes: Vec<(u64, u32)>) -> Self {
        let secs_per_tick = |tempo: u32| tempo as f64 * 1e-6 / ticks_per_beat;
        let mut clock = Self::fixed(secs_per_tick(DEFAULT_TEMPO_US_PER_BEAT));

        changes.sort_by_key(|&(tick, _)| tick);
        for (tick, tempo) in changes {
            let seconds = clock.seconds(tick);
            let segment = TempoSegment {
                tick,
                seconds,
                secs_per_tick: secs_per_tick(tempo),
            };
            match clock.segments.last_mut() {
                Some(last) if last.tick == tick => *last = segment,
                _ => clock.segments.push(segment),
            }
        }
        clock
    }

    fn seconds(&self, tick: u64) -> f64 {
        let idx = self
            .segments
            .partition_point(|segment| segment.tick <= tick)
            .saturating_sub(1);
        let segment = &self.segments[idx];
        segment.seconds + (tick - segment.tick) as f64 * segment.secs_per_tick
    }
}
