//! Integration Tests
//!
//! End-to-end tests for the note-to-WAV pipeline.

use std::io::Cursor;

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use wavcreate::engine::{decode, WavHeader, HEADER_SIZE};
use wavcreate::input::{load_notes, parse_midi};
use wavcreate::{encode, render_wav, NoteEvent, RenderConfig, Renderer};

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// C major arpeggio with overlapping tails
fn arpeggio() -> Vec<NoteEvent> {
    [60, 64, 67, 72]
        .iter()
        .enumerate()
        .map(|(i, &key)| NoteEvent::from_key(i as f32 * 0.125, 0.3, key).unwrap())
        .collect()
}

// === Conformance ===

#[test]
fn test_empty_input_is_bare_header() {
    let bytes = render_wav(&[], &RenderConfig::default()).unwrap();

    assert_eq!(bytes.len(), 44);
    assert_eq!(le_u32(&bytes, 4), 36);
    assert_eq!(le_u32(&bytes, 40), 0);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[36..40], b"data");
}

#[test]
fn test_single_note_one_second() {
    let notes = vec![NoteEvent::new(0.0, 1.0, 440.0).unwrap()];
    let bytes = render_wav(&notes, &RenderConfig::default()).unwrap();

    assert_eq!(bytes.len(), 44 + 2 * 44100);
    assert_eq!(le_u32(&bytes, 24), 44100);
    assert_eq!(le_u32(&bytes, 28), 88200);
    // First sample sits at phase zero
    assert_eq!(&bytes[44..46], &[0, 0]);

    let decoded = decode(&bytes).unwrap();
    assert!(decoded.samples().iter().all(|s| s.unsigned_abs() <= 32767));
}

#[test]
fn test_header_consistency_for_various_inputs() {
    let inputs = vec![
        vec![],
        vec![NoteEvent::new(0.0, 0.0, 440.0).unwrap()],
        vec![NoteEvent::new(0.2, 0.01, 100.0).unwrap()],
        arpeggio(),
    ];

    for notes in inputs {
        for rate in [8000, 22050, 44100, 48000] {
            let bytes = render_wav(&notes, &RenderConfig::new(rate).unwrap()).unwrap();
            assert_eq!(le_u32(&bytes, 4) as usize, bytes.len() - 8);
            assert_eq!(le_u32(&bytes, 40) as usize, bytes.len() - HEADER_SIZE);
            assert_eq!(le_u32(&bytes, 24), rate);
            assert!(WavHeader::parse(&bytes).is_ok());
        }
    }
}

#[test]
fn test_clipping_never_wraps() {
    // Ten identical voices: any sample over the limit must pin to full scale
    let notes = vec![NoteEvent::new(0.0, 0.05, 441.0).unwrap(); 10];
    let buffer = Renderer::new(44100).unwrap().render(&notes).unwrap();

    assert!(buffer.clipped_samples() > 0);
    assert_eq!(buffer.peak(), 32767);
    assert!(buffer.samples().iter().all(|&s| s != i16::MIN));
}

#[test]
fn test_rendering_twice_is_byte_identical() {
    let notes = arpeggio();
    let config = RenderConfig::default();
    assert_eq!(
        render_wav(&notes, &config).unwrap(),
        render_wav(&notes, &config).unwrap()
    );
}

#[test]
fn test_sweep_and_reference_agree_on_dense_input() {
    let mut notes = Vec::new();
    for i in 0..40 {
        let start = (i % 7) as f32 * 0.031 + (i / 7) as f32 * 0.05;
        let duration = 0.02 + (i % 5) as f32 * 0.017;
        notes.push(NoteEvent::from_key(start, duration, 40 + (i * 3) % 50).unwrap());
    }

    let renderer = Renderer::new(44100).unwrap();
    assert_eq!(
        renderer.render(&notes).unwrap(),
        renderer.render_reference(&notes).unwrap()
    );
}

// === Interop ===

#[test]
fn test_hound_reads_rendered_output() {
    let buffer = Renderer::new(22050).unwrap().render(&arpeggio()).unwrap();
    let bytes = encode(&buffer);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, buffer.samples());
}

#[test]
fn test_midi_file_to_wav() {
    let dir = tempdir().unwrap();
    let midi_path = dir.path().join("tune.mid");

    let note = |delta: u32, key: u8, vel: u8| TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Midi {
            channel: 0.into(),
            message: MidiMessage::NoteOn {
                key: key.into(),
                vel: vel.into(),
            },
        },
    };
    let track = vec![
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(250_000.into())),
        },
        note(0, 69, 90),
        note(96, 69, 0),
        note(0, 76, 90),
        note(96, 76, 0),
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ];
    let mut smf = Smf::new(Header::new(Format::SingleTrack, Timing::Metrical(96.into())));
    smf.tracks.push(track);
    smf.save(&midi_path).unwrap();

    let notes = load_notes(&midi_path).unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1].start(), 0.25);

    let bytes = render_wav(&notes, &RenderConfig::default()).unwrap();
    // Two quarter notes at 240 BPM
    assert_eq!(WavHeader::parse(&bytes).unwrap().num_samples, 22050);

    let mut raw: Vec<u8> = Vec::new();
    smf.write(&mut raw).unwrap();
    assert_eq!(parse_midi(&raw).unwrap(), notes);
}

#[test]
fn test_json_file_to_wav() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(
        &path,
        r#"{"notes": [{"start": 0.0, "duration": 0.1, "frequency": 1000.0}]}"#,
    )
    .unwrap();

    let notes = load_notes(&path).unwrap();
    let bytes = render_wav(&notes, &RenderConfig::new(10000).unwrap()).unwrap();
    assert_eq!(WavHeader::parse(&bytes).unwrap().num_samples, 1000);
}
