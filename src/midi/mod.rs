// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI rendering of generated progressions.
//!
//! Each chord becomes three simultaneous notes held for a whole note
//! (four beats by default), one chord after another on a single track.

pub mod export;

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::engine::ProgressionResult;
use crate::music::chord::Chord;

pub use export::{ExportNote, ExportTrack, MidiExporter, DEFAULT_PPQN, MAX_DELTA_TICKS};

/// Beats per chord: a whole note in 4/4
pub const WHOLE_NOTE_BEATS: u32 = 4;

/// Velocity for every chord tone
pub const DEFAULT_VELOCITY: u8 = 100;

/// Errors raised while rendering chords to MIDI
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("Chord {index} ({chord}) has a tone outside the MIDI note range 0-127")]
    PitchOutOfRange { index: usize, chord: String },

    #[error("Invalid MIDI channel {0} (expected 0-15)")]
    InvalidChannel(u8),

    #[error("Invalid velocity {0} (expected 1-127)")]
    InvalidVelocity(u8),

    #[error("Invalid timing: ppqn {ppqn} and beats per chord {beats_per_chord} must both be at least 1")]
    InvalidTiming { ppqn: u16, beats_per_chord: u32 },

    #[error("Progression spans {0} ticks, over the MIDI file limit of {}", MAX_DELTA_TICKS)]
    TrackTooLong(u64),

    #[error("Failed to write MIDI file: {0}")]
    Io(#[from] io::Error),
}

/// How chords are laid out on the track
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Ticks per quarter note
    pub ppqn: u16,
    /// Length of each chord in beats
    pub beats_per_chord: u32,
    /// Note-on velocity (1-127)
    pub velocity: u8,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// Track name meta event, skipped when empty
    pub track_name: String,
    /// Program change at the start of the track
    pub program: Option<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ppqn: DEFAULT_PPQN,
            beats_per_chord: WHOLE_NOTE_BEATS,
            velocity: DEFAULT_VELOCITY,
            channel: 0,
            track_name: "Chord Progression".to_string(),
            program: None,
        }
    }
}

impl RenderOptions {
    /// Duration of one chord in ticks
    pub fn chord_ticks(&self) -> u64 {
        self.ppqn as u64 * self.beats_per_chord as u64
    }

    fn validate(&self) -> Result<(), MidiError> {
        if self.ppqn == 0 || self.beats_per_chord == 0 {
            return Err(MidiError::InvalidTiming {
                ppqn: self.ppqn,
                beats_per_chord: self.beats_per_chord,
            });
        }
        if self.channel > 15 {
            return Err(MidiError::InvalidChannel(self.channel));
        }
        if self.velocity == 0 || self.velocity > 127 {
            return Err(MidiError::InvalidVelocity(self.velocity));
        }
        Ok(())
    }
}

/// Lay chords out back to back on one track
pub fn progression_track(chords: &[Chord], options: &RenderOptions) -> Result<ExportTrack, MidiError> {
    options.validate()?;

    let duration = options.chord_ticks();
    let mut track = ExportTrack::new(options.track_name.clone(), options.channel);
    if let Some(program) = options.program {
        track = track.with_program(program);
    }

    for (index, chord) in chords.iter().enumerate() {
        let notes = chord.midi_notes().ok_or_else(|| MidiError::PitchOutOfRange {
            index,
            chord: chord.to_string(),
        })?;
        let tick = index as u64 * duration;
        for note in notes {
            track.add_note(ExportNote::new(tick, note, options.velocity, duration));
        }
    }

    let ticks = track.end_tick();
    if ticks > MAX_DELTA_TICKS as u64 {
        return Err(MidiError::TrackTooLong(ticks));
    }

    Ok(track)
}

/// Build an exporter holding a progression
pub fn progression_exporter(
    result: &ProgressionResult,
    options: &RenderOptions,
) -> Result<MidiExporter, MidiError> {
    let track = progression_track(result.chords(), options)?;
    let mut exporter = MidiExporter::new();
    exporter.set_ppqn(options.ppqn);
    exporter.add_track(track);
    Ok(exporter)
}

/// Render a progression as a format 0 standard MIDI file
pub fn render_progression(
    result: &ProgressionResult,
    options: &RenderOptions,
) -> Result<Vec<u8>, MidiError> {
    let bytes = progression_exporter(result, options)?.to_bytes()?;
    debug!(key = %result.key(), chords = result.len(), bytes = bytes.len(), "rendered progression");
    Ok(bytes)
}

/// Render a progression straight to a `.mid` file
pub fn write_progression<P: AsRef<Path>>(
    result: &ProgressionResult,
    options: &RenderOptions,
    path: P,
) -> Result<(), MidiError> {
    progression_exporter(result, options)?.export(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "wrote MIDI file");
    Ok(())
}

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const PROGRAM_CHANGE: u8 = 0xC0;

    // Meta events (file only)
    pub const META: u8 = 0xFF;
    pub const META_TRACK_NAME: u8 = 0x03;
    pub const META_END_OF_TRACK: u8 = 0x2F;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generate;
    use crate::music::chord::build_chord;
    use crate::music::key::{Key, Mode};

    #[test]
    fn test_progression_track_layout() {
        let result = generate("C major", 4).unwrap();
        let track = progression_track(result.chords(), &RenderOptions::default()).unwrap();

        assert_eq!(track.notes.len(), 12);
        assert_eq!(track.end_tick(), 4 * 1920);

        let second: Vec<&ExportNote> = track.notes.iter().filter(|n| n.tick == 1920).collect();
        let pitches: Vec<u8> = second.iter().map(|n| n.note).collect();
        assert_eq!(pitches, vec![65, 69, 72]);
        assert!(second.iter().all(|n| n.velocity == 100 && n.duration == 1920));
    }

    #[test]
    fn test_out_of_range_chord_rejected() {
        let key = Key::new("C", Mode::Major).unwrap();
        let chords = vec![
            build_chord(&key, 1, 4).unwrap(),
            build_chord(&key, 1, -2).unwrap(),
        ];
        let err = progression_track(&chords, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, MidiError::PitchOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_invalid_options() {
        let chords: Vec<Chord> = Vec::new();

        let options = RenderOptions {
            channel: 16,
            ..RenderOptions::default()
        };
        assert!(matches!(
            progression_track(&chords, &options),
            Err(MidiError::InvalidChannel(16))
        ));

        let options = RenderOptions {
            velocity: 0,
            ..RenderOptions::default()
        };
        assert!(matches!(
            progression_track(&chords, &options),
            Err(MidiError::InvalidVelocity(0))
        ));
    }

    #[test]
    fn test_zero_timing_rejected() {
        let result = generate("C major", 2).unwrap();

        for (ppqn, beats_per_chord) in [(0, 4), (480, 0)] {
            let options = RenderOptions {
                ppqn,
                beats_per_chord,
                ..RenderOptions::default()
            };
            assert_eq!(options.chord_ticks(), 0);
            assert!(matches!(
                render_progression(&result, &options),
                Err(MidiError::InvalidTiming { .. })
            ));
        }
    }

    #[test]
    fn test_overlong_progression_rejected() {
        let result = generate("C major", 2).unwrap();
        let options = RenderOptions {
            beats_per_chord: 10_000_000,
            ..RenderOptions::default()
        };
        let err = render_progression(&result, &options).unwrap_err();
        assert!(matches!(err, MidiError::TrackTooLong(9_600_000_000)));

        // The last chord may end exactly at the limit
        let options = RenderOptions {
            ppqn: 1,
            beats_per_chord: MAX_DELTA_TICKS / 2,
            ..RenderOptions::default()
        };
        assert!(render_progression(&result, &options).is_ok());
        let options = RenderOptions {
            ppqn: 1,
            beats_per_chord: MAX_DELTA_TICKS / 2 + 1,
            ..RenderOptions::default()
        };
        assert!(matches!(
            render_progression(&result, &options),
            Err(MidiError::TrackTooLong(_))
        ));
    }

    #[test]
    fn test_render_progression_header() {
        let result = generate("A minor", 3).unwrap();
        let bytes = render_progression(&result, &RenderOptions::default()).unwrap();
        assert_eq!(&bytes[0..4], b"MThd");
        assert_eq!(&bytes[12..14], &480u16.to_be_bytes());
        assert_eq!(&bytes[14..18], b"MTrk");
        assert_eq!(&bytes[bytes.len() - 3..], &[0xFF, 0x2F, 0x00]);
    }

    #[test]
    fn test_write_progression_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progression.mid");
        let result = generate("F# major", 2).unwrap();
        let options = RenderOptions::default();

        write_progression(&result, &options, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, render_progression(&result, &options).unwrap());
    }

    #[test]
    fn test_write_progression_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.mid");
        let result = generate("C major", 2).unwrap();
        let err = write_progression(&result, &RenderOptions::default(), &path).unwrap_err();
        assert!(matches!(err, MidiError::Io(_)));
    }

    #[test]
    fn test_chord_ticks() {
        let options = RenderOptions {
            ppqn: 96,
            beats_per_chord: 2,
            ..RenderOptions::default()
        };
        assert_eq!(options.chord_ticks(), 192);
        assert_eq!(RenderOptions::default().chord_ticks(), 1920);
    }

    #[test]
    fn test_midi_message_constants() {
        assert_eq!(messages::NOTE_ON, 0x90);
        assert_eq!(messages::NOTE_OFF, 0x80);
        assert_eq!(messages::PROGRAM_CHANGE, 0xC0);
    }
}
