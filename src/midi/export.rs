// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Writes format 0 files: one header chunk and a single track chunk that
//! merges every added track's events.

use std::fs;
use std::io;
use std::path::Path;

use super::messages;

/// Default resolution (ticks per quarter note)
pub const DEFAULT_PPQN: u16 = 480;

/// Largest delta time a standard MIDI file can hold (four VLQ bytes)
pub const MAX_DELTA_TICKS: u32 = 0x0FFF_FFFF;

/// A track for export
#[derive(Debug, Clone)]
pub struct ExportTrack {
    /// Track name
    pub name: String,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// Notes in this track
    pub notes: Vec<ExportNote>,
    /// Program change at start (None = no change)
    pub program: Option<u8>,
}

impl ExportTrack {
    /// Create a new export track
    pub fn new(name: impl Into<String>, channel: u8) -> Self {
        Self {
            name: name.into(),
            channel,
            notes: Vec::new(),
            program: None,
        }
    }

    /// Add a note
    pub fn add_note(&mut self, note: ExportNote) {
        self.notes.push(note);
    }

    /// Set program
    pub fn with_program(mut self, program: u8) -> Self {
        self.program = Some(program);
        self
    }

    /// Tick at which the last note ends
    pub fn end_tick(&self) -> u64 {
        self.notes.iter().map(ExportNote::end_tick).max().unwrap_or(0)
    }
}

/// A note for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNote {
    /// Start tick
    pub tick: u64,
    /// Note number (0-127)
    pub note: u8,
    /// Velocity (1-127)
    pub velocity: u8,
    /// Duration in ticks
    pub duration: u64,
}

impl ExportNote {
    /// Create a new export note
    pub fn new(tick: u64, note: u8, velocity: u8, duration: u64) -> Self {
        Self {
            tick,
            note,
            velocity,
            duration,
        }
    }

    /// End tick
    pub fn end_tick(&self) -> u64 {
        self.tick + self.duration
    }
}

/// MIDI event for export
#[derive(Debug, Clone)]
struct MidiExportEvent {
    /// Absolute tick
    tick: u64,
    /// Position among events sharing a tick: setup, note-offs, note-ons
    rank: u8,
    /// Event data
    data: Vec<u8>,
}

impl MidiExportEvent {
    fn note_on(tick: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            tick,
            rank: 2,
            data: vec![
                messages::NOTE_ON | (channel & 0x0F),
                note & 0x7F,
                velocity & 0x7F,
            ],
        }
    }

    fn note_off(tick: u64, channel: u8, note: u8) -> Self {
        Self {
            tick,
            rank: 1,
            data: vec![messages::NOTE_OFF | (channel & 0x0F), note & 0x7F, 0],
        }
    }

    fn program_change(tick: u64, channel: u8, program: u8) -> Self {
        Self {
            tick,
            rank: 0,
            data: vec![messages::PROGRAM_CHANGE | (channel & 0x0F), program & 0x7F],
        }
    }

    fn track_name(tick: u64, name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut data = vec![messages::META, messages::META_TRACK_NAME];
        write_variable_length(&mut data, bytes.len() as u32);
        data.extend_from_slice(bytes);
        Self { tick, rank: 0, data }
    }
}

/// MIDI file exporter
#[derive(Debug, Clone)]
pub struct MidiExporter {
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// Tracks to export
    tracks: Vec<ExportTrack>,
}

impl MidiExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self {
            ppqn: DEFAULT_PPQN,
            tracks: Vec::new(),
        }
    }

    /// Set PPQN
    pub fn set_ppqn(&mut self, ppqn: u16) {
        self.ppqn = ppqn.max(1);
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Add a track
    pub fn add_track(&mut self, track: ExportTrack) {
        self.tracks.push(track);
    }

    /// Export to file
    pub fn export<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_bytes()?)
    }

    /// Encode the whole file
    ///
    /// Fails with `InvalidData` when two consecutive events are further
    /// apart than [`MAX_DELTA_TICKS`].
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_header(&mut buffer);
        self.write_track(&mut buffer, &self.collect_events())?;
        Ok(buffer)
    }

    /// Merge every track's events into one tick-ordered list
    fn collect_events(&self) -> Vec<MidiExportEvent> {
        let mut events = Vec::new();

        for track in &self.tracks {
            if !track.name.is_empty() {
                events.push(MidiExportEvent::track_name(0, &track.name));
            }

            if let Some(program) = track.program {
                events.push(MidiExportEvent::program_change(0, track.channel, program));
            }

            for note in &track.notes {
                events.push(MidiExportEvent::note_on(
                    note.tick,
                    track.channel,
                    note.note,
                    note.velocity,
                ));
                events.push(MidiExportEvent::note_off(
                    note.end_tick(),
                    track.channel,
                    note.note,
                ));
            }
        }

        // Stable, so events of equal tick and rank keep insertion order
        events.sort_by_key(|e| (e.tick, e.rank));
        events
    }

    /// Write MIDI file header chunk
    fn write_header(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(b"MThd");
        // Chunk length (always 6)
        buffer.extend_from_slice(&6u32.to_be_bytes());
        // Format 0, one track
        buffer.extend_from_slice(&0u16.to_be_bytes());
        buffer.extend_from_slice(&1u16.to_be_bytes());
        buffer.extend_from_slice(&self.ppqn.to_be_bytes());
    }

    /// Write a track chunk
    fn write_track(&self, buffer: &mut Vec<u8>, events: &[MidiExportEvent]) -> io::Result<()> {
        let mut track_data = Vec::new();
        let mut last_tick = 0u64;

        for event in events {
            let delta = event.tick.saturating_sub(last_tick);
            let delta = u32::try_from(delta)
                .ok()
                .filter(|d| *d <= MAX_DELTA_TICKS)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("delta of {} ticks exceeds {}", delta, MAX_DELTA_TICKS),
                    )
                })?;
            write_variable_length(&mut track_data, delta);
            track_data.extend_from_slice(&event.data);
            last_tick = event.tick;
        }

        // End of track
        write_variable_length(&mut track_data, 0);
        track_data.extend_from_slice(&[messages::META, messages::META_END_OF_TRACK, 0x00]);

        buffer.extend_from_slice(b"MTrk");
        buffer.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
        buffer.extend_from_slice(&track_data);
        Ok(())
    }
}

impl Default for MidiExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write variable-length quantity
fn write_variable_length(buffer: &mut Vec<u8>, mut value: u32) {
    let mut bytes = Vec::new();

    bytes.push((value & 0x7F) as u8);
    value >>= 7;

    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }

    bytes.reverse();
    buffer.extend_from_slice(&bytes);
}
