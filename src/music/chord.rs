// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triad construction.
//!
//! Every degree gets a plain major or minor triad in root position. Degrees
//! that would be diminished in strict theory (vii in major; ii, iii, vi and
//! vii in minor here) are still built as major or minor triads.

use std::fmt;

use serde::Serialize;

use super::error::TheoryError;
use super::key::{Key, Mode};
use super::pitch::{self, AbsolutePitch, PitchLabel, ANCHOR_OCTAVE};
use super::scale::{degree_index, spelled_degree_note};

/// Octave chords are placed in unless a caller asks otherwise
pub const DEFAULT_OCTAVE: i8 = 4;

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
}

impl ChordQuality {
    /// Semitones above the chord root for root, third and fifth
    pub fn intervals(self) -> [i32; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
        }
    }

    /// Quality of the triad on a scale degree.
    ///
    /// Major keys: ii, iii and vi are minor. Minor keys: i, iv and v are
    /// minor. Everything else is major.
    pub fn for_degree(mode: Mode, degree: i32) -> Self {
        let degree = degree_index(degree) + 1;
        let minor_degrees: &[usize] = match mode {
            Mode::Major => &[2, 3, 6],
            Mode::Minor => &[1, 4, 5],
        };
        if minor_degrees.contains(&degree) {
            ChordQuality::Minor
        } else {
            ChordQuality::Major
        }
    }

    /// Chord symbol suffix ("" or "m")
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
        }
    }
}

/// Roman numeral for a degree, lowercase for minor triads
pub fn roman_numeral(degree: i32, quality: ChordQuality) -> String {
    const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
    let numeral = NUMERALS[degree_index(degree)];
    match quality {
        ChordQuality::Major => numeral.to_string(),
        ChordQuality::Minor => numeral.to_lowercase(),
    }
}

/// A root-position triad
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    degree: i32,
    root_name: &'static str,
    quality: ChordQuality,
    pitches: [AbsolutePitch; 3],
}

impl Chord {
    /// Scale degree this chord was built on
    pub fn degree(&self) -> i32 {
        self.degree
    }

    /// Spelled name of the chord root (e.g., "Bb", "E#")
    pub fn root_name(&self) -> &'static str {
        self.root_name
    }

    /// Triad quality
    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Absolute pitches, ordered root, third, fifth
    pub fn pitches(&self) -> [AbsolutePitch; 3] {
        self.pitches
    }

    /// Display labels using canonical names (e.g., [F4, A4, C5])
    pub fn labels(&self) -> [PitchLabel; 3] {
        self.pitches.map(PitchLabel::of)
    }

    /// Chord symbol (e.g., "F#", "Bbm")
    pub fn name(&self) -> String {
        format!("{}{}", self.root_name, self.quality.suffix())
    }

    /// Roman numeral (e.g., "IV", "vi")
    pub fn numeral(&self) -> String {
        roman_numeral(self.degree, self.quality)
    }

    /// MIDI note numbers, or `None` if any tone is outside 0-127
    pub fn midi_notes(&self) -> Option<[u8; 3]> {
        let [r, t, f] = self.pitches;
        Some([pitch::to_midi(r)?, pitch::to_midi(t)?, pitch::to_midi(f)?])
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, t, fifth] = self.labels();
        write!(f, "{} ({}, {}, {})", self.name(), r, t, fifth)
    }
}

/// Build the diatonic triad on a degree of a key.
///
/// The root is the spelled degree note at its octave-4 base pitch, moved by
/// whole octaves to `octave`.
pub fn build_chord(key: &Key, degree: i32, octave: i8) -> Result<Chord, TheoryError> {
    let root_name = spelled_degree_note(key, degree);
    let quality = ChordQuality::for_degree(key.mode(), degree);
    let root = pitch::base_pitch(root_name)? + (octave as i32 - ANCHOR_OCTAVE as i32) * 12;

    Ok(Chord {
        degree,
        root_name,
        quality,
        pitches: quality.intervals().map(|i| root + i),
    })
}
