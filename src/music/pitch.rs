// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch table: note names, pitch classes and absolute pitches.
//!
//! Pitch class 0 is C. Absolute pitches follow the MIDI convention where
//! middle C (C4) is 60, so every note name has an octave-4 base value of
//! `60 + pitch_class`.

use std::fmt;

use serde::Serialize;

use super::error::TheoryError;

/// Pitch class (0-11)
pub type PitchClass = u8;

/// MIDI-style note number. Signed, since chords placed in very low
/// octaves can fall below zero before being handed to a MIDI encoder.
pub type AbsolutePitch = i32;

/// Absolute pitch of C4
pub const OCTAVE4_BASE: AbsolutePitch = 60;

/// Octave the base pitches are anchored to
pub const ANCHOR_OCTAVE: i8 = 4;

/// Canonical (sharp) spelling of each pitch class
pub const CHROMATIC_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Every accepted spelling and its pitch class.
///
/// The first 17 entries are the naturals, sharps and flats accepted from
/// users. The last four only show up in key signatures (F# major spells its
/// seventh degree E#, Gb major its fourth Cb) and are accepted so that any
/// name the scale engine emits can be looked up again.
const PITCH_TABLE: [(&str, PitchClass); 21] = [
    ("C", 0),
    ("D", 2),
    ("E", 4),
    ("F", 5),
    ("G", 7),
    ("A", 9),
    ("B", 11),
    ("C#", 1),
    ("D#", 3),
    ("F#", 6),
    ("G#", 8),
    ("A#", 10),
    ("Db", 1),
    ("Eb", 3),
    ("Gb", 6),
    ("Ab", 8),
    ("Bb", 10),
    ("E#", 5),
    ("B#", 0),
    ("Fb", 4),
    ("Cb", 11),
];

/// Look up a spelling, returning the table's own `'static` copy of the name.
pub(crate) fn lookup(name: &str) -> Option<(&'static str, PitchClass)> {
    PITCH_TABLE.iter().copied().find(|(n, _)| *n == name)
}

/// Pitch class of a note name. Case-sensitive: "Db" is a note, "db" is not.
pub fn pitch_class_of(name: &str) -> Result<PitchClass, TheoryError> {
    lookup(name)
        .map(|(_, pc)| pc)
        .ok_or_else(|| TheoryError::InvalidNote(name.to_string()))
}

/// Check whether a string is an accepted note name
pub fn is_note_name(name: &str) -> bool {
    lookup(name).is_some()
}

/// Canonical sharp name for any integer, wrapped into 0-11
pub fn canonical_name(pitch: i32) -> &'static str {
    CHROMATIC_NAMES[pitch.rem_euclid(12) as usize]
}

/// Octave-4 absolute pitch of a note name (e.g. "A" -> 69, "Cb" -> 71)
pub fn base_pitch(name: &str) -> Result<AbsolutePitch, TheoryError> {
    Ok(OCTAVE4_BASE + pitch_class_of(name)? as AbsolutePitch)
}

/// A display name for an absolute pitch, e.g. `C#5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PitchLabel {
    /// Canonical (sharp) note name
    pub name: &'static str,
    /// Octave number, middle C = C4
    pub octave: i32,
}

impl PitchLabel {
    /// Label an absolute pitch. Floors toward negative infinity so
    /// pitches below zero land in octave -2 and lower.
    pub fn of(pitch: AbsolutePitch) -> Self {
        Self {
            name: canonical_name(pitch),
            octave: pitch.div_euclid(12) - 1,
        }
    }
}

impl fmt::Display for PitchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Convert an absolute pitch to a MIDI note number, if in range
pub fn to_midi(pitch: AbsolutePitch) -> Option<u8> {
    u8::try_from(pitch).ok().filter(|&n| n <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naturals() {
        assert_eq!(pitch_class_of("C"), Ok(0));
        assert_eq!(pitch_class_of("E"), Ok(4));
        assert_eq!(pitch_class_of("A"), Ok(9));
        assert_eq!(pitch_class_of("B"), Ok(11));
    }

    #[test]
    fn test_enharmonic_pairs_share_class() {
        for (sharp, flat) in [("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")] {
            assert_eq!(pitch_class_of(sharp), pitch_class_of(flat), "{} vs {}", sharp, flat);
        }
        assert_eq!(pitch_class_of("E#"), pitch_class_of("F"));
        assert_eq!(pitch_class_of("Cb"), pitch_class_of("B"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(pitch_class_of("c").is_err());
        assert!(pitch_class_of("DB").is_err());
        assert_eq!(
            pitch_class_of("H"),
            Err(TheoryError::InvalidNote("H".to_string()))
        );
        assert!(!is_note_name(""));
        assert!(!is_note_name("C##"));
    }

    #[test]
    fn test_reverse_mapping_is_total() {
        for pc in 0..12 {
            let name = canonical_name(pc);
            assert_eq!(pitch_class_of(name), Ok(pc as PitchClass));
        }
        assert_eq!(canonical_name(-1), "B");
        assert_eq!(canonical_name(25), "C#");
    }

    #[test]
    fn test_base_pitch() {
        assert_eq!(base_pitch("C"), Ok(60));
        assert_eq!(base_pitch("A"), Ok(69));
        assert_eq!(base_pitch("Bb"), Ok(70));
        assert_eq!(base_pitch("Cb"), Ok(71));
        assert_eq!(base_pitch("B#"), Ok(60));
    }

    #[test]
    fn test_pitch_label() {
        assert_eq!(PitchLabel::of(60).to_string(), "C4");
        assert_eq!(PitchLabel::of(72).to_string(), "C5");
        assert_eq!(PitchLabel::of(61).to_string(), "C#4");
        assert_eq!(PitchLabel::of(0).to_string(), "C-1");
        assert_eq!(PitchLabel::of(-1).to_string(), "B-2");
    }

    #[test]
    fn test_to_midi() {
        assert_eq!(to_midi(60), Some(60));
        assert_eq!(to_midi(127), Some(127));
        assert_eq!(to_midi(128), None);
        assert_eq!(to_midi(-3), None);
    }
}
