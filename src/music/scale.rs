// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale degrees and their spelling.
//!
//! A degree's pitch class comes from the mode's offset table. Its name is
//! resolved in two stages: the canonical sharp name of the pitch class, then
//! an override from the key signature table for the key's spelled root.
//! Minor keys use the major signature of the same root, so degrees that the
//! major signature does not cover keep their canonical sharp name.

use std::fmt;

use tracing::debug;

use super::key::{Key, Mode};
use super::pitch::{self, PitchClass};

/// Major key signatures: the seven spelled degrees for each root spelling.
const KEY_SIGNATURES: [(&str, [&str; 7]); 13] = [
    ("C", ["C", "D", "E", "F", "G", "A", "B"]),
    ("Db", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]),
    ("D", ["D", "E", "F#", "G", "A", "B", "C#"]),
    ("Eb", ["Eb", "F", "G", "Ab", "Bb", "C", "D"]),
    ("E", ["E", "F#", "G#", "A", "B", "C#", "D#"]),
    ("F", ["F", "G", "A", "Bb", "C", "D", "E"]),
    ("F#", ["F#", "G#", "A#", "B", "C#", "D#", "E#"]),
    ("Gb", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]),
    ("G", ["G", "A", "B", "C", "D", "E", "F#"]),
    ("Ab", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]),
    ("A", ["A", "B", "C#", "D", "E", "F#", "G#"]),
    ("Bb", ["Bb", "C", "D", "Eb", "F", "G", "A"]),
    ("B", ["B", "C#", "D#", "E", "F#", "G#", "A#"]),
];

/// Zero-based index into a 7-note offset table. Total over all integers:
/// degree 8 wraps to the tonic, degree 0 to the seventh.
pub fn degree_index(degree: i32) -> usize {
    (degree - 1).rem_euclid(7) as usize
}

/// Semitones from the root for a scale degree
pub fn degree_offset(mode: Mode, degree: i32) -> i32 {
    mode.offsets()[degree_index(degree)]
}

/// Unspelled pitch class of a degree in a key
pub fn degree_class(key: &Key, degree: i32) -> PitchClass {
    (key.root_class() as i32 + degree_offset(key.mode(), degree)).rem_euclid(12) as PitchClass
}

/// Stage one: the canonical sharp name of the degree's pitch class
pub fn canonical_degree_note(key: &Key, degree: i32) -> &'static str {
    pitch::canonical_name(degree_class(key, degree) as i32)
}

/// The major signature for a root spelling, if the table has one
pub fn key_signature(root: &str) -> Option<&'static [&'static str; 7]> {
    KEY_SIGNATURES
        .iter()
        .find(|(r, _)| *r == root)
        .map(|(_, names)| names)
}

/// Stage two: the signature's spelling of a pitch class, if it has one
pub fn signature_spelling(root: &str, pc: PitchClass) -> Option<&'static str> {
    key_signature(root)?
        .iter()
        .copied()
        .find(|name| pitch::lookup(name).map(|(_, c)| c) == Some(pc))
}

/// Spelled note name for a scale degree (e.g., degree 7 of F# major is "E#")
pub fn spelled_degree_note(key: &Key, degree: i32) -> &'static str {
    let pc = degree_class(key, degree);
    match signature_spelling(key.root(), pc) {
        Some(name) => name,
        None => {
            let name = canonical_degree_note(key, degree);
            debug!(key = %key, degree, name, "no signature spelling, using canonical name");
            name
        }
    }
}

/// The seven spelled notes of a key
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    key: Key,
    notes: [&'static str; 7],
}

impl Scale {
    /// Create the scale for a key
    pub fn new(key: Key) -> Self {
        let mut notes = [""; 7];
        for (i, note) in notes.iter_mut().enumerate() {
            *note = spelled_degree_note(&key, i as i32 + 1);
        }
        Self { key, notes }
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[&'static str] {
        &self.notes
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.notes.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::pitch_class_of;

    fn key(root: &str, mode: Mode) -> Key {
        Key::new(root, mode).unwrap()
    }

    #[test]
    fn test_degree_index_wraps() {
        assert_eq!(degree_index(1), 0);
        assert_eq!(degree_index(7), 6);
        assert_eq!(degree_index(8), 0);
        assert_eq!(degree_index(0), 6);
        assert_eq!(degree_index(-1), 5);
        assert_eq!(degree_index(-6), 0);
        assert_eq!(degree_index(15), 0);
    }

    #[test]
    fn test_degree_offsets() {
        assert_eq!(degree_offset(Mode::Major, 3), 4);
        assert_eq!(degree_offset(Mode::Minor, 3), 3);
        assert_eq!(degree_offset(Mode::Major, 10), 4);
        assert_eq!(degree_offset(Mode::Minor, 0), 10);
    }

    #[test]
    fn test_c_major_scale() {
        let scale = Scale::new(key("C", Mode::Major));
        assert_eq!(scale.notes(), &["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_f_sharp_major_uses_signature() {
        let k = key("F#", Mode::Major);
        assert_eq!(spelled_degree_note(&k, 5), "C#");
        assert_eq!(spelled_degree_note(&k, 7), "E#");
        assert_eq!(canonical_degree_note(&k, 7), "F");
    }

    #[test]
    fn test_flat_keys_spell_with_flats() {
        let scale = Scale::new(key("Gb", Mode::Major));
        assert_eq!(scale.notes(), &["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]);

        let scale = Scale::new(key("Bb", Mode::Major));
        assert_eq!(scale.notes(), &["Bb", "C", "D", "Eb", "F", "G", "A"]);
    }

    #[test]
    fn test_sharp_root_without_signature_falls_back() {
        let k = key("C#", Mode::Major);
        assert!(key_signature("C#").is_none());
        assert_eq!(spelled_degree_note(&k, 2), "D#");
        assert_eq!(spelled_degree_note(&k, 4), "F#");
    }

    #[test]
    fn test_minor_reuses_major_signature() {
        // A minor: degrees shared with A major take its spelling, the
        // lowered 3rd, 6th and 7th fall back to canonical names.
        let scale = Scale::new(key("A", Mode::Minor));
        assert_eq!(scale.notes(), &["A", "B", "C", "D", "E", "F", "G"]);

        // Bb minor keeps Bb major's flats where they overlap
        let scale = Scale::new(key("Bb", Mode::Minor));
        assert_eq!(scale.notes(), &["Bb", "C", "C#", "Eb", "F", "F#", "G#"]);
    }

    #[test]
    fn test_spelling_keeps_pitch_class() {
        let roots = ["C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B"];
        for root in roots {
            for mode in [Mode::Major, Mode::Minor] {
                let k = key(root, mode);
                for degree in -8..=15 {
                    let name = spelled_degree_note(&k, degree);
                    assert_eq!(
                        pitch_class_of(name),
                        Ok(degree_class(&k, degree)),
                        "{} degree {}",
                        k,
                        degree
                    );
                }
            }
        }
    }

    #[test]
    fn test_signature_spelling_stage() {
        assert_eq!(signature_spelling("F#", 5), Some("E#"));
        assert_eq!(signature_spelling("C", 6), None);
        assert_eq!(signature_spelling("A#", 10), None);
    }

    #[test]
    fn test_scale_display() {
        let scale = Scale::new(key("Eb", Mode::Major));
        assert_eq!(scale.to_string(), "Eb Major: Eb F G Ab Bb C D");
    }
}
