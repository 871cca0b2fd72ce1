// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression generation entry point.
//!
//! Turns a key string and a chord count into an ordered list of triads.
//! Either a complete result is returned or an error; nothing partial.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::chord::{build_chord, Chord, DEFAULT_OCTAVE};
use crate::music::error::TheoryError;
use crate::music::key::{parse_key, Key};
use crate::music::pitch;
use crate::music::progression::{self, Progression, DEFAULT_CHORDS};

/// A generated progression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionResult {
    key: Key,
    progression: Progression,
    chords: Vec<Chord>,
}

impl ProgressionResult {
    /// Key the progression was built in
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Template that supplied the degrees
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Chords in playing order
    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// Number of chords
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Always false for a successfully generated result
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Chord symbols (e.g., ["C", "F", "G", "C"])
    pub fn chord_names(&self) -> Vec<String> {
        self.chords.iter().map(Chord::name).collect()
    }

    /// Roman numerals with chord qualities (e.g., ["I", "vi", "IV", "V"])
    pub fn numerals(&self) -> Vec<String> {
        self.chords.iter().map(Chord::numeral).collect()
    }
}

impl fmt::Display for ProgressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.key,
            self.numerals().join("-"),
            self.chord_names().join(" ")
        )
    }
}

/// Generate a progression in a key.
///
/// Chord count is checked before the key is parsed, and the parsed root is
/// checked against the pitch table again before any chord is built.
pub fn generate(key_string: &str, num_chords: i32) -> Result<ProgressionResult, TheoryError> {
    progression::validate_chord_count(num_chords)?;

    let key = parse_key(key_string)?;
    if !pitch::is_note_name(key.root()) {
        return Err(TheoryError::InvalidNote(key.root().to_string()));
    }

    let progression = progression::progression_for(num_chords)?;
    debug!(key = %key, progression = progression.label, "building progression");

    let chords = progression
        .degrees
        .iter()
        .map(|&degree| build_chord(&key, degree, DEFAULT_OCTAVE))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProgressionResult {
        key,
        progression,
        chords,
    })
}

/// Generate the default four-chord progression
pub fn generate_default(key_string: &str) -> Result<ProgressionResult, TheoryError> {
    generate(key_string, DEFAULT_CHORDS)
}

fn default_num_chords() -> i32 {
    DEFAULT_CHORDS
}

/// A progression request as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    /// Key string (e.g., "C major", "F#m")
    pub key: String,
    /// Number of chords (2-6)
    #[serde(default = "default_num_chords")]
    pub num_chords: i32,
}

impl ProgressionRequest {
    /// Create a request with the default chord count
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            num_chords: DEFAULT_CHORDS,
        }
    }

    /// Set the chord count
    pub fn with_num_chords(mut self, num_chords: i32) -> Self {
        self.num_chords = num_chords;
        self
    }

    /// Run the request through the engine
    pub fn generate(&self) -> Result<ProgressionResult, TheoryError> {
        generate(&self.key, self.num_chords)
    }
}
