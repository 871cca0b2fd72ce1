// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fixed progression templates, one per chord count.

use serde::Serialize;

use super::error::TheoryError;

/// Fewest chords a progression can have
pub const MIN_CHORDS: i32 = 2;

/// Most chords a progression can have
pub const MAX_CHORDS: i32 = 6;

/// Chord count used when a request doesn't give one
pub const DEFAULT_CHORDS: i32 = 4;

/// A named sequence of scale degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progression {
    /// Roman numeral label (e.g., "I-IV-V-I")
    pub label: &'static str,
    /// Scale degrees, 1-based
    pub degrees: &'static [i32],
}

impl Progression {
    /// Number of chords
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Templates are never empty
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}

const PROGRESSIONS: [Progression; 5] = [
    Progression {
        label: "I-V",
        degrees: &[1, 5],
    },
    Progression {
        label: "I-IV-V",
        degrees: &[1, 4, 5],
    },
    Progression {
        label: "I-IV-V-I",
        degrees: &[1, 4, 5, 1],
    },
    Progression {
        label: "I-vi-IV-V-I",
        degrees: &[1, 6, 4, 5, 1],
    },
    Progression {
        label: "I-vi-IV-V-I-IV",
        degrees: &[1, 6, 4, 5, 1, 4],
    },
];

/// All templates, shortest first
pub fn all() -> &'static [Progression] {
    &PROGRESSIONS
}

/// Check a chord count against the supported range
pub fn validate_chord_count(num_chords: i32) -> Result<(), TheoryError> {
    if (MIN_CHORDS..=MAX_CHORDS).contains(&num_chords) {
        Ok(())
    } else {
        Err(TheoryError::InvalidChordCount(num_chords))
    }
}

/// Template for a chord count
pub fn progression_for(num_chords: i32) -> Result<Progression, TheoryError> {
    validate_chord_count(num_chords)?;
    Ok(PROGRESSIONS[(num_chords - MIN_CHORDS) as usize])
}

/// Scale degrees for a chord count
pub fn degrees_for(num_chords: i32) -> Result<&'static [i32], TheoryError> {
    progression_for(num_chords).map(|p| p.degrees)
}
