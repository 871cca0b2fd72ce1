// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Errors raised while turning a key and chord count into a progression.

use thiserror::Error;

use super::progression::{MAX_CHORDS, MIN_CHORDS};

/// Input errors surfaced by the theory engine.
///
/// Every variant is a caller mistake; none of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The key string could not be reduced to a root note
    #[error(
        "Invalid key format for 'key': {0:?} (expected a note A-G with optional # or b, \
         followed by an optional mode, e.g. \"C major\", \"F#m\", \"Bb minor\")"
    )]
    InvalidKeyFormat(String),

    /// A root token was found but it is not a known note name
    #[error("Invalid note name {0:?} (expected A-G optionally followed by # or b)")]
    InvalidNote(String),

    /// Requested chord count outside the supported templates
    #[error(
        "Invalid value for 'num_chords': {0} (must be between {} and {} inclusive)",
        MIN_CHORDS,
        MAX_CHORDS
    )]
    InvalidChordCount(i32),
}
