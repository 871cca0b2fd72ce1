// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory for chord progression generation.
//!
//! This module provides the pitch table, key parsing, scale spelling,
//! diatonic triads and the fixed progression templates.

pub mod chord;
pub mod error;
pub mod key;
pub mod pitch;
pub mod progression;
pub mod scale;

pub use chord::{build_chord, Chord, ChordQuality, DEFAULT_OCTAVE};
pub use error::TheoryError;
pub use key::{parse_key, Key, Mode};
pub use pitch::{pitch_class_of, AbsolutePitch, PitchClass, PitchLabel};
pub use progression::{degrees_for, Progression, DEFAULT_CHORDS, MAX_CHORDS, MIN_CHORDS};
pub use scale::{spelled_degree_note, Scale};
