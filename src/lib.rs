// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic chord progressions from human-entered keys.
//!
//! ```text
//! "F# major", 4  ->  F# B C# F#  ->  [[66, 70, 73], [71, 75, 78], ...]
//! ```
//!
//! [`generate`] parses the key, picks the progression template for the
//! chord count and builds one root-position triad per degree in octave 4.
//! [`midi::render_progression`] turns the result into a standard MIDI file.

pub mod config;
pub mod engine;
pub mod midi;
pub mod music;

pub use engine::{generate, generate_default, ProgressionRequest, ProgressionResult};
pub use music::TheoryError;
