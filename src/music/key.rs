// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key parsing.
//!
//! Turns free-form strings like "C major", "f# minor", "Bbm" or "Amin" into a
//! [`Key`]. Parsing is a fixed sequence of pattern rules:
//!
//! 1. minor detection on the whole string ("minor", "min", or a trailing `m`)
//! 2. stripping of every mode marker to isolate the root
//! 3. only if that leaves nothing, a compact `<note><accidental>[m]` match
//! 4. root casing normalization and a pitch table check
//!
//! The stripping rule removes a bare `m`/`M` wherever it appears, not only
//! right after the note. Note names never contain an `m`, so this only
//! matters for malformed input.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TheoryError;
use super::pitch::{self, PitchClass};

/// Scale mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    /// Natural minor (Aeolian)
    Minor,
}

impl Mode {
    /// Semitone offsets of the seven scale degrees
    pub fn offsets(self) -> &'static [i32; 7] {
        match self {
            Mode::Major => &MAJOR_OFFSETS,
            Mode::Minor => &MINOR_OFFSETS,
        }
    }

    /// Get a human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Major scale offsets (semitones from root)
pub const MAJOR_OFFSETS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Natural minor scale offsets (semitones from root)
pub const MINOR_OFFSETS: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

/// A parsed key: spelled root plus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    root: &'static str,
    root_class: PitchClass,
    mode: Mode,
}

impl Key {
    /// Create a key from a root note name
    pub fn new(root: &str, mode: Mode) -> Result<Self, TheoryError> {
        let (root, root_class) =
            pitch::lookup(root).ok_or_else(|| TheoryError::InvalidNote(root.to_string()))?;
        Ok(Self {
            root,
            root_class,
            mode,
        })
    }

    /// Parse a free-form key string (e.g., "C major", "Bbm", "f# minor")
    pub fn parse(raw: &str) -> Result<Self, TheoryError> {
        parse_key(raw)
    }

    /// Spelled root name, exactly as the key signature writes it
    pub fn root(&self) -> &'static str {
        self.root
    }

    /// Root pitch class
    pub fn root_class(&self) -> PitchClass {
        self.root_class
    }

    /// Mode
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode)
    }
}

/// Mode markers and the whitespace around them. Longest alternatives first.
fn mode_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*(?:minor|major|min|maj|m)\s*").expect("mode marker pattern is valid")
    })
}

/// Note letter, optional accidental, optional minor suffix, nothing else.
fn compact_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Ga-g])([#b]?)(m?)$").expect("compact key pattern is valid")
    })
}

fn detect_mode(trimmed: &str) -> Mode {
    let lower = trimmed.to_lowercase();
    if lower.contains("min") || trimmed.ends_with('m') {
        Mode::Minor
    } else {
        Mode::Major
    }
}

/// Uppercase the note letter, keep the accidental as written
fn normalize_root(root: &str) -> String {
    let mut chars = root.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a free-form key string.
///
/// Fails with [`TheoryError::InvalidKeyFormat`] when no root can be
/// isolated and [`TheoryError::InvalidNote`] when the root is not a note.
pub fn parse_key(raw: &str) -> Result<Key, TheoryError> {
    let trimmed = raw.trim();
    let mut mode = detect_mode(trimmed);

    let stripped = mode_marker_re().replace_all(trimmed, "");
    let mut root = stripped.trim().to_string();

    if root.is_empty() {
        let caps = compact_key_re()
            .captures(trimmed)
            .ok_or_else(|| TheoryError::InvalidKeyFormat(raw.to_string()))?;
        root = format!("{}{}", &caps[1], &caps[2]);
        mode = if caps[3].is_empty() {
            Mode::Major
        } else {
            Mode::Minor
        };
    }

    let root = normalize_root(&root);
    let key = Key::new(&root, mode)?;
    debug!(input = raw, key = %key, "parsed key");
    Ok(key)
}
