// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for chordprog.
//!
//! Settings are read from a YAML file. Every field has a default, so an
//! empty file (or no file at all) gives whole-note chords at velocity 100.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::midi::{RenderOptions, DEFAULT_PPQN, DEFAULT_VELOCITY, MAX_DELTA_TICKS, WHOLE_NOTE_BEATS};
use crate::music::progression::{self, DEFAULT_CHORDS, MAX_CHORDS};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Request defaults for the CLI
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// MIDI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self =
            serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        progression::validate_chord_count(self.defaults.num_chords)
            .context("Invalid defaults.num_chords")?;
        self.output.validate()
    }
}

/// Request defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultsConfig {
    /// Key used when none is given on the command line
    #[serde(default = "default_key")]
    pub key: String,
    /// Chord count used when none is given
    #[serde(default = "default_num_chords")]
    pub num_chords: i32,
}

fn default_key() -> String {
    "C major".to_string()
}
fn default_num_chords() -> i32 {
    DEFAULT_CHORDS
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            num_chords: default_num_chords(),
        }
    }
}

/// MIDI output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Ticks per quarter note
    #[serde(default = "default_ppqn")]
    pub ppqn: u16,
    /// Length of each chord in beats
    #[serde(default = "default_beats_per_chord")]
    pub beats_per_chord: u32,
    /// Note velocity (1-127)
    #[serde(default = "default_velocity")]
    pub velocity: u8,
    /// MIDI channel (1-16)
    #[serde(default = "default_channel")]
    pub channel: u8,
    /// Track name written to the file
    #[serde(default = "default_track_name")]
    pub track_name: String,
    /// Optional General MIDI program (0-127)
    #[serde(default)]
    pub program: Option<u8>,
}

fn default_ppqn() -> u16 {
    DEFAULT_PPQN
}
fn default_beats_per_chord() -> u32 {
    WHOLE_NOTE_BEATS
}
fn default_velocity() -> u8 {
    DEFAULT_VELOCITY
}
fn default_channel() -> u8 {
    1
}
fn default_track_name() -> String {
    "Chord Progression".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ppqn: default_ppqn(),
            beats_per_chord: default_beats_per_chord(),
            velocity: default_velocity(),
            channel: default_channel(),
            track_name: default_track_name(),
            program: None,
        }
    }
}

impl OutputConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.ppqn == 0 {
            bail!("output.ppqn must be at least 1");
        }
        if self.beats_per_chord == 0 {
            bail!("output.beats_per_chord must be at least 1");
        }
        // The longest progression must still fit one MIDI delta time
        let longest = self.ppqn as u64 * self.beats_per_chord as u64 * MAX_CHORDS as u64;
        if longest > MAX_DELTA_TICKS as u64 {
            bail!(
                "output.beats_per_chord {} at ppqn {} spans {} ticks over {} chords (limit {})",
                self.beats_per_chord,
                self.ppqn,
                longest,
                MAX_CHORDS,
                MAX_DELTA_TICKS
            );
        }
        if !(1..=127).contains(&self.velocity) {
            bail!("output.velocity must be 1-127, got {}", self.velocity);
        }
        if !(1..=16).contains(&self.channel) {
            bail!("output.channel must be 1-16, got {}", self.channel);
        }
        if let Some(program) = self.program {
            if program > 127 {
                bail!("output.program must be 0-127, got {}", program);
            }
        }
        Ok(())
    }

    /// Convert to render options (channel becomes zero-based)
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            ppqn: self.ppqn,
            beats_per_chord: self.beats_per_chord,
            velocity: self.velocity,
            channel: self.channel.saturating_sub(1),
            track_name: self.track_name.clone(),
            program: self.program,
        }
    }
}
