//! Session settings
//!
//! Describes the starting loadout and how the harness drives time. Stored as
//! JSON; every field has a default so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FRAME_MS, MAX_HARNESS_FRAMES, PALETTE_SIZE};
use crate::model::Element;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spell book must contain at least one spell")]
    EmptySpellBook,
    #[error("palette must contain at least one slot")]
    EmptyPalette,
    #[error("palette has {len} slots, at most {max} allowed")]
    PaletteTooLarge { len: usize, max: usize },
    #[error("palette slot {slot} refers to spell {index}, which is not in the spell book")]
    UnknownSpell { slot: usize, index: usize },
    #[error("frame time must be positive and finite, got {0}")]
    InvalidFrameTime(f64),
    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("session would run {frames} frames, at most {max} allowed")]
    TooManyFrames { frames: f64, max: u64 },
}

/// Starting loadout and harness timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for crit rolls
    pub seed: u64,
    /// Elements of the spells the character starts with, in book order
    pub spell_book: Vec<Element>,
    /// Spell book indices equipped in the palette, in slot order
    pub palette: Vec<usize>,
    /// Simulated frame length (ms)
    pub frame_ms: f64,
    /// Total simulated time for the harness (ms)
    pub duration_ms: f64,
    /// Attempt a cast every frame rather than only after the previous one
    /// finished
    pub cast_every_frame: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            spell_book: vec![
                Element::Fire,
                Element::Water,
                Element::Earth,
                Element::Air,
                Element::Light,
                Element::Dark,
            ],
            palette: (0..PALETTE_SIZE).collect(),
            frame_ms: DEFAULT_FRAME_MS,
            duration_ms: 60_000.0,
            cast_every_frame: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the loadout describes a playable character
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spell_book.is_empty() {
            return Err(SettingsError::EmptySpellBook);
        }
        if self.palette.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }
        if self.palette.len() > PALETTE_SIZE {
            return Err(SettingsError::PaletteTooLarge {
                len: self.palette.len(),
                max: PALETTE_SIZE,
            });
        }
        if let Some((slot, &index)) = self
            .palette
            .iter()
            .enumerate()
            .find(|(_, i)| **i >= self.spell_book.len())
        {
            return Err(SettingsError::UnknownSpell { slot, index });
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(SettingsError::InvalidFrameTime(self.frame_ms));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) {
            return Err(SettingsError::InvalidDuration(self.duration_ms));
        }
        let frames = (self.duration_ms / self.frame_ms).ceil();
        if frames > MAX_HARNESS_FRAMES as f64 {
            return Err(SettingsError::TooManyFrames {
                frames,
                max: MAX_HARNESS_FRAMES,
            });
        }
        Ok(())
    }

    /// Number of frames the harness runs for
    pub fn frame_count(&self) -> u64 {
        (self.duration_ms / self.frame_ms).ceil().max(0.0) as u64
    }
}
