//! Mage Game - spell progression and casting for a 2D elemental action game
//!
//! Core modules:
//! - `model`: Spells, attribute leveling, palette cooldown/cast gating
//! - `settings`: Session loadout and harness timing

pub mod model;
pub mod settings;

pub use model::{Character, Element, Projectile, SpellAttribute};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Number of equippable palette slots
    pub const PALETTE_SIZE: usize = 4;
    /// Attribute timers are stored in seconds, palette timers in milliseconds
    pub const MS_PER_SECOND: f64 = 1000.0;
    /// Event granularity of the leveling curve (level n needs (2^n - 2) * 5 events)
    pub const EVENTS_PER_STEP: u64 = 5;
    /// Default harness frame length (60 Hz)
    pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest harness session, in frames
    pub const MAX_HARNESS_FRAMES: u64 = 10_000_000;
}
