//! Spell progression and casting model
//!
//! Pure bookkeeping, no rendering or platform dependencies:
//! - Timers advance only by the frame delta the caller supplies
//! - Randomness comes from a caller-supplied seeded RNG
//! - Projectiles live once in the spell book; everything else holds ids

pub mod attribute;
pub mod character;
pub mod element;
pub mod palette;
pub mod projectile;
pub mod spell_book;
pub mod tick;
pub mod tracking;

pub use attribute::{PostProcess, Scale, SpellAttribute, Unit};
pub use character::{Character, MissingSpell};
pub use element::Element;
pub use palette::{CastState, Palette, PaletteError, PaletteItem};
pub use projectile::{Hit, Projectile};
pub use spell_book::{SpellBook, SpellId};
pub use tick::{CastEvent, CastInput, tick};
pub use tracking::{AttributeTracking, events_for_level, level_for_events};
