//! Spell palette: cooldown and cast-time gating
//!
//! The palette never spawns anything. It only tracks timers so the view can
//! decide whether to launch a projectile:
//! - each item has its own cooldown
//! - one casting timer is shared by the whole palette, so a cast in flight
//!   blocks every slot until it runs out
//!
//! All timers are milliseconds and latch at zero.

use serde::{Deserialize, Serialize};

use super::attribute::SpellAttribute;
use super::projectile::Projectile;
use super::spell_book::{SpellBook, SpellId};
use crate::consts::MS_PER_SECOND;

/// Casting state as seen from the active slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastState {
    /// Cast requests succeed
    Idle,
    /// The active item has not cooled down yet
    OnCooldown,
    /// A cast is in flight; nothing can be cast until it finishes
    Casting,
}

/// One slot of the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    spell: SpellId,
    /// Milliseconds until the item can be used again
    cooldown: f64,
}

impl PaletteItem {
    pub fn new(spell: SpellId) -> Self {
        Self {
            spell,
            cooldown: 0.0,
        }
    }

    pub fn get_spell(&self) -> SpellId {
        self.spell
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown
    }

    pub fn can_use(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Start the cooldown from the spell's current COOLDOWN attribute
    pub fn reset_cooldown(&mut self, book: &SpellBook) {
        let cooldown = book.get(self.spell).get_attribute(SpellAttribute::Cooldown);
        self.cooldown = cooldown * MS_PER_SECOND;
    }

    /// Count the cooldown down by `dt_ms`, clamping at zero
    pub fn tick(&mut self, dt_ms: f64) {
        self.cooldown = (self.cooldown - dt_ms).max(0.0);
    }

    /// Remaining cooldown as a fraction of the full cooldown (0 = ready)
    pub fn cooldown_fraction(&self, book: &SpellBook) -> f64 {
        let full = book.get(self.spell).get_attribute(SpellAttribute::Cooldown) * MS_PER_SECOND;
        if full <= 0.0 {
            0.0
        } else {
            (self.cooldown / full).clamp(0.0, 1.0)
        }
    }
}

/// Reasons a stored palette cannot be loaded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette must contain at least one item")]
    Empty,
    #[error("active slot {index} out of range (palette has {len})")]
    ActiveOutOfRange { index: usize, len: usize },
    #[error("timer must be finite and non-negative, got {0}")]
    InvalidTimer(f64),
}

/// Serialized form of [`Palette`], checked before use
#[derive(Deserialize)]
struct PaletteData {
    items: Vec<PaletteItem>,
    active: usize,
    casting_time: f64,
}

fn valid_timer(ms: f64) -> bool {
    ms.is_finite() && ms >= 0.0
}

impl TryFrom<PaletteData> for Palette {
    type Error = PaletteError;

    fn try_from(data: PaletteData) -> Result<Self, Self::Error> {
        if data.items.is_empty() {
            return Err(PaletteError::Empty);
        }
        if data.active >= data.items.len() {
            return Err(PaletteError::ActiveOutOfRange {
                index: data.active,
                len: data.items.len(),
            });
        }
        let timers = data.items.iter().map(|item| item.cooldown);
        if let Some(bad) = std::iter::once(data.casting_time)
            .chain(timers)
            .find(|ms| !valid_timer(*ms))
        {
            return Err(PaletteError::InvalidTimer(bad));
        }
        Ok(Self {
            items: data.items,
            active: data.active,
            casting_time: data.casting_time,
        })
    }
}

/// The equipped subset of a character's spell book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaletteData")]
pub struct Palette {
    items: Vec<PaletteItem>,
    active: usize,
    /// Shared cast timer in milliseconds
    casting_time: f64,
}

impl Palette {
    /// Palette with one item per spell id, first slot active
    ///
    /// Panics if `spells` is empty.
    pub fn new(spells: impl IntoIterator<Item = SpellId>) -> Self {
        let items: Vec<PaletteItem> = spells.into_iter().map(PaletteItem::new).collect();
        assert!(!items.is_empty(), "palette needs at least one item");
        Self {
            items,
            active: 0,
            casting_time: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    pub fn get_active_item_index(&self) -> usize {
        self.active
    }

    pub fn get_active_item(&self) -> &PaletteItem {
        &self.items[self.active]
    }

    pub fn active_spell_id(&self) -> SpellId {
        self.get_active_item().get_spell()
    }

    /// Projectile behind the active slot
    pub fn active_spell<'a>(&self, book: &'a SpellBook) -> &'a Projectile {
        book.get(self.active_spell_id())
    }

    /// Make `index` the active slot
    ///
    /// Switching does not touch any timer; a cast in flight keeps blocking.
    /// Panics if `index` is out of range; callers validate first.
    pub fn set_active_palette_item(&mut self, index: usize) {
        assert!(
            index < self.items.len(),
            "palette index {index} out of range (len {})",
            self.items.len()
        );
        self.active = index;
    }

    pub fn cast_state(&self) -> CastState {
        if self.casting_time > 0.0 {
            CastState::Casting
        } else if !self.get_active_item().can_use() {
            CastState::OnCooldown
        } else {
            CastState::Idle
        }
    }

    pub fn can_cast_active_spell(&self) -> bool {
        self.get_active_item().can_use() && self.casting_time <= 0.0
    }

    /// Try to cast the active spell
    ///
    /// On success the active item's cooldown and the shared cast timer are
    /// both started from the spell's current attributes.
    pub fn cast_active_spell(&mut self, book: &SpellBook) -> bool {
        if !self.can_cast_active_spell() {
            log::trace!("Cast rejected on slot {}: {:?}", self.active, self.cast_state());
            return false;
        }
        let cast_time = self.active_spell(book).get_attribute(SpellAttribute::CastTime);
        self.items[self.active].reset_cooldown(book);
        self.casting_time = cast_time * MS_PER_SECOND;
        log::debug!(
            "Cast slot {} ({}), casting for {:.0} ms",
            self.active,
            self.active_spell(book).element(),
            self.casting_time
        );
        true
    }

    /// Count down every item's cooldown
    pub fn update_cooldowns(&mut self, dt_ms: f64) {
        for item in &mut self.items {
            item.tick(dt_ms);
        }
    }

    /// Count down the shared cast timer, clamping at zero
    pub fn update_casting_time(&mut self, dt_ms: f64) {
        self.casting_time = (self.casting_time - dt_ms).max(0.0);
    }

    pub fn get_remaining_casting_time(&self) -> f64 {
        self.casting_time
    }

    /// Remaining cast time over the active spell's full cast time
    ///
    /// For a charge-up bar. Zero when nothing is being cast.
    pub fn casting_progress(&self, book: &SpellBook) -> f64 {
        let full = self.active_spell(book).get_attribute(SpellAttribute::CastTime) * MS_PER_SECOND;
        if self.casting_time <= 0.0 || full <= 0.0 {
            0.0
        } else {
            (self.casting_time / full).clamp(0.0, 1.0)
        }
    }
}
