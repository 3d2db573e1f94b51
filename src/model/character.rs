//! The player character's spell state

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::palette::Palette;
use super::projectile::{Hit, Projectile};
use super::spell_book::{SpellBook, SpellId};
use crate::consts::PALETTE_SIZE;
use crate::settings::{Settings, SettingsError};

/// A palette slot that points outside the spell book
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("palette slot {slot} refers to spell {}, which is not in the spell book", .spell.index())]
pub struct MissingSpell {
    pub slot: usize,
    pub spell: SpellId,
}

/// Serialized form of [`Character`], checked before use
#[derive(Deserialize)]
struct CharacterData {
    spell_book: SpellBook,
    palette: Palette,
}

impl TryFrom<CharacterData> for Character {
    type Error = MissingSpell;

    fn try_from(data: CharacterData) -> Result<Self, Self::Error> {
        Self::try_new(data.spell_book, data.palette)
    }
}

/// Spell book plus the palette equipped from it
///
/// Palette items refer to book entries by id, so every projectile has exactly
/// one home and leveling is visible from both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CharacterData")]
pub struct Character {
    spell_book: SpellBook,
    palette: Palette,
}

impl Character {
    /// Pair a book with a palette built from it
    ///
    /// Panics if the palette refers to a spell the book does not contain.
    pub fn new(spell_book: SpellBook, palette: Palette) -> Self {
        match Self::try_new(spell_book, palette) {
            Ok(character) => character,
            Err(e) => panic!("{e}"),
        }
    }

    /// Pair a book with a palette, checking every slot against the book
    pub fn try_new(spell_book: SpellBook, palette: Palette) -> Result<Self, MissingSpell> {
        if let Some((slot, item)) = palette
            .items()
            .iter()
            .enumerate()
            .find(|(_, item)| !spell_book.contains(item.get_spell()))
        {
            return Err(MissingSpell {
                slot,
                spell: item.get_spell(),
            });
        }
        Ok(Self { spell_book, palette })
    }

    /// Default character for new players
    ///
    /// Knows one spell per element (except NONE) and equips the first four.
    pub fn new_character() -> Self {
        let spell_book = SpellBook::from_elements([
            Element::Fire,
            Element::Water,
            Element::Earth,
            Element::Air,
            Element::Light,
            Element::Dark,
        ]);
        let palette = Palette::new(spell_book.iter().map(|(id, _)| id).take(PALETTE_SIZE));
        Self::new(spell_book, palette)
    }

    /// Build a character from a validated loadout
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let spell_book = SpellBook::from_elements(settings.spell_book.iter().copied());
        let ids = settings
            .palette
            .iter()
            .enumerate()
            .map(|(slot, &index)| {
                spell_book
                    .id_at(index)
                    .ok_or(SettingsError::UnknownSpell { slot, index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "Character created: {} spells known, {} equipped",
            spell_book.len(),
            ids.len()
        );
        Ok(Self::new(spell_book, Palette::new(ids)))
    }

    pub fn spell_book(&self) -> &SpellBook {
        &self.spell_book
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Projectile in the active palette slot
    pub fn active_spell(&self) -> &Projectile {
        self.palette.active_spell(&self.spell_book)
    }

    /// Try to cast the active spell; true if the view should launch it
    pub fn cast(&mut self) -> bool {
        self.palette.cast_active_spell(&self.spell_book)
    }

    /// Select a palette slot
    ///
    /// Returns false (and leaves the selection alone) if `index` is not a
    /// slot. Selecting never cancels or bypasses a cast in flight.
    pub fn select_palette_item(&mut self, index: usize) -> bool {
        if index >= self.palette.len() {
            log::warn!(
                "Ignoring selection of palette slot {} (palette has {})",
                index,
                self.palette.len()
            );
            return false;
        }
        self.palette.set_active_palette_item(index);
        true
    }

    /// Advance palette timers by one frame
    ///
    /// Must run before any cast query in the same frame.
    pub fn update(&mut self, dt_ms: f64) {
        self.palette.update_cooldowns(dt_ms);
        self.palette.update_casting_time(dt_ms);
    }

    /// Apply a landed hit from `spell` and roll for a critical
    ///
    /// Panics if `spell` is not in this character's book.
    pub fn register_hit<R: Rng + ?Sized>(&mut self, spell: SpellId, rng: &mut R) -> Hit {
        self.spell_book.get_mut(spell).resolve_hit(rng)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new_character()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpellAttribute;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_character_loadout() {
        let character = Character::new_character();
        assert_eq!(character.spell_book().len(), 6);
        assert_eq!(character.palette().len(), PALETTE_SIZE);
        let equipped: Vec<Element> = character
            .palette()
            .items()
            .iter()
            .map(|item| character.spell_book().get(item.get_spell()).element())
            .collect();
        assert_eq!(
            equipped,
            vec![Element::Fire, Element::Water, Element::Earth, Element::Air]
        );
    }

    #[test]
    fn test_cast_delegates_to_palette() {
        let mut character = Character::new_character();
        assert!(character.cast());
        assert!(!character.cast());
        assert_eq!(character.palette().get_remaining_casting_time(), 2000.0);
    }

    #[test]
    fn test_select_palette_item_bounds() {
        let mut character = Character::new_character();
        assert!(character.select_palette_item(3));
        assert_eq!(character.active_spell().element(), Element::Air);
        assert!(!character.select_palette_item(4));
        assert_eq!(character.palette().get_active_item_index(), 3);
    }

    #[test]
    fn test_hits_are_shared_with_spell_book() {
        let mut character = Character::new_character();
        let mut rng = Pcg32::seed_from_u64(1);
        let id = character.palette().active_spell_id();
        for _ in 0..10 {
            character.register_hit(id, &mut rng);
        }
        let tracking = character.spell_book().get(id).get_tracking(SpellAttribute::Damage);
        assert_eq!(tracking.events(), 10);
        assert_eq!(tracking.level(), 2);
        assert_eq!(character.active_spell().get_attribute(SpellAttribute::Damage), 2.0);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            spell_book: vec![Element::Light, Element::Dark],
            palette: vec![1, 0],
            ..Default::default()
        };
        let character = Character::from_settings(&settings).unwrap();
        assert_eq!(character.active_spell().element(), Element::Dark);
        assert_eq!(character.palette().len(), 2);
    }

    #[test]
    fn test_from_settings_rejects_unknown_spell() {
        let settings = Settings {
            spell_book: vec![Element::Light],
            palette: vec![0, 1],
            ..Default::default()
        };
        assert!(matches!(
            Character::from_settings(&settings),
            Err(SettingsError::UnknownSpell { slot: 1, index: 1 })
        ));
    }

    #[test]
    #[should_panic]
    fn test_palette_outside_book_panics() {
        let mut other = SpellBook::new();
        other.push(Projectile::default());
        let id = other.push(Projectile::default());
        let book = SpellBook::from_elements([Element::Fire]);
        Character::new(book, Palette::new([id]));
    }

    #[test]
    fn test_try_new_reports_missing_spell() {
        let mut other = SpellBook::new();
        other.push(Projectile::default());
        let id = other.push(Projectile::default());
        let book = SpellBook::from_elements([Element::Fire]);
        let err = Character::try_new(book, Palette::new([id])).unwrap_err();
        assert_eq!(err, MissingSpell { slot: 0, spell: id });
    }

    #[test]
    fn test_load_round_trip_keeps_progress() {
        let mut character = Character::new_character();
        let mut rng = Pcg32::seed_from_u64(3);
        let id = character.palette().active_spell_id();
        character.register_hit(id, &mut rng);
        character.select_palette_item(2);
        assert!(character.cast());

        let json = serde_json::to_string(&character).unwrap();
        let mut loaded: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, character);
        assert!(!loaded.cast());
    }

    /// Saved default character with one field of the JSON replaced
    fn edited_save(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut value = serde_json::to_value(Character::new_character()).unwrap();
        edit(&mut value);
        value.to_string()
    }

    #[test]
    fn test_load_rejects_active_slot_past_palette() {
        let json = edited_save(|v| v["palette"]["active"] = 7.into());
        assert!(serde_json::from_str::<Character>(&json).is_err());
    }

    #[test]
    fn test_load_rejects_empty_palette() {
        let json = edited_save(|v| v["palette"]["items"] = serde_json::json!([]));
        assert!(serde_json::from_str::<Character>(&json).is_err());
    }

    #[test]
    fn test_load_rejects_palette_spell_missing_from_book() {
        let json = edited_save(|v| v["palette"]["items"][1]["spell"] = 40.into());
        let err = serde_json::from_str::<Character>(&json).unwrap_err();
        assert!(err.to_string().contains("slot 1 refers to spell 40"), "{err}");
    }
}
