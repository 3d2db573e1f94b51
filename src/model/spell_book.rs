//! Spell book arena
//!
//! Projectiles live here exactly once. Anything else that refers to a spell
//! (palette items in particular) holds a [`SpellId`], so progression earned
//! through the palette is the same progression the book shows.

use serde::{Deserialize, Serialize};

use super::element::Element;
use super::projectile::Projectile;

/// Stable handle to a projectile in a [`SpellBook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpellId(usize);

impl SpellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Every projectile a character knows
///
/// Append-only, so ids stay valid for the lifetime of the book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellBook {
    spells: Vec<Projectile>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self { spells: Vec::new() }
    }

    /// Book with one fresh projectile per element
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            spells: elements.into_iter().map(Projectile::new).collect(),
        }
    }

    /// Add a projectile and return its id
    pub fn push(&mut self, spell: Projectile) -> SpellId {
        let id = SpellId(self.spells.len());
        self.spells.push(spell);
        id
    }

    /// Id of the spell at `index`, if present
    pub fn id_at(&self, index: usize) -> Option<SpellId> {
        (index < self.spells.len()).then_some(SpellId(index))
    }

    pub fn contains(&self, id: SpellId) -> bool {
        id.0 < self.spells.len()
    }

    /// Panics if `id` did not come from this book.
    pub fn get(&self, id: SpellId) -> &Projectile {
        &self.spells[id.0]
    }

    /// Panics if `id` did not come from this book.
    pub fn get_mut(&mut self, id: SpellId) -> &mut Projectile {
        &mut self.spells[id.0]
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpellId, &Projectile)> {
        self.spells.iter().enumerate().map(|(i, p)| (SpellId(i), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpellAttribute;

    #[test]
    fn test_push_returns_sequential_ids() {
        let mut book = SpellBook::new();
        let a = book.push(Projectile::new(Element::Fire));
        let b = book.push(Projectile::new(Element::Air));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(book.get(b).element(), Element::Air);
        assert!(book.contains(a));
    }

    #[test]
    fn test_id_at_bounds() {
        let book = SpellBook::from_elements([Element::Fire, Element::Water]);
        assert_eq!(book.id_at(1).map(SpellId::index), Some(1));
        assert_eq!(book.id_at(2), None);
    }

    #[test]
    fn test_mutation_through_id_is_shared() {
        let mut book = SpellBook::from_elements([Element::Earth]);
        let id = book.id_at(0).unwrap();
        book.get_mut(id).register_hit();
        assert_eq!(book.get(id).get_tracking(SpellAttribute::Damage).events(), 1);
    }

    #[test]
    #[should_panic]
    fn test_foreign_id_panics() {
        let mut big = SpellBook::from_elements([Element::Fire, Element::Water]);
        let small = SpellBook::from_elements([Element::Fire]);
        let id = big.push(Projectile::default());
        let _ = small.get(id);
    }
}
