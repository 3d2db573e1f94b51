//! Projectile spells
//!
//! A projectile is an element plus one leveling tracker per attribute. The
//! view reads effective values to size, place, and time the visual; landing a
//! hit is the only feedback that flows back into progression.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::attribute::SpellAttribute;
use super::element::Element;
use super::tracking::AttributeTracking;

/// Outcome of a resolved hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Damage to apply to the target (hit points)
    pub damage: f64,
    /// Whether the hit rolled a critical strike
    pub critical: bool,
}

/// A projectile-based spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    element: Element,
    /// Indexed by [`SpellAttribute::index`]
    attributes: [AttributeTracking; SpellAttribute::LEN],
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(Element::None)
    }
}

impl Projectile {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            attributes: SpellAttribute::ALL.map(AttributeTracking::new),
        }
    }

    pub fn element(&self) -> Element {
        self.element
    }

    /// Tracker for the given attribute
    #[inline]
    pub fn get_tracking(&self, attribute: SpellAttribute) -> &AttributeTracking {
        &self.attributes[attribute.index()]
    }

    #[inline]
    pub fn get_tracking_mut(&mut self, attribute: SpellAttribute) -> &mut AttributeTracking {
        &mut self.attributes[attribute.index()]
    }

    /// Effective value of the given attribute
    #[inline]
    pub fn get_attribute(&self, attribute: SpellAttribute) -> f64 {
        self.get_tracking(attribute).effective_value()
    }

    /// All trackers, in attribute table order
    pub fn trackings(&self) -> impl Iterator<Item = &AttributeTracking> {
        self.attributes.iter()
    }

    /// Record that this spell hit a target
    ///
    /// Advances the DAMAGE tracker by one event and returns the damage to
    /// apply. The caller guarantees one call per (attack, target) pair.
    pub fn register_hit(&mut self) -> f64 {
        let damage = self.get_tracking_mut(SpellAttribute::Damage);
        damage.trigger_event();
        damage.effective_value()
    }

    /// Record a hit and roll for a critical strike
    ///
    /// A critical scales damage by `1 + CRIT_DAMAGE`, rounded up.
    pub fn resolve_hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Hit {
        let damage = self.register_hit();
        let chance = self.get_attribute(SpellAttribute::CritChance).clamp(0.0, 1.0);
        let critical = rng.random::<f64>() < chance;
        let damage = if critical {
            (damage * (1.0 + self.get_attribute(SpellAttribute::CritDamage))).ceil()
        } else {
            damage
        };
        Hit { damage, critical }
    }
}
