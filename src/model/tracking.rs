//! Per-attribute leveling counters
//!
//! Levels follow a doubling schedule on increments of ten events:
//! - Level 1 -> 2: 10 events
//! - Level 2 -> 3: 20 more (30 total)
//! - Level 3 -> 4: 40 more (70 total)
//!
//! Cumulative events to reach level `n` is `(2^n - 2) * 5`, so the level for a
//! given event count is `floor(log2(events / 5 + 2))`.

use serde::{Deserialize, Serialize};

use super::attribute::{PostProcess, Scale, SpellAttribute, Unit};
use crate::consts::EVENTS_PER_STEP;

/// Level reached after `events` qualifying events
#[inline]
pub fn level_for_events(events: u64) -> u32 {
    (events / EVENTS_PER_STEP + 2).ilog2()
}

/// Cumulative events needed to reach `level` (saturating)
pub fn events_for_level(level: u32) -> u64 {
    if level >= 126 {
        return u64::MAX;
    }
    let steps = (1u128 << level) - 2;
    u64::try_from(steps * EVENTS_PER_STEP as u128).unwrap_or(u64::MAX)
}

/// Leveling state for one attribute of one spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTracking {
    attribute: SpellAttribute,
    level: u32,
    events: u64,
    scale: Scale,
    post: PostProcess,
    unit: Unit,
}

impl AttributeTracking {
    /// Fresh tracker at level 1 using the attribute's default profile
    pub fn new(attribute: SpellAttribute) -> Self {
        Self {
            attribute,
            level: 1,
            events: 0,
            scale: attribute.default_scale(),
            post: attribute.default_post(),
            unit: attribute.default_unit(),
        }
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_post(mut self, post: PostProcess) -> Self {
        self.post = post;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn attribute(&self) -> SpellAttribute {
        self.attribute
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Currently applicable magnitude of the attribute
    ///
    /// Pure function of the level. Level is never below 1, so `log2` is
    /// always defined.
    pub fn effective_value(&self) -> f64 {
        let base = self.attribute.base_value();
        let level = self.level as f64;
        let value = match self.scale {
            Scale::Logarithmic => level.log2() * base + base,
            Scale::Inverse => base / level,
        };
        self.post.apply(value)
    }

    /// Record one qualifying event and recompute the level
    pub fn trigger_event(&mut self) {
        self.events = self.events.saturating_add(1);
        let level = level_for_events(self.events);
        if level != self.level {
            log::debug!(
                "{} reached level {} after {} events",
                self.attribute,
                level,
                self.events
            );
        }
        self.level = level;
    }

    /// Events still needed to reach the next level
    pub fn events_to_next_level(&self) -> u64 {
        events_for_level(self.level + 1).saturating_sub(self.events)
    }
}

impl std::fmt::Display for AttributeTracking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.effective_value();
        write!(f, "{}: ", self.attribute)?;
        if self.unit.symbol().is_empty() {
            write!(f, "{value}")?;
        } else {
            write!(f, "{value} {}", self.unit.symbol())?;
        }
        write!(f, " ({} events left)", self.events_to_next_level())
    }
}
