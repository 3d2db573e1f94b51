//! Spell attribute kinds and their constant data
//!
//! Each attribute carries a base magnitude plus the default profile a
//! [`AttributeTracking`](super::AttributeTracking) uses for it. Units matter:
//! - DAMAGE: hit points
//! - CRIT_CHANCE / CRIT_DAMAGE: unitless ratios (e.g. 0.05)
//! - COOLDOWN / CAST_TIME: seconds (the palette converts to milliseconds)
//! - DISTANCE / RADIUS: meters
//! - SPEED: meters per second
//! - COUNT: number of projectile instances

use serde::{Deserialize, Serialize};

/// A numeric attribute of a spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellAttribute {
    Damage,
    CritChance,
    CritDamage,
    Cooldown,
    CastTime,
    Distance,
    Radius,
    Speed,
    Count,
}

/// Growth curve applied to an attribute's base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    /// `log2(level) * base + base`; doubling the level adds one `base`
    #[default]
    Logarithmic,
    /// `base / level`; for attributes that shrink as they improve
    Inverse,
}

/// Rounding applied after scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostProcess {
    #[default]
    Identity,
    Ceil,
    Floor,
}

impl PostProcess {
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            PostProcess::Identity => value,
            PostProcess::Ceil => value.ceil(),
            PostProcess::Floor => value.floor(),
        }
    }
}

/// Display unit of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Meters,
    MetersPerSecond,
    Seconds,
    HitPoints,
    Ratio,
    Count,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::MetersPerSecond => "m/s",
            Unit::Seconds => "s",
            Unit::HitPoints => "hp",
            Unit::Ratio => "%",
            Unit::Count => "",
        }
    }
}

impl SpellAttribute {
    /// Number of attribute kinds
    pub const LEN: usize = 9;

    /// Every attribute, in table order (matches [`SpellAttribute::index`])
    pub const ALL: [SpellAttribute; Self::LEN] = [
        SpellAttribute::Damage,
        SpellAttribute::CritChance,
        SpellAttribute::CritDamage,
        SpellAttribute::Cooldown,
        SpellAttribute::CastTime,
        SpellAttribute::Distance,
        SpellAttribute::Radius,
        SpellAttribute::Speed,
        SpellAttribute::Count,
    ];

    /// Position of this attribute in [`SpellAttribute::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Base magnitude at level 1
    pub const fn base_value(self) -> f64 {
        match self {
            SpellAttribute::Damage => 1.0,
            SpellAttribute::CritChance => 0.05,
            SpellAttribute::CritDamage => 0.25,
            SpellAttribute::Cooldown => 2.0,
            SpellAttribute::CastTime => 2.0,
            SpellAttribute::Distance => 10.0,
            SpellAttribute::Radius => 0.1,
            SpellAttribute::Speed => 5.0,
            SpellAttribute::Count => 1.0,
        }
    }

    pub const fn default_scale(self) -> Scale {
        match self {
            SpellAttribute::Cooldown | SpellAttribute::CastTime => Scale::Inverse,
            _ => Scale::Logarithmic,
        }
    }

    pub const fn default_post(self) -> PostProcess {
        match self {
            // Partial hit points and partial projectiles are meaningless
            SpellAttribute::Damage => PostProcess::Ceil,
            SpellAttribute::Count => PostProcess::Floor,
            _ => PostProcess::Identity,
        }
    }

    pub const fn default_unit(self) -> Unit {
        match self {
            SpellAttribute::Damage => Unit::HitPoints,
            SpellAttribute::CritChance | SpellAttribute::CritDamage => Unit::Ratio,
            SpellAttribute::Cooldown | SpellAttribute::CastTime => Unit::Seconds,
            SpellAttribute::Distance | SpellAttribute::Radius => Unit::Meters,
            SpellAttribute::Speed => Unit::MetersPerSecond,
            SpellAttribute::Count => Unit::Count,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpellAttribute::Damage => "Damage",
            SpellAttribute::CritChance => "Crit Chance",
            SpellAttribute::CritDamage => "Crit Damage",
            SpellAttribute::Cooldown => "Cooldown",
            SpellAttribute::CastTime => "Cast Time",
            SpellAttribute::Distance => "Distance",
            SpellAttribute::Radius => "Radius",
            SpellAttribute::Speed => "Speed",
            SpellAttribute::Count => "Count",
        }
    }
}

impl std::fmt::Display for SpellAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
