//! Spell elements and their display colors

use serde::{Deserialize, Serialize};

/// The elemental class of a spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
    #[default]
    None,
}

impl Element {
    /// Every element, in declaration order
    pub const ALL: [Element; 7] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Light,
        Element::Dark,
        Element::None,
    ];

    /// Display color as (r, g, b), used by the view for tinting
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            Element::Fire => (255, 0, 0),
            Element::Water => (0, 0, 255),
            Element::Earth => (255, 255, 0),
            Element::Air => (0, 255, 255),
            Element::Light => (255, 255, 255),
            Element::Dark => (255, 0, 255),
            Element::None => (0, 255, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Light => "Light",
            Element::Dark => "Dark",
            Element::None => "None",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Element::default(), Element::None);
        assert_eq!(Element::None.color(), (0, 255, 0));
    }

    #[test]
    fn test_colors_are_distinct() {
        for (i, a) in Element::ALL.iter().enumerate() {
            for b in &Element::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a} and {b} share a color");
            }
        }
    }

    #[test]
    fn test_from_str_round_trips_names() {
        assert_eq!(Element::from_str("fire"), Some(Element::Fire));
        assert_eq!(Element::from_str("DARK"), Some(Element::Dark));
        assert_eq!(Element::from_str("plasma"), None);
    }
}
