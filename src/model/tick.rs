//! Per-frame update
//!
//! Advances a character by one frame in the required order: timers first,
//! then slot selection, then the cast attempt. This way a cast that became
//! legal during the frame is seen in the same frame.

use super::character::Character;
use super::palette::CastState;
use super::spell_book::SpellId;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct CastInput {
    /// Palette slot to make active
    pub select: Option<usize>,
    /// Attempt to cast the active spell
    pub cast: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastEvent {
    /// Slot selection was applied
    Selected { slot: usize },
    /// Cast accepted; the view should launch `spell`
    Cast { slot: usize, spell: SpellId },
    /// Cast refused in the given state
    Rejected { slot: usize, state: CastState },
}

/// Advance the character by `dt_ms` and apply the frame's input
pub fn tick(character: &mut Character, input: &CastInput, dt_ms: f64) -> Vec<CastEvent> {
    let mut events = Vec::new();

    character.update(dt_ms);

    if let Some(slot) = input.select {
        if character.select_palette_item(slot) {
            events.push(CastEvent::Selected { slot });
        }
    }

    if input.cast {
        let palette = character.palette();
        let slot = palette.get_active_item_index();
        let state = palette.cast_state();
        let spell = palette.active_spell_id();
        if character.cast() {
            events.push(CastEvent::Cast { slot, spell });
        } else {
            events.push(CastEvent::Rejected { slot, state });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_FRAME_MS;
    use crate::model::{Element, SpellAttribute};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn cast() -> CastInput {
        CastInput {
            cast: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_cast_then_locked() {
        let mut character = Character::new_character();
        let events = tick(&mut character, &cast(), DEFAULT_FRAME_MS);
        assert!(matches!(events.as_slice(), [CastEvent::Cast { slot: 0, .. }]));

        let events = tick(&mut character, &cast(), DEFAULT_FRAME_MS);
        assert_eq!(
            events,
            vec![CastEvent::Rejected {
                slot: 0,
                state: CastState::Casting
            }]
        );
    }

    #[test]
    fn test_tick_select_mid_cast_still_locked() {
        let mut character = Character::new_character();
        tick(&mut character, &cast(), DEFAULT_FRAME_MS);

        let input = CastInput {
            select: Some(2),
            cast: true,
        };
        let events = tick(&mut character, &input, DEFAULT_FRAME_MS);
        assert_eq!(
            events,
            vec![
                CastEvent::Selected { slot: 2 },
                CastEvent::Rejected {
                    slot: 2,
                    state: CastState::Casting
                },
            ]
        );
    }

    #[test]
    fn test_tick_out_of_range_select_ignored() {
        let mut character = Character::new_character();
        let input = CastInput {
            select: Some(9),
            cast: false,
        };
        assert!(tick(&mut character, &input, DEFAULT_FRAME_MS).is_empty());
        assert_eq!(character.palette().get_active_item_index(), 0);
    }

    #[test]
    fn test_cast_allowed_on_the_frame_timers_expire() {
        let mut character = Character::new_character();
        tick(&mut character, &cast(), 0.0);
        // Cooldown and cast time are both 2000 ms at level 1
        tick(&mut character, &CastInput::default(), 1000.0);
        let events = tick(&mut character, &cast(), 1000.0);
        assert!(matches!(events.as_slice(), [CastEvent::Cast { slot: 0, .. }]));
    }

    #[test]
    fn test_session_rotating_slots() {
        let mut character = Character::new_character();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut casts = 0;
        let mut slot = 0;

        // One minute at 60 fps, rotating slots after every successful cast
        for _ in 0..3600 {
            let input = CastInput {
                select: Some(slot),
                cast: true,
            };
            for event in tick(&mut character, &input, DEFAULT_FRAME_MS) {
                if let CastEvent::Cast { spell, .. } = event {
                    casts += 1;
                    character.register_hit(spell, &mut rng);
                    slot = (slot + 1) % character.palette().len();
                }
            }
        }

        // Casting is bound by the shared 2 s cast timer
        assert!((29..=30).contains(&casts), "casts = {casts}");
        let hits: u64 = character
            .spell_book()
            .iter()
            .map(|(_, p)| p.get_tracking(SpellAttribute::Damage).events())
            .sum();
        assert_eq!(hits, casts);

        // Unequipped spells never progressed
        for (_, spell) in character.spell_book().iter() {
            if matches!(spell.element(), Element::Light | Element::Dark) {
                assert_eq!(spell.get_tracking(SpellAttribute::Damage).events(), 0);
            }
        }
    }
}
