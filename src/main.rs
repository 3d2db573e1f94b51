//! Mage Game headless harness
//!
//! Drives a character through a scripted session at a fixed frame rate:
//! rotates through palette slots, casts whenever allowed, and counts every
//! successful cast as one landed hit. Prints the resulting stat sheet.
//!
//! Usage: `mage-sim [settings.json]` (`RUST_LOG=debug` for per-cast logs)

use std::process::ExitCode;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use mage_game::model::{CastEvent, CastInput, Character, tick};
use mage_game::{Settings, SettingsError};

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            log::info!("Using default settings");
            Ok(Settings::default())
        }
    }
}

fn run(settings: &Settings) -> Result<(), SettingsError> {
    let mut character = Character::from_settings(settings)?;
    let mut rng = Pcg32::seed_from_u64(settings.seed);
    log::info!("Session seed: {}", settings.seed);

    let mut slot = 0;
    let mut casts = 0u64;
    let mut crits = 0u64;
    let mut damage = 0.0;

    for frame in 0..settings.frame_count() {
        let idle = character.palette().get_remaining_casting_time() <= 0.0;
        let cast = settings.cast_every_frame || idle;
        let input = CastInput {
            select: Some(slot),
            cast,
        };
        for event in tick(&mut character, &input, settings.frame_ms) {
            if let CastEvent::Cast { spell, .. } = event {
                let hit = character.register_hit(spell, &mut rng);
                casts += 1;
                damage += hit.damage;
                if hit.critical {
                    crits += 1;
                    log::debug!("Frame {}: critical hit for {}", frame, hit.damage);
                }
                slot = (slot + 1) % character.palette().len();
            }
        }
    }

    println!(
        "{} casts, {} crits, {} total damage over {:.1} s",
        casts,
        crits,
        damage,
        settings.duration_ms / 1000.0
    );
    for (id, spell) in character.spell_book().iter() {
        println!("\n[{}] {} spell", id.index(), spell.element());
        for tracking in spell.trackings() {
            println!("  {tracking}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Mage Game harness starting...");

    let result = load_settings().and_then(|settings| run(&settings));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
