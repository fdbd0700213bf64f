//! Carrot Hop headless runner
//!
//! Loads a level (the bundled demo, or a JSON file given as the first
//! argument), plays a scripted run through it at the fixed tick rate without
//! rendering, and logs every game event. Set `RUST_LOG=debug` for per-entity
//! detail.

use carrot_hop::consts::TICK_RATE;
use carrot_hop::sim::{GameEvent, GameState, TickInput, tick};
use carrot_hop::{LevelLayout, Tuning};

const DEMO_LEVEL: &str = include_str!("../levels/demo.json");

/// Number of ticks to simulate (20 seconds of play)
const RUN_TICKS: u64 = 20 * TICK_RATE as u64;

fn load_layout() -> Result<LevelLayout, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading level from {}", path);
            let json = std::fs::read_to_string(&path)?;
            Ok(LevelLayout::from_json(&json)?)
        }
        None => Ok(LevelLayout::from_json(DEMO_LEVEL)?),
    }
}

/// Hold right the whole run, jumping every second and whenever a wall stops us
fn scripted_input(state: &GameState, last_x: f32) -> TickInput {
    let stalled = state.player.body.grounded && state.player.body.pos.x == last_x;
    TickInput {
        left: false,
        right: true,
        jump: stalled || state.time_ticks % TICK_RATE as u64 == 0,
    }
}

fn main() {
    env_logger::init();
    log::info!("Carrot Hop (headless) starting...");

    let layout = match load_layout() {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("Could not load level: {}", e);
            std::process::exit(1);
        }
    };

    let mut state = GameState::new(layout, Tuning::default());
    let mut last_x = f32::NAN;
    let mut jumps = 0u32;
    let mut pickups = 0u32;
    let mut defeated = 0u32;

    while state.time_ticks < RUN_TICKS {
        let input = scripted_input(&state, last_x);
        last_x = state.player.body.pos.x;
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::PowerupCollected { .. } => pickups += 1,
                GameEvent::EnemyDefeated { .. } => defeated += 1,
                _ => {}
            }
            log::info!("[tick {:>5}] {:?}", state.time_ticks, event);
        }
    }

    let body = &state.player.body;
    println!("\nRun complete after {} ticks", state.time_ticks);
    println!("  position: ({:.2}, {:.2})", body.pos.x, body.pos.y);
    println!("  hearts:   {}", state.player.hearts);
    println!("  deaths:   {}", state.deaths);
    println!("  jumps:    {}", jumps);
    println!("  pickups:  {}", pickups);
    println!("  defeated: {}", defeated);
}
