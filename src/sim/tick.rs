//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Missile, PlayerState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction, unit-scaled per axis (+y is down)
    pub direction: Vec2,
    /// Fire the weapon (rising edge)
    pub fire: bool,
    /// Restart from the game-over screen (rising edge)
    pub restart: bool,
    /// Quit request; the sim ignores it, the driver ends its loop
    pub exit: bool,
    /// Show gamepad glyphs in on-screen prompts
    pub prefer_gamepad: bool,
    /// Demo mode: steering is computed from the state each tick
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the events the frontend reacts to (sound cues, run milestones).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        input.direction = autopilot_direction(state);
    }
    let input = &input;

    match state.phase {
        GamePhase::Playing => {
            advance_world(state, input, dt, &mut events);

            // Top the missile set up by at most one per tick
            if (state.missiles.len() as u32) < state.difficulty {
                spawn_missile(state);
            }
        }

        GamePhase::Fading => {
            // The wreck falls, survivors keep flying, nothing new spawns
            advance_world(state, input, dt, &mut events);

            // Controller-owned fade; entity code never touches the music
            if state.music_volume > MUSIC_FADE_STEP {
                state.music_volume -= MUSIC_FADE_STEP;
            } else {
                state.music_volume = 0.0;
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::MusicStopped);
            }
        }

        GamePhase::GameOver => {
            // Frozen except the falling wreck and leftover explosions
            state.player.advance(Vec2::ZERO, dt, &state.viewport);
            for missile in &mut state.missiles {
                missile.advance(dt);
            }
            state.missiles.retain(|m| m.is_active());

            if input.restart {
                state.restart();
                events.push(GameEvent::Restarted);
                log::info!("run restarted (high score {})", state.high_score);
            }
        }
    }

    events
}

/// Shared per-tick advancement for the live phases: backgrounds, player,
/// missiles, collisions, scoring.
fn advance_world(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let viewport = state.viewport;

    for bg in &mut state.backgrounds {
        bg.scroll(dt);
    }

    if input.fire {
        state.player.start_shooting();
    }
    state.player.advance(input.direction, dt, &viewport);

    // Sequential by design: each missile moves, then is tested against the
    // player box updated this same tick.
    let mut exits = 0u32;
    let mut player_hit = false;
    for missile in &mut state.missiles {
        if !missile.is_active() {
            continue;
        }
        let step = missile.advance(dt);
        if step.exited_screen {
            exits += 1;
        } else if missile.is_flying()
            && !state.player.is_dead()
            && missile.bbox.intersects(&state.player.bbox)
        {
            if missile.detonate() {
                events.push(GameEvent::Detonation);
            }
            player_hit = true;
        }
    }
    // Compact after the pass; never remove mid-iteration
    state.missiles.retain(|m| m.is_active());

    // One point per escaped missile, awarded individually so the score passes
    // through every integer on its way up
    for _ in 0..exits {
        award_score(state, 1, events);
    }

    if player_hit {
        end_run(state, events);
    }
}

/// Add points unless the player is dead. Difficulty rises only when the new
/// total lands exactly on a threshold; jumping past one skips the bump.
pub fn award_score(state: &mut GameState, points: u32, events: &mut Vec<GameEvent>) {
    if state.player.is_dead() {
        return;
    }
    state.score += points;
    if SCORE_THRESHOLDS.contains(&state.score) {
        state.difficulty += 1;
        events.push(GameEvent::DifficultyRaised {
            tier: state.difficulty,
        });
        log::info!(
            "difficulty raised to {} at score {}",
            state.difficulty,
            state.score
        );
    }
}

/// The player was hit: freeze the scenery and start the fade-out.
fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.player.state = PlayerState::Dead;
    state.difficulty = 0;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    for bg in &mut state.backgrounds {
        bg.speed = 0.0;
    }
    state.phase = GamePhase::Fading;
    events.push(GameEvent::RunEnded { score: state.score });
    log::info!("run ended at score {}", state.score);
}

/// Spawn one missile at the right edge: random lane, random speed, nose up.
fn spawn_missile(state: &mut GameState) {
    let x = state.viewport.width_f();
    let y = state.rng.random_range(0.0..state.viewport.height_f());
    let speed = state.rng.random_range(MISSILE_MIN_SPEED..MISSILE_MAX_SPEED);
    state.missiles.push(Missile::new(Vec2::new(x, y), speed));
}

/// Demo steering: dodge the nearest incoming lane, drift back to mid-screen
/// when nothing threatens. Pure function of the state.
fn autopilot_direction(state: &GameState) -> Vec2 {
    if state.player.is_dead() {
        return Vec2::ZERO;
    }
    let player_center_y = state.player.pos.y + PLAYER_SIZE.y / 2.0;

    // Nearest flying missile still ahead of the player
    let threat = state
        .missiles
        .iter()
        .filter(|m| m.is_flying() && m.pos.x > state.player.pos.x)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(missile) = threat {
        let gap = missile.lane_origin() - player_center_y;
        // React only to lanes close enough to clip the plane
        if gap.abs() < PLAYER_SIZE.y * 1.5 {
            return Vec2::new(0.0, if gap >= 0.0 { -1.0 } else { 1.0 });
        }
    }

    // Safe: ease back toward the middle of the viewport
    let offset = state.viewport.height_f() / 2.0 - player_center_y;
    if offset.abs() < PLAYER_SIZE.y {
        Vec2::ZERO
    } else {
        Vec2::new(0.0, offset.signum())
    }
}
