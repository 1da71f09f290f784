//! Air Evade entry point
//!
//! Headless demo driver: plays a few autopilot runs at the fixed timestep,
//! routing sim events through the audio manager and recording finished runs
//! on the leaderboard. A graphical frontend would run the same loop, paced
//! by its frame callback, with real device snapshots.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use air_evade::audio::{AudioManager, NullBackend};
use air_evade::consts::*;
use air_evade::highscores::HIGHSCORES_FILE;
use air_evade::input::{InputReducer, InputSnapshot};
use air_evade::settings::SETTINGS_FILE;
use air_evade::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
use air_evade::{HighScores, Settings};

/// Demo runs played before exiting
const DEMO_RUNS: u32 = 3;

/// Hard cap on simulated time (one hour)
const MAX_TICKS: u64 = 60 * 60 * 60;

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(unix_now);

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut highscores = HighScores::load(Path::new(HIGHSCORES_FILE));

    let mut audio = AudioManager::new(Box::new(NullBackend));
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.start_music();

    let mut state = GameState::new(seed, Viewport::default());
    let mut reducer = InputReducer::new();
    log::info!("demo starting: seed {seed}, {DEMO_RUNS} runs");

    let mut runs_finished = 0u32;
    let mut peak_difficulty = state.difficulty;

    while state.time_ticks < MAX_TICKS {
        // The demo "player" holds the restart button on the game-over screen
        let snapshot = if state.phase == GamePhase::GameOver {
            InputSnapshot {
                restart_held: true,
                ..Default::default()
            }
        } else {
            InputSnapshot::default()
        };
        let input = TickInput {
            autopilot: true,
            ..reducer.reduce(snapshot)
        };

        let events = tick(&mut state, &input, SIM_DT);
        audio.handle_events(&events);
        audio.sync_music(state.music_volume);
        peak_difficulty = peak_difficulty.max(state.difficulty);

        for event in &events {
            match event {
                GameEvent::RunEnded { score } => {
                    runs_finished += 1;
                    log::info!(
                        "run {runs_finished}/{DEMO_RUNS} ended: score {score}, \
                         difficulty {peak_difficulty}"
                    );
                    let rank = highscores.add_score(*score, peak_difficulty, unix_now());
                    if let Some(rank) = rank {
                        log::info!("leaderboard rank {rank}");
                    }
                }
                GameEvent::Restarted => peak_difficulty = state.difficulty,
                _ => {}
            }
        }

        if runs_finished >= DEMO_RUNS && state.phase == GamePhase::GameOver {
            break;
        }
    }

    highscores.save(Path::new(HIGHSCORES_FILE));
    log::info!(
        "demo over: session high score {}, leaderboard best {:?}",
        state.high_score,
        highscores.top_score()
    );
}
