//! Air Evade - a side-scrolling missile-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `input`: Raw device snapshots reduced to per-tick commands
//! - `audio`: Sound effect routing and volume control
//! - `settings`: User preferences
//! - `highscores`: Persistent leaderboard

pub mod audio;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, matching the frame-locked original)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport dimensions
    pub const VIEWPORT_WIDTH: u32 = 1000;
    pub const VIEWPORT_HEIGHT: u32 = 750;

    /// Player movement speed (px/s)
    pub const PLAYER_SPEED: f32 = 250.0;
    /// Scaled player sprite size
    pub const PLAYER_SIZE: Vec2 = Vec2::new(112.0, 64.0);
    /// Player bounding box as a fraction of the sprite
    pub const PLAYER_BOX_SCALE: f32 = 0.5;
    /// Player spawn x; y is mid-viewport
    pub const PLAYER_SPAWN_X: f32 = 25.0;
    /// Inset from the viewport edges when clamping
    pub const PLAYER_EDGE_INSET: f32 = 1.0;
    /// Nose tilt (radians) while climbing or diving
    pub const PLAYER_TILT: f32 = 0.1;
    /// Nose-down rotation while falling dead
    pub const PLAYER_DEAD_ROTATION: f32 = 0.5;
    /// Ticks between player animation frames
    pub const PLAYER_ANIM_DELAY_TICKS: u32 = 3;
    /// Frame counts for the player animation cycles
    pub const PLAYER_FLY_FRAMES: u32 = 2;
    pub const PLAYER_SHOOT_FRAMES: u32 = 5;

    /// Scaled missile sprite size
    pub const MISSILE_SIZE: Vec2 = Vec2::new(64.0, 24.0);
    /// Missile bounding box as a fraction of the sprite
    pub const MISSILE_BOX_SCALE: f32 = 0.75;
    /// Missile horizontal speed range at spawn (px/s)
    pub const MISSILE_MIN_SPEED: f32 = 1200.0;
    pub const MISSILE_MAX_SPEED: f32 = 1800.0;
    /// Vertical sway half-height around the lane origin (px)
    pub const MISSILE_SWAY_AMPLITUDE: f32 = 10.0;
    /// Sway slope is horizontal speed divided by this
    pub const MISSILE_SWAY_DIVISOR: f32 = 8.0;
    /// Nose tilt (radians) toward the current sway direction
    pub const MISSILE_TILT: f32 = 0.06;
    /// Missiles deactivate once x drops below this
    pub const MISSILE_OFFSCREEN_X: f32 = -1.0;
    /// Explosion animation: frame count and ticks per frame
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_TICKS: u32 = 5;

    /// Background scroll speed (px/s)
    pub const BACKGROUND_SCROLL_SPEED: f32 = 600.0;
    /// Overlap between the two background tiles, hiding the seam
    pub const BACKGROUND_SEAM_OVERLAP: f32 = 10.0;

    /// Music volume decay per tick while the run fades out
    pub const MUSIC_FADE_STEP: f32 = 0.009;

    /// Difficulty rises when the score lands exactly on one of these
    pub const SCORE_THRESHOLDS: [u32; 9] = [10, 30, 60, 100, 150, 210, 280, 360, 450];
    /// Difficulty tier at the start of a run
    pub const START_DIFFICULTY: u32 = 1;
}
