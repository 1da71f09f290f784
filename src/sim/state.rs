//! Game state and core simulation types
//!
//! Entities carry their own motion and animation rules; the controller in
//! `tick` decides when they run and applies their reported outcomes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::BoundingBox;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; music fades while the wreck falls
    Fading,
    /// Run ended, awaiting restart input
    GameOver,
}

/// Playfield dimensions, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

/// Player lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Idle,
    Shooting,
    Dead,
}

/// Which player texture to draw this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSprite {
    Fly(u32),
    Shoot(u32),
    Crash,
}

/// The player's plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Nose tilt in radians; positive pitches down
    pub rotation: f32,
    pub state: PlayerState,
    anim_index: u32,
    anim_timer: u32,
    pub bbox: BoundingBox,
}

impl Player {
    /// Spawn at the left edge, vertically centered.
    pub fn new(viewport: &Viewport) -> Self {
        let pos = Vec2::new(PLAYER_SPAWN_X, viewport.height_f() / 2.0);
        Self {
            pos,
            rotation: 0.0,
            state: PlayerState::Idle,
            anim_index: 0,
            anim_timer: 0,
            bbox: BoundingBox::for_sprite(pos, PLAYER_SIZE, PLAYER_BOX_SCALE),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    /// Move by input (or fall when dead), clamp to the viewport, recenter the
    /// bounding box.
    ///
    /// `direction` is unit-scaled per axis; the dead branch ignores it and
    /// falls straight down at the normal movement speed.
    pub fn advance(&mut self, direction: Vec2, dt: f32, viewport: &Viewport) {
        if self.is_dead() {
            self.rotation = PLAYER_DEAD_ROTATION;
            self.pos.y += PLAYER_SPEED * dt;
        } else {
            self.rotation = if direction.y > 0.0 {
                PLAYER_TILT
            } else if direction.y < 0.0 {
                -PLAYER_TILT
            } else {
                0.0
            };
            self.pos += direction * PLAYER_SPEED * dt;
        }

        // Keep the whole sprite on screen, one pixel in from every edge
        let min = Vec2::splat(PLAYER_EDGE_INSET);
        let max = Vec2::new(
            viewport.width_f() - PLAYER_SIZE.x - PLAYER_EDGE_INSET,
            viewport.height_f() - PLAYER_SIZE.y - PLAYER_EDGE_INSET,
        );
        self.pos = self.pos.clamp(min, max);

        self.bbox.recenter_on(self.pos, PLAYER_SIZE);
        self.animate();
    }

    /// Kick off the shooting animation; no-op unless idle.
    pub fn start_shooting(&mut self) {
        if self.state == PlayerState::Idle {
            self.state = PlayerState::Shooting;
            self.anim_index = 0;
            self.anim_timer = 0;
        }
    }

    fn animate(&mut self) {
        self.anim_timer += 1;
        if self.anim_timer < PLAYER_ANIM_DELAY_TICKS {
            return;
        }
        self.anim_timer = 0;
        self.anim_index += 1;
        match self.state {
            PlayerState::Idle => {
                if self.anim_index >= PLAYER_FLY_FRAMES {
                    self.anim_index = 0;
                }
            }
            PlayerState::Shooting => {
                // One full burst, then back to level flight
                if self.anim_index >= PLAYER_SHOOT_FRAMES {
                    self.anim_index = 0;
                    self.state = PlayerState::Idle;
                }
            }
            PlayerState::Dead => self.anim_index = 0,
        }
    }

    /// Texture selector for the frontend.
    pub fn sprite(&self) -> PlayerSprite {
        match self.state {
            PlayerState::Idle => PlayerSprite::Fly(self.anim_index),
            PlayerState::Shooting => PlayerSprite::Shoot(self.anim_index),
            PlayerState::Dead => PlayerSprite::Crash,
        }
    }
}

/// Vertical sway direction of a flying missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
}

/// Missile lifecycle state. Transitions are one-way:
/// Flying -> Detonating -> Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileState {
    Flying,
    Detonating { anim_frame: u32, anim_timer: u32 },
    Inactive,
}

/// Which missile texture to draw this frame; `None` once inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissileSprite {
    Body,
    Explosion(u32),
}

/// Outcome of a single missile step, applied by the controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissileStep {
    /// Flew off the left edge this tick
    pub exited_screen: bool,
}

/// An incoming missile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub pos: Vec2,
    /// Horizontal speed, px/s; zeroed on detonation
    pub speed: f32,
    /// Lane the sway is centered on, fixed at spawn
    origin: f32,
    /// Vertical sway slope, px/s
    frequency: f32,
    pub facing: Facing,
    pub state: MissileState,
    pub bbox: BoundingBox,
}

impl Missile {
    /// Spawn at `pos` flying leftward; the sway lane is centered on the spawn
    /// height and the sway slope scales with speed.
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            origin: pos.y,
            frequency: speed / MISSILE_SWAY_DIVISOR,
            facing: Facing::Up,
            state: MissileState::Flying,
            bbox: BoundingBox::for_sprite(pos, MISSILE_SIZE, MISSILE_BOX_SCALE),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != MissileState::Inactive
    }

    pub fn is_flying(&self) -> bool {
        self.state == MissileState::Flying
    }

    pub fn lane_origin(&self) -> f32 {
        self.origin
    }

    /// One step of flight or explosion animation.
    pub fn advance(&mut self, dt: f32) -> MissileStep {
        let mut step = MissileStep::default();
        match self.state {
            MissileState::Flying => {
                // Triangle-wave sway: step toward the current facing, flip at
                // the band edge. Clamping keeps y inside
                // [origin - amplitude, origin + amplitude].
                let sway = self.frequency * dt;
                match self.facing {
                    Facing::Up => {
                        self.pos.y -= sway;
                        if self.pos.y <= self.origin - MISSILE_SWAY_AMPLITUDE {
                            self.pos.y = self.origin - MISSILE_SWAY_AMPLITUDE;
                            self.facing = Facing::Down;
                        }
                    }
                    Facing::Down => {
                        self.pos.y += sway;
                        if self.pos.y >= self.origin + MISSILE_SWAY_AMPLITUDE {
                            self.pos.y = self.origin + MISSILE_SWAY_AMPLITUDE;
                            self.facing = Facing::Up;
                        }
                    }
                }
                self.pos.x -= self.speed * dt;

                if self.pos.x < MISSILE_OFFSCREEN_X {
                    self.state = MissileState::Inactive;
                    step.exited_screen = true;
                } else {
                    self.bbox.recenter_on(self.pos, MISSILE_SIZE);
                }
            }
            MissileState::Detonating {
                ref mut anim_frame,
                ref mut anim_timer,
            } => {
                *anim_timer += 1;
                if *anim_timer >= EXPLOSION_FRAME_TICKS {
                    if *anim_frame + 1 >= EXPLOSION_FRAMES {
                        self.state = MissileState::Inactive;
                    } else {
                        *anim_frame += 1;
                        *anim_timer = 0;
                    }
                }
            }
            MissileState::Inactive => {}
        }
        step
    }

    /// Trigger the explosion. Idempotent: returns true only on the transition
    /// into Detonating, so the caller plays the sound exactly once.
    pub fn detonate(&mut self) -> bool {
        if self.is_flying() {
            self.speed = 0.0;
            self.state = MissileState::Detonating {
                anim_frame: 0,
                anim_timer: 0,
            };
            true
        } else {
            false
        }
    }

    /// Nose tilt toward the sway direction; level while exploding.
    pub fn rotation(&self) -> f32 {
        match self.state {
            MissileState::Flying => match self.facing {
                Facing::Up => MISSILE_TILT,
                Facing::Down => -MISSILE_TILT,
            },
            _ => 0.0,
        }
    }

    /// Texture selector for the frontend.
    pub fn sprite(&self) -> Option<MissileSprite> {
        match self.state {
            MissileState::Flying => Some(MissileSprite::Body),
            MissileState::Detonating { anim_frame, .. } => {
                Some(MissileSprite::Explosion(anim_frame))
            }
            MissileState::Inactive => None,
        }
    }
}

/// One tile of the two-tile scrolling background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub x: f32,
    /// Scroll speed, px/s; zeroed on game over
    pub speed: f32,
    width: f32,
}

impl Background {
    /// The two tiles that cover the viewport seamlessly.
    pub fn pair(viewport: &Viewport) -> [Background; 2] {
        let width = viewport.width_f();
        [
            Background {
                x: 0.0,
                speed: BACKGROUND_SCROLL_SPEED,
                width,
            },
            Background {
                x: width,
                speed: BACKGROUND_SCROLL_SPEED,
                width,
            },
        ]
    }

    /// Scroll leftward and wrap behind the partner tile, overlapping a little
    /// to hide the seam.
    pub fn scroll(&mut self, dt: f32) {
        self.x -= self.speed * dt;
        if self.x < -self.width {
            self.x = self.width - BACKGROUND_SEAM_OVERLAP;
        }
    }
}

/// Per-tick outputs: sound triggers and run milestones for the frontend.
///
/// Entities never call back into the controller; `tick` collects these and
/// the caller applies the side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A missile started exploding; play the detonation sound once
    Detonation,
    /// Score landed on a threshold and the spawn floor rose
    DifficultyRaised { tier: u32 },
    /// The player was hit; the run ends once the music fades out
    RunEnded { score: u32 },
    /// Music volume hit the floor and playback stops
    MusicStopped,
    /// A fresh run started from the game-over screen
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub viewport: Viewport,
    pub score: u32,
    /// Best score across all runs this session
    pub high_score: u32,
    /// Minimum number of concurrently active missiles
    pub difficulty: u32,
    pub phase: GamePhase,
    /// Controller-owned music level, faded out after a hit
    pub music_volume: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub missiles: Vec<Missile>,
    pub backgrounds: [Background; 2],
}

impl GameState {
    /// Create a new game state with the given seed.
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            score: 0,
            high_score: 0,
            difficulty: START_DIFFICULTY,
            phase: GamePhase::Playing,
            music_volume: 1.0,
            time_ticks: 0,
            player: Player::new(&viewport),
            missiles: Vec::new(),
            backgrounds: Background::pair(&viewport),
        }
    }

    /// Soft reset from the game-over screen. Keeps the RNG stream, the high
    /// score, and the viewport; everything else starts fresh.
    pub(crate) fn restart(&mut self) {
        self.score = 0;
        self.difficulty = START_DIFFICULTY;
        self.phase = GamePhase::Playing;
        self.music_volume = 1.0;
        self.player = Player::new(&self.viewport);
        self.missiles.clear();
        self.backgrounds = Background::pair(&self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missile_lifecycle_is_monotonic() {
        let mut missile = Missile::new(Vec2::new(500.0, 300.0), 1200.0);
        assert!(missile.is_flying());

        assert!(missile.detonate());
        assert!(matches!(missile.state, MissileState::Detonating { .. }));
        assert_eq!(missile.speed, 0.0);

        // Detonating never returns to flight; it only runs out
        for _ in 0..(EXPLOSION_FRAMES * EXPLOSION_FRAME_TICKS + 1) {
            missile.advance(SIM_DT);
            assert!(!missile.is_flying());
        }
        assert_eq!(missile.state, MissileState::Inactive);

        // Inactive stays inactive
        missile.advance(SIM_DT);
        assert_eq!(missile.state, MissileState::Inactive);
    }

    #[test]
    fn test_detonate_is_idempotent() {
        let mut missile = Missile::new(Vec2::new(500.0, 300.0), 1200.0);
        assert!(missile.detonate());
        assert!(!missile.detonate());
        assert!(!missile.detonate());
    }

    #[test]
    fn test_explosion_frames_advance_on_schedule() {
        let mut missile = Missile::new(Vec2::new(500.0, 300.0), 1200.0);
        missile.detonate();
        assert_eq!(missile.sprite(), Some(MissileSprite::Explosion(0)));

        // One frame every EXPLOSION_FRAME_TICKS ticks
        for _ in 0..EXPLOSION_FRAME_TICKS {
            missile.advance(SIM_DT);
        }
        assert_eq!(missile.sprite(), Some(MissileSprite::Explosion(1)));
    }

    #[test]
    fn test_detonating_missile_stops_moving() {
        let mut missile = Missile::new(Vec2::new(500.0, 300.0), 1200.0);
        missile.detonate();
        let pos = missile.pos;
        missile.advance(SIM_DT);
        assert_eq!(missile.pos, pos);
        assert_eq!(missile.rotation(), 0.0);
    }

    #[test]
    fn test_offscreen_exit_reported_once() {
        let mut missile = Missile::new(Vec2::new(5.0, 300.0), 1200.0);
        let mut exits = 0;
        for _ in 0..10 {
            if missile.advance(SIM_DT).exited_screen {
                exits += 1;
            }
        }
        assert_eq!(exits, 1);
        assert_eq!(missile.state, MissileState::Inactive);
    }

    #[test]
    fn test_dead_player_falls_and_ignores_input() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        player.state = PlayerState::Dead;
        let y_before = player.pos.y;

        player.advance(Vec2::new(-1.0, -1.0), SIM_DT, &viewport);
        assert!(player.pos.y > y_before);
        assert_eq!(player.pos.x, PLAYER_SPAWN_X);
        assert_eq!(player.rotation, PLAYER_DEAD_ROTATION);
    }

    #[test]
    fn test_shooting_returns_to_idle_after_one_cycle() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        player.start_shooting();
        assert_eq!(player.state, PlayerState::Shooting);

        for _ in 0..(PLAYER_SHOOT_FRAMES * PLAYER_ANIM_DELAY_TICKS + 1) {
            player.advance(Vec2::ZERO, SIM_DT, &viewport);
        }
        assert_eq!(player.state, PlayerState::Idle);
    }

    #[test]
    fn test_player_tilt_follows_vertical_input() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);

        player.advance(Vec2::new(0.0, 1.0), SIM_DT, &viewport);
        assert_eq!(player.rotation, PLAYER_TILT);
        player.advance(Vec2::new(0.0, -1.0), SIM_DT, &viewport);
        assert_eq!(player.rotation, -PLAYER_TILT);
        player.advance(Vec2::new(1.0, 0.0), SIM_DT, &viewport);
        assert_eq!(player.rotation, 0.0);
    }

    proptest! {
        #[test]
        fn prop_flying_missile_stays_in_sway_band(
            spawn_y in 0.0f32..750.0,
            speed in 1200.0f32..1800.0,
            ticks in 1usize..600,
        ) {
            let mut missile = Missile::new(Vec2::new(1e6, spawn_y), speed);
            for _ in 0..ticks {
                missile.advance(SIM_DT);
                prop_assert!(missile.pos.y >= spawn_y - MISSILE_SWAY_AMPLITUDE - 1e-3);
                prop_assert!(missile.pos.y <= spawn_y + MISSILE_SWAY_AMPLITUDE + 1e-3);
            }
        }

        #[test]
        fn prop_player_clamped_inside_viewport(
            start_x in -200.0f32..1200.0,
            start_y in -200.0f32..950.0,
            dir_x in -1.0f32..1.0,
            dir_y in -1.0f32..1.0,
            ticks in 1usize..120,
        ) {
            let viewport = Viewport::default();
            let mut player = Player::new(&viewport);
            player.pos = Vec2::new(start_x, start_y);

            for _ in 0..ticks {
                player.advance(Vec2::new(dir_x, dir_y), SIM_DT, &viewport);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.y >= 0.0);
                prop_assert!(player.pos.x + PLAYER_SIZE.x <= viewport.width_f());
                prop_assert!(player.pos.y + PLAYER_SIZE.y <= viewport.height_f());
            }
        }
    }
}
