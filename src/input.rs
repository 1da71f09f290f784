//! Input reduction
//!
//! The host polls its devices and fills an [`InputSnapshot`] each frame; the
//! [`InputReducer`] pairs it with the previous frame's snapshot to produce the
//! per-tick command structure: a unit-scaled movement vector, a gamepad
//! preference flag, and rising-edge triggers for exit, restart, and fire.

use glam::Vec2;

use crate::sim::TickInput;

/// Raw device state for one frame, as sampled by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Left-stick axes, -1..1 each; +y is down
    pub stick: Vec2,
    /// Held directional keys (WASD / arrows)
    pub key_up: bool,
    pub key_down: bool,
    pub key_left: bool,
    pub key_right: bool,
    /// Any keyboard key held at all (for device preference)
    pub any_key: bool,
    /// Held control buttons/keys
    pub exit_held: bool,
    pub restart_held: bool,
    pub fire_held: bool,
}

/// Folds successive snapshots into [`TickInput`]s.
///
/// Direction is a level signal (held is held); exit, restart, and fire fire
/// only on the tick their control goes from released to pressed.
#[derive(Debug, Clone, Default)]
pub struct InputReducer {
    prior: InputSnapshot,
    prefer_gamepad: bool,
}

impl InputReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce this frame's snapshot against the previous one.
    pub fn reduce(&mut self, current: InputSnapshot) -> TickInput {
        // Stick movement flags the gamepad as the active device; any key
        // press flips back to keyboard prompts
        if current.stick != Vec2::ZERO {
            self.prefer_gamepad = true;
        }
        if current.any_key {
            self.prefer_gamepad = false;
        }

        // Stick and keys merge; each axis clamps to unit scale
        let mut direction = current.stick;
        if current.key_up {
            direction.y -= 1.0;
        }
        if current.key_down {
            direction.y += 1.0;
        }
        if current.key_left {
            direction.x -= 1.0;
        }
        if current.key_right {
            direction.x += 1.0;
        }
        direction = direction.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

        let input = TickInput {
            direction,
            fire: current.fire_held && !self.prior.fire_held,
            restart: current.restart_held && !self.prior.restart_held,
            exit: current.exit_held && !self.prior.exit_held,
            prefer_gamepad: self.prefer_gamepad,
            autopilot: false,
        };

        self.prior = current;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_direction() {
        let mut reducer = InputReducer::new();
        let input = reducer.reduce(InputSnapshot {
            key_up: true,
            key_right: true,
            any_key: true,
            ..Default::default()
        });
        assert_eq!(input.direction, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let mut reducer = InputReducer::new();
        let input = reducer.reduce(InputSnapshot {
            key_up: true,
            key_down: true,
            any_key: true,
            ..Default::default()
        });
        assert_eq!(input.direction, Vec2::ZERO);
    }

    #[test]
    fn test_stick_and_keys_clamp_to_unit_scale() {
        let mut reducer = InputReducer::new();
        let input = reducer.reduce(InputSnapshot {
            stick: Vec2::new(0.8, 0.8),
            key_down: true,
            key_right: true,
            ..Default::default()
        });
        assert_eq!(input.direction, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_restart_is_a_rising_edge() {
        let mut reducer = InputReducer::new();
        let held = InputSnapshot {
            restart_held: true,
            ..Default::default()
        };

        assert!(reducer.reduce(held).restart);
        // Still held: no second trigger
        assert!(!reducer.reduce(held).restart);
        // Released then pressed again: triggers again
        assert!(!reducer.reduce(InputSnapshot::default()).restart);
        assert!(reducer.reduce(held).restart);
    }

    #[test]
    fn test_fire_and_exit_are_rising_edges() {
        let mut reducer = InputReducer::new();
        let held = InputSnapshot {
            fire_held: true,
            exit_held: true,
            ..Default::default()
        };

        let first = reducer.reduce(held);
        assert!(first.fire);
        assert!(first.exit);
        let second = reducer.reduce(held);
        assert!(!second.fire);
        assert!(!second.exit);
    }

    #[test]
    fn test_device_preference_tracks_last_used() {
        let mut reducer = InputReducer::new();

        let stick = InputSnapshot {
            stick: Vec2::new(0.5, 0.0),
            ..Default::default()
        };
        assert!(reducer.reduce(stick).prefer_gamepad);

        // Preference sticks while devices are quiet
        assert!(reducer.reduce(InputSnapshot::default()).prefer_gamepad);

        let key = InputSnapshot {
            key_left: true,
            any_key: true,
            ..Default::default()
        };
        assert!(!reducer.reduce(key).prefer_gamepad);
    }
}
