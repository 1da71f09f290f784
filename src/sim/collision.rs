//! Axis-aligned bounding boxes and overlap testing
//!
//! Every entity owns a box smaller than its sprite, recentered on the sprite
//! after each move. Overlap is the classic four half-plane rejection test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned collision rectangle.
///
/// `pos` is the top-left corner in screen coordinates (+y down), matching the
/// sprite coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub pos: Vec2,
    pub size: Vec2,
}

impl BoundingBox {
    /// Build a box for a sprite of `sprite_size`, shrunk by `scale` and
    /// centered on the sprite at `sprite_pos`.
    pub fn for_sprite(sprite_pos: Vec2, sprite_size: Vec2, scale: f32) -> Self {
        let size = sprite_size * scale;
        let mut bbox = Self {
            pos: Vec2::ZERO,
            size,
        };
        bbox.recenter_on(sprite_pos, sprite_size);
        bbox
    }

    /// Move the box so it sits centered on the owning sprite.
    pub fn recenter_on(&mut self, sprite_pos: Vec2, sprite_size: Vec2) {
        self.pos = sprite_pos + (sprite_size - self.size) / 2.0;
    }

    /// True if the two boxes overlap.
    ///
    /// Misses iff one box is entirely to the left, right, above, or below the
    /// other; touching edges count as a hit.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.pos.x + self.size.x < other.pos.x
            || self.pos.x > other.pos.x + other.size.x
            || self.pos.y + self.size.y < other.pos.y
            || self.pos.y > other.pos.y + other.size.y)
    }
}
