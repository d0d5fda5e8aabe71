//! Collision detection
//!
//! Axis-aligned rectangles only. Overlap is strict on both axes, so shapes
//! that merely share an edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, Sprite, World};
use crate::consts::{FLOOR_HEIGHT, VIEW_HEIGHT};
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Floor,
    Ceiling,
    /// Index into the obstacle sequence
    Obstacle(usize),
}

/// Collision-relevant rectangle, shrunk from the display bounds for fairness
pub fn hitbox(sprite: &Sprite, tuning: &Tuning) -> Rect {
    Rect::new(
        sprite.pos + Vec2::splat(tuning.hitbox_offset),
        sprite.size * tuning.hitbox_shrink,
    )
}

/// Floor or ceiling contact
pub fn bounds_collision(sprite: &Sprite) -> Option<Collision> {
    if sprite.pos.y + sprite.size.y >= VIEW_HEIGHT - FLOOR_HEIGHT {
        Some(Collision::Floor)
    } else if sprite.pos.y <= 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// Hitbox against either blocking rectangle of one obstacle
pub fn obstacle_collision(hit: &Rect, obstacle: &Obstacle) -> bool {
    hit.overlaps(&obstacle.top_rect()) || hit.overlaps(&obstacle.bottom_rect())
}

/// Check the sprite against the world bounds, then every obstacle
pub fn detect(world: &World) -> Option<Collision> {
    if let Some(collision) = bounds_collision(&world.sprite) {
        return Some(collision);
    }

    let hit = hitbox(&world.sprite, &world.tuning);
    world
        .obstacles
        .iter()
        .position(|obstacle| obstacle_collision(&hit, obstacle))
        .map(Collision::Obstacle)
}
