//! Recording surface
//!
//! Captures draw calls along with their geometry under the active transform.
//! Used for headless runs and tests.

use glam::{Affine2, Vec2};

use super::{Color, Surface};
use crate::sim::Rect;

/// Stand-in for a decoded image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHandle {
    pub size: Vec2,
}

impl ImageHandle {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

/// A captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
    },
    FillRect {
        /// Rectangle as passed in local coordinates
        rect: Rect,
        /// Corners on the surface: top-left, top-right, bottom-right, bottom-left
        corners: [Vec2; 4],
        color: Color,
    },
    DrawImage {
        rect: Rect,
        corners: [Vec2; 4],
    },
}

/// Surface that records instead of painting
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved transforms not yet restored
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Local rectangles filled with `color`, in draw order
    pub fn fills_of(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color: c, .. } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::DrawImage { .. }))
            .count()
    }

    fn corners(&self, rect: &Rect) -> [Vec2; 4] {
        let (min, max) = (rect.min, rect.max());
        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
        .map(|p| self.transform.transform_point2(p))
    }
}

impl Surface for RecordingSurface {
    type Image = ImageHandle;

    fn clear(&mut self, size: Vec2) {
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let corners = self.corners(&rect);
        self.commands.push(DrawCommand::FillRect {
            rect,
            corners,
            color,
        });
    }

    fn draw_image(&mut self, _image: &ImageHandle, rect: Rect) {
        let corners = self.corners(&rect);
        self.commands.push(DrawCommand::DrawImage { rect, corners });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }
}
