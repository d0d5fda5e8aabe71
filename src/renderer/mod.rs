//! 2D rendering
//!
//! The renderer is a pure function from `&World` to draw calls on a
//! `Surface`. Surfaces expose only filled rectangles, image blits and an
//! affine save/translate/rotate/restore stack, which maps directly onto a
//! browser canvas.

pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Rect, World};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, ImageHandle, RecordingSurface};

/// RGBA, each channel 0.0 - 1.0
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const GRID: Color = [1.0, 1.0, 1.0, 0.08];
    pub const FLOOR: Color = [25.0 / 255.0, 49.0 / 255.0, 79.0 / 255.0, 1.0];
    pub const FLOOR_STRIPE: Color = [15.0 / 255.0, 30.0 / 255.0, 50.0 / 255.0, 1.0];
    pub const PIPE: Color = [70.0 / 255.0, 1.0, 134.0 / 255.0, 1.0];
    pub const PIPE_CAP: Color = [47.0 / 255.0, 191.0 / 255.0, 94.0 / 255.0, 1.0];
    pub const PLACEHOLDER: Color = [1.0, 1.0, 1.0, 1.0];
}

/// CSS `rgba()` form of a color
pub fn css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3]
    )
}

/// A 2D drawing target
pub trait Surface {
    type Image;

    /// Erase everything inside `size`
    fn clear(&mut self, size: Vec2);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Blit `image` scaled into `rect`
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Rotate by `angle` radians (clockwise on screen)
    fn rotate(&mut self, angle: f32);
}

const GRID_STEP: usize = 16;
const FLOOR_STRIPE_STEP: usize = 8;
const FLOOR_STRIPE_WIDTH: f32 = 4.0;
const CAP_HEIGHT: f32 = 12.0;
const CAP_OVERHANG: f32 = 2.0;

/// Paint one frame. `sprite_image` is `None` until the image has loaded.
pub fn draw_frame<S: Surface>(world: &World, surface: &mut S, sprite_image: Option<&S::Image>) {
    surface.clear(Vec2::new(VIEW_WIDTH, VIEW_HEIGHT));
    draw_grid(surface);
    draw_floor(surface);
    draw_obstacles(world, surface);
    draw_sprite(world, surface, sprite_image);
}

fn draw_grid<S: Surface>(surface: &mut S) {
    for y in (0..VIEW_HEIGHT as usize).step_by(GRID_STEP) {
        surface.fill_rect(Rect::from_xywh(0.0, y as f32, VIEW_WIDTH, 1.0), colors::GRID);
    }
    for x in (0..VIEW_WIDTH as usize).step_by(GRID_STEP) {
        surface.fill_rect(Rect::from_xywh(x as f32, 0.0, 1.0, VIEW_HEIGHT), colors::GRID);
    }
}

fn draw_floor<S: Surface>(surface: &mut S) {
    let top = VIEW_HEIGHT - FLOOR_HEIGHT;
    surface.fill_rect(
        Rect::from_xywh(0.0, top, VIEW_WIDTH, FLOOR_HEIGHT),
        colors::FLOOR,
    );
    for x in (0..VIEW_WIDTH as usize).step_by(FLOOR_STRIPE_STEP) {
        surface.fill_rect(
            Rect::from_xywh(x as f32, top, FLOOR_STRIPE_WIDTH, FLOOR_HEIGHT),
            colors::FLOOR_STRIPE,
        );
    }
}

fn draw_obstacles<S: Surface>(world: &World, surface: &mut S) {
    for obstacle in &world.obstacles {
        let cap_x = obstacle.x - CAP_OVERHANG;
        let cap_w = obstacle.width() + CAP_OVERHANG * 2.0;

        surface.fill_rect(obstacle.top_rect(), colors::PIPE);
        surface.fill_rect(
            Rect::from_xywh(cap_x, obstacle.gap_top() - CAP_HEIGHT, cap_w, CAP_HEIGHT),
            colors::PIPE_CAP,
        );

        surface.fill_rect(obstacle.bottom_rect(), colors::PIPE);
        surface.fill_rect(
            Rect::from_xywh(cap_x, obstacle.gap_bottom(), cap_w, CAP_HEIGHT),
            colors::PIPE_CAP,
        );
    }
}

fn draw_sprite<S: Surface>(world: &World, surface: &mut S, sprite_image: Option<&S::Image>) {
    let sprite = &world.sprite;
    // Drawn centred on the origin after moving to the bounding-box centre
    let local = Rect::new(-sprite.size / 2.0, sprite.size);

    surface.save();
    surface.translate(sprite.bounds().center());
    surface.rotate(sprite.tilt());
    match sprite_image {
        Some(image) => surface.draw_image(image, local),
        None => surface.fill_rect(local, colors::PLACEHOLDER),
    }
    surface.restore();
}
