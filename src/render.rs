//! Drawing capability seam
//!
//! The engine never touches pixels. The host hands in anything that can
//! fill circles and draw line segments, and `draw_scene` walks the scene in
//! paint order: every body first (oldest at the bottom), then every ray on
//! top, matching the frame order of the interactive editor.

use crate::color::Rgb;
use crate::error::Result;
use crate::math::Vec2;
use crate::scene::{GlimmerScene, SceneHandle};

/// Minimal drawing surface the host provides.
pub trait DrawTarget {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb);
}

/// Draws all bodies, then all ray segments.
pub fn draw_scene(scene: &GlimmerScene, target: &mut impl DrawTarget) -> Result<()> {
    for handle in scene.handles() {
        let (center, radius, color) = scene.body(*handle)?;
        target.fill_circle(center, radius, color);
    }
    for handle in scene.handles() {
        if let SceneHandle::Emitter(id) = handle {
            for segment in scene.ray_segments(*id)? {
                target.line(segment.start, segment.end, segment.color);
            }
        }
    }
    Ok(())
}
