//! Ray value type

use crate::color::Rgb;
use crate::math::Vec2;

/// A directed light segment owned by exactly one emitter.
///
/// `length` starts at `max_length` and is only ever shortened by the shadow
/// pass; regeneration replaces the ray wholesale rather than mutating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Unit direction.
    pub direction: Vec2,
    /// Scene-wide unclipped length.
    pub max_length: f32,
    /// Current clipped length, `0 < length <= max_length`.
    pub length: f32,
    pub color: Rgb,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2, max_length: f32, color: Rgb) -> Self {
        Self {
            origin,
            direction,
            max_length,
            length: max_length,
            color,
        }
    }

    /// Where the ray currently stops: `origin + length * direction`.
    pub fn endpoint(&self) -> Vec2 {
        self.origin + self.length * self.direction
    }

    /// Where the ray would stop with no absorbers in the way.
    pub fn unclipped_endpoint(&self) -> Vec2 {
        self.origin + self.max_length * self.direction
    }

    /// Restores the full unclipped length; called before every reclip pass.
    pub fn reset(&mut self) {
        self.length = self.max_length;
    }

    /// Shortens the ray to `length` if that is strictly closer than its
    /// current stop. Shadow casting never lengthens a ray.
    pub fn clip_to(&mut self, length: f32) {
        if length < self.length {
            self.length = length;
        }
    }
}
