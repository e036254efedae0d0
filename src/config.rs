//! Configuration for Glimmer scenes

use crate::color::Rgb;
use crate::error::{GlimmerError, Result};
use crate::math::degrees_to_radians;

/// Scene-wide parameters, fixed at scene construction.
///
/// `ray_count` is the number of rays every emitter generates and
/// `ray_max_length` is the scene-wide unclipped ray length; together they
/// bound every recompute pass.
#[derive(Debug, Clone)]
pub struct GlimmerSceneDesc {
    /// Rays per emitter (N). Must be at least 1.
    pub ray_count: usize,
    /// Unclipped length every ray resets to before shadow casting.
    pub ray_max_length: f32,
    /// Default body radius for newly created emitters and absorbers.
    pub circle_radius: f32,
    /// Step applied by the angle increment/decrement operations, radians.
    pub angle_increment: f32,
    /// Default body fill color.
    pub fill_color: Rgb,
    /// Default ray color for emitters.
    pub emitter_color: Rgb,
}

impl Default for GlimmerSceneDesc {
    fn default() -> Self {
        Self {
            ray_count: 10,
            ray_max_length: 1000.0,
            circle_radius: 10.0,
            angle_increment: degrees_to_radians(10.0),
            fill_color: Rgb::WHITE,
            emitter_color: Rgb::CORNFLOWER_BLUE,
        }
    }
}

impl GlimmerSceneDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ray_count(mut self, count: usize) -> Self {
        self.ray_count = count;
        self
    }

    pub fn ray_max_length(mut self, length: f32) -> Self {
        self.ray_max_length = length;
        self
    }

    pub fn circle_radius(mut self, radius: f32) -> Self {
        self.circle_radius = radius;
        self
    }

    pub fn angle_increment(mut self, radians: f32) -> Self {
        self.angle_increment = radians;
        self
    }

    pub fn fill_color(mut self, color: Rgb) -> Self {
        self.fill_color = color;
        self
    }

    pub fn emitter_color(mut self, color: Rgb) -> Self {
        self.emitter_color = color;
        self
    }

    /// Rejects descriptions that would produce degenerate geometry.
    /// A ray count of zero must never silently degrade to empty batches.
    pub fn validate(&self) -> Result<()> {
        if self.ray_count < 1 {
            return Err(GlimmerError::Geometry(format!(
                "ray count must be at least 1, got {}",
                self.ray_count
            )));
        }
        if !(self.ray_max_length > 0.0) {
            return Err(GlimmerError::Geometry(format!(
                "ray max length must be positive, got {}",
                self.ray_max_length
            )));
        }
        if !(self.circle_radius > 0.0) {
            return Err(GlimmerError::Geometry(format!(
                "circle radius must be positive, got {}",
                self.circle_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_desc_is_valid() {
        assert!(GlimmerSceneDesc::default().validate().is_ok());
    }

    #[test]
    fn zero_ray_count_rejected() {
        let desc = GlimmerSceneDesc::new().ray_count(0);
        assert!(matches!(desc.validate(), Err(GlimmerError::Geometry(_))));
    }

    #[test]
    fn non_positive_lengths_rejected() {
        assert!(GlimmerSceneDesc::new().ray_max_length(0.0).validate().is_err());
        assert!(GlimmerSceneDesc::new().ray_max_length(f32::NAN).validate().is_err());
        assert!(GlimmerSceneDesc::new().circle_radius(-1.0).validate().is_err());
    }
}
