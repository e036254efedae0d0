//! Emitter records and per-kind ray generation

use crate::color::Rgb;
use crate::config::GlimmerSceneDesc;
use crate::math::{Vec2, direction, perpendicular, screen_direction};
use crate::ray::Ray;
use std::f32::consts::TAU;

/// Kind-specific emitter parameters.
///
/// Angles are radians, counterclockwise; the scene uses screen coordinates
/// (y down), which `screen_direction` accounts for on the directional and
/// spot kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterKind {
    /// Rays fan out evenly in all directions from the center.
    Point,
    /// Parallel rays spread along the perpendicular over `width`.
    Directional { angle: f32, width: f32 },
    /// Rays sweep `arc` starting at `angle`, origins on the body boundary.
    Spot { angle: f32, arc: f32 },
}

impl EmitterKind {
    /// The adjustable facing angle, for kinds that have one.
    pub fn angle(&self) -> Option<f32> {
        match self {
            EmitterKind::Point => None,
            EmitterKind::Directional { angle, .. } | EmitterKind::Spot { angle, .. } => {
                Some(*angle)
            }
        }
    }

    pub(crate) fn set_angle(&mut self, new_angle: f32) -> bool {
        match self {
            EmitterKind::Point => false,
            EmitterKind::Directional { angle, .. } | EmitterKind::Spot { angle, .. } => {
                *angle = new_angle;
                true
            }
        }
    }
}

/// A light source: a circular body plus the ray batch it owns.
///
/// The batch always holds exactly `desc.ray_count` rays and is rebuilt from
/// scratch whenever the emitter moves or changes angle.
#[derive(Debug, Clone)]
pub struct Emitter {
    pub position: Vec2,
    pub radius: f32,
    pub fill_color: Rgb,
    pub emitter_color: Rgb,
    pub kind: EmitterKind,
    pub(crate) rays: Vec<Ray>,
}

impl Emitter {
    pub(crate) fn new(
        kind: EmitterKind,
        position: Vec2,
        radius: f32,
        fill_color: Rgb,
        emitter_color: Rgb,
        desc: &GlimmerSceneDesc,
    ) -> Self {
        let mut emitter = Self {
            position,
            radius,
            fill_color,
            emitter_color,
            kind,
            rays: Vec::with_capacity(desc.ray_count),
        };
        emitter.regenerate_rays(desc);
        emitter
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Discards the whole batch and rebuilds it from the current position
    /// and kind parameters. Every new ray starts at the full unclipped
    /// length; shadows are reapplied by the scene's recompute pass.
    pub(crate) fn regenerate_rays(&mut self, desc: &GlimmerSceneDesc) {
        let n = desc.ray_count;
        self.rays.clear();
        match self.kind {
            EmitterKind::Point => {
                for i in 0..n {
                    let theta = i as f32 * TAU / n as f32;
                    self.rays.push(Ray::new(
                        self.position,
                        direction(theta),
                        desc.ray_max_length,
                        self.emitter_color,
                    ));
                }
            }
            EmitterKind::Directional { angle, width } => {
                let dir = screen_direction(angle);
                let perp = perpendicular(dir);
                // Single ray sits at the center; spacing is undefined there.
                let spacing = if n > 1 { width / (n - 1) as f32 } else { 0.0 };
                for i in 0..n {
                    let offset = (i as f32 - (n - 1) as f32 / 2.0) * spacing;
                    self.rays.push(Ray::new(
                        self.position + offset * perp,
                        dir,
                        desc.ray_max_length,
                        self.emitter_color,
                    ));
                }
            }
            EmitterKind::Spot { angle, arc } => {
                for i in 0..n {
                    // Both endpoints of the arc are sampled.
                    let theta = if n > 1 {
                        angle + arc * i as f32 / (n - 1) as f32
                    } else {
                        angle
                    };
                    // Origins sit on the body boundary rather than the
                    // center, which produces the visible cone.
                    let origin = self.position + self.radius * Vec2::new(theta.cos(), theta.sin());
                    self.rays.push(Ray::new(
                        origin,
                        screen_direction(theta),
                        desc.ray_max_length,
                        self.emitter_color,
                    ));
                }
            }
        }
    }
}
