//! Math types and helpers for Glimmer

pub use glam::Vec2;

use std::f32::consts::TAU;

/// Unit direction for an angle measured counterclockwise in the usual math
/// convention, expressed in screen coordinates (y grows downward). The sign
/// flip on the y component converts between the two conventions.
pub fn screen_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Unit direction for an angle in plain math coordinates (no y flip).
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Perpendicular of a vector, rotated 90 degrees counterclockwise.
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * TAU / 360.0
}

/// Whether `point` lies inside (or on) the circle at `center` with `radius`.
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    point.distance_squared(center) <= radius * radius
}
