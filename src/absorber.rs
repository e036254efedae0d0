//! Absorber records and the ray/circle clip solve

use crate::color::Rgb;
use crate::math::Vec2;
use crate::ray::Ray;

/// An opaque circular body that shortens rays crossing it.
#[derive(Debug, Clone, Copy)]
pub struct Absorber {
    pub position: Vec2,
    /// Strictly positive.
    pub radius: f32,
    pub fill_color: Rgb,
    /// Penetrable absorbers keep their body in the scene but let rays pass.
    pub penetrable: bool,
}

impl Absorber {
    pub(crate) fn new(position: Vec2, radius: f32, fill_color: Rgb, penetrable: bool) -> Self {
        Self {
            position,
            radius,
            fill_color,
            penetrable,
        }
    }

    /// Parametric entry point of the ray's *unclipped* segment into this
    /// body, as t in (0, 1], or `None` if the segment misses.
    ///
    /// Solves |origin + t*v - C|^2 = r^2 with v = max_length * direction:
    /// A = |v|^2, B = 2 v.(origin - C), C = |origin - C|^2 - r^2.
    /// A negative discriminant and a degenerate A = 0 segment are both
    /// misses, never faults. The near root is preferred; t = 0 is rejected
    /// so a ray starting on the boundary keeps a positive length.
    pub fn clip_parameter(&self, ray: &Ray) -> Option<f32> {
        let v = ray.max_length * ray.direction;
        let oc = ray.origin - self.position;

        let a = v.length_squared();
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * v.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t1 = (-b - sqrt_d) / (2.0 * a);
        let t2 = (-b + sqrt_d) / (2.0 * a);

        for t in [t1, t2] {
            if t > 0.0 && t <= 1.0 {
                return Some(t);
            }
        }
        None
    }

    /// Distance from the ray origin to the clip point, if any.
    pub fn clip_length(&self, ray: &Ray) -> Option<f32> {
        self.clip_parameter(ray).map(|t| t * ray.max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_down() -> Ray {
        Ray::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 1.0),
            1000.0,
            Rgb::WHITE,
        )
    }

    fn absorber(x: f32, y: f32, r: f32) -> Absorber {
        Absorber::new(Vec2::new(x, y), r, Rgb::WHITE, false)
    }

    #[test]
    fn clips_at_near_boundary() {
        let a = absorber(100.0, 200.0, 20.0);
        let len = a.clip_length(&ray_down()).unwrap();
        assert!((len - 80.0).abs() < 1e-3);
    }

    #[test]
    fn miss_returns_none() {
        let a = absorber(300.0, 100.0, 20.0);
        assert!(a.clip_length(&ray_down()).is_none());
    }

    #[test]
    fn behind_origin_returns_none() {
        // Body sits opposite the ray direction.
        let a = absorber(100.0, 0.0, 20.0);
        assert!(a.clip_length(&ray_down()).is_none());
    }

    #[test]
    fn beyond_max_length_returns_none() {
        let a = absorber(100.0, 2000.0, 20.0);
        assert!(a.clip_length(&ray_down()).is_none());
    }

    #[test]
    fn origin_inside_body_clips_at_exit() {
        // Near root is negative, far root is the exit point.
        let a = absorber(100.0, 100.0, 50.0);
        let len = a.clip_length(&ray_down()).unwrap();
        assert!((len - 50.0).abs() < 1e-3);
    }

    #[test]
    fn tangent_ray_clips_at_touch_point() {
        // Grazing hit: discriminant is ~0, both roots coincide.
        let a = absorber(120.0, 200.0, 20.0);
        let len = a.clip_length(&ray_down()).unwrap();
        assert!((len - 100.0).abs() < 1e-2);
    }

    #[test]
    fn degenerate_direction_is_a_miss() {
        let mut r = ray_down();
        r.direction = Vec2::ZERO;
        let a = absorber(100.0, 200.0, 20.0);
        assert!(a.clip_length(&r).is_none());
    }
}
