//! Interpolation paths for drone flight between formations.

use glam::{Vec3, Vec4};

/// Peak lateral deviation of the curved path, in world units.
const ARC_MAGNITUDE: f32 = 20.0;

/// Component-wise linear interpolation between two colors.
#[inline]
#[must_use]
pub fn lerp_color(start: Vec4, end: Vec4, t: f32) -> Vec4 {
    start + (end - start) * t
}

/// Deterministic per-drone direction used to pick the arc plane.
///
/// Trig of the scaled index stands in for a random source so that repeated
/// runs, and tests, see identical flight paths.
#[inline]
#[must_use]
pub fn pseudo_direction(index: usize) -> Vec3 {
    let i = index as f32;
    Vec3::new((i * 2.3).sin(), (i * 5.1).cos(), (i * 1.7).sin())
}

/// Interpolate between `start` and `end` along a gently curved path.
///
/// The result is the straight-line lerp plus a lateral deviation
/// perpendicular to the path, strongest near the middle of the flight and
/// vanishing at both endpoints (`sin(0) = sin(pi) = 0`), so `t = 0` yields
/// exactly `start` and `t = 1` exactly `end`. The arc plane is chosen from
/// [`pseudo_direction`], falling back to the world axes when that direction
/// is near-parallel to the path. Drones arc past each other instead of
/// flying straight lines through the formation.
#[must_use]
pub fn natural_lerp(start: Vec3, end: Vec3, t: f32, index: usize) -> Vec3 {
    let mut position = start.lerp(end, t);
    if t > 0.01 && t < 0.99 {
        let magnitude = ARC_MAGNITUDE * (1.0 - (2.0 * t - 1.0).powi(4));
        let path = end - start;

        let mut perpendicular =
            path.cross(pseudo_direction(index)).normalize_or_zero();
        if perpendicular.length_squared() < 0.1 {
            perpendicular = path.cross(Vec3::X).normalize_or_zero();
            if perpendicular.length_squared() < 0.1 {
                perpendicular = path.cross(Vec3::Y).normalize_or_zero();
            }
        }

        position +=
            perpendicular * magnitude * (t * std::f32::consts::PI).sin();
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let end = Vec3::new(-40.0, 7.0, 12.0);
        for index in [0, 1, 17, 2499] {
            assert_eq!(natural_lerp(start, end, 0.0, index), start);
            assert_eq!(natural_lerp(start, end, 1.0, index), end);
        }
    }

    #[test]
    fn midpoint_deviates_from_the_straight_line() {
        let start = Vec3::ZERO;
        let end = Vec3::new(100.0, 0.0, 0.0);
        let straight = start.lerp(end, 0.5);
        let curved = natural_lerp(start, end, 0.5, 3);
        let deviation = (curved - straight).length();
        assert!(deviation > 1.0, "expected an arc, got {deviation}");
        // The deviation is perpendicular to the path, so progress along the
        // path axis is unaffected.
        assert!((curved.x - straight.x).abs() < 1e-3);
    }

    #[test]
    fn deviation_is_bounded_by_magnitude() {
        let start = Vec3::new(-30.0, 5.0, 9.0);
        let end = Vec3::new(60.0, -15.0, 2.0);
        for i in 0..50 {
            for step in 1..100 {
                let t = step as f32 / 100.0;
                let deviation = (natural_lerp(start, end, t, i)
                    - start.lerp(end, t))
                .length();
                assert!(deviation <= ARC_MAGNITUDE + 1e-3);
            }
        }
    }

    #[test]
    fn is_deterministic_per_index() {
        let start = Vec3::ZERO;
        let end = Vec3::new(10.0, 20.0, 30.0);
        let a = natural_lerp(start, end, 0.37, 42);
        let b = natural_lerp(start, end, 0.37, 42);
        assert_eq!(a, b);
        // Different drones take different arcs.
        let c = natural_lerp(start, end, 0.37, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn degenerate_path_does_not_produce_nan() {
        // Zero-length path: the perpendicular falls back through the world
        // axes and ends up zero, leaving the lerp untouched.
        let p = Vec3::new(4.0, 5.0, 6.0);
        let result = natural_lerp(p, p, 0.5, 7);
        assert!(result.is_finite());
        assert_eq!(result, p);
    }

    #[test]
    fn lerp_color_interpolates_componentwise() {
        let a = Vec4::new(0.0, 0.2, 1.0, 0.0);
        let b = Vec4::new(1.0, 0.4, 0.0, 1.0);
        let mid = lerp_color(a, b, 0.5);
        assert_eq!(mid, Vec4::new(0.5, 0.3, 0.5, 0.5));
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }
}
