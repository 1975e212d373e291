//! Planar vector helpers.
//!
//! The play plane is XY with the forward axis along +Z, so the two cross products
//! with forward are the two in-plane perpendiculars of a vector.

use bevy::math::{Rot2, Vec2};

/// Below this squared length a vector is treated as having no direction.
pub const DIRECTION_EPSILON_SQ: f32 = 1e-8;

/// `v × forward`, i.e. `(v.x, v.y, 0) × (0, 0, 1)`.
#[inline]
pub fn cross_with_forward(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// `forward × v`, i.e. `(0, 0, 1) × (v.x, v.y, 0)`.
#[inline]
pub fn forward_cross(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// Returns 0 when either vector has no direction.
#[inline]
pub fn angle_between_degrees(a: Vec2, b: Vec2) -> f32 {
    if a.length_squared() < DIRECTION_EPSILON_SQ || b.length_squared() < DIRECTION_EPSILON_SQ {
        return 0.0;
    }
    a.angle_to(b).abs().to_degrees()
}

/// Rigidly rotate `point` around `pivot` by `radians`.
#[inline]
pub fn rotate_around(point: Vec2, pivot: Vec2, radians: f32) -> Vec2 {
    pivot + Rot2::radians(radians) * (point - pivot)
}

/// `-1`, `0` or `1`. Unlike `f32::signum`, zero maps to zero.
#[inline]
pub fn sign_or_zero(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
