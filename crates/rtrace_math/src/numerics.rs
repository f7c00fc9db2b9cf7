//! Shared numeric helpers and tolerances.

use crate::{Mat3, Vec3};

/// Triangle determinants closer to zero than this are treated as a miss
/// (ray parallel to the triangle plane, or a degenerate triangle).
pub const DETERMINANT_EPSILON: f64 = 1e-6;

/// Offset applied along a secondary ray's direction so it does not
/// re-intersect the surface it starts on.
pub const SURFACE_EPSILON: f64 = 1e-7;

/// Determinant of the 3x3 matrix with the given columns.
#[inline]
pub fn determinant(col1: Vec3, col2: Vec3, col3: Vec3) -> f64 {
    Mat3::from_cols(col1, col2, col3).determinant()
}

/// Convert a color channel to an 8-bit value.
///
/// The value is truncated toward zero and clamped into [0, 255]. NaN maps to 0.
#[inline]
pub fn clamp_channel(value: f64) -> u8 {
    // `as` saturates at the u8 bounds and sends NaN to zero
    value as u8
}
