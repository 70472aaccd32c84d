//! Math utilities
//!
//! Re-exports from glam plus the tolerance the geometry queries share.

pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Tolerance under which a floating point value is treated as zero.
///
/// Governs parallel-ray rejection, degenerate-denominator guards and
/// point-plane classification.
pub const ZERO_TOLERANCE: f32 = 1e-5;

/// Check whether a value is within [`ZERO_TOLERANCE`] of zero
#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= ZERO_TOLERANCE
}

/// Check whether two scalars are equal within [`ZERO_TOLERANCE`]
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= ZERO_TOLERANCE
}

/// Component-wise [`approx_eq`] for vectors
#[inline]
pub fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, ZERO_TOLERANCE)
}

/// Check whether two unit quaternions describe the same rotation.
///
/// `q` and `-q` rotate identically, so only the magnitude of the dot product
/// matters.
#[inline]
pub fn same_rotation(a: Quat, b: Quat, tolerance: f32) -> bool {
    a.dot(b).abs() >= 1.0 - tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_comparisons() {
        assert!(is_zero(ZERO_TOLERANCE * 0.5));
        assert!(!is_zero(ZERO_TOLERANCE * 2.0));
        assert!(approx_eq(1.0, 1.0 + ZERO_TOLERANCE * 0.9));
        assert!(!approx_eq(1.0, 1.001));
        assert!(vec3_approx_eq(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0 + ZERO_TOLERANCE * 0.9, 2.0, 3.0)
        ));
    }

    #[test]
    fn test_same_rotation_ignores_sign() {
        let q = Quat::from_rotation_y(0.7);
        assert!(same_rotation(q, -q, 1e-6));
        assert!(!same_rotation(q, Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_matrix_transpose_is_involution() {
        let m = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_matrix_double_inverse() {
        let m = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 0.5, 3.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.6),
            Vec3::new(-4.0, 1.0, 9.0),
        );
        assert!(m.inverse().inverse().abs_diff_eq(m, 1e-4));
    }
}
