//! Affine transforms
//!
//! Composition and decomposition of `T * R * S` matrices.

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{GeometryError, GeometryResult};

/// Smallest positive (subnormal) `f32`
const LEAST_NONZERO_MAGNITUDE: f32 = f32::from_bits(1);

/// Result of [`decompose`]
///
/// `translation` and `scale` are filled in even when `success` is false;
/// `rotation` is then the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub success: bool,
}

/// Decompose an affine matrix into translation, rotation and scale.
///
/// Each scale component is the length of its basis column, negated when the
/// product of that column's four entries is negative. Only a zero scale
/// magnitude, i.e. one below the smallest subnormal float, fails the
/// decomposition.
pub fn decompose(matrix: &Mat4) -> Decomposition {
    let translation = extract_translation(matrix);

    let columns = [matrix.x_axis, matrix.y_axis, matrix.z_axis];
    let signs = columns.map(|c| if (c.x * c.y * c.z * c.w) < 0.0 { -1.0 } else { 1.0 });
    let scale = Vec3::new(
        signs[0] * columns[0].truncate().length(),
        signs[1] * columns[1].truncate().length(),
        signs[2] * columns[2].truncate().length(),
    );

    if scale.abs().min_element() < LEAST_NONZERO_MAGNITUDE {
        log::debug!("degenerate scale {scale} in matrix decomposition");
        return Decomposition {
            translation,
            rotation: Quat::IDENTITY,
            scale,
            success: false,
        };
    }

    let basis = Mat3::from_cols(
        columns[0].truncate() / scale.x,
        columns[1].truncate() / scale.y,
        columns[2].truncate() / scale.z,
    );

    Decomposition {
        translation,
        rotation: Quat::from_mat3(&basis).normalize(),
        scale,
        success: true,
    }
}

/// [`decompose`] that reports a degenerate axis as an error
pub fn try_decompose(matrix: &Mat4) -> GeometryResult<(Vec3, Quat, Vec3)> {
    let Decomposition {
        translation,
        rotation,
        scale,
        success,
    } = decompose(matrix);

    if success {
        Ok((translation, rotation, scale))
    } else {
        Err(GeometryError::DegenerateScale(scale))
    }
}

/// Compose `T * R * S`
pub fn affine_transformation(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Translation part of an affine matrix
#[inline]
pub fn extract_translation(matrix: &Mat4) -> Vec3 {
    matrix.w_axis.truncate()
}

/// Unsigned per-axis scale of an affine matrix
pub fn extract_scaling(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        matrix.x_axis.truncate().length(),
        matrix.y_axis.truncate().length(),
        matrix.z_axis.truncate().length(),
    )
}

/// Translation, rotation and scale as separate values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub position: Vec3,
    /// Rotation
    pub rotation: Quat,
    /// Scale
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform from all components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Recover a transform from an affine matrix
    pub fn from_matrix(matrix: &Mat4) -> GeometryResult<Self> {
        let (position, rotation, scale) = try_decompose(matrix)?;
        Ok(Self {
            position,
            rotation,
            scale,
        })
    }

    /// Get the transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        affine_transformation(self.scale, self.rotation, self.position)
    }

    /// Interpolate between two transforms
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        Transform {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
