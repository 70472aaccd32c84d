//! Bounding volumes
//!
//! Axis-aligned boxes and spheres. Both are plain values: every factory
//! returns a new volume and never aliases its inputs.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{GeometryError, GeometryResult};

/// Axis-aligned bounding box
///
/// Stored as center and half-size. `min`/`max` are derived, and setting
/// either one recomputes the center and extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    center: Vec3,
    extents: Vec3,
}

impl Aabb {
    /// Zero-sized box at the origin
    pub const ZERO: Self = Self {
        center: Vec3::ZERO,
        extents: Vec3::ZERO,
    };

    /// Create an AABB from center and half-extents.
    ///
    /// Negative extent components are folded to their absolute value.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Create an AABB from min and max corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "Aabb min {min} exceeds max {max}");
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// Create the smallest AABB containing every point.
    ///
    /// An empty slice is a caller bug and is reported as
    /// [`GeometryError::EmptyPointSet`].
    pub fn from_points(points: &[Vec3]) -> GeometryResult<Self> {
        let (first, rest) = points.split_first().ok_or(GeometryError::EmptyPointSet)?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Ok(Self::from_min_max(min, max))
    }

    /// Create the AABB enclosing a sphere
    pub fn from_sphere(sphere: &BoundingSphere) -> Self {
        Self::from_center_extents(sphere.center, Vec3::splat(sphere.radius))
    }

    /// Smallest AABB containing both boxes
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Get the half-extents of the AABB
    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// Get the full size of the AABB
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Move the minimum corner, keeping the current maximum
    pub fn set_min(&mut self, min: Vec3) {
        *self = Self::from_min_max(min, self.max());
    }

    /// Move the maximum corner, keeping the current minimum
    pub fn set_max(&mut self, max: Vec3) {
        *self = Self::from_min_max(self.min(), max);
    }

    /// Check if a point is inside the AABB (boundary included)
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.extents).all()
    }

    /// Check that both center and extents are finite
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.extents.is_finite()
    }

    /// The eight corners.
    ///
    /// Order is part of the contract (wireframe index buffers rely on it):
    /// the +Z face then the -Z face, each starting at the top-left and
    /// winding counter-clockwise when viewed along -Z.
    pub fn corners(&self) -> [Vec3; 8] {
        let min = self.min();
        let max = self.max();
        [
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, min.y, min.z),
        ]
    }

    /// Transform the AABB by an affine matrix.
    ///
    /// Returns the tightest box around the transformed box: the center is
    /// transformed and each new extent is the absolute basis columns weighted
    /// by the old extents.
    pub fn transform(&self, matrix: &Mat4) -> Aabb {
        let center = matrix.transform_point3(self.center);
        let e = self.extents;
        let extents = matrix.x_axis.truncate().abs() * e.x
            + matrix.y_axis.truncate().abs() * e.y
            + matrix.z_axis.truncate().abs() * e.z;
        Aabb { center, extents }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Center of the sphere
    pub center: Vec3,
    /// Radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a new bounding sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative sphere radius {radius}");
        Self { center, radius }
    }

    /// Create a unit sphere at origin
    pub fn unit() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }

    /// Sphere centered on the centroid of the points, reaching the farthest one.
    ///
    /// Not the minimal enclosing sphere, but cheap and always conservative.
    pub fn from_points(points: &[Vec3]) -> GeometryResult<Self> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPointSet);
        }

        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius_sq = points
            .iter()
            .map(|p| center.distance_squared(*p))
            .fold(0.0_f32, f32::max);

        Ok(Self {
            center,
            radius: radius_sq.sqrt(),
        })
    }

    /// Create a bounding sphere from an AABB
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            radius: aabb.extents().length(),
        }
    }

    /// Check if a point is inside the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Check that center and radius are finite
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_aabb_creation() {
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.center(), Vec3::splat(0.5));
        assert_eq!(aabb.extents(), Vec3::splat(0.5));
        assert_eq!(aabb.size(), Vec3::ONE);
        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_constructors_agree() {
        let from_center = Aabb::from_center_extents(Vec3::ZERO, Vec3::ONE);
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.5, 0.5),
            Vec3::new(0.0, -0.5, 0.5),
            Vec3::new(0.0, -1.0, 0.5),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let from_points = Aabb::from_points(&points).unwrap();
        let from_sphere = Aabb::from_sphere(&BoundingSphere::new(Vec3::ZERO, 1.0));

        assert_eq!(from_center, from_points);
        assert_eq!(from_center, from_sphere);
    }

    #[test]
    fn test_aabb_from_empty_points() {
        assert_eq!(Aabb::from_points(&[]), Err(GeometryError::EmptyPointSet));
    }

    #[test]
    fn test_aabb_from_single_point() {
        let p = Vec3::new(3.0, -2.0, 7.0);
        let aabb = Aabb::from_points(&[p]).unwrap();
        assert_eq!(aabb.center(), p);
        assert_eq!(aabb.extents(), Vec3::ZERO);
    }

    #[test]
    fn test_aabb_negative_extents_fold() {
        let aabb = Aabb::from_center_extents(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(aabb.extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_set_min_max() {
        let mut aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        aabb.set_max(Vec3::splat(3.0));
        assert_eq!(aabb.center(), Vec3::splat(1.5));
        assert_eq!(aabb.extents(), Vec3::splat(1.5));

        aabb.set_min(Vec3::splat(-1.0));
        assert_eq!(aabb.min(), Vec3::splat(-1.0));
        assert_eq!(aabb.max(), Vec3::splat(3.0));
        assert_eq!(aabb.center(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::splat(2.0)));
    }

    #[test]
    fn test_aabb_merge() {
        let a = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(2.0));
        let b = Aabb::from_min_max(Vec3::new(-2.0, -0.5, -2.0), Vec3::new(3.0, 0.0, 3.0));
        let merged = a.merge(&b);
        assert_eq!(merged.min(), Vec3::new(-2.0, -1.0, -2.0));
        assert_eq!(merged.max(), Vec3::new(3.0, 2.0, 3.0));
        // inputs untouched
        assert_eq!(a.max(), Vec3::splat(2.0));
    }

    #[test]
    fn test_aabb_corners_order() {
        let aabb = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(3.0));
        let corners = aabb.corners();
        assert_eq!(corners[0], Vec3::new(-1.0, 3.0, 3.0));
        assert_eq!(corners[1], Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(corners[2], Vec3::new(3.0, -1.0, 3.0));
        assert_eq!(corners[3], Vec3::new(-1.0, -1.0, 3.0));
        assert_eq!(corners[4], Vec3::new(-1.0, 3.0, -1.0));
        assert_eq!(corners[5], Vec3::new(3.0, 3.0, -1.0));
        assert_eq!(corners[6], Vec3::new(3.0, -1.0, -1.0));
        assert_eq!(corners[7], Vec3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_aabb_transform_scale_translate() {
        let aabb = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::ONE);
        let matrix = Mat4::from_cols_array(&[
            2.0, 0.0, 0.0, 0.0, //
            0.0, 2.0, 0.0, 0.0, //
            0.0, 0.0, 2.0, 0.0, //
            1.0, 0.5, -1.0, 1.0,
        ]);
        let transformed = aabb.transform(&matrix);
        assert!(transformed.min().abs_diff_eq(Vec3::new(-1.0, -1.5, -3.0), 1e-6));
        assert!(transformed.max().abs_diff_eq(Vec3::new(3.0, 2.5, 1.0), 1e-6));
    }

    #[test]
    fn test_aabb_transform_matches_corner_enumeration() {
        let aabb = Aabb::from_center_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 2.0));
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(1.5, 0.5, 2.0),
            Quat::from_axis_angle(Vec3::new(0.3, 1.0, -0.2).normalize(), 1.1),
            Vec3::new(-3.0, 4.0, 0.25),
        );

        let transformed = aabb.transform(&matrix);
        let mut expected_min = Vec3::splat(f32::INFINITY);
        let mut expected_max = Vec3::splat(f32::NEG_INFINITY);
        for corner in aabb.corners() {
            let p = matrix.transform_point3(corner);
            expected_min = expected_min.min(p);
            expected_max = expected_max.max(p);
        }

        assert!(transformed.min().abs_diff_eq(expected_min, 1e-4));
        assert!(transformed.max().abs_diff_eq(expected_max, 1e-4));
    }

    #[test]
    fn test_sphere_from_points() {
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, -2.0, 0.0),
        ];
        let sphere = BoundingSphere::from_points(&points).unwrap();
        assert_eq!(sphere.center, Vec3::ZERO);
        assert_eq!(sphere.radius, 2.0);
        for p in points {
            assert!(sphere.contains_point(p));
        }
        assert_eq!(BoundingSphere::from_points(&[]), Err(GeometryError::EmptyPointSet));
    }

    #[test]
    fn test_sphere_from_aabb() {
        let aabb = Aabb::from_min_max(Vec3::splat(-2.0), Vec3::splat(2.0));
        let sphere = BoundingSphere::from_aabb(&aabb);
        assert_eq!(sphere.center, Vec3::ZERO);
        assert!((sphere.radius - 12.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_is_finite() {
        assert!(Aabb::from_min_max(Vec3::ZERO, Vec3::ONE).is_finite());
        assert!(!Aabb::from_center_extents(Vec3::splat(f32::NAN), Vec3::ONE).is_finite());
        assert!(!BoundingSphere::new(Vec3::ZERO, f32::INFINITY).is_finite());
    }
}
