//! Rays for picking and raycasting

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::{Aabb, BoundingSphere};
use crate::collision;
use crate::plane::Plane;

/// Ray for raycasting
///
/// The direction is kept exactly as given. Hit distances are parametric,
/// so with a non-unit direction they are measured in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get a point along the ray at parameter t
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the plane, if hit
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f32> {
        collision::intersect_ray_plane(self, plane)
    }

    /// Distance to the box, if hit. Rays starting inside report 0.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        collision::intersect_ray_box(self, aabb)
    }

    /// Distance to the sphere, if hit. Rays starting inside report 0.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        collision::intersect_ray_sphere(self, sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_keeps_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(ray.point_at(1.5), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);

        let t = ray.intersect_aabb(&aabb).unwrap();
        let hit_point = ray.point_at(t);
        assert!((hit_point.x - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_sphere_intersection() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);

        assert_eq!(ray.intersect_sphere(&sphere), Some(4.0));
    }

    #[test]
    fn test_ray_plane_intersection() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let plane = Plane::new(Vec3::Y, -5.0);
        assert_eq!(ray.intersect_plane(&plane), Some(5.0));
    }
}
