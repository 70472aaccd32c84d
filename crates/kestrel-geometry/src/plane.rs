//! Planes in Hessian normal form

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A plane in 3D space (`dot(normal, p) + distance = 0`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Normal vector, unit length unless the plane is degenerate
    pub normal: Vec3,
    /// Signed distance term; the plane passes through `-normal * distance`
    pub distance: f32,
}

impl Plane {
    /// Plane with a zero normal, used as the degenerate result
    pub const DEGENERATE: Self = Self {
        normal: Vec3::ZERO,
        distance: 0.0,
    };

    /// Create a plane from raw coefficients. The normal is used as given.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Create a plane from a normal and a point lying on it
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Create the plane through three points, wound counter-clockwise around
    /// the normal.
    ///
    /// Collinear or coincident points yield [`Plane::DEGENERATE`].
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let cross = (p1 - p0).cross(p2 - p0);
        let length = cross.length();
        if length <= f32::MIN_POSITIVE {
            log::trace!("collinear plane points {p0} {p1} {p2}");
            return Self::DEGENERATE;
        }

        let normal = cross / length;
        Self {
            normal,
            distance: -normal.dot(p0),
        }
    }

    /// Create a plane from `(a, b, c, d)` coefficients, normalizing them
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        Self::new(coefficients.truncate(), coefficients.w).normalized()
    }

    /// Scale normal and distance so the normal has unit length.
    ///
    /// A zero normal stays degenerate.
    pub fn normalized(&self) -> Self {
        let length = self.normal.length();
        if length > 0.0 {
            Self {
                normal: self.normal / length,
                distance: self.distance / length,
            }
        } else {
            Self::DEGENERATE
        }
    }

    /// Whether the normal is zero (no orientation)
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// Get the signed distance from a point to the plane
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Same plane facing the other way
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::DEGENERATE
    }
}
