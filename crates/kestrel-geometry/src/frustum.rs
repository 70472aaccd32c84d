//! View frustum
//!
//! Six inward-facing planes extracted from a view-projection matrix. The
//! planes are only ever rebuilt together; there is no per-plane setter.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::bounds::{Aabb, BoundingSphere};
use crate::collision::{self, ContainmentType};
use crate::plane::Plane;

/// Frustum face, also the index of its plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrustumFace {
    Near = 0,
    Far = 1,
    Left = 2,
    Right = 3,
    Bottom = 4,
    Top = 5,
}

impl FrustumFace {
    /// All faces in plane order
    pub const ALL: [FrustumFace; 6] = [
        FrustumFace::Near,
        FrustumFace::Far,
        FrustumFace::Left,
        FrustumFace::Right,
        FrustumFace::Bottom,
        FrustumFace::Top,
    ];

    /// Face for a plane index, `None` past the sixth plane
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Frustum for culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Frustum with six degenerate planes; call [`Frustum::calculate_from_matrix`]
    /// before querying it.
    pub fn new() -> Self {
        Self {
            planes: [Plane::DEGENERATE; 6],
        }
    }

    /// Create a frustum from a view-projection matrix
    pub fn from_matrix(matrix: &Mat4) -> Self {
        Self {
            planes: frustum_planes_from(matrix),
        }
    }

    /// Rebuild all six planes from a new view-projection matrix
    pub fn calculate_from_matrix(&mut self, matrix: &Mat4) {
        self.planes = frustum_planes_from(matrix);
    }

    /// Plane of the given face
    #[inline]
    pub fn plane(&self, face: FrustumFace) -> &Plane {
        &self.planes[face as usize]
    }

    /// Plane by index, in [`FrustumFace`] order
    pub fn plane_at(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    /// All planes in [`FrustumFace`] order
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Check if a point is inside the frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.distance_to_point(point) >= 0.0)
    }

    /// Check if an AABB is at least partly inside (conservative)
    pub fn intersects_box(&self, aabb: &Aabb) -> bool {
        collision::intersects_frustum_box(self, aabb)
    }

    /// Check if a sphere is at least partly inside
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        collision::frustum_contains_sphere(self, sphere) != ContainmentType::Disjoint
    }

    /// Classify an AABB against the frustum
    pub fn contains_box(&self, aabb: &Aabb) -> ContainmentType {
        collision::frustum_contains_box(self, aabb)
    }

    /// Classify a sphere against the frustum
    pub fn contains_sphere(&self, sphere: &BoundingSphere) -> ContainmentType {
        collision::frustum_contains_sphere(self, sphere)
    }

    /// The eight corners, near face then far face, each ordered
    /// top-left, top-right, bottom-right, bottom-left.
    ///
    /// `None` when any three neighbouring planes fail to meet in a point,
    /// e.g. for an infinite far plane.
    pub fn corners(&self) -> Option<[Vec3; 8]> {
        use FrustumFace::*;

        let corner = |depth: FrustumFace, side: FrustumFace, edge: FrustumFace| {
            collision::intersection_point_three_planes(
                self.plane(depth),
                self.plane(side),
                self.plane(edge),
            )
        };

        Some([
            corner(Near, Left, Top)?,
            corner(Near, Right, Top)?,
            corner(Near, Right, Bottom)?,
            corner(Near, Left, Bottom)?,
            corner(Far, Left, Top)?,
            corner(Far, Right, Top)?,
            corner(Far, Right, Bottom)?,
            corner(Far, Left, Bottom)?,
        ])
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the six frustum planes from a view-projection matrix.
///
/// Gribb-Hartmann: each plane is the fourth matrix row plus or minus one of
/// the other rows, then normalized. Planes are returned in [`FrustumFace`]
/// order with normals pointing into the frustum.
pub fn frustum_planes_from(matrix: &Mat4) -> [Plane; 6] {
    let rows = [matrix.row(0), matrix.row(1), matrix.row(2), matrix.row(3)];

    let planes = [
        // Near
        Plane::from_coefficients(rows[3] + rows[2]),
        // Far
        Plane::from_coefficients(rows[3] - rows[2]),
        // Left
        Plane::from_coefficients(rows[3] + rows[0]),
        // Right
        Plane::from_coefficients(rows[3] - rows[0]),
        // Bottom
        Plane::from_coefficients(rows[3] + rows[1]),
        // Top
        Plane::from_coefficients(rows[3] - rows[1]),
    ];

    if planes.iter().any(Plane::is_degenerate) {
        log::debug!("view-projection matrix produced a degenerate frustum plane");
    }

    planes
}
