//! Intersection and containment queries
//!
//! Stateless pairwise tests between the primitive shapes. Nothing here
//! mutates its inputs or allocates, so every query is safe to run per object
//! per frame from any thread.
//!
//! Ray queries report the parametric hit distance, `None` meaning no hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::{Aabb, BoundingSphere};
use crate::frustum::Frustum;
use crate::math::{ZERO_TOLERANCE, is_zero};
use crate::plane::Plane;
use crate::ray::Ray;

/// Side of a plane a shape lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneIntersection {
    /// Entirely in the half-space the normal points into
    Front,
    /// Entirely behind the plane
    Back,
    /// Touching or crossing the plane
    Intersecting,
}

/// How a shape relates to a bounding region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainmentType {
    /// Fully inside
    Contains,
    /// Partly inside
    Intersects,
    /// Fully outside
    Disjoint,
}

/// Corner of the box farthest along the normal (`n >= 0` picks max)
#[inline]
fn front_corner(normal: Vec3, aabb: &Aabb) -> Vec3 {
    let (min, max) = (aabb.min(), aabb.max());
    Vec3::select(normal.cmpge(Vec3::ZERO), max, min)
}

/// Corner of the box farthest against the normal
#[inline]
fn back_corner(normal: Vec3, aabb: &Aabb) -> Vec3 {
    let (min, max) = (aabb.min(), aabb.max());
    Vec3::select(normal.cmpge(Vec3::ZERO), min, max)
}

/// Signed distance from a point to a plane, positive in front
#[inline]
pub fn distance_plane_point(plane: &Plane, point: Vec3) -> f32 {
    plane.distance_to_point(point)
}

/// Classify a point against a plane.
///
/// Points within [`ZERO_TOLERANCE`] of the plane are `Intersecting`.
pub fn classify_plane_point(plane: &Plane, point: Vec3) -> PlaneIntersection {
    let distance = distance_plane_point(plane, point);
    if distance > ZERO_TOLERANCE {
        PlaneIntersection::Front
    } else if distance < -ZERO_TOLERANCE {
        PlaneIntersection::Back
    } else {
        PlaneIntersection::Intersecting
    }
}

/// Classify an AABB against a plane.
///
/// Only the two corners extreme along the normal are tested, which is exact
/// for axis-aligned boxes.
pub fn classify_plane_box(plane: &Plane, aabb: &Aabb) -> PlaneIntersection {
    if distance_plane_point(plane, front_corner(plane.normal, aabb)) < 0.0 {
        return PlaneIntersection::Back;
    }

    if distance_plane_point(plane, back_corner(plane.normal, aabb)) > 0.0 {
        return PlaneIntersection::Front;
    }

    PlaneIntersection::Intersecting
}

/// Classify a sphere against a plane
pub fn classify_plane_sphere(plane: &Plane, sphere: &BoundingSphere) -> PlaneIntersection {
    let distance = distance_plane_point(plane, sphere.center);
    if distance > sphere.radius {
        PlaneIntersection::Front
    } else if distance < -sphere.radius {
        PlaneIntersection::Back
    } else {
        PlaneIntersection::Intersecting
    }
}

/// Ray against plane.
///
/// Misses when the ray runs parallel to the plane or the plane lies behind
/// the origin. A hit within tolerance behind the origin is reported at 0.
pub fn intersect_ray_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let dir = plane.normal.dot(ray.direction);
    if dir.abs() < ZERO_TOLERANCE {
        return None;
    }

    let position = plane.normal.dot(ray.origin);
    let distance = (-plane.distance - position) / dir;

    if distance < 0.0 {
        if distance < -ZERO_TOLERANCE {
            return None;
        }
        return Some(0.0);
    }

    Some(distance)
}

/// Ray against AABB using the slab method.
///
/// The entry distance starts at 0, so a ray whose origin is inside the box
/// reports 0 rather than its (negative) entry point.
pub fn intersect_ray_box(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let min = aabb.min().to_array();
    let max = aabb.max().to_array();
    let origin = ray.origin.to_array();
    let direction = ray.direction.to_array();

    let mut t_near = 0.0_f32;
    let mut t_far = f32::MAX;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);

        if d.abs() < ZERO_TOLERANCE {
            // parallel to this slab: must already be between its planes
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inverse = 1.0 / d;
        let mut t1 = (min[axis] - o) * inverse;
        let mut t2 = (max[axis] - o) * inverse;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_near = t_near.max(t1);
        t_far = t_far.min(t2);

        if t_near > t_far {
            return None;
        }
    }

    Some(t_near)
}

/// Ray against sphere.
///
/// Solves `|O + tD - C| = r` for the nearest root. A ray starting inside the
/// sphere reports 0.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &BoundingSphere) -> Option<f32> {
    let m = ray.origin - sphere.center;
    let a = ray.direction.length_squared();
    let b = m.dot(ray.direction);
    let c = m.length_squared() - sphere.radius * sphere.radius;

    // origin outside and pointing away
    if b > 0.0 && c > 0.0 {
        return None;
    }

    if a == 0.0 {
        return (c <= 0.0).then_some(0.0);
    }

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = (-b - discriminant.sqrt()) / a;
    Some(distance.max(0.0))
}

/// Check whether two AABBs overlap (touching counts)
pub fn intersects_box_box(a: &Aabb, b: &Aabb) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
}

/// Check whether two spheres overlap (touching does not count)
pub fn intersects_sphere_sphere(a: &BoundingSphere, b: &BoundingSphere) -> bool {
    let radius_sum = a.radius + b.radius;
    a.center.distance_squared(b.center) < radius_sum * radius_sum
}

/// Check whether a sphere and an AABB overlap
pub fn intersects_sphere_box(sphere: &BoundingSphere, aabb: &Aabb) -> bool {
    // Find the closest point on the AABB to the sphere center
    let closest = sphere.center.clamp(aabb.min(), aabb.max());
    sphere.center.distance_squared(closest) <= sphere.radius * sphere.radius
}

/// Check whether an AABB is at least partly inside the frustum.
///
/// Rejects only when a single plane has the whole box behind it, so boxes
/// near the frustum's edges can be reported as visible while outside.
pub fn intersects_frustum_box(frustum: &Frustum, aabb: &Aabb) -> bool {
    frustum.planes().iter().all(|plane| {
        let corner = front_corner(plane.normal, aabb);
        plane.normal.dot(corner) >= -plane.distance
    })
}

/// Classify an AABB against the frustum.
///
/// Corners are compared exactly against each plane, without tolerance.
pub fn frustum_contains_box(frustum: &Frustum, aabb: &Aabb) -> ContainmentType {
    let mut result = ContainmentType::Contains;

    for plane in frustum.planes() {
        let front = front_corner(plane.normal, aabb);
        if distance_plane_point(plane, front) < 0.0 {
            return ContainmentType::Disjoint;
        }

        let back = back_corner(plane.normal, aabb);
        if distance_plane_point(plane, back) < 0.0 {
            result = ContainmentType::Intersects;
        }
    }

    result
}

/// Classify a sphere against the frustum.
///
/// Scanning stops at the first plane the sphere straddles, so a sphere that
/// straddles one plane and lies behind a later one reports `Intersects`.
pub fn frustum_contains_sphere(frustum: &Frustum, sphere: &BoundingSphere) -> ContainmentType {
    for plane in frustum.planes() {
        match classify_plane_sphere(plane, sphere) {
            PlaneIntersection::Back => return ContainmentType::Disjoint,
            PlaneIntersection::Intersecting => return ContainmentType::Intersects,
            PlaneIntersection::Front => {}
        }
    }

    ContainmentType::Contains
}

/// Point shared by three planes, `None` if they do not meet in one point
pub fn intersection_point_three_planes(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<Vec3> {
    let n23 = p2.normal.cross(p3.normal);
    let denominator = p1.normal.dot(n23);
    if is_zero(denominator) {
        return None;
    }

    let n31 = p3.normal.cross(p1.normal);
    let n12 = p1.normal.cross(p2.normal);
    Some(-(n23 * p1.distance + n31 * p2.distance + n12 * p3.distance) / denominator)
}
