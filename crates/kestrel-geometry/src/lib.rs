//! # Kestrel Geometry
//!
//! Spatial reasoning core for the Kestrel engine.
//!
//! This crate provides the geometric data model and the queries the renderer,
//! picking and scene layers run every frame:
//! - **Math**: glam re-exports, the shared zero tolerance and scalar helpers
//! - **Bounds**: axis-aligned boxes and bounding spheres
//! - **Plane / Ray / Frustum**: primitive shapes and their construction
//! - **Collision**: stateless intersection and containment queries
//! - **Transform**: affine decomposition into translation, rotation and scale
//!
//! Every shape is a `Copy` value and no query allocates, so queries can run
//! per object, per frame, from any number of threads.

pub mod math;
pub mod bounds;
pub mod plane;
pub mod ray;
pub mod frustum;
pub mod collision;
pub mod transform;

pub use bounds::{Aabb, BoundingSphere};
pub use collision::{ContainmentType, PlaneIntersection};
pub use frustum::{Frustum, FrustumFace};
pub use math::ZERO_TOLERANCE;
pub use plane::Plane;
pub use ray::Ray;
pub use transform::{Decomposition, Transform};

use glam::Vec3;
use thiserror::Error;

/// Geometry errors
///
/// Only precondition violations surface here. Degenerate geometry is
/// reported through the query's own return value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Cannot build a bounding volume from an empty point set")]
    EmptyPointSet,

    #[error("Matrix has a degenerate scale axis: {0}")]
    DegenerateScale(Vec3),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
