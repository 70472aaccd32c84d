//! Scene files
//!
//! A JSON description of a camera and a set of named bounding volumes, used
//! to drive culling and picking from the command line.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use glam::{Mat4, Vec3};
use kestrel_geometry::{Aabb, BoundingSphere, ContainmentType, Frustum, Ray, Transform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Camera the frustum is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Camera {
    /// Explicit column-major view-projection matrix
    Matrix(Mat4),
    /// Right-handed perspective looking from `eye` at `target`
    Perspective {
        fovy_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
        eye: Vec3,
        target: Vec3,
        #[serde(default = "default_up")]
        up: Vec3,
    },
}

fn default_up() -> Vec3 {
    Vec3::Y
}

impl Camera {
    /// View-projection matrix (OpenGL depth range)
    pub fn view_projection(&self) -> Mat4 {
        match *self {
            Camera::Matrix(matrix) => matrix,
            Camera::Perspective {
                fovy_degrees,
                aspect,
                near,
                far,
                eye,
                target,
                up,
            } => {
                let projection = Mat4::perspective_rh_gl(fovy_degrees.to_radians(), aspect, near, far);
                projection * Mat4::look_at_rh(eye, target, up)
            }
        }
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(&self.view_projection())
    }
}

/// Named box, optionally placed by a transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default)]
    pub transform: Option<Transform>,
}

impl SceneBox {
    /// World-space bounds
    pub fn bounds(&self) -> Aabb {
        let local = Aabb::from_min_max(self.min.min(self.max), self.max.max(self.min));
        match &self.transform {
            Some(transform) => local.transform(&transform.to_matrix()),
            None => local,
        }
    }
}

/// Named sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSphere {
    pub name: String,
    pub center: Vec3,
    pub radius: f32,
}

impl SceneSphere {
    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.center, self.radius)
    }
}

/// Scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    #[serde(default)]
    pub boxes: Vec<SceneBox>,
    #[serde(default)]
    pub spheres: Vec<SceneSphere>,
}

/// Result of culling a single object
#[derive(Debug, Clone, PartialEq)]
pub struct CullResult {
    pub name: String,
    pub containment: ContainmentType,
}

/// Nearest object along a ray
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub name: String,
    pub distance: f32,
}

/// Objects per containment class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullSummary {
    pub contains: usize,
    pub intersects: usize,
    pub disjoint: usize,
}

impl CullSummary {
    pub fn from_results(results: &[CullResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.containment {
                ContainmentType::Contains => summary.contains += 1,
                ContainmentType::Intersects => summary.intersects += 1,
                ContainmentType::Disjoint => summary.disjoint += 1,
            }
            summary
        })
    }

    /// Objects that would be drawn
    pub fn visible(&self) -> usize {
        self.contains + self.intersects
    }
}

impl Scene {
    /// Load a scene from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    /// Parse a scene from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(text)?;
        for sphere in &scene.spheres {
            ensure!(
                sphere.radius >= 0.0,
                "Sphere '{}' has invalid radius {}",
                sphere.name,
                sphere.radius
            );
        }
        log::debug!(
            "Loaded scene with {} boxes and {} spheres",
            scene.boxes.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }

    /// Classify every object against the camera frustum, boxes first, in file order
    pub fn cull(&self) -> Vec<CullResult> {
        let frustum = self.camera.frustum();

        let boxes = self.boxes.par_iter().map(|b| CullResult {
            name: b.name.clone(),
            containment: frustum.contains_box(&b.bounds()),
        });
        let spheres = self.spheres.par_iter().map(|s| CullResult {
            name: s.name.clone(),
            containment: frustum.contains_sphere(&s.bounds()),
        });

        boxes.chain(spheres).collect()
    }

    /// Nearest object hit by the ray
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let boxes = self
            .boxes
            .par_iter()
            .filter_map(|b| ray.intersect_aabb(&b.bounds()).map(|t| (b.name.as_str(), t)));
        let spheres = self
            .spheres
            .par_iter()
            .filter_map(|s| ray.intersect_sphere(&s.bounds()).map(|t| (s.name.as_str(), t)));

        boxes
            .chain(spheres)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, distance)| PickHit {
                name: name.to_string(),
                distance,
            })
    }
}
