//! # Kestrel CLI
//!
//! Command-line diagnostics for the Kestrel geometry core.
//!
//! ## Commands
//! - `cull` - Classify every object in a scene against its camera frustum
//! - `pick` - Find the nearest object hit by a ray
//! - `decompose` - Split a matrix into translation, rotation and scale

pub mod scene;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};
use kestrel_geometry::Ray;
use kestrel_geometry::transform::decompose;

use crate::scene::{CullSummary, Scene};

/// Kestrel geometry CLI
#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify scene objects against the camera frustum
    Cull {
        /// Scene file (JSON)
        scene: PathBuf,
    },

    /// Find the nearest scene object along a ray
    Pick {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Ray origin as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,

        /// Ray direction as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: Vec3,
    },

    /// Decompose a column-major 4x4 matrix
    Decompose {
        /// Sixteen matrix entries, column by column
        #[arg(num_args = 16, required = true, allow_negative_numbers = true)]
        matrix: Vec<f32>,
    },
}

/// Parse `x,y,z` into a vector
pub fn parse_vec3(text: &str) -> std::result::Result<Vec3, String> {
    let parts = text
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid component in '{text}': {e}"))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated values, got '{text}'")),
    }
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::Cull { scene } => {
            let scene = Scene::load(&scene)?;
            let results = scene.cull();

            for result in &results {
                log::info!("  {:<24} {:?}", result.name, result.containment);
            }

            let summary = CullSummary::from_results(&results);
            log::info!(
                "{} of {} objects visible ({} inside, {} partial, {} culled)",
                summary.visible(),
                results.len(),
                summary.contains,
                summary.intersects,
                summary.disjoint
            );
        }

        Commands::Pick { scene, origin, direction } => {
            if direction == Vec3::ZERO {
                bail!("Ray direction must be non-zero");
            }

            let scene = Scene::load(&scene)?;
            let ray = Ray::new(origin, direction);
            match scene.pick(&ray) {
                Some(hit) => log::info!("Hit '{}' at t = {}", hit.name, hit.distance),
                None => log::info!("No hit"),
            }
        }

        Commands::Decompose { matrix } => {
            let Ok(entries) = <[f32; 16]>::try_from(matrix.as_slice()) else {
                bail!("Expected 16 matrix entries, got {}", matrix.len());
            };

            let d = decompose(&Mat4::from_cols_array(&entries));
            log::info!("Translation: {}", d.translation);
            log::info!("Rotation:    {}", d.rotation);
            log::info!("Scale:       {}", d.scale);
            if !d.success {
                bail!("Matrix has a degenerate scale axis: {}", d.scale);
            }
        }
    }

    Ok(())
}
