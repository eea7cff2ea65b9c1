//! Scene store: sphere records and the per-frame projection pass.
//!
//! Sphere records are immutable after load. Each frame, `render` recomputes
//! every sphere's depth along the rotated viewing axis, sorts back-to-front,
//! projects the survivors to screen space, and hands them to the rasterizer.
//! All three steps run as parallel loops; the framebuffer performs its own
//! synchronization, so elements can rasterize in any interleaving.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use crate::math::vec3::Vec3;
use crate::render::{FrameBuffer, ProjectedSphere};

/// File coordinates are recentered then scaled into world units.
const COORD_SCALE: f32 = 0.01;
const Y_OFFSET: f32 = -60.0;
const Z_OFFSET: f32 = -50.0;

/// Derived radii fall in `[RADIUS_BASE, RADIUS_BASE + RADIUS_SPREAD)`
/// before world scaling.
const RADIUS_BASE: f32 = 5.0;
const RADIUS_SPREAD: f32 = 5.0;
const RADIUS_SCALE: f32 = 0.004;

/// Fixed seed for derived attributes: repeated loads of the same file
/// produce the same spheres.
const ATTRIBUTE_SEED: u64 = 1;

/// Camera sits this far back along the viewing axis.
const CAMERA_OFFSET: f32 = 1.5;

/// Spheres projecting closer than this are dropped for the frame.
const NEAR_EPSILON: f32 = 0.001;

/// Errors from loading a scene file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
}

/// One sphere record. Immutable after load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    /// Packed `0x00RRGGBB` base color.
    pub color: u32,
}

/// Per-frame derived state: a sphere's depth along the viewing axis.
#[derive(Clone, Copy, Debug)]
struct SceneElement {
    sphere: usize,
    view_depth: f32,
}

/// Owns the scene's sphere records and drives the per-frame render pass.
pub struct SphereData {
    spheres: Vec<Sphere>,
    elements: Vec<SceneElement>,
}

impl SphereData {
    /// Load a scene from a file of whitespace-separated `x y z` triples,
    /// one sphere per line.
    ///
    /// Ingestion stops silently at the first line that yields fewer than
    /// three floats; everything parsed before it stays usable.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path.as_ref())?;
        let spheres = parse_spheres(&text);
        log::debug!(
            "scene file {} yielded {} spheres",
            path.as_ref().display(),
            spheres.len()
        );
        Ok(Self::from_spheres(spheres))
    }

    /// Build a scene from pre-constructed sphere records.
    pub fn from_spheres(spheres: Vec<Sphere>) -> Self {
        let elements = (0..spheres.len())
            .map(|sphere| SceneElement {
                sphere,
                view_depth: 0.0,
            })
            .collect();
        Self { spheres, elements }
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Render the scene into `fb` at the given rotation angle (radians).
    ///
    /// The angle is not wrapped; the rotation transform is 2π-periodic, so
    /// any real value is valid.
    pub fn render(&mut self, fb: &FrameBuffer, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let spheres = &self.spheres;

        // Depth along the rotated viewing axis. Each element owns its own
        // depth slot; sphere data is read-only here.
        self.elements.par_iter_mut().for_each(|element| {
            let position = spheres[element.sphere].position;
            element.view_depth = position.x * cos + position.z * sin;
        });

        // Back-to-front. With the z-buffer in place this order is a
        // heuristic, not a correctness requirement.
        self.elements
            .par_sort_unstable_by(|a, b| b.view_depth.total_cmp(&a.view_depth));

        self.elements.par_iter().for_each(|element| {
            let sphere = &spheres[element.sphere];
            let cam_x = sphere.position.x * sin - sphere.position.z * cos;
            let cam_y = sphere.position.y;
            let cam_z = element.view_depth + CAMERA_OFFSET;

            // At or behind the near threshold: skip for this frame only.
            if cam_z < NEAR_EPSILON {
                return;
            }

            let projected = ProjectedSphere {
                screen_x: cam_x / cam_z,
                screen_y: cam_y / cam_z,
                screen_z: cam_z,
                screen_radius: sphere.radius / cam_z,
                color: sphere.color,
            };

            if !fb.is_circle_on_screen(
                projected.screen_x,
                projected.screen_y,
                projected.screen_radius,
            ) {
                return;
            }

            fb.render_sphere(&projected);
        });
    }
}

/// Parse sphere records from scene file text.
///
/// Each accepted line contributes its coordinates; radius and base color are
/// derived from a fixed-seed RNG so the mapping from file to scene is
/// deterministic.
fn parse_spheres(text: &str) -> Vec<Sphere> {
    let mut rng = StdRng::seed_from_u64(ATTRIBUTE_SEED);
    let mut spheres = Vec::new();

    for line in text.lines() {
        let mut fields = line.split_whitespace().map(str::parse::<f32>);
        let (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) =
            (fields.next(), fields.next(), fields.next())
        else {
            break;
        };

        let position = Vec3::new(
            x * COORD_SCALE,
            (y + Y_OFFSET) * COORD_SCALE,
            (z + Z_OFFSET) * COORD_SCALE,
        );
        let radius =
            (RADIUS_BASE + RADIUS_SPREAD * rng.random_range(0..1024) as f32 / 1024.0) * RADIUS_SCALE;

        let r = u32::from(rng.random::<u8>());
        let g = u32::from(rng.random::<u8>());
        let b = u32::from(rng.random::<u8>());
        let color = (r << 16) | (g << 8) | b;

        spheres.push(Sphere {
            position,
            radius,
            color,
        });
    }

    spheres
}
