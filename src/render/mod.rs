//! Sphere rasterization core.
//!
//! The rasterizer draws z-buffered sphere billboards: each projected sphere
//! is scan-converted as a screen-space disc, depth-tested per pixel, and
//! shaded through a pluggable [`SphereShader`]. Draw order across spheres is
//! irrelevant to the final image; the depth buffer arbitrates overlaps.

mod framebuffer;
mod shader;
mod templates;

pub use framebuffer::FrameBuffer;
pub use shader::{FlatShader, PhongShader, SphereShader};

/// A sphere projected into screen space, ready for rasterization.
///
/// Produced by the scene store once per visible sphere per frame and consumed
/// by [`FrameBuffer::render_sphere`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedSphere {
    /// Horizontal screen coordinate in `[-1, 1]` for on-screen centers.
    pub screen_x: f32,
    /// Vertical screen coordinate, same convention as `screen_x`.
    pub screen_y: f32,
    /// Distance-like depth, strictly positive.
    pub screen_z: f32,
    /// Projected radius; `2.0` spans the full frame.
    pub screen_radius: f32,
    /// Packed `0x00RRGGBB` base color.
    pub color: u32,
}

/// Available shading strategies.
///
/// The set is closed: a cheap flat fill and a directional-light Phong model.
/// Can be changed between frames via `FrameBuffer::set_shading_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Every covered pixel gets the sphere's base color.
    Flat,
    /// Diffuse + specular under the frame's directional light, with
    /// back-facing pixels left uncovered.
    #[default]
    Phong,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}
