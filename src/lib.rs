//! A CPU software renderer for point-sampled sphere clouds.
//!
//! This crate rasterizes thousands of overlapping sphere billboards into a
//! z-buffered pixel buffer, shaded flat or with a directional-light Phong
//! model, and animates the scene by rotating it around the Y axis. SDL2 is
//! used only for window management and display; all rendering is done on
//! the CPU, in parallel across spheres.
//!
//! # Quick Start
//!
//! ```ignore
//! use spherust::prelude::*;
//!
//! let mut scene = SphereData::from_file("sphere_sample_points.txt")?;
//! let fb = FrameBuffer::new(1024, 1024);
//!
//! fb.clear();
//! scene.render(&fb, 1.9);
//!
//! let mut frame = vec![0u32; 1024 * 1024];
//! fb.resolve_into(&mut frame);
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod light;
pub mod math;
pub mod scene;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use render::{FrameBuffer, ProjectedSphere, ShadingMode};
pub use scene::{LoadError, Sphere, SphereData};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use spherust::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::scene::{LoadError, Sphere, SphereData};

    // Rendering
    pub use crate::render::{FrameBuffer, ProjectedSphere, ShadingMode};

    // Lighting
    pub use crate::light::DirectionalLight;

    // Math
    pub use crate::math::vec3::Vec3;

    // Window & Display
    pub use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FlatShader, PhongShader, SphereShader};
}
