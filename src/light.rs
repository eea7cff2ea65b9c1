//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// All shading in a frame uses a single light. The light is passed explicitly
/// into shader construction rather than held as global state, so concurrent
/// shading calls stay pure and deterministic.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    /// The normalized light direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, -0.5, 0.7))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_normalizes_direction() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(light.direction().z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn default_light_is_unit_length() {
        let light = DirectionalLight::default();
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);
        assert!(light.direction().x > 0.0);
        assert!(light.direction().y < 0.0);
    }
}
