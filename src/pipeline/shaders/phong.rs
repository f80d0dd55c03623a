use crate::core::color::Color;
use crate::scene::light::Light;
use crate::scene::material::Material;
use nalgebra::{Point3, Vector3};

/// Blinn-Phong point-light shading shared by all three interpolation policies.
///
/// Results are not clamped; 8-bit conversion does that at the very end.
#[derive(Debug, Clone)]
pub struct PhongShader<'a> {
    pub lights: &'a [Light],
    pub eye: Point3<f32>,
    pub ambient_light: Color,
    /// Clamp `dot(n, l)` at zero so back-lit points receive no negative diffuse term.
    pub clamp_diffuse: bool,
}

impl<'a> PhongShader<'a> {
    pub fn new(lights: &'a [Light], eye: Point3<f32>, ambient_light: Color) -> Self {
        Self {
            lights,
            eye,
            ambient_light,
            clamp_diffuse: false,
        }
    }

    /// Color leaving `position` towards the eye for a surface with unit `normal`.
    pub fn shade(&self, position: &Point3<f32>, normal: &Vector3<f32>, material: &Material) -> Color {
        let mut color = material.ambient.component_mul(&self.ambient_light);

        let view_dir = (self.eye - position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);

        for light in self.lights {
            let light_dir = light.direction_from(position);

            let mut diff = normal.dot(&light_dir);
            if self.clamp_diffuse {
                diff = diff.max(0.0);
            }
            color += material.diffuse.component_mul(&light.intensity) * diff;

            let half_dir = (light_dir + view_dir)
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros);
            // Clamped before the power so back-facing points get no highlight.
            let spec = normal.dot(&half_dir).max(0.0).powf(material.shininess);
            color += material.specular.component_mul(&light.intensity) * spec;
        }

        color
    }
}
