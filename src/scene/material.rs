use crate::core::color::Color;

/// Phong reflectance coefficients of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::new(0.1, 0.1, 0.1),
            diffuse: Color::new(0.8, 0.8, 0.8),
            specular: Color::new(1.0, 1.0, 1.0),
            shininess: 32.0,
        }
    }
}
