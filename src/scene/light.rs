use crate::core::color::Color;
use nalgebra::{Point3, Vector3};

/// A point light without attenuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    /// RGB intensity.
    pub intensity: Color,
}

impl Light {
    pub fn new(position: Point3<f32>, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Unit vector from `surface_point` towards the light.
    pub fn direction_from(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        (self.position - surface_point)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}
