use crate::core::color::Color;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::surface::Surface;

/// Everything a render reads. Not modified while rendering.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub surfaces: Vec<Surface>,
    pub ambient_light: Color,
}

impl RenderContext {
    pub fn new(camera: Camera, lights: Vec<Light>, surfaces: Vec<Surface>) -> Self {
        Self {
            camera,
            lights,
            surfaces,
            ambient_light: Color::new(0.5, 0.5, 0.5),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.mesh.face_count()).sum()
    }
}
