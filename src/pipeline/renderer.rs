use crate::core::color::{BLACK, Color};
use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::interpolate;
use crate::core::pipeline::{Fragment, Shade, ShadingPolicy, SurfaceShading};
use crate::core::rasterizer::{FaceOutcome, Rasterizer};
use crate::error::RenderError;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::context::RenderContext;
use crate::scene::surface::Surface;
use log::debug;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use rayon::prelude::*;

/// Per-render options that are not part of the scene itself.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub background: Color,
    pub clamp_diffuse: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: BLACK,
            clamp_diffuse: false,
        }
    }
}

/// Counters from the most recent render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    pub faces_behind_eye: usize,
    pub faces_off_screen: usize,
    pub faces_degenerate: usize,
    pub fragments: usize,
}

impl RenderStats {
    fn record(&mut self, outcome: FaceOutcome) {
        match outcome {
            FaceOutcome::Drawn(n) => {
                self.faces_drawn += 1;
                self.fragments += n;
            }
            FaceOutcome::BehindEye => self.faces_behind_eye += 1,
            FaceOutcome::OffScreen => self.faces_off_screen += 1,
            FaceOutcome::Degenerate => self.faces_degenerate += 1,
        }
    }
}

/// Runs the pipeline: reset, transform vertices, rasterize, shade fragments.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
    pub settings: RenderSettings,
    stats: RenderStats,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(1, 1),
            settings,
            stats: RenderStats::default(),
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Renders `context` with `policy` into the owned framebuffer.
    ///
    /// Each call starts from a cleared framebuffer sized to the camera resolution.
    /// Surfaces must have up-to-date normals.
    pub fn render(
        &mut self,
        context: &RenderContext,
        policy: ShadingPolicy,
    ) -> Result<&FrameBuffer, RenderError> {
        let camera = &context.camera;

        // 1. Reset
        self.framebuffer
            .reset(camera.width, camera.height, self.settings.background)?;
        if let Some(stale) = context.surfaces.iter().position(|s| s.mesh.normals_dirty()) {
            return Err(RenderError::StaleNormals { surface: stale });
        }
        self.stats = RenderStats::default();

        let width = self.framebuffer.width();
        let mut fragments: Vec<Option<Fragment>> = vec![None; width * self.framebuffer.height()];

        let shader = PhongShader {
            lights: &context.lights,
            eye: camera.position,
            ambient_light: context.ambient_light,
            clamp_diffuse: self.settings.clamp_diffuse,
        };
        let screen_matrix = camera.screen_matrix();

        for surface in &context.surfaces {
            // 2. Transform vertices and resolve per-surface shading
            let clip = transform_vertices(surface, &screen_matrix);
            let shading = resolve_shading(&shader, surface, policy);

            // 3. Rasterize
            let vertices = surface.mesh.vertices();
            for (f, &[a, b, c]) in surface.mesh.triangles().iter().enumerate() {
                let outcome = self.rasterizer.rasterize_face(
                    &mut self.framebuffer,
                    &mut fragments,
                    &[clip[a], clip[b], clip[c]],
                    |bary| match &shading {
                        SurfaceShading::Flat(colors) => Shade::Color(colors[f]),
                        SurfaceShading::Gouraud(colors) => {
                            Shade::Color(interpolate(bary, colors[a], colors[b], colors[c]))
                        }
                        SurfaceShading::Phong => {
                            let position = interpolate(
                                bary,
                                vertices[a].position.coords,
                                vertices[b].position.coords,
                                vertices[c].position.coords,
                            );
                            let normal = interpolate(
                                bary,
                                vertices[a].normal,
                                vertices[b].normal,
                                vertices[c].normal,
                            );
                            Shade::Deferred {
                                position: Point3::from(position),
                                normal: normal
                                    .try_normalize(f32::EPSILON)
                                    .unwrap_or_else(Vector3::zeros),
                                material: &surface.material,
                            }
                        }
                    },
                );
                self.stats.record(outcome);
            }
        }
        debug!("rasterized {} ({:?})", policy, self.stats);

        // 4. Shade fragments
        let shaded: Vec<(usize, usize, Color)> = fragments
            .par_iter()
            .flatten()
            .map(|frag| {
                let color = match frag.shade {
                    Shade::Color(color) => color,
                    Shade::Deferred {
                        position,
                        normal,
                        material,
                    } => shader.shade(&position, &normal, material),
                };
                (frag.x, frag.y, color)
            })
            .collect();
        for (x, y, color) in shaded {
            self.framebuffer.set_pixel(x, y, color)?;
        }

        Ok(&self.framebuffer)
    }
}

fn transform_vertices(surface: &Surface, screen_matrix: &Matrix4<f32>) -> Vec<Vector4<f32>> {
    surface
        .mesh
        .vertices()
        .par_iter()
        .map(|v| screen_matrix * v.position.to_homogeneous())
        .collect()
}

fn resolve_shading(shader: &PhongShader, surface: &Surface, policy: ShadingPolicy) -> SurfaceShading {
    let material = &surface.material;
    match policy {
        ShadingPolicy::Flat => SurfaceShading::Flat(
            surface
                .mesh
                .faces()
                .par_iter()
                .map(|face| shader.shade(&face.centroid, &face.normal, material))
                .collect(),
        ),
        ShadingPolicy::Gouraud => SurfaceShading::Gouraud(
            surface
                .mesh
                .vertices()
                .par_iter()
                .map(|v| shader.shade(&v.position, &v.normal, material))
                .collect(),
        ),
        ShadingPolicy::Phong => SurfaceShading::Phong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::Camera;
    use crate::scene::light::Light;
    use crate::scene::material::Material;
    use crate::scene::mesh::HalfEdgeMesh;

    fn context(mesh: HalfEdgeMesh) -> RenderContext {
        let camera = Camera::new_perspective(
            Point3::new(0.0, 0.0, 4.0),
            Point3::origin(),
            Vector3::y(),
            60.0,
            24,
            16,
            0.1,
            20.0,
        );
        let lights = vec![Light::new(Point3::new(2.0, 3.0, 5.0), Color::new(1.0, 1.0, 1.0))];
        RenderContext::new(camera, lights, vec![Surface::new("mesh", mesh, Material::default())])
    }

    #[test]
    fn stale_normals_are_rejected() {
        let ctx = context(HalfEdgeMesh::create_octahedron());
        let mut renderer = Renderer::new(RenderSettings::default());
        assert_eq!(
            renderer.render(&ctx, ShadingPolicy::Phong).unwrap_err(),
            RenderError::StaleNormals { surface: 0 }
        );
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let mut mesh = HalfEdgeMesh::create_octahedron();
        mesh.update_normals();
        let mut ctx = context(mesh);
        ctx.camera.width = 0;
        let mut renderer = Renderer::new(RenderSettings::default());
        assert!(matches!(
            renderer.render(&ctx, ShadingPolicy::Flat),
            Err(RenderError::InvalidResolution { width: 0, .. })
        ));
    }

    #[test]
    fn stats_and_background() {
        let mut mesh = HalfEdgeMesh::create_octahedron();
        mesh.update_normals();
        let ctx = context(mesh);
        let background = Color::new(0.0, 0.0, 0.25);
        let mut renderer = Renderer::new(RenderSettings {
            background,
            ..Default::default()
        });
        let fb = renderer.render(&ctx, ShadingPolicy::Gouraud).unwrap();
        assert_eq!((fb.width(), fb.height()), (24, 16));
        assert_eq!(fb.get_pixel(0, 0), Some(background));
        assert_ne!(fb.get_pixel(12, 8), Some(background));

        let stats = renderer.stats();
        assert_eq!(
            stats.faces_drawn
                + stats.faces_behind_eye
                + stats.faces_off_screen
                + stats.faces_degenerate,
            8
        );
        assert!(stats.fragments > 0);
    }
}
