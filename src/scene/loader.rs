use crate::core::color::Color;
use crate::core::math::transform::TransformFactory;
use crate::error::Result;
use crate::io::config::{Config, ObjectConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::Light;
use crate::scene::material::Material;
use crate::scene::surface::Surface;
use log::info;
use nalgebra::{Matrix4, Point3, Vector3};

pub fn build_camera_from_config(config: &Config) -> Camera {
    let cam = &config.camera;
    Camera::new_perspective(
        Point3::from(cam.position),
        Point3::from(cam.target),
        Vector3::from(cam.up),
        cam.fov,
        cam.width,
        cam.height,
        cam.near,
        cam.far,
    )
}

pub fn build_lights_from_config(config: &Config) -> Vec<Light> {
    config
        .lights
        .iter()
        .map(|l| Light::new(Point3::from(l.position), Color::from(l.color)))
        .collect()
}

/// Translation * rotation (X, then Y, then Z) * scale.
pub fn model_matrix(obj: &ObjectConfig) -> Matrix4<f32> {
    let translation = TransformFactory::translation(&Vector3::from(obj.position));
    let rotation = TransformFactory::rotation_x(obj.rotation[0].to_radians())
        * TransformFactory::rotation_y(obj.rotation[1].to_radians())
        * TransformFactory::rotation_z(obj.rotation[2].to_radians());
    let scale = TransformFactory::scaling_nonuniform(&Vector3::from(obj.scale));
    translation * rotation * scale
}

fn material_from_config(obj: &ObjectConfig) -> Material {
    Material {
        ambient: Color::from(obj.ambient),
        diffuse: Color::from(obj.diffuse),
        specular: Color::from(obj.specular),
        shininess: obj.shininess,
    }
}

/// Loads every mesh, places it, refines it and builds the render context.
///
/// `extra_subdivisions` is added to each object's own level.
pub fn init_scene_resources(config: &Config, extra_subdivisions: u32) -> Result<RenderContext> {
    let camera = build_camera_from_config(config);
    let lights = build_lights_from_config(config);

    let mut surfaces = Vec::with_capacity(config.objects.len());
    for obj in &config.objects {
        let path = config.resolve_path(&obj.path);
        let mut mesh = load_obj(&path)?;
        mesh.transform(&model_matrix(obj));

        let mut surface = Surface::new(obj.path.clone(), mesh, material_from_config(obj));
        let levels = obj.subdivisions + extra_subdivisions;
        surface.refine(levels)?;
        if levels > 0 {
            info!(
                "'{}' after {} subdivision level(s): {} vertices, {} triangles",
                obj.path,
                levels,
                surface.mesh.vertex_count(),
                surface.mesh.face_count()
            );
        }
        surfaces.push(surface);
    }

    info!("Scene initialized with {} surfaces.", surfaces.len());

    let mut context = RenderContext::new(camera, lights, surfaces);
    context.ambient_light = Color::from(config.render.ambient_light);
    Ok(context)
}
