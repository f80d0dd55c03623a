use crate::core::pipeline::ShadingPolicy;
use crate::error::{Error, Result};
use crate::io::scene_file;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Scene description: camera, lights, surfaces and render options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
    /// Directory that relative mesh paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub shading: ShadingPolicy,
    #[serde(default = "default_ambient")]
    pub ambient_light: [f32; 3],
    #[serde(default)]
    pub background_color: [f32; 3],
    #[serde(default)]
    pub clamp_diffuse: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            shading: ShadingPolicy::default(),
            ambient_light: default_ambient(),
            background_color: [0.0, 0.0, 0.0],
            clamp_diffuse: false,
        }
    }
}

fn default_output() -> String {
    "output.png".to_string()
}
fn default_ambient() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Full vertical angle in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            width: default_width(),
            height: default_height(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 5.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_width() -> usize {
    512
}
fn default_height() -> usize {
    512
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    pub position: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
}

fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    pub path: String,

    // --- Material ---
    #[serde(default = "default_ambient_coeff")]
    pub ambient: [f32; 3],
    #[serde(default = "default_diffuse_coeff")]
    pub diffuse: [f32; 3],
    #[serde(default = "default_specular_coeff")]
    pub specular: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,

    /// Loop subdivision levels applied after loading.
    #[serde(default)]
    pub subdivisions: u32,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees, applied X then Y then Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

impl ObjectConfig {
    /// An untransformed object with the default material.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ambient: default_ambient_coeff(),
            diffuse: default_diffuse_coeff(),
            specular: default_specular_coeff(),
            shininess: default_shininess(),
            subdivisions: 0,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
        }
    }
}

fn default_ambient_coeff() -> [f32; 3] {
    [0.1, 0.1, 0.1]
}
fn default_diffuse_coeff() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}
fn default_specular_coeff() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_shininess() -> f32 {
    32.0
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    /// Loads a scene file. `.toml` files are read as TOML, anything else as the
    /// whitespace token format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut config = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content)?,
            _ => scene_file::parse(&content)?,
        };
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;

        info!(
            "Loaded scene '{}': {} light(s), {} object(s)",
            path.display(),
            config.lights.len(),
            config.objects.len()
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Absolute or scene-relative location of a mesh file.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }

    /// Rejects camera settings that cannot produce a projection.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if cam.width == 0 || cam.height == 0 {
            return Err(Error::Config(format!(
                "image size must be non-zero, got {}x{}",
                cam.width, cam.height
            )));
        }
        if !(cam.fov > 0.0 && cam.fov < 180.0) {
            return Err(Error::Config(format!(
                "fov must lie in (0, 180) degrees, got {}",
                cam.fov
            )));
        }
        if cam.near.abs() <= f32::EPSILON || cam.far.abs() <= cam.near.abs() {
            return Err(Error::Config(format!(
                "depth planes must satisfy 0 < |near| < |far|, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if cam.position == cam.target {
            return Err(Error::Config("camera position equals its target".into()));
        }
        Ok(())
    }
}
