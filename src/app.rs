use crate::core::color::Color;
use crate::core::pipeline::ShadingPolicy;
use crate::error::Result;
use crate::io::config::Config;
use crate::io::image::save_image;
use crate::io::obj_loader::write_obj;
use crate::pipeline::passes::render_main_pass;
use crate::pipeline::renderer::{RenderSettings, Renderer};
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use clap::Parser;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Headless driver for the rasterizer.
#[derive(Parser, Debug)]
#[command(name = "trimesh-rasterizer", version)]
#[command(about = "Renders triangle-mesh scenes with flat, Gouraud or Phong shading")]
pub struct Cli {
    /// Scene file: `.toml`, or the whitespace token format for any other extension
    #[arg(value_name = "SCENE")]
    pub scene: PathBuf,

    /// Shading policy; overrides the scene's `render.shading`
    #[arg(short, long, value_enum)]
    pub shading: Option<ShadingPolicy>,

    /// Output image; overrides the scene's `render.output`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra Loop subdivision levels applied to every surface
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub subdivide: u32,

    /// Render flat, Gouraud and Phong images side by side as <stem>_<policy>.<ext>
    #[arg(long)]
    pub all_policies: bool,

    /// Write every refined surface as OBJ into this directory
    #[arg(long, value_name = "DIR")]
    pub export_meshes: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// `out.png` + flat -> `out_flat.png`.
pub fn policy_output_path(path: &Path, policy: ShadingPolicy) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, policy, ext.to_string_lossy()),
        None => format!("{}_{}", stem, policy),
    };
    path.with_file_name(file_name)
}

/// Loads the scene, renders it and writes the results. Returns the image paths written.
pub fn run_cli(cli: &Cli) -> Result<Vec<PathBuf>> {
    info!("Starting CLI mode...");
    let config = Config::load(&cli.scene)?;

    let start_time = Instant::now();
    let context = init_scene_resources(&config, cli.subdivide)?;
    info!("Scene prepared in {:.2?}", start_time.elapsed());

    if let Some(dir) = &cli.export_meshes {
        export_meshes(&context, dir)?;
    }

    let mut renderer = Renderer::new(RenderSettings {
        background: Color::from(config.render.background_color),
        clamp_diffuse: config.render.clamp_diffuse,
    });

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.render.output));
    let jobs: Vec<(ShadingPolicy, PathBuf)> = if cli.all_policies {
        ShadingPolicy::ALL
            .iter()
            .map(|&p| (p, policy_output_path(&output, p)))
            .collect()
    } else {
        vec![(cli.shading.unwrap_or(config.render.shading), output)]
    };

    let mut written = Vec::with_capacity(jobs.len());
    for (policy, path) in jobs {
        let start_time = Instant::now();
        let image = render_main_pass(&context, &mut renderer, policy)?;
        info!("{} render completed in {:.2?}", policy, start_time.elapsed());

        save_image(&image, &path)?;
        written.push(path);
    }

    info!("Done.");
    Ok(written)
}

fn export_meshes(context: &RenderContext, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (i, surface) in context.surfaces.iter().enumerate() {
        let stem = Path::new(&surface.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "surface".to_string());
        write_obj(&surface.mesh, dir.join(format!("{}_{}.obj", i, stem)))?;
    }
    Ok(())
}
