use crate::core::color::to_rgb8;
use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::ShadingPolicy;
use crate::error::RenderError;
use crate::pipeline::renderer::Renderer;
use crate::scene::context::RenderContext;
use image::RgbImage;
use log::info;
use rayon::prelude::*;

/// Converts the float framebuffer to 8-bit RGB, one row per task.
pub fn to_rgb8_image(framebuffer: &FrameBuffer) -> RgbImage {
    let width = framebuffer.width();
    let pixels = framebuffer.pixels();
    let mut image = RgbImage::new(width as u32, framebuffer.height() as u32);

    image
        .par_chunks_mut(width * 3)
        .zip(pixels.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (out, color) in out_row.chunks_exact_mut(3).zip(in_row) {
                out.copy_from_slice(&to_rgb8(color));
            }
        });

    image
}

/// Renders the scene once and returns the converted image.
pub fn render_main_pass(
    context: &RenderContext,
    renderer: &mut Renderer,
    policy: ShadingPolicy,
) -> Result<RgbImage, RenderError> {
    info!(
        "Rendering {} triangles at {}x{} with {} shading",
        context.triangle_count(),
        context.camera.width,
        context.camera.height,
        policy
    );
    let framebuffer = renderer.render(context, policy)?;
    Ok(to_rgb8_image(framebuffer))
}
