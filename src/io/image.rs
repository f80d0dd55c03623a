use crate::core::framebuffer::FrameBuffer;
use crate::error::Result;
use crate::pipeline::passes::to_rgb8_image;
use image::RgbImage;
use log::info;
use std::path::Path;

/// Saves an 8-bit image; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path)?;
    info!(
        "Saved {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Converts and saves a rendered framebuffer.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    save_image(&to_rgb8_image(framebuffer), path)
}
