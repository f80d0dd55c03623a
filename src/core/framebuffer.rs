use crate::core::color::{BLACK, Color};
use crate::core::math::matrix::Matrix;
use crate::error::{MathError, RenderError};

/// Color and depth planes of one render target.
///
/// Both planes are indexed `(row, column)` with row 0 at the top of the image.
/// Depth keys grow with distance from the eye and start at `+inf`.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    color: Matrix<Color>,
    depth: Matrix<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: Matrix::from_element(height, width, BLACK),
            depth: Matrix::from_element(height, width, f32::INFINITY),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes both planes and clears them to `background` and `+inf`.
    pub fn reset(
        &mut self,
        width: usize,
        height: usize,
        background: Color,
    ) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        self.width = width;
        self.height = height;
        self.color.reset(height, width, background);
        self.depth.reset(height, width, f32::INFINITY);
        Ok(())
    }

    /// Keeps `new_depth` if it is strictly nearer than the stored key.
    /// Returns false for ties, for farther fragments and outside the image.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        match self.depth.get_mut(y, x) {
            Ok(current) if new_depth < *current => {
                *current = new_depth;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<(), MathError> {
        self.color.set(y, x, color)
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.color.get(y, x).ok().copied()
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        self.depth.get(y, x).ok().copied()
    }

    pub fn color_plane(&self) -> &Matrix<Color> {
        &self.color
    }

    /// Colors in row-major order, top row first.
    pub fn pixels(&self) -> Vec<Color> {
        self.color.to_row_major()
    }
}
