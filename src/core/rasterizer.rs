use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{barycentric_coordinates, interpolate, is_inside_triangle};
use crate::core::math::transform::apply_perspective_division;
use crate::core::pipeline::{Fragment, Shade};
use nalgebra::{Point2, Vector3, Vector4};

/// What happened to one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOutcome {
    /// Number of fragments that passed the depth test.
    Drawn(usize),
    /// A vertex lies at or behind the eye plane.
    BehindEye,
    /// The bounding box leaves the image. There is no clipping.
    OffScreen,
    /// Zero screen-space area.
    Degenerate,
}

/// Scan-converts triangles into depth-tested fragments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterizes one triangle given its homogeneous screen-space vertices.
    ///
    /// Every integer pixel of the bounding box is tested; covered pixels get a
    /// depth key of minus the interpolated screen z and are kept only when strictly
    /// nearer than what the framebuffer holds. Survivors replace the slot at
    /// `row * width + col` in `fragments`, with `shade` producing the payload from
    /// the screen-space barycentric coordinates.
    pub fn rasterize_face<'a, F>(
        &self,
        framebuffer: &mut FrameBuffer,
        fragments: &mut [Option<Fragment<'a>>],
        clip: &[Vector4<f32>; 3],
        mut shade: F,
    ) -> FaceOutcome
    where
        F: FnMut(Vector3<f32>) -> Shade<'a>,
    {
        // w is view-space z; the camera looks down -z.
        if clip.iter().any(|c| c.w >= 0.0) {
            return FaceOutcome::BehindEye;
        }

        let screen = clip.map(|c| apply_perspective_division(&c));
        let pts = screen.map(|p| Point2::new(p.x, p.y));

        if barycentric_coordinates(pts[0], pts[0], pts[1], pts[2]).is_none() {
            return FaceOutcome::Degenerate;
        }

        let width = framebuffer.width();
        let height = framebuffer.height();
        let (min_x, min_y, max_x, max_y) = compute_bounding_box(&pts);
        if min_x < 0 || min_y < 0 || max_x >= width as i64 || max_y >= height as i64 {
            return FaceOutcome::OffScreen;
        }

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(x as f32, y as f32);
                let Some(bary) = barycentric_coordinates(p, pts[0], pts[1], pts[2]) else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }

                let depth = -interpolate(bary, screen[0].z, screen[1].z, screen[2].z);
                let col = x as usize;
                let row = height - 1 - y as usize;

                if framebuffer.depth_test_and_update(col, row, depth) {
                    fragments[row * width + col] = Some(Fragment {
                        x: col,
                        y: row,
                        depth,
                        shade: shade(bary),
                    });
                    written += 1;
                }
            }
        }
        FaceOutcome::Drawn(written)
    }
}

fn compute_bounding_box(points: &[Point2<f32>; 3]) -> (i64, i64, i64, i64) {
    let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i64;
    let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i64;
    let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i64;
    let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i64;
    (min_x, min_y, max_x, max_y)
}
