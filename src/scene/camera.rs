use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// View-space extents of the perspective frustum. `n` and `f` are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub n: f32,
    pub f: f32,
    pub b: f32,
    pub t: f32,
    pub l: f32,
    pub r: f32,
}

/// Pinhole camera. The matrices are derived from the public fields on every
/// call, so edits take effect immediately.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Full vertical field of view in degrees.
    pub fov_deg: f32,
    pub width: usize,
    pub height: usize,
    /// Depth planes; only their magnitudes are used.
    pub near: f32,
    pub far: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_deg: f32,
        width: usize,
        height: usize,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov_deg,
            width,
            height,
            near,
            far,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn frustum(&self) -> Frustum {
        let n = -self.near.abs();
        let f = -self.far.abs();
        let t = (self.fov_deg.to_radians() / 2.0).tan() * n.abs();
        let r = t * self.aspect_ratio();
        Frustum {
            n,
            f,
            b: -t,
            t,
            l: -r,
            r,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let Frustum { n, f, b, t, l, r } = self.frustum();
        TransformFactory::perspective(n, f, b, t, l, r)
    }

    pub fn viewport_matrix(&self) -> Matrix4<f32> {
        TransformFactory::viewport(self.width, self.height)
    }

    /// World -> homogeneous screen space: viewport * projection * view.
    pub fn screen_matrix(&self) -> Matrix4<f32> {
        self.viewport_matrix() * self.projection_matrix() * self.view_matrix()
    }
}
