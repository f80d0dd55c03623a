use nalgebra::{Matrix4, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Builds the 4x4 matrices of the camera chain and of model placement.
///
/// Projection follows the convention where view space looks down -Z and the
/// near/far planes are given as negative z values; the near plane lands on
/// NDC z = +1 and the far plane on z = -1, so a larger screen z is nearer.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rows are the three basis vectors, so a world vector is expressed in (u, v, w).
    pub fn change_of_basis(u: &Vector3<f32>, v: &Vector3<f32>, w: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            u.x, u.y, u.z, 0.0,
            v.x, v.y, v.z, 0.0,
            w.x, w.y, w.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// World -> camera. The camera sits at the origin looking down -w.
    pub fn view(eye: &Point3<f32>, look_at: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let look = look_at - eye;
        let u = look.cross(up).normalize();
        let v = u.cross(&look).normalize();
        let w = u.cross(&v).normalize();

        Self::change_of_basis(&u, &v, &w) * Self::translation(&-eye.coords)
    }

    /// Perspective projection for the frustum (n, f, b, t, l, r), with n and f negative.
    /// The last row copies view-space z into w, so w < 0 in front of the camera.
    pub fn perspective(n: f32, f: f32, b: f32, t: f32, l: f32, r: f32) -> Matrix4<f32> {
        Matrix4::new(
            2.0 * n / (r - l), 0.0,               (l + r) / (l - r), 0.0,
            0.0,               2.0 * n / (t - b), (b + t) / (b - t), 0.0,
            0.0,               0.0,               (f + n) / (n - f), 2.0 * f * n / (f - n),
            0.0,               0.0,               1.0,               0.0,
        )
    }

    /// NDC [-1, 1]^2 -> pixel space with pixel centers on integer coordinates.
    pub fn viewport(nx: usize, ny: usize) -> Matrix4<f32> {
        let nx = nx as f32;
        let ny = ny as f32;
        Matrix4::new(
            nx / 2.0, 0.0,      0.0, (nx - 1.0) / 2.0,
            0.0,      ny / 2.0, 0.0, (ny - 1.0) / 2.0,
            0.0,      0.0,      1.0, 0.0,
            0.0,      0.0,      0.0, 1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Homogeneous divide. A vanishing w maps to the origin.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}
