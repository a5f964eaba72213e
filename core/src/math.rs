//! Math type aliases and helper functions.
//!
//! Rendering math is always `f32` and column-major, matching the layout
//! uniform buffers expect.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Build a 4x4 matrix that scales first, then translates.
pub fn mat4_from_scale_translation(scale: Vec3, translation: Vec3) -> Mat4 {
    #[rustfmt::skip]
    let result = Mat4::new(
        scale.x, 0.0,     0.0,     translation.x,
        0.0,     scale.y, 0.0,     translation.y,
        0.0,     0.0,     scale.z, translation.z,
        0.0,     0.0,     0.0,     1.0,
    );
    result
}

/// Flatten a matrix into 16 floats in column-major order.
pub fn mat4_to_cols_array(m: &Mat4) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(m.as_slice());
    out
}

/// Build a right-handed perspective projection with depth range [0, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}
