//! Projection, camera and rotation matrices
//!
//! Matrices follow OpenGL conventions (column-major, right-handed, clip
//! depth in [-1, 1]). The GPU backend remaps depth for wgpu.

use glam::{Mat4, Vec3, Vec4};

use crate::consts::{CAMERA_EYE, CAMERA_UP, FAR_PLANE, NEAR_PLANE};

/// Perspective frustum from clip-plane extents at the near plane
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Projection for a viewport, or `None` if either side is zero
pub fn viewport_projection(width: u32, height: u32) -> Option<Mat4> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = width as f32 / height as f32;
    Some(frustum(-ratio, ratio, -1.0, 1.0, NEAR_PLANE, FAR_PLANE))
}

/// Fixed camera looking at the origin
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(Vec3::from(CAMERA_EYE), Vec3::ZERO, Vec3::from(CAMERA_UP))
}

/// Rotation about +z by `angle_degrees`, wrapped to one turn first
pub fn rotation_matrix(angle_degrees: f32) -> Mat4 {
    Mat4::from_rotation_z((angle_degrees % 360.0).to_radians())
}
