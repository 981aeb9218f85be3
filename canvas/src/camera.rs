#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::{Mat4, Vec3};

/// Perspective camera for the point-cloud engines.
///
/// The camera never rotates; it looks down −Z from `position`. Objects turn
/// instead, via the model matrix built by [`model_matrix`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Camera {
    #[must_use]
    pub fn new(fov_deg: f32, position: Vec3) -> Self {
        Self { fov_deg, aspect: 1.0, near: 0.1, far: 1000.0, position }
    }

    /// Update the aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect as f32;
        }
    }

    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(75.0, Vec3::new(0.0, 0.0, 5.0))
    }
}

/// Object rotation applied X first, then Y (intrinsic XYZ Euler order).
#[must_use]
pub fn model_matrix(angle_x: f32, angle_y: f32) -> Mat4 {
    Mat4::from_rotation_x(angle_x) * Mat4::from_rotation_y(angle_y)
}

/// Map a client-space pointer to normalized device coordinates (+Y up).
#[must_use]
pub fn client_to_ndc(x: f64, y: f64, width: f64, height: f64) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    ((x / width * 2.0 - 1.0) as f32, (-(y / height) * 2.0 + 1.0) as f32)
}
