//! First-person camera fed by the simulation's pose.

use glam::{Mat4, Vec3};

/// First-person camera state.
///
/// The camera is a pure consumer: once per frame, after the physics has
/// finished, it copies the published eye position and look angles. It
/// never writes anything back into the simulation.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    /// Eye position in world space.
    pub position: Vec3,

    /// Look yaw in radians; `0` faces +X.
    pub yaw: f32,

    /// Look pitch in radians; positive looks up.
    pub pitch: f32,

    /// Vertical field of view in degrees.
    pub fov: f32,

    /// Near clipping plane.
    pub near: f32,

    /// Far clipping plane.
    pub far: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0,
            near: 0.1,
            far: 500.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl FirstPersonCamera {
    /// Create a camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Adopt the pose published by the simulation. One-way: the camera
    /// only ever follows the player.
    pub fn update_from_player(&mut self, eye_position: Vec3, yaw: f32, pitch: f32) {
        self.position = eye_position;
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// The direction the camera is looking.
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }

    /// The camera's horizontal right direction.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Projection matrix for rendering.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
