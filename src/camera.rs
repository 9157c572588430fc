//! Orbit camera

use nalgebra_glm::{self as glm, Mat4, Vec3};

const PITCH_LIMIT: f32 = 1.3;
const DIST_MIN: f32 = 2.0;
const DIST_MAX: f32 = 90.0;

/// Yaw/pitch/distance orbit around a target point. Input handling stays in
/// the frame loop; this only turns angles into a view matrix.
pub struct Camera {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    dist: f32,
}

impl Camera {
    pub fn new(initial_dist: f32) -> Self {
        Self {
            target: glm::vec3(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            dist: initial_dist.clamp(DIST_MIN, DIST_MAX),
        }
    }

    /// Swing the camera by a yaw/pitch delta in radians. Pitch is clamped
    /// short of the poles so the up vector never degenerates.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scale the orbit distance (factor < 1 zooms in).
    pub fn zoom(&mut self, factor: f32) {
        self.dist = (self.dist * factor).clamp(DIST_MIN, DIST_MAX);
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + self.dist
                * glm::vec3(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn view_matrix(&self) -> Mat4 {
        glm::look_at(&self.eye(), &self.target, &glm::vec3(0.0, 1.0, 0.0))
    }
}
