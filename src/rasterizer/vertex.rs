//! Vertex type shared by the geometry stages

use nalgebra_glm::Vec3;

/// A vertex with position and normal. Positions are model-space going into
/// the vertex shader and screen-space coming out; normals stay world-space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}
