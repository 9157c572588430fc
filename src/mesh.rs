//! Mesh loading
//!
//! Parses OBJ files into indexed position/normal arrays and assembles the
//! interleaved vertex buffer the render pipeline consumes.

use std::path::Path;

use log::info;
use nalgebra_glm::{self as glm, Vec3};
use thiserror::Error;

/// Error type for mesh loading
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to load OBJ: {0}")]
    Load(#[from] tobj::LoadError),
    #[error("face {face} references {kind} index {index} but only {len} are loaded")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// A triangle face: per-corner indices into the position and normal arrays.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub vertex_indices: [usize; 3],
    pub normal_indices: [usize; 3],
}

/// Indexed triangle mesh with per-corner normals.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

fn checked_index(
    raw: u32,
    base: usize,
    len: usize,
    face: usize,
    kind: &'static str,
) -> Result<usize, MeshError> {
    let index = base + raw as usize;
    if index < len {
        Ok(index)
    } else {
        Err(MeshError::IndexOutOfRange { face, kind, index, len })
    }
}

impl Mesh {
    /// Load every model of an OBJ file into a single mesh.
    ///
    /// Faces are triangulated by the parser. Faces that carry no normal
    /// indices get one flat normal derived from their winding. Every index
    /// is validated here, so consumers can index the arrays directly.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: false,
                triangulate: true,
                ignore_points: true,
                ignore_lines: true,
                ..Default::default()
            },
        )?;

        let mut mesh = Mesh::default();
        for model in models {
            let data = model.mesh;
            let base_position = mesh.positions.len();
            let base_normal = mesh.normals.len();
            let base_face = mesh.faces.len();

            mesh.positions
                .extend(data.positions.chunks_exact(3).map(|p| glm::vec3(p[0], p[1], p[2])));
            mesh.normals
                .extend(data.normals.chunks_exact(3).map(|n| glm::vec3(n[0], n[1], n[2])));

            let has_normals =
                !data.normal_indices.is_empty() && data.normal_indices.len() == data.indices.len();

            for (face_offset, corners) in data.indices.chunks_exact(3).enumerate() {
                let face = base_face + face_offset;
                let vertex_indices = [
                    checked_index(corners[0], base_position, mesh.positions.len(), face, "position")?,
                    checked_index(corners[1], base_position, mesh.positions.len(), face, "position")?,
                    checked_index(corners[2], base_position, mesh.positions.len(), face, "position")?,
                ];

                let normal_indices = if has_normals {
                    let raw = &data.normal_indices[face_offset * 3..face_offset * 3 + 3];
                    [
                        checked_index(raw[0], base_normal, mesh.normals.len(), face, "normal")?,
                        checked_index(raw[1], base_normal, mesh.normals.len(), face, "normal")?,
                        checked_index(raw[2], base_normal, mesh.normals.len(), face, "normal")?,
                    ]
                } else {
                    // no normals in the file: share one flat normal from
                    // the face winding
                    let [i0, i1, i2] = vertex_indices;
                    let flat = glm::normalize(&glm::cross(
                        &(mesh.positions[i1] - mesh.positions[i0]),
                        &(mesh.positions[i2] - mesh.positions[i0]),
                    ));
                    mesh.normals.push(flat);
                    [mesh.normals.len() - 1; 3]
                };

                mesh.faces.push(Face { vertex_indices, normal_indices });
            }
        }

        info!(
            "loaded {}: {} positions, {} normals, {} faces",
            path.display(),
            mesh.positions.len(),
            mesh.normals.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Built-in test model: a 2-unit cube centered on the origin, with
    /// axis-aligned face normals.
    pub fn cube() -> Mesh {
        let positions = vec![
            glm::vec3(-1.0, -1.0, -1.0),
            glm::vec3(1.0, -1.0, -1.0),
            glm::vec3(1.0, 1.0, -1.0),
            glm::vec3(-1.0, 1.0, -1.0),
            glm::vec3(-1.0, -1.0, 1.0),
            glm::vec3(1.0, -1.0, 1.0),
            glm::vec3(1.0, 1.0, 1.0),
            glm::vec3(-1.0, 1.0, 1.0),
        ];
        let normals = vec![
            glm::vec3(1.0, 0.0, 0.0),
            glm::vec3(-1.0, 0.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
            glm::vec3(0.0, -1.0, 0.0),
            glm::vec3(0.0, 0.0, 1.0),
            glm::vec3(0.0, 0.0, -1.0),
        ];

        // each side as its four corners plus the normal shared by both
        // triangles of the quad
        let sides: [([usize; 4], usize); 6] = [
            ([5, 1, 2, 6], 0),
            ([0, 4, 7, 3], 1),
            ([7, 6, 2, 3], 2),
            ([0, 1, 5, 4], 3),
            ([4, 5, 6, 7], 4),
            ([1, 0, 3, 2], 5),
        ];

        let mut faces = Vec::with_capacity(12);
        for (quad, normal) in sides {
            faces.push(Face {
                vertex_indices: [quad[0], quad[1], quad[2]],
                normal_indices: [normal; 3],
            });
            faces.push(Face {
                vertex_indices: [quad[0], quad[2], quad[3]],
                normal_indices: [normal; 3],
            });
        }

        Mesh { positions, normals, faces }
    }

    /// Flatten the indexed mesh into the pipeline's input layout: three
    /// (position, normal) pairs per face, in face order.
    pub fn vertex_buffer(&self) -> Vec<Vec3> {
        let mut buffer = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            for corner in 0..3 {
                buffer.push(self.positions[face.vertex_indices[corner]]);
                buffer.push(self.normals[face.normal_indices[corner]]);
            }
        }
        buffer
    }
}
