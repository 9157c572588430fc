//! Vertex and fragment shading stages

use nalgebra_glm::{self as glm, Mat4};

use super::fragment::Fragment;
use super::vertex::Vertex;

/// Clip-space w magnitudes below this are clamped before the perspective
/// divide so the divide stays finite.
const MIN_CLIP_W: f32 = 1e-6;

/// Per-frame transform state, owned by the frame loop and read-only to the
/// pipeline stages.
#[derive(Debug, Clone)]
pub struct Uniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
}

impl Default for Uniforms {
    /// Identity transforms: vertices pass through untouched.
    fn default() -> Self {
        Self {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport: Mat4::identity(),
        }
    }
}

/// Viewport matrix mapping NDC [-1, 1] onto a width x height pixel grid,
/// with depth compressed into [-0.25, 0.75].
pub fn viewport_matrix(width: f32, height: f32) -> Mat4 {
    let scaled = glm::scale(&Mat4::identity(), &glm::vec3(width / 2.0, height / 2.0, 0.5));
    glm::translate(&scaled, &glm::vec3(1.0, 1.0, 0.5))
}

/// Transform one model-space vertex into screen space.
///
/// Position runs through model, view and projection, the perspective
/// divide, then the viewport transform. The normal is carried through the
/// inverse-transpose of the model's linear part; a singular model matrix
/// falls back to the plain 3x3.
pub fn vertex_shader(vertex: &Vertex, uniforms: &Uniforms) -> Vertex {
    let position = glm::vec4(vertex.position.x, vertex.position.y, vertex.position.z, 1.0);
    let clip = uniforms.projection * uniforms.view * uniforms.model * position;

    let w = if clip.w.abs() < MIN_CLIP_W {
        MIN_CLIP_W.copysign(clip.w)
    } else {
        clip.w
    };
    let ndc = glm::vec4(clip.x / w, clip.y / w, clip.z / w, 1.0);
    let screen = uniforms.viewport * ndc;

    let linear = glm::mat4_to_mat3(&uniforms.model);
    let normal_matrix = linear
        .try_inverse()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear);
    let normal = glm::normalize(&(normal_matrix * vertex.normal));

    Vertex::new(glm::vec3(screen.x, screen.y, screen.z), normal)
}

/// Resolve a fragment's final color by scaling its base color with the
/// interpolated light intensity.
pub fn fragment_shader(mut fragment: Fragment) -> Fragment {
    fragment.color = fragment.color * fragment.intensity;
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::color::Color;

    fn unit_z_vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(glm::vec3(x, y, z), glm::vec3(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_identity_transform_centers_origin() {
        let uniforms = Uniforms {
            viewport: viewport_matrix(800.0, 600.0),
            ..Default::default()
        };
        let out = vertex_shader(&unit_z_vertex(0.0, 0.0, 0.0), &uniforms);
        assert!((out.position.x - 400.0).abs() < 0.001);
        assert!((out.position.y - 300.0).abs() < 0.001);
        assert!((out.position.z - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_ndc_corner_maps_to_screen_corner() {
        let uniforms = Uniforms {
            viewport: viewport_matrix(800.0, 600.0),
            ..Default::default()
        };
        let out = vertex_shader(&unit_z_vertex(1.0, 1.0, 0.0), &uniforms);
        assert!((out.position.x - 800.0).abs() < 0.001);
        assert!((out.position.y - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_model_translation_shifts_screen_position() {
        let uniforms = Uniforms {
            model: glm::translate(&Mat4::identity(), &glm::vec3(0.5, 0.0, 0.0)),
            viewport: viewport_matrix(800.0, 600.0),
            ..Default::default()
        };
        let out = vertex_shader(&unit_z_vertex(0.0, 0.0, 0.0), &uniforms);
        assert!((out.position.x - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_normal_unaffected_by_translation() {
        let uniforms = Uniforms {
            model: glm::translate(&Mat4::identity(), &glm::vec3(5.0, 3.0, 1.0)),
            ..Default::default()
        };
        let out = vertex_shader(&unit_z_vertex(0.0, 0.0, 0.0), &uniforms);
        assert!((glm::dot(&out.normal, &glm::vec3(0.0, 0.0, 1.0)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nonuniform_scale_corrects_normal() {
        // a 45-degree surface normal under scale (2, 1, 1): the naive
        // transform would tilt it toward x, the inverse-transpose away
        let uniforms = Uniforms {
            model: glm::scale(&Mat4::identity(), &glm::vec3(2.0, 1.0, 1.0)),
            ..Default::default()
        };
        let slanted = Vertex::new(
            glm::vec3(0.0, 0.0, 0.0),
            glm::normalize(&glm::vec3(1.0, 1.0, 0.0)),
        );
        let out = vertex_shader(&slanted, &uniforms);
        assert!((out.normal.x - 0.4472).abs() < 0.001);
        assert!((out.normal.y - 0.8944).abs() < 0.001);
    }

    #[test]
    fn test_zero_clip_w_stays_finite() {
        let mut projection = Mat4::identity();
        projection[(3, 3)] = 0.0;
        let uniforms = Uniforms {
            projection,
            ..Default::default()
        };
        let out = vertex_shader(&unit_z_vertex(1.0, 2.0, 3.0), &uniforms);
        assert!(out.position.x.is_finite());
        assert!(out.position.y.is_finite());
        assert!(out.position.z.is_finite());
    }

    #[test]
    fn test_fragment_shader_scales_color_only() {
        let shaded = fragment_shader(Fragment::new(1, 2, 0.5, Color::new(100, 50, 200), 0.5));
        assert_eq!(shaded.color, Color::new(50, 25, 100));
        assert_eq!((shaded.x, shaded.y), (1, 2));
        assert!((shaded.z - 0.5).abs() < 0.001);
    }
}
