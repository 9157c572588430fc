//! Frame pipeline driver
//!
//! Runs the fixed stage order for one frame: vertex shading, primitive
//! assembly, parallel triangle rasterization, then fragment shading into
//! the framebuffer.

use log::debug;
use nalgebra_glm::Vec3;
use rayon::prelude::*;

use super::color::Color;
use super::fragment::Fragment;
use super::framebuffer::Framebuffer;
use super::line::line;
use super::shader::{fragment_shader, vertex_shader, Uniforms};
use super::triangle::{rasterize_triangle, RasterSettings};
use super::vertex::Vertex;

/// In front of the depth range the viewport transform produces, so overlay
/// lines win the depth test against shaded surfaces.
const OVERLAY_Z: f32 = -1.0;

fn shade_vertices(vertex_buffer: &[Vec3], uniforms: &Uniforms) -> Vec<Vertex> {
    vertex_buffer
        .chunks_exact(2)
        .map(|pair| vertex_shader(&Vertex::new(pair[0], pair[1]), uniforms))
        .collect()
}

/// Render one frame of an interleaved (position, normal) vertex buffer
/// into the framebuffer, which the caller must have cleared.
///
/// Triangles are assembled from consecutive vertex triples and rasterized
/// in parallel, each into its own fragment buffer; a trailing partial
/// triple is ignored. The merged fragments are then shaded and written
/// concurrently, the framebuffer's per-cell locks resolving depth races.
pub fn render(
    framebuffer: &Framebuffer,
    vertex_buffer: &[Vec3],
    uniforms: &Uniforms,
    settings: &RasterSettings,
) {
    let transformed = shade_vertices(vertex_buffer, uniforms);

    let fragments: Vec<Fragment> = transformed
        .par_chunks_exact(3)
        .flat_map_iter(|tri| rasterize_triangle(&tri[0], &tri[1], &tri[2], settings))
        .collect();

    debug!(
        "{} vertices assembled into {} fragments",
        transformed.len(),
        fragments.len()
    );

    fragments
        .par_iter()
        .for_each(|fragment| framebuffer.write(&fragment_shader(*fragment)));
}

/// Draw the triangle edges of a vertex buffer as single-color lines, in
/// front of anything `render` produced this frame.
pub fn render_wireframe(
    framebuffer: &Framebuffer,
    vertex_buffer: &[Vec3],
    uniforms: &Uniforms,
    color: Color,
) {
    let transformed = shade_vertices(vertex_buffer, uniforms);

    for tri in transformed.chunks_exact(3) {
        for (from, to) in [(0, 1), (1, 2), (2, 0)] {
            for (x, y) in line(&tri[from].position, &tri[to].position) {
                if x < 0
                    || y < 0
                    || x as usize >= framebuffer.width
                    || y as usize >= framebuffer.height
                {
                    continue;
                }
                framebuffer.write(&Fragment::new(x as u16, y as u16, OVERLAY_Z, color, 1.0));
            }
        }
    }
}
