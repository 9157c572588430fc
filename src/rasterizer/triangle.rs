//! Triangle rasterization
//!
//! Bounding-box scan with barycentric coverage, producing depth-carrying
//! fragments for the shading stage.

use nalgebra_glm::{self as glm, Vec3};

use super::color::Color;
use super::fragment::Fragment;
use super::vertex::Vertex;

/// A membership weight below this floor rejects the cell. Cells sitting
/// exactly on an edge usually fail it from both adjacent triangles; float
/// rounding decides the stragglers, so shared edges may be under- or
/// double-covered.
const WEIGHT_EPSILON: f32 = 1e-10;

/// Per-frame rasterization inputs that are not geometry: framebuffer
/// bounds, the light, and the surface base color.
#[derive(Debug, Clone)]
pub struct RasterSettings {
    pub width: usize,
    pub height: usize,
    pub light_dir: Vec3,
    pub base_color: Color,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            light_dir: glm::vec3(0.0, 0.0, 1.0),
            base_color: Color::new(205, 205, 205),
        }
    }
}

fn finite(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Barycentric weights of cell (px, py) via the 2D cross-product method.
/// Returns (u, v), the weights of the third and second vertex; the first
/// vertex's weight is 1 - u - v.
fn barycentric(px: f32, py: f32, a: &Vec3, b: &Vec3, c: &Vec3) -> (f32, f32) {
    let bary = glm::cross(
        &glm::vec3(c.x - a.x, b.x - a.x, a.x - px),
        &glm::vec3(c.y - a.y, b.y - a.y, a.y - py),
    );
    (bary.x / bary.z, bary.y / bary.z)
}

/// Rasterize one screen-space triangle into a fragment buffer.
///
/// Scans the integer cells of the triangle's bounding box, keeps the cells
/// whose barycentric weights all clear `WEIGHT_EPSILON`, interpolates depth
/// and normal, and lights each cell against `settings.light_dir`. Cells
/// facing away from the light produce nothing.
pub fn rasterize_triangle(
    va: &Vertex,
    vb: &Vertex,
    vc: &Vertex,
    settings: &RasterSettings,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let (a, b, c) = (&va.position, &vb.position, &vc.position);

    // A runaway perspective divide yields non-finite coordinates; NaN would
    // otherwise slip through the weight comparisons below.
    if !finite(a) || !finite(b) || !finite(c) {
        return fragments;
    }

    // Twice the signed screen area, the cross-product denominator below.
    // Near-degenerate triangles cover nothing.
    let denom = (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y);
    if denom.abs() < 1.0 {
        return fragments;
    }

    // Bounding box snapped inward to whole cells, clamped to the buffer.
    // The clamp keeps the upper bound exclusive of width and height, and
    // inside the u16 fragment coordinate range when the buffer is larger.
    let limit = u16::MAX as i32;
    let min_x = (a.x.min(b.x).min(c.x).ceil() as i32).max(0);
    let min_y = (a.y.min(b.y).min(c.y).ceil() as i32).max(0);
    let max_x = (a.x.max(b.x).max(c.x).floor() as i32).min(settings.width as i32 - 1).min(limit);
    let max_y = (a.y.max(b.y).max(c.y).floor() as i32).min(settings.height as i32 - 1).min(limit);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (u, v) = barycentric(x as f32, y as f32, a, b, c);
            let w = 1.0 - u - v;
            if w < WEIGHT_EPSILON || v < WEIGHT_EPSILON || u < WEIGHT_EPSILON {
                continue;
            }

            let z = a.z * w + b.z * v + c.z * u;
            let normal = glm::normalize(&(va.normal * w + vb.normal * v + vc.normal * u));
            let intensity = glm::dot(&normal, &settings.light_dir);
            if intensity < 0.0 {
                continue;
            }

            fragments.push(Fragment::new(
                x as u16,
                y as u16,
                z,
                settings.base_color,
                intensity,
            ));
        }
    }

    fragments
}
