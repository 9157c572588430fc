//! End-to-end render tests: full frames through the pipeline without a
//! window, read back straight from the framebuffer.

use nalgebra_glm as glm;
use softraster::camera::Camera;
use softraster::config::RenderConfig;
use softraster::mesh::Mesh;
use softraster::rasterizer::{
    render, render_wireframe, viewport_matrix, Color, Framebuffer, RasterSettings, Uniforms,
};

const SIZE: usize = 64;

// The cube's quad triangulation runs a shared diagonal through the exact
// image center, and the edge tie-break can leave cells on it unwritten.
// Sample beside the diagonal, inside one front-face triangle.
const SAMPLE: (usize, usize) = (SIZE / 2 + 4, SIZE / 2);

fn cube_frame() -> (Framebuffer, Vec<glm::Vec3>, Uniforms) {
    let fb = Framebuffer::new(SIZE, SIZE);
    let buffer = Mesh::cube().vertex_buffer();
    let uniforms = Uniforms {
        model: glm::Mat4::identity(),
        view: Camera::new(5.0).view_matrix(),
        projection: glm::perspective(1.0, 45f32.to_radians(), 0.1, 100.0),
        viewport: viewport_matrix(SIZE as f32, SIZE as f32),
    };
    (fb, buffer, uniforms)
}

fn cube_settings() -> RasterSettings {
    RasterSettings {
        width: SIZE,
        height: SIZE,
        ..Default::default()
    }
}

#[test]
fn test_cube_frame_lights_front_face_and_leaves_corners() {
    let (mut fb, buffer, uniforms) = cube_frame();
    render(&fb, &buffer, &uniforms, &cube_settings());

    // the face turned toward the camera also faces the head-on light
    let front = fb.cell(SAMPLE.0, SAMPLE.1);
    assert!(front.z.is_finite());
    assert_eq!(front.color, Color::new(205, 205, 205));

    // the projected cube never reaches the frame corners
    assert_eq!(fb.cell(0, 0).z, f32::INFINITY);
    assert_eq!(fb.cell(SIZE - 1, SIZE - 1).z, f32::INFINITY);
}

#[test]
fn test_cleared_buffer_renders_identically_twice() {
    let (mut fb, buffer, uniforms) = cube_frame();
    let settings = cube_settings();

    render(&fb, &buffer, &uniforms, &settings);
    let first = fb.to_rgba();

    fb.clear();
    render(&fb, &buffer, &uniforms, &settings);
    let second = fb.to_rgba();

    assert_eq!(first, second);
}

#[test]
fn test_to_rgba_matches_frame_dimensions() {
    let (mut fb, buffer, uniforms) = cube_frame();
    render(&fb, &buffer, &uniforms, &cube_settings());
    let bytes = fb.to_rgba();
    assert_eq!(bytes.len(), SIZE * SIZE * 4);

    let sample = (SAMPLE.1 * SIZE + SAMPLE.0) * 4;
    assert_eq!(&bytes[sample..sample + 4], &[205, 205, 205, 255]);
}

#[test]
fn test_wireframe_draws_over_solid_render() {
    let (mut fb, buffer, uniforms) = cube_frame();
    render(&fb, &buffer, &uniforms, &cube_settings());
    render_wireframe(&fb, &buffer, &uniforms, Color::new(255, 255, 0));

    let overlay = (0..SIZE * SIZE)
        .filter(|i| fb.cell(i % SIZE, i / SIZE).color == Color::new(255, 255, 0))
        .count();
    assert!(overlay > 0);
}

#[test]
fn test_default_config_drives_a_frame() {
    let config = RenderConfig::default();
    let mut fb = Framebuffer::new(config.width, config.height);
    let uniforms = Uniforms {
        model: glm::Mat4::identity(),
        view: Camera::new(config.camera_distance).view_matrix(),
        projection: glm::perspective(
            config.width as f32 / config.height as f32,
            config.fov_degrees.to_radians(),
            config.near,
            config.far,
        ),
        viewport: viewport_matrix(config.width as f32, config.height as f32),
    };

    render(&fb, &Mesh::cube().vertex_buffer(), &uniforms, &config.raster_settings());

    // beside the front face's diagonal, as with SAMPLE above
    let front = fb.cell(config.width / 2 + 4, config.height / 2);
    assert!(front.z.is_finite());
    assert_eq!(front.color, config.base_color);
}
