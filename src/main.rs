//! softraster demo: spin an OBJ model in a window
//!
//! Controls:
//! - Left drag: orbit the camera
//! - Scroll: zoom
//! - W: toggle wireframe overlay
//! - P: save the current frame as frame.png
//! - Escape: quit

use log::{info, warn};
use macroquad::prelude::*;
use nalgebra_glm as glm;

use softraster::camera::Camera;
use softraster::config::RenderConfig;
use softraster::mesh::Mesh;
use softraster::rasterizer::{render, render_wireframe, viewport_matrix, Framebuffer, Uniforms};

const MOUSE_SENSE: f32 = 0.008;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("softraster v{}", softraster::VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = RenderConfig::load_or_default("render.ron");
    info!(
        "rendering {}x{}, model {}",
        config.width,
        config.height,
        config.model.display()
    );

    let mesh = match Mesh::load_obj(&config.model) {
        Ok(mesh) => mesh,
        Err(e) => {
            warn!("{}: {} (falling back to the built-in cube)", config.model.display(), e);
            Mesh::cube()
        }
    };
    let vertex_buffer = mesh.vertex_buffer();

    let mut framebuffer = Framebuffer::new(config.width, config.height);
    let settings = config.raster_settings();
    let mut camera = Camera::new(config.camera_distance);

    let aspect = config.width as f32 / config.height as f32;
    let projection = glm::perspective(aspect, config.fov_degrees.to_radians(), config.near, config.far);
    let viewport = viewport_matrix(config.width as f32, config.height as f32);

    let mut angle: f32 = 0.0;
    let mut wireframe = false;
    let mut last_mouse = mouse_position();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::W) {
            wireframe = !wireframe;
        }

        let mouse = mouse_position();
        if is_mouse_button_down(MouseButton::Left) {
            camera.orbit(
                (mouse.0 - last_mouse.0) * MOUSE_SENSE,
                (mouse.1 - last_mouse.1) * MOUSE_SENSE,
            );
        }
        last_mouse = mouse;
        let wheel = mouse_wheel().1;
        if wheel != 0.0 {
            camera.zoom(if wheel > 0.0 { 0.9 } else { 1.1 });
        }

        angle += config.rotation_speed.to_radians() * get_frame_time();
        let uniforms = Uniforms {
            model: glm::rotate(&glm::Mat4::identity(), angle, &glm::vec3(0.0, 1.0, 0.0)),
            view: camera.view_matrix(),
            projection,
            viewport,
        };

        framebuffer.clear();
        render(&framebuffer, &vertex_buffer, &uniforms, &settings);
        if wireframe {
            render_wireframe(&framebuffer, &vertex_buffer, &uniforms, config.wireframe_color);
        }

        let pixels = framebuffer.to_rgba();
        if is_key_pressed(KeyCode::P) {
            save_frame(&pixels, config.width, config.height);
        }

        // blit the frame; flipped because the viewport transform is y-up
        let texture = Texture2D::from_rgba8(config.width as u16, config.height as u16, &pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                flip_y: true,
                ..Default::default()
            },
        );

        draw_text(&format!("FPS: {}", get_fps()), 10.0, 20.0, 20.0, GREEN);

        next_frame().await;
    }
}

/// Write the frame out as a PNG, rows flipped to match the window.
fn save_frame(pixels: &[u8], width: usize, height: usize) {
    let stride = width * 4;
    let mut flipped = Vec::with_capacity(pixels.len());
    for row in pixels.chunks_exact(stride).rev() {
        flipped.extend_from_slice(row);
    }
    match image::RgbaImage::from_raw(width as u32, height as u32, flipped) {
        Some(frame) => match frame.save("frame.png") {
            Ok(()) => info!("saved frame.png"),
            Err(e) => warn!("failed to save frame.png: {}", e),
        },
        None => warn!("frame size mismatch, not saving"),
    }
}
