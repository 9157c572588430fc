//! Fragment types carried between pipeline stages

use super::color::Color;

/// A candidate pixel write produced by triangle rasterization: a screen
/// cell, the interpolated depth at that cell, and the inputs the fragment
/// shader needs to resolve the final color.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: u16,
    pub y: u16,
    pub z: f32,
    pub color: Color,
    pub intensity: f32,
}

impl Fragment {
    pub fn new(x: u16, y: u16, z: f32, color: Color, intensity: f32) -> Self {
        Self { x, y, z, color, intensity }
    }
}

/// What a framebuffer cell holds: the resolved color and the depth of the
/// fragment that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragColor {
    pub color: Color,
    pub z: f32,
}

impl FragColor {
    /// Cleared-cell value. Infinite depth loses against any real fragment.
    pub const EMPTY: FragColor = FragColor {
        color: Color::BLACK,
        z: f32::INFINITY,
    };
}
