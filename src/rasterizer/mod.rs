//! Software 3D rasterizer
//!
//! Features:
//! - Fixed pipeline: vertex shading, primitive assembly, rasterization,
//!   fragment shading
//! - Barycentric triangle coverage with interpolated depth and normals
//! - Depth-tested framebuffer safe for concurrent fragment writes
//! - Bresenham line walker for wireframe overlays

mod color;
mod fragment;
mod framebuffer;
mod line;
mod pipeline;
mod shader;
mod triangle;
mod vertex;

pub use color::*;
pub use fragment::*;
pub use framebuffer::*;
pub use line::*;
pub use pipeline::*;
pub use shader::*;
pub use triangle::*;
pub use vertex::*;
