//! softraster: a minimal software 3D rasterizer
//!
//! The [`rasterizer`] module is the core: a fixed vertex/raster/fragment
//! pipeline writing into a depth-tested, concurrently-writable
//! framebuffer. [`mesh`], [`camera`] and [`config`] supply the demo
//! binary with geometry, a view transform and settings.

pub mod camera;
pub mod config;
pub mod mesh;
pub mod rasterizer;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
