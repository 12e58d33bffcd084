//! vertex-raster: a small software rasterizer for vertex-colored scenes
//!
//! Lines are stepped with a DDA walker and triangles are filled by scanning
//! their bounding box with an edge-function inside test, both interpolating
//! color per pixel. Output goes through [`rasterizer::PixelTarget`], which
//! [`rasterizer::Framebuffer`] implements.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod rasterizer;
pub mod scene;
pub mod viewer;
