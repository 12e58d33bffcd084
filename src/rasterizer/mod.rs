//! Software rasterizer for color-interpolated lines and triangles
//!
//! Features:
//! - DDA line stepping with per-pixel color interpolation
//! - Bounding-box triangle fill with an edge-function inside test
//! - Top-left fill rule so triangles sharing an edge tile without gaps or overlap
//! - Barycentric (Gouraud-style) color blending
//!
//! Coordinates are screen space with y growing downward. Triangles are expected
//! to be wound clockwise as seen on screen.

mod line;
mod math;
mod render;
mod triangle;
mod types;

pub use line::*;
pub use math::*;
pub use render::*;
pub use triangle::*;
pub use types::*;

/// Default canvas dimensions (the size the built-in scene is drawn for)
pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 64;
