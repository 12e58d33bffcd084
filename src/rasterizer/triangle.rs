//! Solid triangle rasterization with barycentric color blending
//!
//! Bounding-box scan: every candidate point in the box is classified with the
//! edge-function inside test. Cost is O(box area) per triangle, which is fine
//! for small canvases but scales poorly next to an edge-walking scanline fill.

use super::math::{barycentric, point_in_triangle, triangle_area};
use super::render::PixelTarget;
use super::types::{Point, Vertex};

/// Fill the triangle `v1, v2, v3`.
///
/// Vertices are expected clockwise on screen (y down). Candidate points start at
/// the box's minimum corner and advance in unit steps, so with fractional vertex
/// coordinates the samples stay fractional; each accepted sample is written to
/// its floored pixel.
///
/// Triangles with zero area write nothing: the barycentric blend would divide
/// by zero.
pub fn draw_triangle<T: PixelTarget + ?Sized>(
    target: &mut T,
    v1: &Vertex,
    v2: &Vertex,
    v3: &Vertex,
) {
    let (p1, p2, p3) = (v1.pos, v2.pos, v3.pos);

    if (p1 == p2 && p2 == p3) || triangle_area(p1, p2, p3) == 0.0 {
        return;
    }

    // Bounding box
    let min_x = p1.x.min(p2.x).min(p3.x);
    let max_x = p1.x.max(p2.x).max(p3.x);
    let min_y = p1.y.min(p2.y).min(p3.y);
    let max_y = p1.y.max(p2.y).max(p3.y);

    let cols = (max_x - min_x).floor() as i32;
    let rows = (max_y - min_y).floor() as i32;

    for i in 0..=cols {
        let x = min_x + i as f64;
        for j in 0..=rows {
            let y = min_y + j as f64;
            let p = Point::new(x, y);

            if point_in_triangle(p1, p2, p3, p) {
                let color = barycentric(v1, v2, v3, p);
                target.set_pixel(x.floor() as i32, y.floor() as i32, color);
            }
        }
    }
}
