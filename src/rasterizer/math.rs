//! Geometry helpers shared by the line and triangle rasterizers
//!
//! All functions are pure: they read their inputs and return a value.

use super::types::{Color, Point, Vertex};

/// Edge-function half-plane test for point `p` against the directed edge `v0 -> v1`.
///
/// The edge is written as `a*x + b*y + c = 0` with
/// `a = y1 - y0`, `b = x0 - x1`, `c = x1*y0 - x0*y1`.
/// Off the line, the result is whether the value is positive. On the line the
/// top-left rule decides: the point belongs to the edge's side when `a > 0`,
/// or `a == 0 && b > 0`. Two triangles sharing an edge traverse it in opposite
/// directions, so a point on that edge is claimed by exactly one of them.
pub fn edge_test(v0: Point, v1: Point, p: Point) -> bool {
    let a = v1.y - v0.y;
    let b = v0.x - v1.x;
    let c = v1.x * v0.y - v0.x * v1.y;

    let value = a * p.x + b * p.y + c;

    if value == 0.0 {
        return a > 0.0 || (a == 0.0 && b > 0.0);
    }
    value > 0.0
}

/// Inside test: the three directed edges `v0->v1`, `v1->v2`, `v2->v0` must all agree.
///
/// Agreement (rather than "all true") accepts interior points of either winding.
/// Boundary ownership is only tie-broken correctly for clockwise triangles in a
/// y-down frame, so callers should keep that winding.
pub fn point_in_triangle(v0: Point, v1: Point, v2: Point, p: Point) -> bool {
    let e0 = edge_test(v0, v1, p);
    let e1 = edge_test(v1, v2, p);
    let e2 = edge_test(v2, v0, p);
    e0 == e1 && e1 == e2
}

/// Unsigned triangle area: half the magnitude of `(v1 - v0) x (v2 - v0)`
pub fn triangle_area(v0: Point, v1: Point, v2: Point) -> f64 {
    let ax = v1.x - v0.x;
    let ay = v1.y - v0.y;
    let bx = v2.x - v0.x;
    let by = v2.y - v0.y;
    (ax * by - ay * bx).abs() / 2.0
}

/// Barycentric weights (u, v, w) of `p` from sub-triangle areas.
///
/// Only meaningful when `p` is inside the triangle and the triangle has
/// non-zero area; unsigned areas do not produce valid weights outside it.
pub fn barycentric_weights(v0: Point, v1: Point, v2: Point, p: Point) -> (f64, f64, f64) {
    let area = triangle_area(v0, v1, v2);

    let u = triangle_area(p, v1, v2) / area;
    let v = triangle_area(v0, p, v2) / area;
    let w = triangle_area(v0, v1, p) / area;

    (u, v, w)
}

/// Blend the three vertex colors at `p` by barycentric weight
pub fn barycentric(v0: &Vertex, v1: &Vertex, v2: &Vertex, p: Point) -> Color {
    let (u, v, w) = barycentric_weights(v0.pos, v1.pos, v2.pos, p);
    v0.color.scale(u) + v1.color.scale(v) + v2.color.scale(w)
}

/// Nearest integer with halves rounded toward +infinity (`-0.5 -> 0`, `2.5 -> 3`)
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Linear blend `(1 - t) * start + t * end` per channel
pub fn lerp_color(start: Color, end: Color, t: f64) -> Color {
    Color {
        r: start.r * (1.0 - t) + end.r * t,
        g: start.g * (1.0 - t) + end.g * t,
        b: start.b * (1.0 - t) + end.b * t,
    }
}
