//! Color-interpolated line rasterization (DDA stepping)

use super::math::{lerp_color, round_half_up};
use super::render::PixelTarget;
use super::types::Vertex;

/// Rasterize the segment `v1 -> v2`, blending color from v1 to v2.
///
/// Steps along the dominant axis with real-valued increments, so the run of
/// pixels is connected. Each sample is rounded to the nearest pixel; a pixel hit
/// twice keeps the later color. No clipping is done here. Halfway samples round
/// toward +infinity on both axes.
///
/// The blend parameter is the distance travelled from the start divided by the
/// segment length, not `i / steps`. Both agree in exact arithmetic; with the
/// accumulated position they can differ by float rounding.
pub fn draw_line<T: PixelTarget + ?Sized>(target: &mut T, v1: &Vertex, v2: &Vertex) {
    let start = v1.pos;
    let end = v2.pos;

    if start == end {
        target.set_pixel(round_half_up(start.x), round_half_up(start.y), v1.color);
        return;
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let steps = dx.abs().max(dy.abs());
    let x_inc = dx / steps;
    let y_inc = dy / steps;
    let length = start.distance(end);

    let mut pos = start;
    let mut i = 0.0;
    while i <= steps {
        let t = pos.distance(start) / length;
        let color = lerp_color(v1.color, v2.color, t);
        target.set_pixel(round_half_up(pos.x), round_half_up(pos.y), color);

        pos.x += x_inc;
        pos.y += y_inc;
        i += 1.0;
    }
}
