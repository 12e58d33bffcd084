//! Preview window: shows a rendered framebuffer scaled up with nearest filtering

use log::{info, warn};
use macroquad::prelude::*;
use macroquad::Window;

use crate::rasterizer::Framebuffer;

fn window_conf(width: usize, height: usize, scale: u32) -> Conf {
    let scale = scale.max(1) as i32;
    Conf {
        window_title: format!("vertex-raster {}x{}", width, height),
        window_width: width as i32 * scale,
        window_height: height as i32 * scale,
        window_resizable: true,
        ..Default::default()
    }
}

/// Open a window showing `fb` until it is closed or Escape is pressed.
/// Blocks the calling thread. Canvases wider or taller than `u16::MAX` are not shown.
pub fn show(fb: &Framebuffer, scale: u32) {
    let (width, height) = (fb.width, fb.height);
    let (Ok(tex_w), Ok(tex_h)) = (u16::try_from(width), u16::try_from(height)) else {
        warn!("{}x{} is too large to preview", width, height);
        return;
    };
    let pixels = fb.pixels.clone();

    info!("Opening preview window (Esc to close)");

    Window::from_config(window_conf(width, height, scale), async move {
        let texture = Texture2D::from_rgba8(tex_w, tex_h, &pixels);
        texture.set_filter(FilterMode::Nearest);

        loop {
            if is_key_pressed(KeyCode::Escape) {
                break;
            }

            clear_background(Color::from_rgba(30, 30, 35, 255));

            // Fit the canvas inside the window, preserving aspect ratio
            let fit = (screen_width() / width as f32).min(screen_height() / height as f32);
            let draw_w = width as f32 * fit;
            let draw_h = height as f32 * fit;
            let draw_x = (screen_width() - draw_w) / 2.0;
            let draw_y = (screen_height() - draw_h) / 2.0;

            draw_texture_ex(
                &texture,
                draw_x,
                draw_y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(draw_w, draw_h)),
                    ..Default::default()
                },
            );

            next_frame().await;
        }
    });
}
