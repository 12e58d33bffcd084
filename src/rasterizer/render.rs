//! Framebuffer, the pixel-write seam, and scene command dispatch

use std::path::Path;

use log::{debug, info, trace};

use super::line::draw_line;
use super::triangle::draw_triangle;
use super::types::Color;
use crate::scene::{Command, Scene};

/// Destination for rasterizer output.
///
/// This is the only thing the line and triangle rasterizers touch. They never
/// read pixels back, and coordinates may fall outside any canvas; bounds are
/// the implementor's business.
pub trait PixelTarget {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// Error type for image output
#[derive(Debug)]
pub enum OutputError {
    ImageError(image::ImageError),
    InvalidDimensions { width: usize, height: usize },
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::ImageError(e)
    }
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::ImageError(e) => write!(f, "Image error: {}", e),
            OutputError::InvalidDimensions { width, height } => {
                write!(f, "Invalid framebuffer dimensions {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for OutputError {}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// RGBA bytes at (x, y), or None outside the grid
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some((y * self.width + x) * 4)
        } else {
            None
        }
    }

    /// Write the grid to a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let img = image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
            .ok_or(OutputError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }
}

impl PixelTarget for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }
}

/// Execute one command against already-resolved vertices.
///
/// Indices are trusted: every way of building a `Scene` checks them.
pub fn execute<T: PixelTarget + ?Sized>(target: &mut T, scene: &Scene, command: &Command) {
    let vertices = scene.vertices();
    match *command {
        Command::DefineVertex(_) => {}
        Command::DrawLine(i, j) => {
            trace!("line {} -> {}", i, j);
            draw_line(target, &vertices[i], &vertices[j]);
        }
        Command::DrawTriangle(i, j, k) => {
            trace!("triangle {}, {}, {}", i, j, k);
            draw_triangle(target, &vertices[i], &vertices[j], &vertices[k]);
        }
    }
}

/// Render every command of a scene in order; later primitives overwrite earlier ones
pub fn render_scene<T: PixelTarget + ?Sized>(target: &mut T, scene: &Scene) {
    let mut lines = 0;
    let mut triangles = 0;

    for command in scene.commands() {
        match command {
            Command::DrawLine(..) => lines += 1,
            Command::DrawTriangle(..) => triangles += 1,
            Command::DefineVertex(_) => {}
        }
        execute(target, scene, command);
    }

    debug!("{} vertices in table", scene.vertices().len());
    info!("Rendered {} lines and {} triangles", lines, triangles);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scene::parse_scene;

    /// Records every write in order
    #[derive(Default)]
    pub struct Recorder {
        pub writes: Vec<(i32, i32, Color)>,
    }

    impl PixelTarget for Recorder {
        fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
            self.writes.push((x, y, color));
        }
    }

    #[test]
    fn test_framebuffer_ignores_out_of_bounds() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(0, 4, Color::WHITE);
        fb.set_pixel(4, 0, Color::WHITE);
        assert!(fb.pixels.iter().all(|&b| b == 0));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn test_framebuffer_set_and_clear() {
        let mut fb = Framebuffer::new(3, 2);
        fb.clear(Color::BLUE);
        assert_eq!(fb.get_pixel(2, 1), Some([0, 0, 255, 255]));
        fb.set_pixel(1, 1, Color::RED);
        assert_eq!(fb.get_pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(fb.get_pixel(0, 1), Some([0, 0, 255, 255]));
    }

    #[test_log::test]
    fn test_render_scene_later_overwrites_earlier() {
        let scene = parse_scene(
            "v,0,0,1,0,0;\nv,3,0,1,0,0;\nv,0,0,0,0,1;\nv,3,0,0,0,1;\nl,0,1;\nl,2,3;",
        )
        .unwrap();
        let mut fb = Framebuffer::new(4, 1);
        render_scene(&mut fb, &scene);
        for x in 0..4 {
            assert_eq!(fb.get_pixel(x, 0), Some([0, 0, 255, 255]));
        }
    }

    #[test_log::test]
    fn test_render_scene_writes_in_command_order() {
        let scene = parse_scene("v,0,0,1,1,1;v,2,0,0,0,0;l,0,1;l,1,0;").unwrap();
        let mut rec = Recorder::default();
        render_scene(&mut rec, &scene);
        let xs: Vec<i32> = rec.writes.iter().map(|w| w.0).collect();
        assert_eq!(xs, vec![0, 1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_save_png_roundtrip() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_pixel(1, 0, Color::GREEN);
        let path = std::env::temp_dir().join(format!("vertex_raster_{}.png", std::process::id()));
        fb.save_png(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0, 255]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_png_missing_directory() {
        let fb = Framebuffer::new(2, 2);
        let path = std::env::temp_dir()
            .join(format!("vertex_raster_missing_{}", std::process::id()))
            .join("out.png");
        assert!(matches!(fb.save_png(&path), Err(OutputError::ImageError(_))));
    }
}
