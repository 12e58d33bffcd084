//! vertex-raster command line
//!
//! Usage: vertex-raster [SCENE] [--config FILE] [--output FILE] [--view]
//!
//! Renders SCENE (command text, or RON if it ends in `.ron`) into a PNG.
//! Without SCENE the built-in demo scene is drawn.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use vertex_raster::config::RenderConfig;
use vertex_raster::rasterizer::{render_scene, Framebuffer};
use vertex_raster::scene::{load_scene, parse_scene, DEFAULT_SCENE};
use vertex_raster::{viewer, VERSION};

#[derive(clap::Parser, Debug)]
#[command(name = "vertex-raster", version, about = "Rasterize a vertex-colored scene to PNG", long_about = None)]
struct Args {
    /// Scene file (command text, or RON if it ends in .ron)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    scene: Option<PathBuf>,

    /// RON render configuration
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// PNG to write, overrides the config
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Show the result in a preview window
    #[clap(long, action = clap::ArgAction::SetTrue)]
    view: bool,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }

    let scene = match &args.scene {
        Some(path) => {
            info!("Loading scene {}", path.display());
            load_scene(path)?
        }
        None => {
            info!("No scene given, drawing the built-in scene");
            parse_scene(DEFAULT_SCENE)?
        }
    };

    let mut fb = Framebuffer::new(config.width, config.height);
    fb.clear(config.background);
    render_scene(&mut fb, &scene);

    fb.save_png(&config.output)?;
    info!("Wrote {}x{} image to {}", fb.width, fb.height, config.output.display());

    // The window may exit the process when closed, so it comes last
    if args.view {
        viewer::show(&fb, config.scale);
    }

    Ok(())
}

fn main() -> ExitCode {
    // Default filter is "info" if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("vertex-raster v{}", VERSION);

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
