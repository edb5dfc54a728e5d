#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use freehand_paint::{
    BrushSize, ColorParseError, DrawingSurface, PointerEvent, SurfaceConfig, export,
};

#[derive(Parser, Debug)]
#[command(name = "freehand_paint")]
#[command(version, about = "Draw a demo scene on a headless surface and save it as PNG")]
struct Cli {
    /// JSON surface config (density, default color, brush size, fill)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the PNG
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let cli = Cli::parse();
    match run(&cli) {
        Ok(path) => {
            println!("Saved drawing to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, String> {
    let config = match &cli.config {
        Some(path) => SurfaceConfig::load(path).map_err(|err| err.to_string())?,
        None => SurfaceConfig::default(),
    };

    let mut surface = DrawingSurface::new(&config).map_err(|err| err.to_string())?;
    surface.on_resize(320, 240);

    draw_scene(&mut surface).map_err(|err| err.to_string())?;
    surface.render();

    export::spawn_export(surface.snapshot_raster(), cli.output.clone())
        .wait()
        .map_err(|err| err.to_string())
}

fn drag(surface: &mut DrawingSurface, points: &[(f32, f32)]) {
    let Some((&(x, y), rest)) = points.split_first() else {
        return;
    };
    surface.handle_event(PointerEvent::press(x, y));
    for &(x, y) in rest {
        surface.handle_event(PointerEvent::moved(x, y));
    }
    let (x, y) = points[points.len() - 1];
    surface.handle_event(PointerEvent::release(x, y));
}

/// A house, a sun, and a scribble that gets undone and redone
fn draw_scene(surface: &mut DrawingSurface) -> Result<(), ColorParseError> {
    surface.brush_mut().set_brush_size(BrushSize::Small);
    let house = [
        (60.0, 200.0),
        (60.0, 120.0),
        (120.0, 70.0),
        (180.0, 120.0),
        (180.0, 200.0),
        (60.0, 200.0),
    ];
    drag(surface, &house);

    surface.brush_mut().set_color_token("#FFCC00")?;
    surface.brush_mut().set_brush_size(BrushSize::Large);
    drag(surface, &[(260.0, 50.0), (262.0, 52.0)]);

    surface.brush_mut().set_color_token("red")?;
    surface.brush_mut().set_brush_size(BrushSize::Medium);
    drag(surface, &[(20.0, 20.0), (80.0, 40.0), (30.0, 60.0)]);
    surface.undo();
    surface.redo();
    Ok(())
}
