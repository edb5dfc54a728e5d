#![warn(clippy::all, rust_2018_idioms)]

pub mod brush;
pub mod config;
pub mod error;
pub mod export;
mod geometry;
pub mod input;
pub mod raster;
pub mod renderer;
pub mod store;
pub mod stroke;
pub mod surface;

pub use brush::{BrushConfig, BrushSize, PaintColor};
pub use config::SurfaceConfig;
pub use error::{ColorParseError, ConfigError, ExportError};
pub use export::ExportHandle;
pub use input::{InputRouter, PointerEvent, PointerPhase};
pub use raster::Raster;
pub use renderer::Renderer;
pub use store::StrokeStore;
pub use stroke::{MutableStroke, Stroke, StrokeId, StrokePath};
pub use surface::{DrawingSurface, SharedSurface};
