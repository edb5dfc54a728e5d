// src/renderer.rs
use image::RgbaImage;

use crate::brush::{self, PaintColor};
use crate::raster::Raster;
use crate::stroke::StrokePath;

/// Replays strokes onto a [`Raster`].
///
/// Output depends only on the arguments, so two renders of the same state
/// give identical pixels.
#[derive(Debug, Clone)]
pub struct Renderer {
    background_fill: PaintColor,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(brush::WHITE)
    }
}

impl Renderer {
    pub fn new(background_fill: PaintColor) -> Self {
        Self { background_fill }
    }

    pub fn background_fill(&self) -> PaintColor {
        self.background_fill
    }

    /// Repaints the whole target
    ///
    /// Args:
    ///     target: raster to paint into, fully overwritten
    ///     background: optional image composited at the origin, unscaled
    ///     committed: finished strokes, painted in order
    ///     active: the stroke still being drawn, painted last
    pub fn render<S, A>(
        &self,
        target: &mut Raster,
        background: Option<&RgbaImage>,
        committed: &[S],
        active: Option<&A>,
    ) where
        S: StrokePath,
        A: StrokePath,
    {
        target.fill(self.background_fill);
        if let Some(background) = background {
            target.blit(background);
        }

        for stroke in committed {
            Self::draw_stroke(target, stroke);
        }
        if let Some(active) = active {
            Self::draw_stroke(target, active);
        }
    }

    fn draw_stroke(target: &mut Raster, stroke: &impl StrokePath) {
        if !stroke.is_drawable() {
            return;
        }
        target.draw_polyline(stroke.points(), stroke.color(), stroke.thickness());
    }
}
