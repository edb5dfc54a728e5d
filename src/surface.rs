use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;

use crate::brush::BrushConfig;
use crate::config::SurfaceConfig;
use crate::error::ConfigError;
use crate::input::{InputRouter, PointerEvent};
use crate::raster::Raster;
use crate::renderer::Renderer;
use crate::store::StrokeStore;

/// Host callback fired whenever the surface needs repainting
pub type RedrawHook = Box<dyn FnMut() + Send>;

/// A surface shared with other threads. Callers hold the lock for the
/// whole of each interaction, the surface itself is not synchronized.
pub type SharedSurface = Arc<Mutex<DrawingSurface>>;

/// The drawing surface a host embeds.
///
/// Owns the strokes, the brush, the background and the backing raster, and
/// exposes the narrow entry points a platform layer calls: pointer events,
/// resize, background changes, undo/redo and raster snapshots.
pub struct DrawingSurface {
    store: StrokeStore,
    brush: BrushConfig,
    router: InputRouter,
    renderer: Renderer,
    raster: Raster,
    background: Option<RgbaImage>,
    needs_redraw: bool,
    redraw_hook: Option<RedrawHook>,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("store", &self.store)
            .field("brush", &self.brush)
            .field("size", &(self.raster.width(), self.raster.height()))
            .field("has_background", &self.background.is_some())
            .field("needs_redraw", &self.needs_redraw)
            .finish()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::with_parts(BrushConfig::default(), Renderer::default())
    }
}

impl DrawingSurface {
    pub fn new(config: &SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let brush = config.brush()?;
        let renderer = Renderer::new(config.background_fill()?);
        Ok(Self::with_parts(brush, renderer))
    }

    fn with_parts(brush: BrushConfig, renderer: Renderer) -> Self {
        let mut store = StrokeStore::new();
        store.begin_stroke(brush.color(), brush.thickness());
        Self {
            store,
            brush,
            router: InputRouter::new(),
            renderer,
            raster: Raster::default(),
            background: None,
            needs_redraw: true,
            redraw_hook: None,
        }
    }

    pub fn into_shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.redraw_hook = Some(hook);
    }

    /// Feed one pointer sample. Returns whether the event was handled.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        let handled = self.router.route_event(&event, &mut self.store, &self.brush);
        if handled {
            self.request_redraw();
        }
        handled
    }

    /// Reallocate the raster at the new size and repaint everything
    pub fn on_resize(&mut self, width: u32, height: u32) {
        log::info!("Resizing surface to {width}x{height}");
        self.raster = Raster::new(width, height);
        self.request_redraw();
        self.render();
    }

    pub fn set_background(&mut self, background: Option<RgbaImage>) {
        match &background {
            Some(image) => log::info!("Background set ({}x{})", image.width(), image.height()),
            None => log::info!("Background cleared"),
        }
        self.background = background;
        self.request_redraw();
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        if changed {
            self.request_redraw();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Erase every stroke and its undo history
    pub fn clear(&mut self) -> bool {
        let changed = self.store.clear();
        if changed {
            self.request_redraw();
        }
        changed
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// Brush changes only affect strokes begun afterwards, so no redraw
    pub fn brush_mut(&mut self) -> &mut BrushConfig {
        &mut self.brush
    }

    pub fn is_drawing(&self) -> bool {
        self.router.is_drawing()
    }

    /// Read and clear the pending redraw flag
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Repaint if something changed since the last render.
    /// Returns whether the raster was repainted.
    pub fn render(&mut self) -> bool {
        if !self.take_redraw_request() {
            return false;
        }
        self.redraw_now();
        true
    }

    /// Repaint unconditionally
    pub fn redraw_now(&mut self) {
        self.needs_redraw = false;
        self.renderer.render(
            &mut self.raster,
            self.background.as_ref(),
            self.store.committed(),
            self.store.active(),
        );
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Deep copy of the raster as of the last render, for exporting elsewhere
    pub fn snapshot_raster(&self) -> RgbaImage {
        self.raster.image().clone()
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
        if let Some(hook) = &mut self.redraw_hook {
            hook();
        }
    }
}
