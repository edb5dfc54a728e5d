use egui::{Pos2, Rect};
use uuid::Uuid;

use crate::brush::PaintColor;
use crate::geometry;

/// Identity of a single recorded drag, stable across commit, undo and redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything the renderer can trace as a connected line.
///
/// Committed and in-progress strokes both implement this so the renderer
/// resolves pen color and width the same way for each.
pub trait StrokePath {
    fn points(&self) -> &[Pos2];
    fn color(&self) -> PaintColor;
    fn thickness(&self) -> f32;

    /// Fewer than two points produce no visible segment
    fn is_drawable(&self) -> bool {
        self.points().len() >= 2
    }

    /// Pixel-space bounds including the pen radius
    fn bounds(&self) -> Rect {
        geometry::calculate_bounds(self.points(), self.thickness() / 2.0)
    }
}

// Immutable stroke, owned by the committed list or the redo buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    color: PaintColor,
    thickness: f32,
}

// The one stroke still receiving points
#[derive(Debug, PartialEq)]
pub struct MutableStroke {
    id: StrokeId,
    points: Vec<Pos2>,
    color: PaintColor,
    thickness: f32,
}

impl Stroke {
    pub fn new(color: PaintColor, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            id: StrokeId::new(),
            points,
            color,
            thickness,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl StrokePath for Stroke {
    fn points(&self) -> &[Pos2] {
        &self.points
    }

    fn color(&self) -> PaintColor {
        self.color
    }

    fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    pub fn new(color: PaintColor, thickness: f32) -> Self {
        Self {
            id: StrokeId::new(),
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Drop recorded points and take a new style snapshot.
    ///
    /// The stroke also gets a fresh id, it is a new drag from here on.
    pub fn reset(&mut self, color: PaintColor, thickness: f32) {
        self.id = StrokeId::new();
        self.points.clear();
        self.color = color;
        self.thickness = thickness;
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Freeze into a committed stroke, moving the point buffer
    pub fn into_stroke(self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points,
            color: self.color,
            thickness: self.thickness,
        }
    }

    /// Deep copy of the current state, for handing to another thread
    pub fn snapshot(&self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points.clone(),
            color: self.color,
            thickness: self.thickness,
        }
    }
}

impl StrokePath for MutableStroke {
    fn points(&self) -> &[Pos2] {
        &self.points
    }

    fn color(&self) -> PaintColor {
        self.color
    }

    fn thickness(&self) -> f32 {
        self.thickness
    }
}
