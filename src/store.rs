use egui::Pos2;

use crate::brush::{BrushConfig, PaintColor};
use crate::stroke::{MutableStroke, Stroke, StrokePath};

/// Holds every stroke of the drawing.
///
/// A stroke lives in exactly one place at a time: `active` while it is being
/// drawn, `committed` once released, `redo_buffer` after an undo. Moves
/// between them transfer the value, nothing is copied.
///
/// Every method returns whether state changed so the host knows when to
/// request a redraw.
#[derive(Debug, Default)]
pub struct StrokeStore {
    committed: Vec<Stroke>,
    active: Option<MutableStroke>,
    /// Most recently undone stroke is last
    redo_buffer: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active stroke with an empty one carrying this style
    pub fn begin_stroke(&mut self, color: PaintColor, thickness: f32) {
        self.active = Some(MutableStroke::new(color, thickness));
    }

    /// Clear the active stroke's points and re-snapshot its style.
    /// Starts a stroke if none is active.
    pub fn reset_active(&mut self, color: PaintColor, thickness: f32) {
        match &mut self.active {
            Some(active) => active.reset(color, thickness),
            None => self.begin_stroke(color, thickness),
        }
    }

    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        match &mut self.active {
            Some(active) => {
                active.add_point(point);
                true
            }
            None => {
                log::debug!("Ignoring point {point:?} with no active stroke");
                false
            }
        }
    }

    /// Move the active stroke to the end of `committed` and prime a fresh one
    /// from `brush`. Empty strokes are committed too.
    pub fn commit_stroke(&mut self, brush: &BrushConfig) -> bool {
        let Some(active) = self.active.take() else {
            log::debug!("Nothing to commit");
            return false;
        };

        let stroke = active.into_stroke();
        log::debug!("Committing stroke {} with {} points", stroke.id(), stroke.len());
        self.committed.push(stroke);
        self.redo_buffer.clear();
        self.begin_stroke(brush.color(), brush.thickness());
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                log::debug!("Undo stroke {}", stroke.id());
                self.redo_buffer.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(stroke) => {
                log::debug!("Redo stroke {}", stroke.id());
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Drop all strokes, including undo history, and empty the active stroke
    pub fn clear(&mut self) -> bool {
        let had_content = !self.committed.is_empty()
            || !self.redo_buffer.is_empty()
            || self.active.as_ref().is_some_and(|active| !active.is_empty());

        self.committed.clear();
        self.redo_buffer.clear();
        if let Some(active) = &mut self.active {
            let (color, thickness) = (active.color(), active.thickness());
            active.reset(color, thickness);
        }
        had_content
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn active(&self) -> Option<&MutableStroke> {
        self.active.as_ref()
    }

    /// Owned copy of the in-progress stroke, e.g. for a preview on another
    /// thread. Later points added to the live stroke do not show up in it.
    pub fn snapshot_active(&self) -> Option<Stroke> {
        self.active.as_ref().map(MutableStroke::snapshot)
    }

    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo_buffer
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BLACK, BLUE, GREEN, RED};
    use egui::pos2;

    fn store_with(strokes: usize) -> StrokeStore {
        let brush = BrushConfig::default();
        let mut store = StrokeStore::new();
        store.begin_stroke(brush.color(), brush.thickness());
        for i in 0..strokes {
            store.extend_stroke(pos2(i as f32, 0.0));
            store.extend_stroke(pos2(i as f32, 10.0));
            store.commit_stroke(&brush);
        }
        store
    }

    #[test]
    fn test_commit_primes_next_stroke() {
        let mut brush = BrushConfig::default();
        let mut store = StrokeStore::new();
        store.begin_stroke(brush.color(), brush.thickness());
        store.extend_stroke(pos2(1.0, 1.0));

        brush.set_color(RED);
        brush.set_thickness(5.0);
        assert!(store.commit_stroke(&brush));

        let committed = &store.committed()[0];
        assert_eq!(committed.color(), BLACK);
        assert_eq!(committed.thickness(), 20.0);

        let active = store.active().unwrap();
        assert!(active.is_empty());
        assert_eq!(active.color(), RED);
        assert_eq!(active.thickness(), 5.0);
    }

    #[test]
    fn test_commit_without_active_is_noop() {
        let mut store = StrokeStore::new();
        assert!(!store.commit_stroke(&BrushConfig::default()));
        assert!(store.committed().is_empty());
    }

    #[test]
    fn test_extend_without_active_is_noop() {
        let mut store = StrokeStore::new();
        assert!(!store.extend_stroke(pos2(1.0, 1.0)));
        assert!(store.active().is_none());
    }

    #[test]
    fn test_empty_stroke_is_committed() {
        let mut store = store_with(0);
        assert!(store.commit_stroke(&BrushConfig::default()));
        assert_eq!(store.committed().len(), 1);
        assert!(store.committed()[0].is_empty());
    }

    #[test]
    fn test_undo_redo_moves_strokes() {
        let mut store = store_with(3);
        let before = store.committed().to_vec();
        let last_id = before[2].id();

        assert!(store.undo());
        assert_eq!(store.committed().len(), 2);
        assert_eq!(store.redo_buffer().last().map(|s| s.id()), Some(last_id));

        assert!(store.redo());
        assert_eq!(store.committed(), before.as_slice());
        assert!(store.redo_buffer().is_empty());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut store = StrokeStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_commit_clears_redo_buffer() {
        let brush = BrushConfig::default();
        let mut store = store_with(2);
        store.undo();
        assert!(store.can_redo());

        store.extend_stroke(pos2(50.0, 50.0));
        store.commit_stroke(&brush);
        assert!(!store.can_redo());
        assert!(!store.redo());
        assert_eq!(store.committed().len(), 2);
    }

    #[test]
    fn test_redo_order_is_lifo() {
        let mut store = store_with(3);
        let ids: Vec<_> = store.committed().iter().map(|s| s.id()).collect();
        store.undo();
        store.undo();
        store.redo();
        let now: Vec<_> = store.committed().iter().map(|s| s.id()).collect();
        assert_eq!(now, ids[..2].to_vec());
        assert_eq!(store.redo_buffer()[0].id(), ids[2]);
    }

    #[test]
    fn test_reset_active_keeps_single_active() {
        let mut store = StrokeStore::new();
        store.reset_active(BLUE, 3.0);
        store.extend_stroke(pos2(1.0, 1.0));
        store.reset_active(GREEN, 6.0);

        let active = store.active().unwrap();
        assert!(active.is_empty());
        assert_eq!(active.color(), GREEN);
        assert_eq!(active.points(), &[] as &[Pos2]);
    }

    #[test]
    fn test_clear_drops_history() {
        let mut store = store_with(2);
        store.undo();
        assert!(store.clear());
        assert!(store.committed().is_empty());
        assert!(store.redo_buffer().is_empty());
        assert!(store.active().unwrap().is_empty());
        assert!(!store.clear());
    }

    #[test]
    fn test_snapshot_active_is_detached() {
        let mut store = StrokeStore::new();
        store.begin_stroke(RED, 2.0);
        store.extend_stroke(pos2(1.0, 1.0));
        store.extend_stroke(pos2(2.0, 2.0));

        let snapshot = store.snapshot_active().unwrap();
        store.extend_stroke(pos2(3.0, 3.0));

        assert_eq!(snapshot.points(), &[pos2(1.0, 1.0), pos2(2.0, 2.0)]);
        assert_eq!(snapshot.id(), store.active().unwrap().id());
        assert_eq!(store.active().unwrap().points().len(), 3);
        assert!(StrokeStore::new().snapshot_active().is_none());
    }
}
