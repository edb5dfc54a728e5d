use egui::Pos2;

use crate::brush::BrushConfig;
use crate::store::StrokeStore;

/// Phase of a pointer contact as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer made contact
    Press,
    /// Pointer moved while in contact
    Move,
    /// Pointer left contact
    Release,
    /// The platform aborted the gesture
    Cancel,
}

/// A pointer sample in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Pos2,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            position: Pos2::new(x, y),
        }
    }

    pub fn press(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Press, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Release, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Cancel, x, y)
    }
}

/// Turns press/move/release into stroke store operations.
///
/// Mis-sequenced events (a move or release with no press) are applied as-is
/// and degrade to whatever the store does with them; nothing is rejected.
#[derive(Debug, Default)]
pub struct InputRouter {
    in_contact: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a press and the following release
    pub fn is_drawing(&self) -> bool {
        self.in_contact
    }

    /// Apply one event. Returns false for phases that do not affect strokes.
    pub fn route_event(
        &mut self,
        event: &PointerEvent,
        store: &mut StrokeStore,
        brush: &BrushConfig,
    ) -> bool {
        match event.phase {
            PointerPhase::Press => {
                // the store keeps an empty stroke primed after every commit
                store.reset_active(brush.color(), brush.thickness());
                store.extend_stroke(event.position);
                self.in_contact = true;
            }
            PointerPhase::Move => {
                if !self.in_contact {
                    log::debug!("Move at {:?} without a press", event.position);
                }
                store.extend_stroke(event.position);
            }
            PointerPhase::Release => {
                store.commit_stroke(brush);
                self.in_contact = false;
            }
            PointerPhase::Cancel => {
                log::debug!("Unhandled pointer phase {:?}", event.phase);
                return false;
            }
        }
        true
    }
}
