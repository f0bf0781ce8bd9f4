//! Pen input — turns raw pointer events into stroke callbacks.
//!
//! A two-state machine: `Idle` ignores movement, `Dragging` forwards every
//! move as a stroke point. There is no smoothing or buffering.

use crate::animation::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Coordinate),
    Move(Coordinate),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenState {
    #[default]
    Idle,
    Dragging,
}

/// Stroke callback requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenAction {
    StrokeStart(Coordinate),
    StrokePoint(Coordinate),
}

/// The transition table.
pub fn transition(state: PenState, event: PointerEvent) -> (PenState, Option<PenAction>) {
    use PenState::*;
    use PointerEvent::*;

    match (state, event) {
        // A Down while dragging means the Up got lost; start over.
        (_, Down(c)) => (Dragging, Some(PenAction::StrokeStart(c))),
        (Dragging, Move(c)) => (Dragging, Some(PenAction::StrokePoint(c))),
        (Dragging, Up) => (Idle, None),
        (Idle, Move(_) | Up) => (Idle, None),
    }
}

#[derive(Debug, Default)]
pub struct PenInput {
    state: PenState,
}

impl PenInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == PenState::Dragging
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<PenAction> {
        let (next, action) = transition(self.state, event);
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, "pen state");
        }
        self.state = next;
        action
    }

    /// Drop back to idle without emitting anything, e.g. when playback
    /// takes over the surface mid-gesture.
    pub fn reset(&mut self) {
        self.state = PenState::Idle;
    }
}
