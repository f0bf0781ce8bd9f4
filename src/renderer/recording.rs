//! A `Surface` that records every primitive instead of drawing.
//!
//! Used for headless playback and as the test double for the cel.

use crate::animation::Coordinate;
use crate::types::PaintStyle;

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    BeginPath,
    MoveTo(Coordinate),
    LineTo(Coordinate),
    Stroke,
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    SetStyle(PaintStyle),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of line segments that were actually painted: every `LineTo`
    /// in the path at the moment of a `Stroke`.
    pub fn painted_segments(&self) -> usize {
        let mut pending = 0;
        let mut painted = 0;
        for call in &self.calls {
            match call {
                SurfaceCall::BeginPath => pending = 0,
                SurfaceCall::LineTo(_) => pending += 1,
                SurfaceCall::Stroke => painted += pending,
                _ => {}
            }
        }
        painted
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, at: Coordinate) {
        self.calls.push(SurfaceCall::MoveTo(at));
    }

    fn line_to(&mut self, to: Coordinate) {
        self.calls.push(SurfaceCall::LineTo(to));
    }

    fn stroke(&mut self) {
        self.calls.push(SurfaceCall::Stroke);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(SurfaceCall::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn save(&mut self) {
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(SurfaceCall::Restore);
    }

    fn set_style(&mut self, style: &PaintStyle) {
        self.calls.push(SurfaceCall::SetStyle(style.clone()));
    }
}
