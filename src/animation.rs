//! Animation data model — coordinates, strokes, frames.
//!
//! Everything here is append-only: strokes grow one coordinate at a time,
//! frames grow one stroke at a time, and the animation grows one frame at a
//! time. Nothing is ever removed.

use crate::error::{CelError, CelResult};

/// An immutable point on the drawing surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }
}

/// One pen-down-to-pen-up gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    coords: Vec<Coordinate>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coord: Coordinate) {
        self.coords.push(coord);
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.coords.last().copied()
    }

    /// A stroke needs at least two points to leave a visible line.
    pub fn is_drawable(&self) -> bool {
        self.coords.len() >= 2
    }
}

/// One drawable image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    strokes: Vec<Stroke>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn last_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut()
    }
}

/// An ordered, never-empty sequence of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// A new animation holds exactly one empty frame.
    pub fn new() -> Self {
        Animation {
            frames: vec![Frame::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept alongside `len` for the usual collection API.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    /// Append `frame` and return its index.
    pub fn add_frame(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        let index = self.last_index();
        tracing::info!(index, total = self.frames.len(), "frame added");
        index
    }

    /// The frame at `index`, or the last frame when `index` is `None`.
    pub fn get_frame(&self, index: Option<usize>) -> CelResult<&Frame> {
        let index = index.unwrap_or_else(|| self.last_index());
        self.frames.get(index).ok_or(CelError::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    pub fn get_frame_mut(&mut self, index: Option<usize>) -> CelResult<&mut Frame> {
        let index = index.unwrap_or_else(|| self.last_index());
        let len = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or(CelError::FrameOutOfRange { index, len })
    }
}
