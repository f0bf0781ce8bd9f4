//! Cel — the drawing surface for the active frame.
//!
//! The cel owns its `Surface` but not the frames: the active frame is an
//! index into an `Animation` that the caller lends for each mutation.

use crate::animation::{Animation, Coordinate, Frame, Stroke};
use crate::error::{CelError, CelResult};
use crate::renderer::Surface;
use crate::types::PaintStyle;

pub struct Cel<S> {
    surface: S,
    active_frame: Option<usize>,
}

impl<S: Surface> Cel<S> {
    pub fn new(surface: S) -> Self {
        Cel {
            surface,
            active_frame: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn active_frame(&self) -> Option<usize> {
        self.active_frame
    }

    /// Redirect subsequent stroke mutations to `index`. Draws nothing.
    pub fn set_active_frame(&mut self, index: usize) {
        tracing::debug!(index, "active frame set");
        self.active_frame = Some(index);
    }

    fn active<'a>(&self, animation: &'a mut Animation) -> CelResult<(usize, &'a mut Frame)> {
        let index = self.active_frame.ok_or(CelError::NoActiveFrame)?;
        Ok((index, animation.get_frame_mut(Some(index))?))
    }

    /// Open a new stroke on the active frame and start a path at `coord`.
    pub fn on_stroke_start(&mut self, animation: &mut Animation, coord: Coordinate) -> CelResult<()> {
        let (_, frame) = self.active(animation)?;
        let mut stroke = Stroke::new();
        stroke.push(coord);
        frame.push_stroke(stroke);

        self.surface.begin_path();
        self.surface.move_to(coord);
        Ok(())
    }

    /// Extend the active frame's last stroke to `coord`, painting only the
    /// new segment.
    pub fn on_stroke_point(&mut self, animation: &mut Animation, coord: Coordinate) -> CelResult<()> {
        let (index, frame) = self.active(animation)?;
        let stroke = frame
            .last_stroke_mut()
            .ok_or(CelError::NoStroke { frame: index })?;
        stroke.push(coord);

        self.surface.line_to(coord);
        self.surface.stroke();
        // Restart the path at the new point so the next stroke() only
        // paints the segment that follows.
        self.surface.begin_path();
        self.surface.move_to(coord);
        Ok(())
    }

    /// Erase the whole surface.
    pub fn clear(&mut self) {
        let (width, height) = self.surface.size();
        self.surface.clear_rect(0.0, 0.0, width, height);
    }

    /// Clear, then redraw every drawable stroke of `frame` with `style`
    /// merged over the surface's paint.
    #[tracing::instrument(level = "trace", skip_all, fields(strokes = frame.strokes().len()))]
    pub fn render_frame(&mut self, frame: &Frame, style: &PaintStyle) {
        self.clear();
        self.draw_frame(frame, style);
    }

    /// Draw `frame` over whatever the surface already shows.
    pub fn draw_frame(&mut self, frame: &Frame, style: &PaintStyle) {
        self.surface.save();
        self.surface.set_style(style);
        for stroke in frame.strokes() {
            self.render_stroke(stroke);
        }
        self.surface.restore();
    }

    fn render_stroke(&mut self, stroke: &Stroke) {
        let [first, rest @ ..] = stroke.coords() else {
            return;
        };
        if rest.is_empty() {
            tracing::trace!("skipping single-point stroke");
            return;
        }

        self.surface.begin_path();
        self.surface.move_to(*first);
        for coord in rest {
            self.surface.line_to(*coord);
        }
        self.surface.stroke();
    }
}
