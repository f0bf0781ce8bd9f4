//! Session — the one animation being edited and the cel it is drawn on.
//!
//! The session is built once by the host and passed by reference to whatever
//! drives it (the editor loop, playback). It carries the "controls"
//! operations: add a frame, play, report the frame counter.

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, Frame};
use crate::cel::Cel;
use crate::error::CelResult;
use crate::pen::PenAction;
use crate::player::{Player, PlayerConfig};
use crate::renderer::Surface;
use crate::types::PaintStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStyles {
    /// Ghost of the previous frame shown under the one being drawn.
    #[serde(default = "PaintStyle::onion")]
    pub onion: PaintStyle,
    #[serde(default)]
    pub playback: PaintStyle,
}

impl Default for SessionStyles {
    fn default() -> Self {
        SessionStyles {
            onion: PaintStyle::onion(),
            playback: PaintStyle::default(),
        }
    }
}

pub struct Session<S> {
    animation: Animation,
    cel: Cel<S>,
    styles: SessionStyles,
}

impl<S: Surface> Session<S> {
    /// A fresh animation with its only frame active.
    pub fn new(surface: S, styles: SessionStyles) -> Self {
        let animation = Animation::new();
        let mut cel = Cel::new(surface);
        cel.set_active_frame(animation.last_index());
        tracing::info!("session started");
        Session {
            animation,
            cel,
            styles,
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn cel(&self) -> &Cel<S> {
        &self.cel
    }

    pub fn cel_mut(&mut self) -> &mut Cel<S> {
        &mut self.cel
    }

    pub fn styles(&self) -> &SessionStyles {
        &self.styles
    }

    /// Forward a pen callback to the cel.
    pub fn apply_pen(&mut self, action: PenAction) -> CelResult<()> {
        match action {
            PenAction::StrokeStart(coord) => self.cel.on_stroke_start(&mut self.animation, coord),
            PenAction::StrokePoint(coord) => self.cel.on_stroke_point(&mut self.animation, coord),
        }
    }

    /// Ghost the last frame, append an empty frame and make it active.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn add_frame(&mut self) -> CelResult<usize> {
        let previous = self.animation.get_frame(None)?;
        self.cel.render_frame(previous, &self.styles.onion);

        let index = self.animation.add_frame(Frame::new());
        self.cel.set_active_frame(index);
        Ok(index)
    }

    /// `(current, total)`, 1-based, for the frame counter.
    pub fn frame_info(&self) -> (usize, usize) {
        let current = self
            .cel
            .active_frame()
            .unwrap_or_else(|| self.animation.last_index());
        (current + 1, self.animation.len())
    }

    /// A fresh player, play-head at the first frame.
    pub fn player(&self, config: PlayerConfig) -> CelResult<Player> {
        Player::new(config)
    }

    /// Display frame `index` in the playback style.
    pub fn show_playback_frame(&mut self, index: usize) -> CelResult<()> {
        let frame = self.animation.get_frame(Some(index))?;
        self.cel.render_frame(frame, &self.styles.playback);
        Ok(())
    }

    /// Redraw the editing view: the previous frame's ghost (if any) with the
    /// active frame on top.
    pub fn show_active_frame(&mut self) -> CelResult<()> {
        let active = self
            .cel
            .active_frame()
            .unwrap_or_else(|| self.animation.last_index());
        let frame = self.animation.get_frame(Some(active))?;

        match active.checked_sub(1) {
            Some(prev) => {
                let ghost = self.animation.get_frame(Some(prev))?;
                self.cel.render_frame(ghost, &self.styles.onion);
                self.cel.draw_frame(frame, &PaintStyle::default());
            }
            None => self.cel.render_frame(frame, &PaintStyle::default()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Coordinate;
    use crate::renderer::{RecordingSurface, SurfaceCall};

    fn session() -> Session<RecordingSurface> {
        Session::new(RecordingSurface::new(40.0, 10.0), SessionStyles::default())
    }

    fn scribble(s: &mut Session<RecordingSurface>) {
        s.apply_pen(PenAction::StrokeStart(Coordinate::new(0.0, 0.0))).unwrap();
        s.apply_pen(PenAction::StrokePoint(Coordinate::new(4.0, 2.0))).unwrap();
    }

    #[test]
    fn new_session_draws_on_first_frame() {
        let mut s = session();
        assert_eq!(s.frame_info(), (1, 1));
        scribble(&mut s);
        assert_eq!(s.animation().get_frame(Some(0)).unwrap().strokes().len(), 1);
    }

    #[test]
    fn add_frame_ghosts_previous_and_retargets() {
        let mut s = session();
        scribble(&mut s);
        s.cel_mut().surface_mut().take_calls();

        let index = s.add_frame().unwrap();

        assert_eq!(index, 1);
        assert_eq!(s.frame_info(), (2, 2));
        assert!(s.animation().get_frame(Some(1)).unwrap().is_empty());
        assert!(
            s.cel()
                .surface()
                .calls()
                .contains(&SurfaceCall::SetStyle(PaintStyle::onion()))
        );
        assert_eq!(s.cel().surface().painted_segments(), 1);

        scribble(&mut s);
        assert_eq!(s.animation().get_frame(Some(0)).unwrap().strokes().len(), 1);
        assert_eq!(s.animation().get_frame(Some(1)).unwrap().strokes().len(), 1);
    }

    #[test]
    fn show_active_frame_layers_ghost_under_active() {
        let mut s = session();
        scribble(&mut s);
        s.add_frame().unwrap();
        scribble(&mut s);
        s.cel_mut().surface_mut().take_calls();

        s.show_active_frame().unwrap();

        let calls = s.cel().surface().calls();
        let clears = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::ClearRect { .. }))
            .count();
        assert_eq!(clears, 1);
        assert_eq!(s.cel().surface().painted_segments(), 2);
    }

    #[test]
    fn playback_frame_out_of_range_is_an_error() {
        let mut s = session();
        assert!(s.show_playback_frame(3).is_err());
    }
}
