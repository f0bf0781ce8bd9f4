use crate::pen::PenInput;
use crate::player::{Player, RefreshTicker};
use crate::renderer::Canvas;
use crate::session::Session;

use super::config::EditorConfig;

pub enum Mode {
    Drawing,
    Playing {
        player: Player,
        ticker: RefreshTicker,
    },
}

impl Mode {
    pub fn is_playing(&self) -> bool {
        matches!(self, Mode::Playing { .. })
    }
}

pub struct EditorState {
    pub session: Session<Canvas>,
    pub pen: PenInput,
    pub mode: Mode,
    pub config: EditorConfig,
    pub status_message: Option<String>,
}

impl EditorState {
    pub fn new(config: EditorConfig, canvas_width: u16, canvas_height: u16) -> Self {
        let canvas = Canvas::new(canvas_width, canvas_height, config.brush);
        let session = Session::new(canvas, config.styles.clone());
        EditorState {
            session,
            pen: PenInput::new(),
            mode: Mode::Drawing,
            config,
            status_message: None,
        }
    }

    /// Index shown by the frame bar: the last played frame during playback,
    /// otherwise the active frame.
    pub fn shown_frame(&self) -> usize {
        match &self.mode {
            Mode::Playing { player, .. } => player.play_head().saturating_sub(1),
            Mode::Drawing => self.session.frame_info().0 - 1,
        }
    }
}
