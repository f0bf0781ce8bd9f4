//! Player — the playback scheduler.
//!
//! Replays an animation's frames at a target rate. The player never touches
//! the terminal: the host delivers ticks (one per display refresh) and the
//! player answers with what to do for each, throttling the refresh rate down
//! to the target frame rate by dropping ticks that arrive too early.
//!
//! Cancellation is a flag. `pause()` does not withdraw a tick that is already
//! scheduled; that tick still arrives, sees the player stopped, and lapses
//! without rendering or scheduling another.

pub mod ticker;

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::cel::Cel;
use crate::error::{CelError, CelResult};
use crate::renderer::Surface;
use crate::types::PaintStyle;

pub use ticker::{FixedStepTicker, RefreshTicker, Ticker, MAX_REFRESH_HZ};

fn default_true() -> bool {
    true
}

fn default_fps() -> f64 {
    24.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Wrap to the first frame at the end instead of stopping.
    #[serde(rename = "loop", default = "default_true")]
    pub loop_playback: bool,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            loop_playback: default_true(),
            fps: default_fps(),
        }
    }
}

impl PlayerConfig {
    /// Minimum time between two displayed frames, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps
    }
}

/// What the host should do with one delivered tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The player is stopped; the tick chain ends here.
    Lapsed,
    /// Too early for the next frame; the tick is dropped.
    Throttled,
    /// Display the frame at this index.
    Render(usize),
    /// Non-looping playback ran out of frames.
    Finished,
}

#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    playing: bool,
    play_head: usize,
    last_display_time: Option<f64>,
    tick_pending: bool,
}

impl Player {
    pub fn new(config: PlayerConfig) -> CelResult<Self> {
        if !config.fps.is_finite() || config.fps <= 0.0 {
            return Err(CelError::InvalidFps(config.fps));
        }
        Ok(Player {
            config,
            playing: false,
            play_head: 0,
            last_display_time: None,
            tick_pending: false,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play_head(&self) -> usize {
        self.play_head
    }

    /// Whether the host owes the player a tick.
    pub fn is_tick_pending(&self) -> bool {
        self.tick_pending
    }

    /// Start (or resume) playback from the current play-head.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        tracing::debug!(play_head = self.play_head, fps = self.config.fps, "playback started");
        self.playing = true;
        self.tick_pending = true;
    }

    pub fn pause(&mut self) {
        if self.playing {
            tracing::debug!(play_head = self.play_head, "playback paused");
        }
        self.playing = false;
    }

    fn stop(&mut self) {
        tracing::debug!(play_head = self.play_head, "playback finished");
        self.playing = false;
    }

    /// Handle one display-refresh tick at `timestamp` (milliseconds).
    pub fn tick(&mut self, timestamp: f64, frame_count: usize) -> Tick {
        if !std::mem::replace(&mut self.tick_pending, false) || !self.playing {
            return Tick::Lapsed;
        }
        self.tick_pending = true;

        if let Some(last) = self.last_display_time {
            if timestamp - last < self.config.frame_interval_ms() {
                tracing::trace!(timestamp, last, "tick throttled");
                return Tick::Throttled;
            }
        }
        self.last_display_time = Some(timestamp);

        if frame_count == 0 {
            self.stop();
            return Tick::Finished;
        }
        if self.play_head >= frame_count {
            if self.config.loop_playback {
                self.play_head = 0;
            } else {
                self.stop();
                return Tick::Finished;
            }
        }

        let index = self.play_head;
        self.play_head += 1;
        Tick::Render(index)
    }

    /// Run the tick chain against `ticker` until it lapses, rendering due
    /// frames of `animation` on `cel`. Pauses once a tick reaches
    /// `deadline` (ms); without one, a looping player never returns.
    ///
    /// Returns the indices rendered, in order.
    pub fn drive<T: Ticker, S: Surface>(
        &mut self,
        ticker: &mut T,
        animation: &Animation,
        cel: &mut Cel<S>,
        style: &PaintStyle,
        deadline: Option<f64>,
    ) -> CelResult<Vec<usize>> {
        let mut rendered = Vec::new();
        while self.tick_pending {
            let now = ticker.next_tick();
            if deadline.is_some_and(|d| now >= d) {
                self.pause();
            }
            if let Tick::Render(index) = self.tick(now, animation.len()) {
                cel.render_frame(animation.get_frame(Some(index))?, style);
                rendered.push(index);
            }
        }
        Ok(rendered)
    }
}
