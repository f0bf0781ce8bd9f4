pub mod config;
mod canvas;
mod input;
mod menubar;
pub mod state;
mod timeline;
mod ui;

use std::io::{self, Write};

use anyhow::{bail, Result};
use crossterm::{cursor, event, execute, terminal};

use crate::player::{Tick, Ticker};
use crate::renderer::Damage;

use config::EditorConfig;
use input::Action;
use state::{EditorState, Mode};
use ui::Layout;

pub struct Editor {
    state: EditorState,
    layout: Layout,
    fullscreen: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self> {
        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h);
        if layout.canvas_height == 0 || layout.canvas_width == 0 {
            bail!("Terminal too small: have {term_w}x{term_h}");
        }
        let state = EditorState::new(config, layout.canvas_width, layout.canvas_height);
        Ok(Editor {
            state,
            layout,
            fullscreen: false,
        })
    }

    /// Run the editor in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.full_redraw(stdout)?;

        loop {
            // While playing, wait for input no longer than the next refresh.
            let event = match &self.state.mode {
                Mode::Playing { ticker, .. } => {
                    if event::poll(ticker.until_next())? {
                        Some(event::read()?)
                    } else {
                        None
                    }
                }
                Mode::Drawing => Some(event::read()?),
            };

            let Some(event) = event else {
                self.on_refresh(stdout)?;
                continue;
            };

            if let event::Event::Resize(w, h) = event {
                self.resize(w, h)?;
            }

            match input::handle_event(&mut self.state, &self.layout, event)? {
                Action::Continue => {}
                Action::FlushCanvas => self.flush_canvas(stdout)?,
                Action::Redraw => self.full_redraw(stdout)?,
                Action::ToggleFullscreen => {
                    self.fullscreen = !self.fullscreen;
                    if self.fullscreen {
                        stdout.write_all(b"\x1b[10;1t")?;
                    } else {
                        stdout.write_all(b"\x1b[10;0t")?;
                    }
                    stdout.flush()?;
                }
                Action::Quit => break,
            }
        }

        tracing::info!(frames = self.state.session.animation().len(), "editor closed");
        Ok(())
    }

    /// Deliver one display-refresh tick to the player.
    fn on_refresh(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let frame_count = self.state.session.animation().len();
        let Mode::Playing { player, ticker } = &mut self.state.mode else {
            return Ok(());
        };

        let now = ticker.next_tick();
        let tick = player.tick(now, frame_count);
        let chain_over = !player.is_tick_pending();

        if let Tick::Render(index) = tick {
            self.state.session.show_playback_frame(index)?;
            self.flush_canvas(stdout)?;
            timeline::render_timeline(stdout, &self.layout, &self.state)?;
            stdout.flush()?;
        }

        if chain_over || tick == Tick::Finished {
            tracing::debug!(?tick, "playback over, back to drawing");
            self.state.mode = Mode::Drawing;
            self.state.session.show_active_frame()?;
            self.full_redraw(stdout)?;
        }
        Ok(())
    }

    fn resize(&mut self, term_w: u16, term_h: u16) -> Result<()> {
        self.layout = Layout::compute(term_w, term_h);
        let grid = self.state.session.cel_mut().surface_mut();
        grid.resize(self.layout.canvas_width, self.layout.canvas_height);
        if !self.state.mode.is_playing() {
            self.state.session.show_active_frame()?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn flush_canvas(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let grid = self.state.session.cel_mut().surface_mut();
        let damage = grid.take_damage();
        canvas::render_canvas(stdout, &self.layout, grid, &damage)?;
        stdout.flush()?;
        Ok(())
    }

    fn full_redraw(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        menubar::render_menubar(stdout, &self.layout, &self.state)?;

        let grid = self.state.session.cel_mut().surface_mut();
        grid.take_damage();
        canvas::render_canvas(stdout, &self.layout, grid, &Damage::Full)?;

        timeline::render_timeline(stdout, &self.layout, &self.state)?;

        stdout.flush()?;
        Ok(())
    }
}
