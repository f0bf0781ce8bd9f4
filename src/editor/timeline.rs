use std::io;

use crossterm::{cursor, queue, style, terminal};

use super::state::{EditorState, Mode};
use super::ui::Layout;

/// Each frame label takes roughly "[XX] ".
const LABEL_WIDTH: usize = 5;

pub fn render_timeline(
    stdout: &mut io::Stdout,
    layout: &Layout,
    state: &EditorState,
) -> anyhow::Result<()> {
    let y = layout.timeline_y;
    let frame_count = state.session.animation().len();
    let shown = state.shown_frame();

    // Row 1: frame bar
    queue!(
        stdout,
        cursor::MoveTo(0, y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    let mut prev: Option<usize> = None;
    for f in visible_frames(layout.term_width as usize, frame_count, shown) {
        if prev.is_some_and(|p| f > p + 1) {
            queue!(stdout, style::Print("... "))?;
        }
        render_frame_number(stdout, f, shown)?;
        prev = Some(f);
    }

    // Row 2: mode + frame counter + status
    queue!(
        stdout,
        cursor::MoveTo(0, y + 1),
        terminal::Clear(terminal::ClearType::CurrentLine),
    )?;
    queue!(
        stdout,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(status_line(state)),
        style::SetAttribute(style::Attribute::Reset),
    )?;

    Ok(())
}

fn status_line(state: &EditorState) -> String {
    let total = state.session.animation().len();
    let status = state.status_message.as_deref().unwrap_or("");
    match &state.mode {
        Mode::Drawing => {
            let (current, total) = state.session.frame_info();
            format!(" DRAW | Frame {current}/{total} {status}")
        }
        Mode::Playing { player, .. } => {
            let config = player.config();
            let looping = if config.loop_playback { ", loop" } else { "" };
            format!(
                " PLAY | Frame {}/{total} ({} fps{looping}) {status}",
                state.shown_frame() + 1,
                config.fps,
            )
        }
    }
}

/// Frames to label: all of them when they fit, otherwise the first, the
/// last, and the neighbourhood of `current`.
fn visible_frames(width: usize, frame_count: usize, current: usize) -> Vec<usize> {
    if frame_count <= width / LABEL_WIDTH {
        return (0..frame_count).collect();
    }

    let mut to_show = vec![0, current, frame_count - 1];
    if current > 0 {
        to_show.push(current - 1);
    }
    if current + 1 < frame_count {
        to_show.push(current + 1);
    }
    to_show.sort_unstable();
    to_show.dedup();
    to_show
}

fn render_frame_number(stdout: &mut io::Stdout, frame: usize, current: usize) -> anyhow::Result<()> {
    let display_num = frame + 1; // 1-based display
    if frame == current {
        queue!(
            stdout,
            style::SetAttribute(style::Attribute::Reverse),
            style::Print(format!("[{display_num:>2}]")),
            style::SetAttribute(style::Attribute::Reset),
            style::Print(" "),
        )?;
    } else {
        queue!(stdout, style::Print(format!("[{display_num:>2}] ")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::config::EditorConfig;

    #[test]
    fn all_frames_when_they_fit() {
        assert_eq!(visible_frames(80, 4, 2), vec![0, 1, 2, 3]);
    }

    #[test]
    fn abbreviated_around_current() {
        assert_eq!(visible_frames(20, 50, 25), vec![0, 24, 25, 26, 49]);
        assert_eq!(visible_frames(20, 50, 0), vec![0, 1, 49]);
        assert_eq!(visible_frames(20, 50, 49), vec![0, 48, 49]);
    }

    #[test]
    fn status_line_shows_frame_counter() {
        let mut state = EditorState::new(EditorConfig::default(), 10, 5);
        state.session.add_frame().unwrap();
        state.session.add_frame().unwrap();
        assert!(status_line(&state).contains("Frame 3/3"));
    }
}
