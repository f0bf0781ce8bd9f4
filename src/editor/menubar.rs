use std::io;

use crossterm::{cursor, queue, style, terminal};

use super::state::{EditorState, Mode};
use super::ui::Layout;

/// Key hints for the current mode, in `[key] label` form.
fn mode_items(state: &EditorState) -> Vec<String> {
    let kb = &state.config.key_bindings;
    match &state.mode {
        Mode::Drawing => vec![
            "[drag] draw".to_string(),
            format!("[{}] new frame", kb.add_frame),
            format!("[{}] play", kb.play),
            format!("[{}] quit", kb.quit),
            format!("[{}] full", kb.fullscreen),
        ],
        Mode::Playing { .. } => vec![
            format!("[{}] pause", kb.pause),
            format!("[{}] quit", kb.quit),
            format!("[{}] full", kb.fullscreen),
        ],
    }
}

pub fn render_menubar(
    stdout: &mut io::Stdout,
    layout: &Layout,
    state: &EditorState,
) -> anyhow::Result<()> {
    if layout.menu_h == 0 {
        return Ok(());
    }

    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;

    let mut x: u16 = 1;
    for (i, item) in mode_items(state).iter().enumerate() {
        let sep = if i > 0 { 2 } else { 0 };
        let item_w = item.chars().count() as u16;
        if x + sep + item_w > layout.term_width {
            break; // Drop what doesn't fit.
        }
        if sep > 0 {
            queue!(stdout, style::Print("  "))?;
        }
        print_menu_item(stdout, item)?;
        x += sep + item_w;
    }

    Ok(())
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            print_dim(stdout, rest)?;
            break;
        };
        if open > 0 {
            print_dim(stdout, &rest[..open])?;
        }
        rest = &rest[open..];
        let Some(close) = rest.find(']') else {
            queue!(stdout, style::Print(rest))?;
            break;
        };
        queue!(
            stdout,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[..=close]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[close + 1..];
    }
    Ok(())
}

fn print_dim(stdout: &mut io::Stdout, text: &str) -> anyhow::Result<()> {
    queue!(
        stdout,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(text),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}
