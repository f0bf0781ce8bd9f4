use std::io;

use crossterm::{cursor, queue, style};

use crate::renderer::{Canvas, Damage};
use crate::types::{Cell, CellStyle, Color, NamedColor};

use super::ui::Layout;

/// Flush the canvas to the terminal: every cell on `Damage::Full`, only the
/// listed cells otherwise.
pub fn render_canvas(
    stdout: &mut io::Stdout,
    layout: &Layout,
    canvas: &Canvas,
    damage: &Damage,
) -> anyhow::Result<()> {
    match damage {
        Damage::None => {}
        Damage::Full => {
            for (y, row) in canvas.rows().iter().enumerate() {
                let sy = layout.canvas_y + y as u16;
                if y as u16 >= layout.canvas_height {
                    break;
                }
                queue!(stdout, cursor::MoveTo(layout.canvas_x, sy))?;
                for cell in row.iter().take(layout.canvas_width as usize) {
                    print_cell(stdout, cell)?;
                }
            }
        }
        Damage::Cells(cells) => {
            for &(x, y) in cells {
                if x >= layout.canvas_width || y >= layout.canvas_height {
                    continue;
                }
                if let Some(cell) = canvas.cell(x, y) {
                    queue!(
                        stdout,
                        cursor::MoveTo(layout.canvas_x + x, layout.canvas_y + y)
                    )?;
                    print_cell(stdout, cell)?;
                }
            }
        }
    }
    Ok(())
}

fn print_cell(stdout: &mut io::Stdout, cell: &Cell) -> anyhow::Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(
        stdout,
        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &CellStyle) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_red_maps_to_crossterm() {
        let cs = to_content_style(&CellStyle {
            fg: Some(Color::Named(NamedColor::Red)),
            dim: true,
        });
        assert_eq!(cs.foreground_color, Some(style::Color::Red));
        assert!(cs.attributes.has(style::Attribute::Dim));
    }

    #[test]
    fn default_style_is_plain() {
        let cs = to_content_style(&CellStyle::default());
        assert_eq!(cs.foreground_color, None);
        assert!(!cs.attributes.has(style::Attribute::Dim));
    }
}
