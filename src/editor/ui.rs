use crate::animation::Coordinate;

/// Rows reserved for the key-hint bar at the top.
const MENU_H: u16 = 1;
/// Rows reserved for the frame bar and status line at the bottom.
const TIMELINE_H: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub canvas_x: u16,
    pub canvas_y: u16,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub timeline_y: u16,
    pub term_width: u16,
    pub menu_h: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16) -> Self {
        Layout {
            canvas_x: 0,
            canvas_y: MENU_H,
            canvas_width: term_width,
            canvas_height: term_height.saturating_sub(TIMELINE_H + MENU_H),
            timeline_y: term_height.saturating_sub(TIMELINE_H),
            term_width,
            menu_h: MENU_H,
        }
    }

    /// Canvas coordinate for a terminal cell, or `None` outside the canvas.
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<Coordinate> {
        let x = column.checked_sub(self.canvas_x)?;
        let y = row.checked_sub(self.canvas_y)?;
        if x >= self.canvas_width || y >= self.canvas_height {
            return None;
        }
        Some(Coordinate::new(x as f64, y as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_sits_between_menu_and_timeline() {
        let layout = Layout::compute(80, 24);
        assert_eq!(layout.canvas_y, 1);
        assert_eq!(layout.canvas_height, 21);
        assert_eq!(layout.timeline_y, 22);
    }

    #[test]
    fn to_canvas_offsets_and_bounds() {
        let layout = Layout::compute(80, 24);
        assert_eq!(layout.to_canvas(5, 1), Some(Coordinate::new(5.0, 0.0)));
        assert_eq!(layout.to_canvas(5, 0), None);
        assert_eq!(layout.to_canvas(5, 22), None);
        assert_eq!(layout.to_canvas(80, 3), None);
    }

    #[test]
    fn tiny_terminal_has_empty_canvas() {
        let layout = Layout::compute(10, 2);
        assert_eq!(layout.canvas_height, 0);
        assert_eq!(layout.to_canvas(0, 1), None);
    }
}
