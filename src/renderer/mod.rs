//! Renderer — the drawing surface and its terminal rasterizer.
//!
//! `Surface` is the set of path primitives the cel draws with. `Canvas` is
//! the terminal implementation: it rasterizes stroked paths onto a fixed-size
//! cell grid and tracks which cells changed so the editor can flush either
//! the whole grid or just the damaged cells.
//!
//! The canvas knows nothing about frames, strokes or time.

pub mod recording;

use crate::animation::Coordinate;
use crate::types::{Cell, CellStyle, Paint, PaintStyle};

pub use recording::{RecordingSurface, SurfaceCall};

/// 2D path-stroke primitives consumed by the cel.
pub trait Surface {
    /// Surface extent in surface units.
    fn size(&self) -> (f64, f64);

    /// Discard the current path and start an empty one.
    fn begin_path(&mut self);

    /// Start a new subpath at `at` without drawing.
    fn move_to(&mut self, at: Coordinate);

    /// Extend the current subpath with a segment to `to`.
    fn line_to(&mut self, to: Coordinate);

    /// Paint the current path with the current paint.
    fn stroke(&mut self);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Push the current paint onto the paint stack.
    fn save(&mut self);

    /// Pop the paint stack; a restore without a matching save is ignored.
    fn restore(&mut self);

    /// Merge `style` over the current paint.
    fn set_style(&mut self, style: &PaintStyle);
}

/// Cells touched since the last `take_damage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    None,
    Cells(Vec<(u16, u16)>),
    Full,
}

pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Vec<Cell>>,
    brush: char,
    paint: Paint,
    saved: Vec<Paint>,
    path: Vec<Vec<Coordinate>>,
    damage: Damage,
}

impl Canvas {
    pub fn new(width: u16, height: u16, brush: char) -> Self {
        Canvas {
            width,
            height,
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            brush,
            paint: Paint::default(),
            saved: Vec::new(),
            path: Vec::new(),
            damage: Damage::Full,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.cells.get(y as usize).and_then(|row| row.get(x as usize))
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Resize the grid. Content is discarded; the caller redraws.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![vec![Cell::default(); width as usize]; height as usize];
        self.damage = Damage::Full;
    }

    pub fn take_damage(&mut self) -> Damage {
        std::mem::replace(&mut self.damage, Damage::None)
    }

    fn mark(&mut self, x: u16, y: u16) {
        match &mut self.damage {
            Damage::Full => {}
            Damage::Cells(cells) => cells.push((x, y)),
            Damage::None => self.damage = Damage::Cells(vec![(x, y)]),
        }
    }

    fn plot(&mut self, x: i64, y: i64, style: &CellStyle) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let (x, y) = (x as u16, y as u16);
        let cell = Cell {
            ch: self.brush,
            style: style.clone(),
        };
        if self.cells[y as usize][x as usize] != cell {
            self.cells[y as usize][x as usize] = cell;
            self.mark(x, y);
        }
    }

    /// Bresenham line between two cell positions, endpoints included.
    ///
    /// The segment is first clipped to the grid, so far-off points cost no
    /// more than the cells actually crossed.
    fn plot_segment(&mut self, from: Coordinate, to: Coordinate, style: &CellStyle) {
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        let (mut x0, mut y0) = (from.x().round() as i64, from.y().round() as i64);
        let (x1, y1) = (to.x().round() as i64, to.y().round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, style);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Liang-Barsky clip of `from..to` against the cells' extent (each cell
    /// spans half a unit around its centre). `None` when nothing is visible.
    fn clip(&self, from: Coordinate, to: Coordinate) -> Option<(Coordinate, Coordinate)> {
        if ![from.x(), from.y(), to.x(), to.y()].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (min_x, max_x) = (-0.5, self.width as f64 - 0.5);
        let (min_y, max_y) = (-0.5, self.height as f64 - 0.5);
        let (dx, dy) = (to.x() - from.x(), to.y() - from.y());

        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-dx, from.x() - min_x),
            (dx, max_x - from.x()),
            (-dy, from.y() - min_y),
            (dy, max_y - from.y()),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| Coordinate::new(from.x() + t * dx, from.y() + t * dy);
        Some((at(t0), at(t1)))
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, at: Coordinate) {
        self.path.push(vec![at]);
    }

    fn line_to(&mut self, to: Coordinate) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push(to),
            // Like a 2D context: a line_to with no subpath only sets the start.
            None => self.path.push(vec![to]),
        }
    }

    fn stroke(&mut self) {
        if !self.paint.is_visible() {
            return;
        }
        let style = CellStyle::from(&self.paint);
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for pair in subpath.windows(2) {
                self.plot_segment(pair[0], pair[1], &style);
            }
        }
        self.path = path;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let x0 = x.max(0.0).floor() as usize;
        let y0 = y.max(0.0).floor() as usize;
        let x1 = ((x + width).ceil().max(0.0) as usize).min(self.width as usize);
        let y1 = ((y + height).ceil().max(0.0) as usize).min(self.height as usize);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let whole = x0 == 0 && y0 == 0 && x1 == self.width as usize && y1 == self.height as usize;
        for yy in y0..y1 {
            for xx in x0..x1 {
                if !self.cells[yy][xx].is_blank() {
                    self.cells[yy][xx] = Cell::default();
                    if !whole {
                        self.mark(xx as u16, yy as u16);
                    }
                }
            }
        }
        if whole {
            self.damage = Damage::Full;
        }
    }

    fn save(&mut self) {
        self.saved.push(self.paint.clone());
    }

    fn restore(&mut self) {
        if let Some(paint) = self.saved.pop() {
            self.paint = paint;
        }
    }

    fn set_style(&mut self, style: &PaintStyle) {
        self.paint = self.paint.merged(style);
    }
}
