/// Mapping between arena units and terminal cells.
///
/// The arena is scaled to fill the whole terminal, so one cell covers a
/// `width / cols` × `height / rows` patch of arena.  Used by the renderer
/// to place sprites and by the input layer to turn mouse cells back into
/// arena points.

use crate::entities::{Arena, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub arena: Arena,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: Arena) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
            arena,
        }
    }

    fn col_width(&self) -> f64 {
        self.arena.width / self.cols as f64
    }

    fn row_height(&self) -> f64 {
        self.arena.height / self.rows as f64
    }

    /// Cell containing the arena point, clamped onto the screen.
    pub fn to_cell(&self, x: f64, y: f64) -> (u16, u16) {
        let col = (x / self.col_width()).floor().clamp(0.0, (self.cols - 1) as f64);
        let row = (y / self.row_height()).floor().clamp(0.0, (self.rows - 1) as f64);
        (col as u16, row as u16)
    }

    /// Arena point at the centre of a cell.
    pub fn to_world(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f64 + 0.5) * self.col_width(),
            (row as f64 + 0.5) * self.row_height(),
        )
    }

    /// Cells whose centres fall inside the arena rectangle, as
    /// `(col, row, cols, rows)`.  A rectangle smaller than a cell gets the
    /// single cell under its centre.
    pub fn cell_span(&self, x: f64, y: f64, w: f64, h: f64) -> (u16, u16, u16, u16) {
        let (mid_col, mid_row) = self.to_cell(x + w / 2.0, y + h / 2.0);
        let (col, cols) = span(x, w, self.col_width(), self.cols, mid_col);
        let (row, rows) = span(y, h, self.row_height(), self.rows, mid_row);
        (col, row, cols, rows)
    }
}

/// First cell and cell count along one axis.
fn span(start: f64, len: f64, cell: f64, count: u16, fallback: u16) -> (u16, u16) {
    let first = (start / cell - 0.5).ceil().max(0.0);
    let last = ((start + len) / cell - 0.5).ceil() - 1.0;
    let last = last.min((count - 1) as f64);
    if last < first {
        (fallback, 1)
    } else {
        (first as u16, (last - first) as u16 + 1)
    }
}
