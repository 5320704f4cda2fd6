//! Pixel <-> cell conversion for an 8x8 board drawn on screen.
//!
//! Screen Y grows downward while board rank grows upward, so the rank axis
//! is inverted: rank 7 is the top row of cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cells per side.
pub const BOARD_SIZE: i32 = 8;

/// Discrete board coordinate. `file` is the column (a..h), `rank` the row (1..8),
/// both zero-based.
///
/// Values produced by [`BoardGeometry::pixel_to_cell`] are not clamped and may
/// lie off the board; use [`Cell::is_on_board`] before treating one as a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub file: i32,
    pub rank: i32,
}

impl Cell {
    pub const fn new(file: i32, rank: i32) -> Self {
        Self { file, rank }
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.file) && (0..BOARD_SIZE).contains(&self.rank)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = (b'a' + self.file as u8) as char;
            write!(f, "{}{}", file, self.rank + 1)
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

/// Parses algebraic squares such as `e2`.
impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("expected a square like e2, got {:?}", s));
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(format!("square out of range: {:?}", s));
        }
        Ok(Cell::new(file as i32 - 'a' as i32, rank as i32 - '1' as i32))
    }
}

/// Screen-space position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the board sits on screen and how large each cell is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub origin: Pixel,
    pub cell_size: f64,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            origin: Pixel::new(0.0, 0.0),
            cell_size: 100.0,
        }
    }
}

impl BoardGeometry {
    pub fn new(origin_x: f64, origin_y: f64, cell_size: f64) -> Self {
        Self {
            origin: Pixel::new(origin_x, origin_y),
            cell_size,
        }
    }

    /// Quantize a pointer position to the cell under it. No bounds clamping;
    /// coordinates far off the board saturate at the `i32` range.
    pub fn pixel_to_cell(&self, pointer: Pixel) -> Cell {
        let file = ((pointer.x - self.origin.x) / self.cell_size).floor();
        let row = ((pointer.y - self.origin.y) / self.cell_size).floor();
        Cell::new(file as i32, ((BOARD_SIZE - 1) as f64 - row) as i32)
    }

    /// Top-left pixel of a cell.
    pub fn cell_to_pixel(&self, cell: Cell) -> Pixel {
        let row = (BOARD_SIZE - 1) as f64 - cell.rank as f64;
        Pixel::new(
            self.origin.x + cell.file as f64 * self.cell_size,
            self.origin.y + row * self.cell_size,
        )
    }

    /// Center pixel of a cell.
    pub fn cell_center(&self, cell: Cell) -> Pixel {
        let top_left = self.cell_to_pixel(cell);
        let half = self.cell_size / 2.0;
        Pixel::new(top_left.x + half, top_left.y + half)
    }

    /// Edge length of the whole board in pixels.
    pub fn board_extent(&self) -> f64 {
        self.cell_size * BOARD_SIZE as f64
    }

    /// Whether a pointer lies inside the board's bounding box (right/bottom edges exclusive).
    pub fn contains(&self, pointer: Pixel) -> bool {
        let extent = self.board_extent();
        pointer.x >= self.origin.x
            && pointer.y >= self.origin.y
            && pointer.x < self.origin.x + extent
            && pointer.y < self.origin.y + extent
    }

    /// Clamp a sprite's top-left corner so the whole sprite stays on the board.
    /// Each axis is clamped independently.
    pub fn clamp_sprite(&self, top_left: Pixel) -> Pixel {
        let max_offset = self.board_extent() - self.cell_size;
        Pixel::new(
            top_left.x.max(self.origin.x).min(self.origin.x + max_offset),
            top_left.y.max(self.origin.y).min(self.origin.y + max_offset),
        )
    }
}
