//! Board representation and whole-placement queries.
//!
//! The board is a fixed `(2 * MAX_TILES + 1)` square array of cells, indexed
//! `[row][col]`, each holding a rotated tile or nothing. The anchor sits in the
//! middle, so no placement of up to `MAX_TILES` tiles can reach the border.

use std::fmt::Write;

use crate::geometry::Cell;
use crate::tiles::{RotatedTile, MAX_TILES};

/// Cells per side of the board.
pub const BOARD_SIZE: usize = 2 * MAX_TILES + 1;

/// Cell of the anchor tile.
pub const CENTER: Cell = (MAX_TILES, MAX_TILES);

/// A rotated tile placed on a specific cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub tile: RotatedTile,
    pub cell: Cell,
}

/// Smallest rectangle (inclusive) containing every occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_col: usize,
    pub max_col: usize,
    pub min_row: usize,
    pub max_row: usize,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Cells of the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| (col, row)))
    }
}

/// Sparse grid of placed tiles.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<RotatedTile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Rebuilds a board from a list of placements.
    pub fn from_placements(placements: &[PlacedTile]) -> Self {
        let mut board = Self::new();
        for placed in placements {
            board.place(placed.cell, placed.tile);
        }
        board
    }

    /// Returns the tile on `cell`, or `None` for empty and off-board cells.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<RotatedTile> {
        let (col, row) = cell;
        self.cells.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Puts a tile on an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is off the board or already occupied.
    #[inline]
    pub fn place(&mut self, cell: Cell, tile: RotatedTile) {
        let (col, row) = cell;
        let slot = &mut self.cells[row][col];
        assert!(slot.is_none(), "cell {cell:?} is already occupied");
        *slot = Some(tile);
    }

    /// Clears a cell, returning the tile it held.
    #[inline]
    pub fn remove(&mut self, cell: Cell) -> Option<RotatedTile> {
        let (col, row) = cell;
        self.cells[row][col].take()
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, RotatedTile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, slot)| slot.map(|tile| ((col, row), tile)))
        })
    }

    pub fn tile_count(&self) -> usize {
        self.occupied().count()
    }

    /// Bounding box of the occupied cells, `None` for an empty board.
    pub fn bounds(&self) -> Option<Bounds> {
        self.occupied().fold(None, |bounds, ((col, row), _)| {
            Some(match bounds {
                None => Bounds {
                    min_col: col,
                    max_col: col,
                    min_row: row,
                    max_row: row,
                },
                Some(b) => Bounds {
                    min_col: b.min_col.min(col),
                    max_col: b.max_col.max(col),
                    min_row: b.min_row.min(row),
                    max_row: b.max_row.max(row),
                },
            })
        })
    }
}

/// Computes the deduplication key of a placement.
///
/// Occupied cells of the bounding box are listed row-major as
/// `[relCol,relRow,id,angle]`. The key ignores where the placement sits on
/// the board but not how it is turned.
pub fn canonical_key(board: &Board, bounds: Bounds) -> String {
    let mut key = String::with_capacity(16 * MAX_TILES);
    for cell in bounds.cells() {
        if let Some(tile) = board.get(cell) {
            let (col, row) = cell;
            // writing to a String cannot fail
            let _ = write!(
                key,
                "[{},{},{},{}]",
                col - bounds.min_col,
                row - bounds.min_row,
                tile.id(),
                tile.angle()
            );
        }
    }
    key
}

/// Reports whether the bounding box contains an empty cell that cannot be
/// reached from the outside.
///
/// Empty cells are flooded from every border cell of the box, moving only
/// horizontally and vertically within the box; any empty cell left over is
/// enclosed by tiles.
pub fn has_hole(board: &Board, bounds: Bounds) -> bool {
    let width = bounds.width();
    let height = bounds.height();

    let mut filled: Vec<bool> = bounds.cells().map(|cell| !board.is_empty(cell)).collect();

    let mut pending: Vec<(usize, usize)> = Vec::with_capacity(2 * (width + height));
    for col in 0..width {
        pending.push((col, 0));
        pending.push((col, height - 1));
    }
    for row in 0..height {
        pending.push((0, row));
        pending.push((width - 1, row));
    }

    while let Some((col, row)) = pending.pop() {
        let index = row * width + col;
        if filled[index] {
            continue;
        }
        filled[index] = true;

        if col > 0 {
            pending.push((col - 1, row));
        }
        if col + 1 < width {
            pending.push((col + 1, row));
        }
        if row > 0 {
            pending.push((col, row - 1));
        }
        if row + 1 < height {
            pending.push((col, row + 1));
        }
    }

    filled.iter().any(|&cell| !cell)
}

/// Formats the bounding box as text, one token per cell.
///
/// Tiles show as their id (`3.` or `10`), empty cells as `..`. Even rows are
/// indented by two characters so that the hex offsets line up.
pub fn format_board(board: &Board, bounds: Bounds) -> String {
    let mut output = String::new();

    for row in bounds.min_row..=bounds.max_row {
        let mut line = String::new();
        if row % 2 == 0 {
            line.push_str("  ");
        }
        for col in bounds.min_col..=bounds.max_col {
            if col > bounds.min_col {
                line.push_str("  ");
            }
            match board.get((col, row)) {
                Some(tile) if tile.id() < 10 => {
                    let _ = write!(line, "{}.", tile.id());
                }
                Some(tile) => {
                    let _ = write!(line, "{}", tile.id());
                }
                None => line.push_str(".."),
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
