//! Hex grid geometry in offset coordinates.
//!
//! The board is a rectangular array in which even rows are shifted half a
//! tile to the right. Directions name the six edges of a pointy-top hexagon,
//! clockwise from the upper-right edge:
//!
//! ```text
//!    5 0
//!   4   1
//!    3 2
//! ```

/// A board cell as `(col, row)`.
pub type Cell = (usize, usize);

/// Number of edges (and neighbors) of a hex cell.
pub const NUM_DIRECTIONS: usize = 6;

/// One of the six edges of a hex cell, clockwise from upper-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    UpperRight,
    Right,
    LowerRight,
    LowerLeft,
    Left,
    UpperLeft,
}

impl Direction {
    /// All directions in search order (0..5).
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::UpperRight,
        Direction::Right,
        Direction::LowerRight,
        Direction::LowerLeft,
        Direction::Left,
        Direction::UpperLeft,
    ];

    /// Returns the direction with the given index, wrapping modulo 6.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_DIRECTIONS]
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back across the same edge.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + NUM_DIRECTIONS / 2)
    }
}

/// `(dcol, drow)` offsets for cells in even rows, indexed by direction.
const EVEN_ROW_OFFSETS: [(isize, isize); NUM_DIRECTIONS] =
    [(1, -1), (1, 0), (1, 1), (0, 1), (-1, 0), (0, -1)];

/// `(dcol, drow)` offsets for cells in odd rows, indexed by direction.
const ODD_ROW_OFFSETS: [(isize, isize); NUM_DIRECTIONS] =
    [(0, -1), (1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1)];

#[inline]
pub const fn is_even(row: usize) -> bool {
    row % 2 == 0
}

/// Returns the `(dcol, drow)` step from a cell in `row` towards `direction`.
#[inline]
pub const fn offset(direction: Direction, row: usize) -> (isize, isize) {
    if is_even(row) {
        EVEN_ROW_OFFSETS[direction.index()]
    } else {
        ODD_ROW_OFFSETS[direction.index()]
    }
}

/// Returns the cell adjacent to `cell` across the edge `direction`.
///
/// Steps off the low edge of the array wrap to huge indices, which every
/// board lookup treats as out of bounds.
#[inline]
pub const fn neighbor(cell: Cell, direction: Direction) -> Cell {
    let (col, row) = cell;
    let (dcol, drow) = offset(direction, row);
    (col.wrapping_add_signed(dcol), row.wrapping_add_signed(drow))
}

/// Vertical distance between row centers, in tile widths.
pub const ROW_HEIGHT: f32 = 0.866_025_4;

/// Center of a cell in tile-width units, x to the right and y downwards.
pub fn center(cell: Cell) -> (f32, f32) {
    let (col, row) = cell;
    let shift = if is_even(row) { 0.5 } else { 0.0 };
    (col as f32 + shift, row as f32 * ROW_HEIGHT)
}
