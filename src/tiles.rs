//! Tile catalog, edge colors and rotations.
//!
//! Each tile is defined by the color of its six edges at rotation 0, listed
//! clockwise from the upper-right edge (see [`crate::geometry`]). A rotated
//! tile is a plain value: rotation is stored as a step count and edges are
//! looked up through it, so nothing is mutated while searching.

use std::fmt;

use crate::geometry::{Direction, NUM_DIRECTIONS};

/// Number of tiles in the catalog, and the largest supported puzzle.
pub const MAX_TILES: usize = 10;

/// Smallest tile count that can form a loop.
pub const MIN_TILES: usize = 3;

/// 1-based tile number.
pub type TileId = u8;

/// Color of a line ending on a tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Yellow,
}

impl Color {
    /// All colors in schedule order.
    pub const ALL: [Color; 3] = [Color::Red, Color::Blue, Color::Yellow];

    /// Stable number used in file names and the binary solution format.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Color::Red),
            1 => Some(Color::Blue),
            2 => Some(Color::Yellow),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// A catalog tile at rotation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub edges: [Color; NUM_DIRECTIONS],
}

use Color::{Blue as B, Red as R, Yellow as Y};

/// The ten tiles of the puzzle, in id order.
pub const TILES: [Tile; MAX_TILES] = [
    Tile { id: 1, edges: [B, R, Y, Y, B, R] },
    Tile { id: 2, edges: [R, B, Y, Y, B, R] },
    Tile { id: 3, edges: [Y, R, R, B, B, Y] },
    Tile { id: 4, edges: [R, B, R, Y, B, Y] },
    Tile { id: 5, edges: [Y, R, B, B, R, Y] },
    Tile { id: 6, edges: [B, Y, B, R, Y, R] },
    Tile { id: 7, edges: [Y, R, B, B, Y, R] },
    Tile { id: 8, edges: [R, Y, B, B, R, Y] },
    Tile { id: 9, edges: [B, R, B, Y, R, Y] },
    Tile { id: 10, edges: [R, B, Y, Y, R, B] },
];

/// Looks up a catalog tile.
///
/// # Panics
///
/// Panics if `id` is not in `1..=MAX_TILES`.
#[inline]
pub fn tile(id: TileId) -> &'static Tile {
    assert!(
        (1..=MAX_TILES).contains(&(id as usize)),
        "tile id out of range: {id}"
    );
    &TILES[id as usize - 1]
}

/// A catalog tile turned clockwise by `rotation` sixths of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotatedTile {
    id: TileId,
    rotation: u8,
}

impl RotatedTile {
    /// The tile at rotation 0.
    pub fn new(id: TileId) -> Self {
        Self::with_rotation(id, 0)
    }

    /// The tile at `rotation` clockwise 60 degree steps (taken modulo 6).
    pub fn with_rotation(id: TileId, rotation: u8) -> Self {
        // validate once here so edge lookups can index freely
        tile(id);
        Self {
            id,
            rotation: rotation % NUM_DIRECTIONS as u8,
        }
    }

    #[inline]
    pub fn id(self) -> TileId {
        self.id
    }

    /// Number of clockwise 60 degree steps, in `0..6`.
    #[inline]
    pub fn rotation(self) -> u8 {
        self.rotation
    }

    /// Rotation in degrees: one of 0, 60, 120, 180, 240, 300.
    #[inline]
    pub fn angle(self) -> u16 {
        self.rotation as u16 * 60
    }

    /// Turns the tile by 60 degrees clockwise.
    ///
    /// Equivalent to shifting the edge array right by one: the new edge at
    /// direction `d` is the old edge at direction `d - 1`.
    #[inline]
    pub fn rotate_cw(self) -> Self {
        Self {
            id: self.id,
            rotation: (self.rotation + 1) % NUM_DIRECTIONS as u8,
        }
    }

    /// Color of the edge currently facing `direction`.
    #[inline]
    pub fn edge(self, direction: Direction) -> Color {
        let base = (direction.index() + NUM_DIRECTIONS - self.rotation as usize) % NUM_DIRECTIONS;
        TILES[self.id as usize - 1].edges[base]
    }

    /// All six edge colors in direction order.
    pub fn edges(self) -> [Color; NUM_DIRECTIONS] {
        Direction::ALL.map(|direction| self.edge(direction))
    }
}

impl fmt::Display for RotatedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} @ {} deg", self.id, self.angle())
    }
}
