//! Legality of the most recently placed tile.

use crate::board::Board;
use crate::geometry::{neighbor, Direction};
use crate::solver::{Chain, Supply};
use crate::tiles::Color;

/// Decides whether the chain's tail fits the tiles around it.
///
/// `supply` is the supply the tail was drawn from, so it still counts the
/// tail itself. The tail is rejected when
///
/// - any occupied neighbor shows a different color across the shared edge,
/// - the edge joining it to the previous chain tile is not `loop_color`, or
/// - it is the last tile of the supply and does not touch the first chain
///   tile along a `loop_color` edge, leaving the loop open.
///
/// # Panics
///
/// Panics if the chain holds fewer than two tiles.
pub fn tail_fits(board: &Board, chain: &Chain, supply: Supply, loop_color: Color) -> bool {
    let (Some(first), Some(previous), Some(tail)) = (chain.first(), chain.previous(), chain.last())
    else {
        panic!("constraint check needs a chain of at least two tiles");
    };
    debug_assert_eq!(board.get(tail.cell), Some(tail.tile));

    let mut touches_first = false;

    for direction in Direction::ALL {
        let Some(adjacent) = board.get(neighbor(tail.cell, direction)) else {
            continue;
        };

        let shared = tail.tile.edge(direction);
        if adjacent.edge(direction.opposite()) != shared {
            return false;
        }

        if adjacent.id() == previous.tile.id() && shared != loop_color {
            return false;
        }

        if adjacent.id() == first.tile.id() && shared == loop_color {
            touches_first = true;
        }
    }

    supply.len() != 1 || touches_first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PlacedTile, CENTER};
    use crate::tiles::RotatedTile;

    /// Places `placements` in order on a fresh board and chain.
    fn setup(placements: &[PlacedTile]) -> (Board, Chain) {
        let board = Board::from_placements(placements);
        let mut chain = Chain::default();
        for &placed in placements {
            chain.push(placed);
        }
        (board, chain)
    }

    fn tile_2_right_of_anchor(rotation: u8) -> (Board, Chain) {
        setup(&[
            PlacedTile {
                tile: RotatedTile::new(1),
                cell: CENTER,
            },
            PlacedTile {
                tile: RotatedTile::with_rotation(2, rotation),
                cell: (11, 10),
            },
        ])
    }

    #[test]
    fn test_matching_red_edge_is_accepted() {
        let anchor = RotatedTile::new(1);
        assert_eq!(anchor.edge(Direction::Right), Color::Red);

        // turn tile 2 until its left edge is red
        let mut rotation = 0;
        while RotatedTile::with_rotation(2, rotation).edge(Direction::Left) != Color::Red {
            rotation += 1;
        }
        assert_eq!(rotation, 4);

        let (board, chain) = tile_2_right_of_anchor(rotation);
        assert!(tail_fits(&board, &chain, Supply::range(2, 3), Color::Red));
    }

    #[test]
    fn test_color_mismatch_is_rejected() {
        // rotation 0 puts a blue edge against the anchor's red one
        let (board, chain) = tile_2_right_of_anchor(0);
        for color in Color::ALL {
            assert!(!tail_fits(&board, &chain, Supply::range(2, 3), color));
        }
    }

    #[test]
    fn test_join_with_previous_must_have_loop_color() {
        let (board, chain) = tile_2_right_of_anchor(4);
        assert!(!tail_fits(&board, &chain, Supply::range(2, 3), Color::Blue));
        assert!(!tail_fits(&board, &chain, Supply::range(2, 3), Color::Yellow));
    }

    #[test]
    fn test_last_tile_must_close_loop() {
        // the first solution for three tiles and a yellow loop
        let (board, chain) = setup(&[
            PlacedTile {
                tile: RotatedTile::new(1),
                cell: (10, 10),
            },
            PlacedTile {
                tile: RotatedTile::with_rotation(2, 2),
                cell: (11, 11),
            },
            PlacedTile {
                tile: RotatedTile::with_rotation(3, 1),
                cell: (10, 11),
            },
        ]);
        assert!(tail_fits(&board, &chain, Supply::range(3, 3), Color::Yellow));
    }

    #[test]
    fn test_open_loop_is_rejected_only_on_last_tile() {
        // tile 3 joins tile 2 on red and touches the anchor, but not on red
        let (board, chain) = setup(&[
            PlacedTile {
                tile: RotatedTile::new(1),
                cell: (10, 10),
            },
            PlacedTile {
                tile: RotatedTile::with_rotation(2, 4),
                cell: (11, 10),
            },
            PlacedTile {
                tile: RotatedTile::with_rotation(3, 5),
                cell: (11, 11),
            },
        ]);
        assert!(!tail_fits(&board, &chain, Supply::range(3, 3), Color::Red));
        assert!(tail_fits(&board, &chain, Supply::range(3, 4), Color::Red));
    }

    #[test]
    fn test_early_closure_is_allowed_while_tiles_remain() {
        let (board, chain) = tile_2_right_of_anchor(4);
        // tile 2 touches the anchor on red with more tiles to come
        assert!(tail_fits(&board, &chain, Supply::range(2, 5), Color::Red));
        // and also when it is the last one, since the anchor is then closed on
        assert!(tail_fits(&board, &chain, Supply::range(2, 2), Color::Red));
    }

    #[test]
    #[should_panic(expected = "at least two tiles")]
    fn test_anchor_alone_panics() {
        let (board, chain) = setup(&[PlacedTile {
            tile: RotatedTile::new(1),
            cell: CENTER,
        }]);
        tail_fits(&board, &chain, Supply::range(2, 3), Color::Red);
    }
}
