//! Backtracking search for closed loops.
//!
//! Each `(tile count, loop color)` pair is searched independently:
//! - tile 1 is fixed at the board center at angle 0, which pins down both
//!   translation and rotation of every solution
//! - the chain grows from its tail into empty neighbor cells, trying every
//!   remaining tile in every rotation
//! - [`tail_fits`] prunes a placement as soon as it breaks a color rule
//! - complete placements are deduplicated by canonical key and checked for
//!   holes before reaching the [`SolutionSink`]

use std::ops::{AddAssign, RangeInclusive};

use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::board::{canonical_key, format_board, has_hole, Board, Bounds, PlacedTile, CENTER};
use crate::constraints::tail_fits;
use crate::geometry::{neighbor, Direction, NUM_DIRECTIONS};
use crate::tiles::{Color, RotatedTile, TileId, MAX_TILES, MIN_TILES};

/// The ordered path of placed tiles, anchor first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    links: Vec<PlacedTile>,
}

impl Chain {
    #[inline]
    pub fn push(&mut self, placed: PlacedTile) {
        self.links.push(placed);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PlacedTile> {
        self.links.pop()
    }

    #[inline]
    pub fn first(&self) -> Option<&PlacedTile> {
        self.links.first()
    }

    /// The tail: the tile placed most recently.
    #[inline]
    pub fn last(&self) -> Option<&PlacedTile> {
        self.links.last()
    }

    /// The tile placed just before the tail.
    #[inline]
    pub fn previous(&self) -> Option<&PlacedTile> {
        self.links.len().checked_sub(2).map(|index| &self.links[index])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn as_slice(&self) -> &[PlacedTile] {
        &self.links
    }
}

/// Tiles still to be placed in a branch, as a bitmask over tile ids.
///
/// Iteration is always in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Supply(u16);

impl Supply {
    /// The tiles `first..=last`.
    pub fn range(first: TileId, last: TileId) -> Self {
        Self((first..=last).fold(0, |bits, id| bits | 1u16 << id))
    }

    #[inline]
    pub fn contains(self, id: TileId) -> bool {
        self.0 & (1u16 << id) != 0
    }

    /// The same supply with `id` taken out.
    #[inline]
    pub fn without(self, id: TileId) -> Self {
        Self(self.0 & !(1u16 << id))
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TileId> {
        (1..=MAX_TILES as TileId).filter(move |&id| self.contains(id))
    }
}

/// A closed, hole-free loop found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub tile_count: usize,
    pub loop_color: Color,
    /// Placements in path order, anchor first.
    pub chain: Vec<PlacedTile>,
    pub bounds: Bounds,
}

impl Solution {
    pub fn board(&self) -> Board {
        Board::from_placements(&self.chain)
    }

    /// Formats the solution as `Solution #number`, its tile list and a text
    /// drawing of the board.
    pub fn report(&self, number: usize) -> String {
        let tiles: Vec<String> = self
            .chain
            .iter()
            .map(|placed| format!("({})", placed.tile))
            .collect();

        let mut output = format!("Solution #{number}\nTiles: {}\n", tiles.join(" "));
        output.push_str(&format_board(&self.board(), self.bounds));
        output
    }
}

/// Receives every accepted solution.
pub trait SolutionSink {
    fn accept(&mut self, solution: &Solution, board: &Board);
}

impl SolutionSink for Vec<Solution> {
    fn accept(&mut self, solution: &Solution, _board: &Board) {
        self.push(solution.clone());
    }
}

/// Counters gathered while searching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Tile placements handed to the constraint check.
    pub placements: u64,
    /// Placements the constraint check turned down.
    pub rejected: u64,
    /// Complete placements already seen under another chain order.
    pub duplicates: u64,
    /// Complete placements enclosing an empty cell.
    pub holes: u64,
    pub solutions: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.placements += other.placements;
        self.rejected += other.rejected;
        self.duplicates += other.duplicates;
        self.holes += other.holes;
        self.solutions += other.solutions;
    }
}

/// State of one `(tile count, loop color)` search.
struct Search<'a, S: SolutionSink + ?Sized> {
    tile_count: usize,
    loop_color: Color,
    board: Board,
    chain: Chain,
    seen_keys: FxHashSet<String>,
    stats: SearchStats,
    sink: &'a mut S,
}

impl<'a, S: SolutionSink + ?Sized> Search<'a, S> {
    /// Sets up the board with the anchor in place.
    fn new(tile_count: usize, loop_color: Color, sink: &'a mut S) -> Self {
        let anchor = PlacedTile {
            tile: RotatedTile::new(1),
            cell: CENTER,
        };
        let mut board = Board::new();
        board.place(anchor.cell, anchor.tile);
        let mut chain = Chain::default();
        chain.push(anchor);

        Self {
            tile_count,
            loop_color,
            board,
            chain,
            seen_keys: FxHashSet::default(),
            stats: SearchStats::default(),
            sink,
        }
    }

    fn initial_supply(&self) -> Supply {
        Supply::range(2, self.tile_count as TileId)
    }

    fn run(mut self) -> SearchStats {
        let supply = self.initial_supply();
        self.extend(supply);
        self.stats
    }

    /// Tries every way of appending one tile from `supply` to the chain.
    fn extend(&mut self, supply: Supply) {
        if supply.is_empty() {
            self.complete();
            return;
        }

        let Some(&tail) = self.chain.last() else {
            unreachable!("the chain always holds the anchor");
        };

        for direction in Direction::ALL {
            let cell = neighbor(tail.cell, direction);
            if !self.board.is_empty(cell) {
                continue;
            }

            for id in supply.iter() {
                let mut tile = RotatedTile::new(id);
                for _ in 0..NUM_DIRECTIONS {
                    self.board.place(cell, tile);
                    self.chain.push(PlacedTile { tile, cell });
                    self.stats.placements += 1;

                    if tail_fits(&self.board, &self.chain, supply, self.loop_color) {
                        self.extend(supply.without(id));
                    } else {
                        self.stats.rejected += 1;
                        debug!("Rejected {tile} at {cell:?}");
                    }

                    self.chain.pop();
                    self.board.remove(cell);
                    tile = tile.rotate_cw();
                }
            }
        }
    }

    /// Filters a complete placement and hands it to the sink.
    fn complete(&mut self) {
        let Some(bounds) = self.board.bounds() else {
            unreachable!("a complete placement holds every tile");
        };

        if !self.seen_keys.insert(canonical_key(&self.board, bounds)) {
            self.stats.duplicates += 1;
            info!("Solution is a duplicate, skipped.");
            return;
        }

        if has_hole(&self.board, bounds) {
            self.stats.holes += 1;
            info!("Solution has holes, skipped.");
            return;
        }

        self.stats.solutions += 1;
        let solution = Solution {
            tile_count: self.tile_count,
            loop_color: self.loop_color,
            chain: self.chain.as_slice().to_vec(),
            bounds,
        };
        self.sink.accept(&solution, &self.board);
    }
}

/// Finds all loops of `loop_color` through tiles `1..=tile_count`.
///
/// # Panics
///
/// Panics if `tile_count` is outside `MIN_TILES..=MAX_TILES`.
pub fn solve<S: SolutionSink + ?Sized>(
    tile_count: usize,
    loop_color: Color,
    sink: &mut S,
) -> SearchStats {
    assert!(
        (MIN_TILES..=MAX_TILES).contains(&tile_count),
        "tile count {tile_count} outside {MIN_TILES}..={MAX_TILES}"
    );

    info!("Searching {loop_color} loops of {tile_count} tiles");
    let stats = Search::new(tile_count, loop_color, sink).run();
    info!(
        "{tile_count} tiles, {loop_color} loop: {} solutions, {} duplicates, {} with holes, {} of {} placements rejected",
        stats.solutions, stats.duplicates, stats.holes, stats.rejected, stats.placements
    );

    stats
}

/// Runs [`solve`] for every tile count and, within each count, every color
/// in the given order.
pub fn solve_schedule<S: SolutionSink + ?Sized>(
    tile_counts: RangeInclusive<usize>,
    colors: &[Color],
    sink: &mut S,
) -> SearchStats {
    let mut total = SearchStats::default();
    for tile_count in tile_counts {
        for &loop_color in colors {
            total += solve(tile_count, loop_color, sink);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(tile_count: usize, loop_color: Color) -> (Vec<Solution>, SearchStats) {
        let mut found: Vec<Solution> = Vec::new();
        let stats = solve(tile_count, loop_color, &mut found);
        (found, stats)
    }

    /// Checks every rule a solution has to satisfy.
    fn assert_valid(solution: &Solution) {
        let board = solution.board();
        let chain = &solution.chain;
        assert_eq!(chain.len(), solution.tile_count);
        assert_eq!(board.tile_count(), solution.tile_count);
        assert_eq!(board.bounds(), Some(solution.bounds));
        assert_eq!(chain[0].tile, RotatedTile::new(1));
        assert_eq!(chain[0].cell, CENTER);

        let mut ids: Vec<TileId> = chain.iter().map(|placed| placed.tile.id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=solution.tile_count as TileId).collect::<Vec<_>>());

        // every touching pair of edges agrees
        for placed in chain {
            assert_eq!(board.get(placed.cell), Some(placed.tile));
            for direction in Direction::ALL {
                if let Some(other) = board.get(neighbor(placed.cell, direction)) {
                    assert_eq!(placed.tile.edge(direction), other.edge(direction.opposite()));
                }
            }
        }

        // consecutive tiles, including last back to first, join on the loop color
        for (index, placed) in chain.iter().enumerate() {
            let next = chain[(index + 1) % chain.len()];
            let direction = Direction::ALL
                .into_iter()
                .find(|&direction| neighbor(placed.cell, direction) == next.cell)
                .expect("consecutive chain tiles are adjacent");
            assert_eq!(placed.tile.edge(direction), solution.loop_color);
        }

        assert!(!has_hole(&board, solution.bounds));
    }

    #[test]
    fn test_supply_iterates_in_id_order() {
        let supply = Supply::range(2, 5);
        assert_eq!(supply.iter().collect::<Vec<_>>(), [2, 3, 4, 5]);
        assert_eq!(supply.len(), 4);

        let smaller = supply.without(3);
        assert_eq!(smaller.iter().collect::<Vec<_>>(), [2, 4, 5]);
        assert!(!smaller.contains(3));
        assert!(supply.contains(3));
        assert!(Supply::range(2, 10).without(2).without(10).iter().all(|id| (3..=9).contains(&id)));
        assert!(Supply::default().is_empty());
    }

    #[test]
    fn test_chain_previous() {
        let mut chain = Chain::default();
        let anchor = PlacedTile {
            tile: RotatedTile::new(1),
            cell: CENTER,
        };
        chain.push(anchor);
        assert_eq!(chain.previous(), None);

        chain.push(PlacedTile {
            tile: RotatedTile::new(2),
            cell: (11, 10),
        });
        assert_eq!(chain.previous(), Some(&anchor));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_three_tile_yellow_loop() {
        let (found, stats) = solutions(3, Color::Yellow);

        assert_eq!(found.len(), 2);
        assert_eq!(stats.solutions, 2);
        // each loop is also found walking it the other way round
        assert_eq!(stats.duplicates, 2);
        assert_eq!(stats.holes, 0);
        assert!(stats.rejected > 0);
        assert!(stats.rejected < stats.placements);
        found.iter().for_each(assert_valid);

        let first: Vec<(TileId, u16)> = found[0]
            .chain
            .iter()
            .map(|placed| (placed.tile.id(), placed.tile.angle()))
            .collect();
        assert_eq!(first, [(1, 0), (2, 120), (3, 60)]);
    }

    #[test]
    fn test_three_tile_red_loops_are_hole_free() {
        let (found, stats) = solutions(3, Color::Red);
        found.iter().for_each(assert_valid);
        assert_eq!(stats.holes, 0);
        assert!(found.is_empty());
    }

    #[test]
    fn test_four_tile_blue_loops_are_valid() {
        let (found, _) = solutions(4, Color::Blue);
        found.iter().for_each(assert_valid);
        assert!(found.is_empty());
    }

    #[test]
    fn test_four_tile_red_loops() {
        let (found, stats) = solutions(4, Color::Red);
        assert_eq!(found.len(), 2);
        assert_eq!(stats.duplicates, 2);
        found.iter().for_each(assert_valid);
    }

    #[test]
    fn test_six_tile_blue_loops() {
        let (found, stats) = solutions(6, Color::Blue);
        assert_eq!(found.len(), 8);
        assert_eq!(stats.duplicates, 8);
        found.iter().for_each(assert_valid);
    }

    #[test]
    fn test_schedule_sums_iterations() {
        let mut found: Vec<Solution> = Vec::new();
        let stats = solve_schedule(3..=5, &Color::ALL, &mut found);

        // 3: yellow 2; 4: red 2; 5: red 4
        assert_eq!(stats.solutions, 8);
        assert_eq!(found.len(), 8);
        let colors: Vec<(usize, Color)> =
            found.iter().map(|solution| (solution.tile_count, solution.loop_color)).collect();
        assert_eq!(
            colors,
            [
                (3, Color::Yellow),
                (3, Color::Yellow),
                (4, Color::Red),
                (4, Color::Red),
                (5, Color::Red),
                (5, Color::Red),
                (5, Color::Red),
                (5, Color::Red),
            ]
        );
    }

    #[test]
    fn test_keys_of_found_solutions_are_distinct() {
        let (found, _) = solutions(6, Color::Blue);
        let keys: FxHashSet<String> = found
            .iter()
            .map(|solution| canonical_key(&solution.board(), solution.bounds))
            .collect();
        assert_eq!(keys.len(), found.len());
    }

    #[test]
    fn test_backtracking_restores_state() {
        let mut found: Vec<Solution> = Vec::new();
        let mut search = Search::new(4, Color::Red, &mut found);
        let board = search.board.clone();
        let chain = search.chain.clone();

        let supply = search.initial_supply();
        search.extend(supply);

        assert!(search.board == board);
        assert_eq!(search.chain, chain);
        assert_eq!(search.stats.solutions, 2);
    }

    #[test]
    fn test_report_lists_tiles_and_board() {
        let (found, _) = solutions(3, Color::Yellow);
        assert_eq!(
            found[0].report(1),
            "Solution #1\nTiles: (#1 @ 0 deg) (#2 @ 120 deg) (#3 @ 60 deg)\n  1.  ..\n3.  2.\n"
        );
    }

    #[test]
    fn test_enclosing_placement_is_rejected_as_hole() {
        let mut found: Vec<Solution> = Vec::new();
        let mut search = Search::new(6, Color::Red, &mut found);

        // tiles 2..=6 close a ring around the cell right of the anchor
        let inner = neighbor(CENTER, Direction::Right);
        let ring = Direction::ALL
            .into_iter()
            .map(|direction| neighbor(inner, direction))
            .filter(|&cell| cell != CENTER);
        for (id, cell) in (2..).zip(ring) {
            let tile = RotatedTile::new(id);
            search.board.place(cell, tile);
            search.chain.push(PlacedTile { tile, cell });
        }
        assert_eq!(search.board.tile_count(), 6);

        search.complete();
        assert_eq!(search.stats.holes, 1);
        assert_eq!(search.stats.solutions, 0);

        // the key was recorded before the hole check
        search.complete();
        assert_eq!(search.stats.duplicates, 1);
        assert_eq!(search.stats.holes, 1);

        drop(search);
        assert!(found.is_empty());
    }

    #[test]
    #[ignore = "slow in debug builds; run with --release --ignored"]
    fn test_seven_and_eight_tile_counts() {
        let counts: Vec<(usize, Color, u64)> = [(7, Color::Red), (7, Color::Blue), (8, Color::Blue)]
            .into_iter()
            .map(|(tile_count, color)| {
                let (found, stats) = solutions(tile_count, color);
                found.iter().for_each(assert_valid);
                (tile_count, color, stats.solutions)
            })
            .collect();

        assert_eq!(
            counts,
            [(7, Color::Red, 32), (7, Color::Blue, 36), (8, Color::Blue, 84)]
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_tile_count_is_checked() {
        solve(11, Color::Red, &mut Vec::<Solution>::new());
    }
}
