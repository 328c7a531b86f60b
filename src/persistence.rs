//! File I/O for saving and loading found solutions.
//!
//! Binary format for `solutions.bin` (little endian):
//! - u32: solution count
//! - repeat per solution:
//!   - u8: tile count
//!   - u8: loop color ordinal
//!   - repeat per tile, in chain order: u8 id, u8 rotation, u8 col, u8 row

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::board::{Board, PlacedTile, BOARD_SIZE};
use crate::solver::Solution;
use crate::tiles::{Color, RotatedTile, MAX_TILES, MIN_TILES};

pub const SOLUTIONS_BIN: &str = "solutions.bin";
pub const SOLUTIONS_TXT: &str = "solutions.txt";

/// Saves solutions to both binary and text files inside `dir`.
pub fn save(dir: &Path, solutions: &[Solution]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    save_text(dir, solutions)?;
    save_binary(dir, solutions)?;
    Ok(())
}

/// Saves solutions in human-readable text format.
fn save_text(dir: &Path, solutions: &[Solution]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(SOLUTIONS_TXT))?);
    writeln!(file, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "{}", solution.report(i + 1))?;
    }
    file.flush()
}

/// Saves solutions in compact binary format for fast loading.
fn save_binary(dir: &Path, solutions: &[Solution]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(SOLUTIONS_BIN))?);

    file.write_all(&(solutions.len() as u32).to_le_bytes())?;

    for solution in solutions {
        file.write_all(&[solution.tile_count as u8, solution.loop_color.ordinal()])?;
        for placed in &solution.chain {
            let (col, row) = placed.cell;
            file.write_all(&[
                placed.tile.id(),
                placed.tile.rotation(),
                col as u8,
                row as u8,
            ])?;
        }
    }

    file.flush()
}

/// Reads one solution, rejecting anything the search could not have produced.
fn read_solution(file: &mut impl Read) -> Option<Solution> {
    let mut header = [0u8; 2];
    file.read_exact(&mut header).ok()?;
    let tile_count = header[0] as usize;
    if !(MIN_TILES..=MAX_TILES).contains(&tile_count) {
        return None;
    }
    let loop_color = Color::from_ordinal(header[1])?;

    let mut board = Board::new();
    let mut chain = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        let mut record = [0u8; 4];
        file.read_exact(&mut record).ok()?;
        let [id, rotation, col, row] = record;
        let cell = (col as usize, row as usize);

        if !(1..=MAX_TILES).contains(&(id as usize))
            || rotation >= 6
            || cell.0 >= BOARD_SIZE
            || cell.1 >= BOARD_SIZE
            || !board.is_empty(cell)
        {
            return None;
        }

        let tile = RotatedTile::with_rotation(id, rotation);
        board.place(cell, tile);
        chain.push(PlacedTile { tile, cell });
    }

    Some(Solution {
        tile_count,
        loop_color,
        chain,
        bounds: board.bounds()?,
    })
}

/// Loads all solutions from the binary file in `dir`.
pub fn load_all(dir: &Path) -> Option<Vec<Solution>> {
    let mut file = io::BufReader::new(File::open(dir.join(SOLUTIONS_BIN)).ok()?);
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let solution_count = u32::from_le_bytes(u32_buffer) as usize;

    (0..solution_count)
        .map(|_| read_solution(&mut file))
        .collect()
}

/// Returns the number of saved solutions without loading them all.
pub fn count(dir: &Path) -> Option<usize> {
    let mut file = File::open(dir.join(SOLUTIONS_BIN)).ok()?;
    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer).ok()?;
    Some(u32::from_le_bytes(u32_buffer) as usize)
}
