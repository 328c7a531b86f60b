//! Tantrix Loop Solver Library
//!
//! Enumerates closed single-color loops formed by the first `n` tiles of
//! the Tantrix discovery set on a hex grid.

pub mod board;
pub mod constraints;
pub mod geometry;
pub mod persistence;
pub mod render;
pub mod sink;
pub mod solver;
pub mod tiles;

pub use solver::{solve, solve_schedule, SearchStats, Solution, SolutionSink};
