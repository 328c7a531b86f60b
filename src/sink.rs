//! Reporting of accepted solutions.

use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::board::Board;
use crate::render::{RenderError, Renderer};
use crate::solver::{Solution, SolutionSink};
use crate::tiles::Color;

/// Directory that receives pictures and saved solutions by default.
pub const DEFAULT_OUTPUT_DIR: &str = "solutions";

/// File name of the picture of solution number `number`.
///
/// `Solution_NN_C_SSSS.png`: tile count, loop color ordinal and the running
/// solution number.
pub fn solution_filename(tile_count: usize, loop_color: Color, number: usize) -> String {
    format!(
        "Solution_{:02}_{}_{:04}.png",
        tile_count,
        loop_color.ordinal(),
        number
    )
}

/// Prints, numbers and renders every solution it receives, and keeps them
/// for saving once the search is over.
///
/// Numbering runs across all searches fed into the same sink. Rendering
/// problems are logged and otherwise ignored.
pub struct ReportingSink<R: Renderer> {
    output_dir: PathBuf,
    renderer: Option<R>,
    counter: usize,
    solutions: Vec<Solution>,
}

impl<R: Renderer> ReportingSink<R> {
    /// Creates a sink writing pictures into `output_dir`, or no pictures at
    /// all when `renderer` is `None`.
    pub fn new(output_dir: impl Into<PathBuf>, renderer: Option<R>) -> Self {
        Self {
            output_dir: output_dir.into(),
            renderer,
            counter: 0,
            solutions: Vec::new(),
        }
    }

    /// Number of solutions accepted so far.
    pub fn count(&self) -> usize {
        self.counter
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    fn render(&mut self, solution: &Solution, board: &Board) -> Result<(), RenderError> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(solution_filename(
            solution.tile_count,
            solution.loop_color,
            self.counter,
        ));
        renderer.render(&path, solution, board)
    }
}

impl<R: Renderer> SolutionSink for ReportingSink<R> {
    fn accept(&mut self, solution: &Solution, board: &Board) {
        self.counter += 1;
        println!("{}", solution.report(self.counter));

        if let Err(e) = self.render(solution, board) {
            warn!("Failed to render solution #{}: {}", self.counter, e);
        }

        self.solutions.push(solution.clone());
    }
}
