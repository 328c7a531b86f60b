//! Tantrix Loop Solver
//!
//! Finds every way to lay the first `n` tiles of the Tantrix discovery set
//! (3 <= n <= 10) so that one color forms a single closed loop through all of
//! them, with every touching edge matching and no enclosed gaps. Solutions are
//! printed, drawn as PNG files and saved for the interactive 3D viewer.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use tantrix::render::PngRenderer;
use tantrix::sink::{ReportingSink, DEFAULT_OUTPUT_DIR};
use tantrix::tiles::{Color, MAX_TILES, MIN_TILES};
use tantrix::{persistence, solver};

/// Enumerates closed Tantrix loops and visualizes the solutions.
#[derive(Parser)]
#[command(name = "tantrix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for loops, print and draw them, and save them to disk.
    Solve(SolveArgs),
    /// Display saved solutions in an interactive 3D viewer.
    Display(OutputArgs),
    /// Show the number of saved solutions.
    Count(OutputArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Directory for pictures and saved solutions.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

#[derive(Args)]
struct SolveArgs {
    /// Smallest number of tiles to search.
    #[arg(long, default_value_t = MIN_TILES, value_parser = parse_tile_count)]
    min_tiles: usize,
    /// Largest number of tiles to search.
    #[arg(long, default_value_t = MAX_TILES, value_parser = parse_tile_count)]
    max_tiles: usize,
    /// Loop color to search for; repeat for several. Defaults to all three.
    #[arg(long = "color", value_enum)]
    colors: Vec<LoopColor>,
    /// Skip writing PNG pictures.
    #[arg(long)]
    no_images: bool,
    #[command(flatten)]
    output: OutputArgs,
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            min_tiles: MIN_TILES,
            max_tiles: MAX_TILES,
            colors: Vec::new(),
            no_images: false,
            output: OutputArgs {
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            },
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LoopColor {
    Red,
    Blue,
    Yellow,
}

impl From<LoopColor> for Color {
    fn from(color: LoopColor) -> Self {
        match color {
            LoopColor::Red => Color::Red,
            LoopColor::Blue => Color::Blue,
            LoopColor::Yellow => Color::Yellow,
        }
    }
}

fn parse_tile_count(value: &str) -> Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (MIN_TILES..=MAX_TILES).contains(&count) {
        Ok(count)
    } else {
        Err(format!("tile count must be between {MIN_TILES} and {MAX_TILES}"))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(args)) => run_solver(&args),
        Some(Command::Display(args)) => run_display(&args),
        Some(Command::Count(args)) => run_count(&args),
        None => run_solver(&SolveArgs::default()),
    }
}

/// Runs the search schedule, then saves everything that was found.
fn run_solver(args: &SolveArgs) -> ExitCode {
    if args.min_tiles > args.max_tiles {
        eprintln!(
            "--min-tiles ({}) must not exceed --max-tiles ({})",
            args.min_tiles, args.max_tiles
        );
        return ExitCode::FAILURE;
    }

    let colors: Vec<Color> = if args.colors.is_empty() {
        Color::ALL.to_vec()
    } else {
        args.colors.iter().map(|&color| color.into()).collect()
    };

    let output_dir = &args.output.output_dir;
    let renderer = (!args.no_images).then(PngRenderer::default);
    let mut sink = ReportingSink::new(output_dir, renderer);

    let stats = solver::solve_schedule(args.min_tiles..=args.max_tiles, &colors, &mut sink);
    info!(
        "Done: {} solutions, {} duplicates, {} with holes, {} of {} placements rejected",
        stats.solutions, stats.duplicates, stats.holes, stats.rejected, stats.placements
    );

    if let Err(e) = persistence::save(output_dir, sink.solutions()) {
        eprintln!("Failed to save solutions: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Found {} solutions", sink.count());
    println!(
        "Wrote {} and {} to {}",
        persistence::SOLUTIONS_TXT,
        persistence::SOLUTIONS_BIN,
        output_dir.display()
    );
    ExitCode::SUCCESS
}

/// Loads and displays saved solutions.
fn run_display(args: &OutputArgs) -> ExitCode {
    match persistence::load_all(&args.output_dir) {
        Some(solutions) => {
            println!("Loaded {} solutions", solutions.len());
            println!("Controls: Left/Right navigate, Up/Down spread, R reset");
            visualization::display(solutions);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No readable {} found. Run 'tantrix solve' first.", persistence::SOLUTIONS_BIN);
            ExitCode::FAILURE
        }
    }
}

/// Prints the count of saved solutions.
fn run_count(args: &OutputArgs) -> ExitCode {
    match persistence::count(&args.output_dir) {
        Some(count) => {
            println!("{} solutions", count);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No {} found. Run 'tantrix solve' first.", persistence::SOLUTIONS_BIN);
            ExitCode::FAILURE
        }
    }
}
