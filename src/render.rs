//! PNG pictures of solutions.
//!
//! Tiles are painted as pointy-top hexagons split into six wedges, each
//! wedge filled with the color of the edge it leads to.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::board::Board;
use crate::geometry::{center, Direction, ROW_HEIGHT};
use crate::solver::Solution;
use crate::tiles::{Color, RotatedTile};

/// Failure to produce a picture of a solution.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("board has no tiles to draw")]
    EmptyBoard,
}

/// Something that turns a placed board into an image file.
pub trait Renderer {
    fn render(&mut self, path: &Path, solution: &Solution, board: &Board) -> Result<(), RenderError>;
}

/// Empty space left around the tiles, in pixels.
const MARGIN: u32 = 4;
/// Gap between neighboring tiles, in pixels.
const GAP: f32 = 4.0;
/// Width of the dark rim along each tile edge, in pixels.
const OUTLINE: f32 = 2.0;
/// Radius of the center dot relative to the tile width.
const HUB_RADIUS: f32 = 0.12;

const OUTLINE_COLOR: Rgba<u8> = Rgba([25, 25, 25, 255]);
const HUB_COLOR: Rgba<u8> = Rgba([15, 15, 15, 255]);

fn edge_color(color: Color) -> Rgba<u8> {
    match color {
        Color::Red => Rgba([214, 40, 40, 255]),
        Color::Blue => Rgba([40, 90, 214, 255]),
        Color::Yellow => Rgba([240, 200, 30, 255]),
    }
}

/// Distance from `(dx, dy)` to the border of a pointy-top hexagon with the
/// given apothem, positive inside.
fn hex_inset(dx: f32, dy: f32, apothem: f32) -> f32 {
    let x = dx.abs();
    let y = dy.abs();
    apothem - x.max(0.5 * x + ROW_HEIGHT * y)
}

/// Direction of the wedge containing `(dx, dy)`, with y pointing down.
fn wedge(dx: f32, dy: f32) -> Direction {
    let degrees = (-dy).atan2(dx).to_degrees();
    // direction 0 faces 60 degrees, each following one 60 degrees clockwise
    let steps = ((60.0 - degrees) / 60.0).round() as i32;
    Direction::from_index(steps.rem_euclid(6) as usize)
}

/// Renders boards to PNG files.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    /// Distance between the flat sides of a tile, in pixels.
    pub tile_width: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self { tile_width: 96 }
    }
}

impl PngRenderer {
    /// Paints every tile of `board` onto a transparent canvas that just fits
    /// them.
    pub fn draw(&self, board: &Board) -> Result<RgbaImage, RenderError> {
        let tiles: Vec<(f32, f32, RotatedTile)> = board
            .occupied()
            .map(|(cell, tile)| {
                let (x, y) = center(cell);
                (x, y, tile)
            })
            .collect();
        if tiles.is_empty() {
            return Err(RenderError::EmptyBoard);
        }

        let width = self.tile_width as f32;
        let radius = width / (2.0 * ROW_HEIGHT);
        let apothem = (width - GAP) / 2.0;

        let min_x = tiles.iter().map(|t| t.0).fold(f32::INFINITY, f32::min);
        let max_x = tiles.iter().map(|t| t.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = tiles.iter().map(|t| t.1).fold(f32::INFINITY, f32::min);
        let max_y = tiles.iter().map(|t| t.1).fold(f32::NEG_INFINITY, f32::max);

        let image_width = ((max_x - min_x) * width + width).ceil() as u32 + 2 * MARGIN;
        let image_height = ((max_y - min_y) * width + 2.0 * radius).ceil() as u32 + 2 * MARGIN;
        let origin_x = MARGIN as f32 + width / 2.0 - min_x * width;
        let origin_y = MARGIN as f32 + radius - min_y * width;

        let mut image = RgbaImage::new(image_width, image_height);
        for (px, py, pixel) in image.enumerate_pixels_mut() {
            let x = px as f32 + 0.5;
            let y = py as f32 + 0.5;

            for &(cx, cy, tile) in &tiles {
                let dx = x - (origin_x + cx * width);
                let dy = y - (origin_y + cy * width);
                let inset = hex_inset(dx, dy, apothem);
                if inset < 0.0 {
                    continue;
                }

                *pixel = if inset < OUTLINE {
                    OUTLINE_COLOR
                } else if dx.hypot(dy) < HUB_RADIUS * width {
                    HUB_COLOR
                } else {
                    edge_color(tile.edge(wedge(dx, dy)))
                };
                break;
            }
        }

        Ok(image)
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, path: &Path, _solution: &Solution, board: &Board) -> Result<(), RenderError> {
        self.draw(board)?.save(path)?;
        Ok(())
    }
}
