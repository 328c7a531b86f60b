//! 3D viewer for saved solutions using kiss3d.

use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::prelude::*;

use tantrix::geometry::{center, Direction, NUM_DIRECTIONS};
use tantrix::solver::Solution;
use tantrix::tiles;

/// Display color of a line color.
fn line_color(color: tiles::Color) -> Color {
    match color {
        tiles::Color::Red => Color::new(0.9, 0.15, 0.15, 1.0),
        tiles::Color::Blue => Color::new(0.15, 0.35, 0.9, 1.0),
        tiles::Color::Yellow => Color::new(0.95, 0.8, 0.1, 1.0),
    }
}

/// A cube in the scene, either a tile body or one of its edge markers.
struct RenderedPart {
    node: SceneNode3d,
    /// Position when not spread apart.
    base_position: Vec3,
    /// Center of the tile the part belongs to, relative to the picture center.
    tile_center: Vec3,
}

impl RenderedPart {
    /// Moves the part `spread` units away from the picture center, along
    /// the direction of its tile.
    fn apply_spread(&mut self, spread: f32) {
        let outward = self.tile_center.normalize_or_zero();
        self.node.set_position(self.base_position + outward * spread);
    }
}

/// Builds the scene for a solution.
///
/// Tiles lie in the z = 0 plane, one world unit apart, with the picture
/// centered on the origin. Each tile is a dark slab with a small cube on
/// each of its six edges showing that edge's color.
fn build_scene(scene: &mut SceneNode3d, solution: &Solution) -> Vec<RenderedPart> {
    const SLAB_SIZE: f32 = 0.8;
    const SLAB_THICKNESS: f32 = 0.1;
    const MARKER_SIZE: f32 = 0.18;
    /// Distance from a tile center to its edge markers.
    const MARKER_DISTANCE: f32 = 0.36;

    let positions: Vec<Vec3> = solution
        .chain
        .iter()
        .map(|placed| {
            let (x, y) = center(placed.cell);
            Vec3::new(x, -y, 0.0)
        })
        .collect();
    let centroid = positions.iter().fold(Vec3::ZERO, |acc, &pos| acc + pos)
        / positions.len().max(1) as f32;

    let mut parts = Vec::with_capacity(solution.chain.len() * (NUM_DIRECTIONS + 1));
    for (placed, &position) in solution.chain.iter().zip(&positions) {
        let tile_center = position - centroid;

        let node = scene
            .add_cube(SLAB_SIZE, SLAB_SIZE, SLAB_THICKNESS)
            .set_color(Color::new(0.12, 0.12, 0.12, 1.0))
            .set_position(tile_center);
        parts.push(RenderedPart {
            node,
            base_position: tile_center,
            tile_center,
        });

        for direction in Direction::ALL {
            // direction 0 faces 60 degrees, each following one 60 degrees clockwise
            let radians = (60.0 - 60.0 * direction.index() as f32).to_radians();
            let marker_position =
                tile_center + Vec3::new(radians.cos(), radians.sin(), 0.0) * MARKER_DISTANCE;
            let node = scene
                .add_cube(MARKER_SIZE, MARKER_SIZE, SLAB_THICKNESS * 1.5)
                .set_color(line_color(placed.tile.edge(direction)))
                .set_position(marker_position);
            parts.push(RenderedPart {
                node,
                base_position: marker_position,
                tile_center,
            });
        }
    }

    parts
}

/// What the viewer shows: which solution, and how far its tiles are pulled
/// apart.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct ViewState {
    index: usize,
    spread: f32,
}

impl ViewState {
    const SPREAD_STEP: f32 = 0.1;

    /// Applies a key press. Returns true when a different solution has to
    /// be shown.
    fn press(&mut self, key: Key, solution_count: usize) -> bool {
        match key {
            Key::Up => self.spread += Self::SPREAD_STEP,
            Key::Down => self.spread = (self.spread - Self::SPREAD_STEP).max(0.0),
            Key::R => self.spread = 0.0,
            Key::Right => {
                self.index = (self.index + 1) % solution_count;
                return true;
            }
            Key::Left => {
                self.index = self.index.checked_sub(1).unwrap_or(solution_count - 1);
                return true;
            }
            _ => {}
        }
        false
    }

    fn title(&self, solutions: &[Solution]) -> String {
        let solution = &solutions[self.index];
        format!(
            "Solution {}/{} ({} tiles, {} loop) - [Left/Right] navigate, [Up/Down] spread, [R] reset",
            self.index + 1,
            solutions.len(),
            solution.tile_count,
            solution.loop_color
        )
    }
}

/// Displays all solutions in an interactive 3D viewer.
pub fn display(solutions: Vec<Solution>) {
    pollster::block_on(display_async(solutions));
}

async fn display_async(solutions: Vec<Solution>) {
    if solutions.is_empty() {
        println!("No solutions to display");
        return;
    }

    let mut view = ViewState::default();
    let mut window = Window::new(&view.title(&solutions)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(6.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(0.0, 0.0, 8.0));

    let mut parts = build_scene(&mut scene, &solutions[view.index]);

    loop {
        let mut switched = false;
        for event in window.events().iter() {
            if let WindowEvent::Key(key, Action::Press, _) = event.value {
                switched |= view.press(key, solutions.len());
            }
        }

        if switched {
            for mut part in parts.drain(..) {
                part.node.remove();
            }
            parts = build_scene(&mut scene, &solutions[view.index]);
            window.set_title(&view.title(&solutions));
        }

        for part in &mut parts {
            part.apply_spread(view.spread);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
