//! Maze generation and grid predicates.
//!
//! The maze is carved with a randomized depth-first search over the step-2
//! sublattice, giving a perfect maze: exactly one path between any two
//! carved cells, no cycles. Collectibles are seeded into the carved
//! passages afterwards.

use log::{debug, warn};
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::config::game::{COLLECTIBLE_CHANCE, MAX_CARVE_ATTEMPTS};
use crate::game::types::{Cell, Grid, Position};

/// Generate a `size` x `size` maze with a start, a finish and collectibles.
///
/// The start cell (marked [`Cell::Player`]) sits on the top row, the finish
/// on the bottom row, both away from the corners. The finish must end up
/// with at least one empty four-neighbor or a run could never register a
/// win, so carving is retried up to `MAX_CARVE_ATTEMPTS` times; after that
/// a connecting cell is forced open instead of retrying forever.
pub fn generate(size: usize, rng: &mut impl Rng) -> Grid {
    let mut attempt = 0;
    let mut grid = loop {
        let (mut grid, finish) = carve(size, rng);
        attempt += 1;
        if has_adjacent_empty(&grid, finish) {
            break grid;
        }
        if attempt >= MAX_CARVE_ATTEMPTS {
            warn!("finish walled in after {attempt} attempts, forcing a passage");
            grid[finish.x - 1][finish.y] = Cell::Empty;
            break grid;
        }
        debug!("finish walled in, carving again (attempt {attempt})");
    };

    seed_collectibles(&mut grid, rng);
    grid
}

/// One carving pass: all walls, random start and finish, then depth-first
/// passage carving from the start.
fn carve(size: usize, rng: &mut impl Rng) -> (Grid, Position) {
    let mut grid = vec![vec![Cell::Wall; size]; size];

    let start = Position { x: 0, y: random_in(1, size - 2, rng) };
    grid[start.x][start.y] = Cell::Player;

    let finish = Position { x: size - 1, y: random_in(1, size - 2, rng) };
    grid[finish.x][finish.y] = Cell::Finish;

    let mut stack = vec![start];
    while let Some(&current) = stack.last() {
        let candidates = unvisited_neighbors(&grid, current);
        if let Some(&next) = candidates.iter().choose(rng) {
            // Open the wall between the two cells, then the cell itself.
            grid[(current.x + next.x) / 2][(current.y + next.y) / 2] = Cell::Empty;
            grid[next.x][next.y] = Cell::Empty;
            stack.push(next);
        } else {
            stack.pop();
        }
    }

    (grid, finish)
}

/// Cells two steps away from `pos` that are still solid wall.
pub fn unvisited_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    let size = grid.len();
    let mut neighbors = Vec::new();

    if pos.x > 1 && grid[pos.x - 2][pos.y] == Cell::Wall {
        neighbors.push(Position { x: pos.x - 2, y: pos.y });
    }
    if pos.x < size - 2 && grid[pos.x + 2][pos.y] == Cell::Wall {
        neighbors.push(Position { x: pos.x + 2, y: pos.y });
    }
    if pos.y > 1 && grid[pos.x][pos.y - 2] == Cell::Wall {
        neighbors.push(Position { x: pos.x, y: pos.y - 2 });
    }
    if pos.y < size - 2 && grid[pos.x][pos.y + 2] == Cell::Wall {
        neighbors.push(Position { x: pos.x, y: pos.y + 2 });
    }

    neighbors
}

/// Whether any four-neighbor of `pos` is an empty passage.
pub fn has_adjacent_empty(grid: &Grid, pos: Position) -> bool {
    let size = grid.len();
    (pos.x > 0 && grid[pos.x - 1][pos.y] == Cell::Empty)
        || (pos.x < size - 1 && grid[pos.x + 1][pos.y] == Cell::Empty)
        || (pos.y > 0 && grid[pos.x][pos.y - 1] == Cell::Empty)
        || (pos.y < size - 1 && grid[pos.x][pos.y + 1] == Cell::Empty)
}

/// Turn each empty cell into a collectible with `COLLECTIBLE_CHANCE`.
/// Start, finish and wall cells are never converted.
fn seed_collectibles(grid: &mut Grid, rng: &mut impl Rng) {
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            if *cell == Cell::Empty && rng.random::<f64>() < COLLECTIBLE_CHANCE {
                *cell = Cell::Collectible;
            }
        }
    }
}

/// Inclusive uniform integer draw from `[min, max]`.
pub fn random_in(min: usize, max: usize, rng: &mut impl Rng) -> usize {
    rng.random_range(min..=max)
}

/// True iff every cell is empty: the solved-sentinel predicate.
pub fn is_grid_empty(grid: &Grid) -> bool {
    grid.iter().flatten().all(|&cell| cell == Cell::Empty)
}

/// First cell of the given kind, scanning row-major.
pub fn find_cell(grid: &Grid, kind: Cell) -> Option<Position> {
    grid.iter().enumerate().find_map(|(x, row)| {
        row.iter()
            .enumerate()
            .find_map(|(y, &cell)| (cell == kind).then_some(Position { x, y }))
    })
}
