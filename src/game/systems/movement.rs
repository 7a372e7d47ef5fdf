//! Player movement system.
//!
//! This module applies one discrete move to the maze grid: bounds, walls,
//! collectible pickups and the finish-adjacency win are all resolved here.

use log::debug;

use crate::game::grid::find_cell;
use crate::game::types::{Cell, Direction, Grid, Position};

/// Caller-observable effect of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed: no player on the grid, or the target was out of
    /// bounds or a wall.
    NoOp,
    /// The player advanced one cell.
    Moved,
    /// The player advanced one cell onto a collectible.
    Collected,
    /// The target was edge-adjacent to the finish; the grid is now the
    /// all-empty solved sentinel.
    Won,
}

/// Move the player one cell in `direction`, mutating the grid in place.
///
/// Rejected moves leave the grid untouched and report [`MoveOutcome::NoOp`];
/// a caller looking only at the grid cannot tell a rejected move apart from
/// one that was never attempted. The win check runs before any cell is
/// written, so a collectible sitting on the winning cell is never credited.
pub fn move_player(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    let Some(player) = find_cell(grid, Cell::Player) else {
        debug!("move ignored: no player on the grid");
        return MoveOutcome::NoOp;
    };
    let finish = find_cell(grid, Cell::Finish);

    let (dx, dy) = direction.delta();
    let target = match (
        player.x.checked_add_signed(dx),
        player.y.checked_add_signed(dy),
    ) {
        (Some(x), Some(y)) if x < grid.len() && y < grid[x].len() => Position { x, y },
        _ => {
            debug!("move ignored: target out of bounds");
            return MoveOutcome::NoOp;
        }
    };

    if grid[target.x][target.y] == Cell::Wall {
        debug!("move ignored: wall at ({}, {})", target.x, target.y);
        return MoveOutcome::NoOp;
    }

    // The win is decided before any cell is rewritten.
    if let Some(finish) = finish {
        if target.manhattan(&finish) == 1 {
            debug!("player reached the finish neighborhood");
            for row in grid.iter_mut() {
                row.fill(Cell::Empty);
            }
            return MoveOutcome::Won;
        }
    }

    let collected = grid[target.x][target.y] == Cell::Collectible;

    grid[player.x][player.y] = Cell::Empty;
    grid[target.x][target.y] = Cell::Player;

    if collected {
        MoveOutcome::Collected
    } else {
        MoveOutcome::Moved
    }
}
