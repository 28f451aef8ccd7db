use rand::Rng;

use crate::maze::{Cell, Coord, Direction, Grid, get_neighbors};

/// Carves `grid` in place with a randomized backtracker over the stride-2 lattice.
///
/// Every cell is reset to a wall first. `Start` goes to `(1, 1)` and `End` to
/// `(height - 2, width - 2)`. If the end falls off the carved lattice with no open
/// neighbor, one adjacent cell is opened so the end stays reachable.
pub fn recursive_backtrack<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let (height, width) = (grid.height(), grid.width());

    // Initialize the maze with walls
    (0..height).for_each(|row| {
        (0..width).for_each(|col| {
            grid.set((row, col), Cell::Wall);
        })
    });

    let start: Coord = (1, 1);
    grid.set(start, Cell::Start);

    // The stack keeps only carved cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = get_neighbors(cell, grid, 2)
            .filter(|&c| grid.is_interior(c) && grid[c] == Cell::Wall)
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        let midpoint = (midway(cell.0, neighbor.0), midway(cell.1, neighbor.1));
        grid.set(midpoint, Cell::Open);
        grid.set(neighbor, Cell::Open);
        stack.push(neighbor);
    }

    let end = (height - 2, width - 2);
    grid.set(end, Cell::End);
    repair_end(grid, end);
}

/// Halfway between two lattice indices, without summing them.
fn midway(a: u16, b: u16) -> u16 {
    a.min(b) + a.abs_diff(b) / 2
}

/// Opens a cell next to `end` when both of its inward neighbors are still walls.
fn repair_end(grid: &mut Grid, end: Coord) {
    let inward = [Direction::Up, Direction::Left]
        .into_iter()
        .filter_map(|direction| direction.step(end, 1))
        .filter(|&c| grid.is_interior(c))
        .collect::<Vec<_>>();

    if inward.iter().any(|&c| grid[c] != Cell::Wall) {
        return;
    }

    if let Some(&opening) = inward.first() {
        tracing::debug!("[generate] end {:?} is walled in, opening {:?}", end, opening);
        grid.set(opening, Cell::Open);
    }
}
