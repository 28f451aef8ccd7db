pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::Grid;

/// A grid position as `(row, col)`.
pub type Coord = (u16, u16);

/// The four movement directions, in the order searches expand neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Moves `distance` cells from `coord` in this direction.
    /// Returns `None` on underflow or overflow; the upper grid bound is not checked here.
    pub fn step(self, coord: Coord, distance: u16) -> Option<Coord> {
        let (row, col) = coord;
        match self {
            Direction::Down => row.checked_add(distance).map(|r| (r, col)),
            Direction::Up => row.checked_sub(distance).map(|r| (r, col)),
            Direction::Right => col.checked_add(distance).map(|c| (row, c)),
            Direction::Left => col.checked_sub(distance).map(|c| (row, c)),
        }
    }
}

/// Get neighbors of a cell that are `distance` steps away in the cardinal directions,
/// in [`Direction::ALL`] order. Only in-bounds coordinates are yielded.
pub fn get_neighbors(coord: Coord, grid: &Grid, distance: u16) -> impl Iterator<Item = Coord> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| direction.step(coord, distance))
        .filter(move |&c| grid.is_in_bounds(c))
}

/// Manhattan distance between two positions.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) as usize + a.1.abs_diff(b.1) as usize
}
