use crate::{
    error::{Endpoint, MazeError},
    maze::{Coord, Grid},
    solvers::Solver,
};

/// Everything needed to generate one maze and run one search on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub height: u16,
    pub width: u16,
    /// `None` seeds generation from the OS
    pub seed: Option<u64>,
    pub solver: Solver,
    /// Defaults to `(1, 1)`
    pub start: Option<Coord>,
    /// Defaults to `(height - 2, width - 2)`
    pub end: Option<Coord>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            height: 21,
            width: 21,
            seed: None,
            solver: Solver::AStar,
            start: None,
            end: None,
        }
    }
}

impl MazeConfig {
    pub fn start(&self) -> Coord {
        self.start.unwrap_or((1, 1))
    }

    pub fn end(&self) -> Coord {
        self.end.unwrap_or((
            self.height.saturating_sub(2),
            self.width.saturating_sub(2),
        ))
    }

    /// Checks dimensions and endpoint placement. Whether an endpoint lands on a wall
    /// can only be known once the maze exists, so that check belongs to the search.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.height < Grid::MIN_DIM || self.width < Grid::MIN_DIM {
            return Err(MazeError::GridTooSmall {
                height: self.height,
                width: self.width,
            });
        }

        let (start, end) = (self.start(), self.end());
        for (endpoint, coord) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if coord.0 >= self.height || coord.1 >= self.width {
                return Err(MazeError::OutOfBounds {
                    endpoint,
                    coord,
                    height: self.height,
                    width: self.width,
                });
            }
        }

        if start == end {
            return Err(MazeError::Coincident(start));
        }
        Ok(())
    }
}
