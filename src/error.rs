use thiserror::Error;

use crate::maze::{Coord, cell::Cell};

/// Which end of a search a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Errors reported before any carving or traversal happens.
///
/// Nothing that occurs during a traversal is an error: an unreachable end is
/// reported through `SearchOutcome::reached`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("grid dimensions {height}x{width} are below the 3x3 minimum")]
    GridTooSmall { height: u16, width: u16 },

    #[error("{endpoint} position {coord:?} is outside the {height}x{width} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        coord: Coord,
        height: u16,
        width: u16,
    },

    #[error("start and end both sit at {0:?}")]
    Coincident(Coord),

    #[error("{endpoint} position {coord:?} is a wall")]
    OnWall { endpoint: Endpoint, coord: Coord },

    #[error("grid holds {count} {cell:?} cells, at most one is allowed")]
    DuplicateMarker { cell: Cell, count: usize },

    #[error("invalid grid text on line {line}: {reason}")]
    ParseGrid { line: usize, reason: String },
}
