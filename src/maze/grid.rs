use std::{fmt, str::FromStr};

use super::{Coord, cell::Cell};
use crate::error::MazeError;

/// Fixed-size `height x width` array of cell states, indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    height: u16,
    width: u16,
}

impl Grid {
    /// Smallest allowed height and width.
    pub const MIN_DIM: u16 = 3;

    /// Creates a grid where every cell is a wall.
    pub fn new(height: u16, width: u16) -> Result<Self, MazeError> {
        if height < Grid::MIN_DIM || width < Grid::MIN_DIM {
            return Err(MazeError::GridTooSmall { height, width });
        }
        let data = vec![Cell::Wall; height as usize * width as usize].into_boxed_slice();
        Ok(Grid {
            data,
            height,
            width,
        })
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.height && coord.1 < self.width
    }

    /// Checks if the coordinate lies strictly inside the border.
    pub fn is_interior(&self, coord: Coord) -> bool {
        coord.0 > 0 && coord.1 > 0 && coord.0 < self.height - 1 && coord.1 < self.width - 1
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since height and width are u16 (assuming usize is at least 32 bits)
        coord.0 as usize * self.width as usize + coord.1 as usize
    }

    fn unravel_index(&self, index: usize) -> Coord {
        let width = self.width as usize;
        ((index / width) as u16, (index % width) as u16)
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.is_in_bounds(coord)
            .then(|| self.data[self.ravel_index(coord)])
    }

    /// Panics if `coord` is out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.ravel_index(coord);
        self.data[idx] = cell;
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (self.unravel_index(idx), cell))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.data.iter().filter(|&&c| c == cell).count()
    }

    /// Position of the first cell in row-major order with the given state.
    pub fn find(&self, cell: Cell) -> Option<Coord> {
        self.data
            .iter()
            .position(|&c| c == cell)
            .map(|idx| self.unravel_index(idx))
    }

    /// Turns every `Visited` and `OnPath` cell back into `Open`.
    /// Returns the number of cells that changed.
    pub fn reset_search_marks(&mut self) -> usize {
        let mut reset = 0;
        for cell in self.data.iter_mut() {
            if matches!(cell, Cell::Visited | Cell::OnPath) {
                *cell = Cell::Open;
                reset += 1;
            }
        }
        reset
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.width as usize) {
            let line = row
                .iter()
                .map(|cell| cell.glyph().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses the text form: one row per line, whitespace between glyphs ignored.
    /// Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (line_idx, line) in s.lines().enumerate() {
            let line_no = line_idx + 1;
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| {
                    Cell::from_glyph(c).ok_or_else(|| MazeError::ParseGrid {
                        line: line_no,
                        reason: format!("unknown glyph {:?}", c),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row.is_empty() {
                continue;
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(MazeError::ParseGrid {
                        line: line_no,
                        reason: format!("expected {} cells, found {}", first.len(), row.len()),
                    });
                }
            }
            rows.push(row);
        }

        let height = u16::try_from(rows.len()).map_err(|_| MazeError::ParseGrid {
            line: rows.len(),
            reason: "too many rows".to_string(),
        })?;
        let width = rows.first().map_or(0, Vec::len);
        let width = u16::try_from(width).map_err(|_| MazeError::ParseGrid {
            line: 1,
            reason: "too many columns".to_string(),
        })?;

        let mut grid = Grid::new(height, width)?;
        grid.data = rows.into_iter().flatten().collect::<Vec<_>>().into_boxed_slice();
        Ok(grid)
    }
}
