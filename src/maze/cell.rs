use crossterm::style::{Color, Stylize};

use std::fmt;

/// State of a single grid position.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell. Every cell starts out as a wall before carving.
    #[default]
    Wall,
    /// Carved cell not yet touched by a search.
    Open,
    /// The cell a search starts from.
    Start,
    /// The cell a search is looking for.
    End,
    /// A cell finalized by a search.
    Visited,
    /// A cell on the reconstructed path between start and end.
    OnPath,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether a search may step onto this cell.
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }

    /// Whether this cell carries a start or end tag.
    pub fn is_marker(self) -> bool {
        matches!(self, Cell::Start | Cell::End)
    }

    /// Single character used by the plain text form of a grid.
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Visited => 'v',
            Cell::OnPath => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            'v' => Some(Cell::Visited),
            '*' => Some(Cell::OnPath),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Open => "  ".with(Color::Reset),
            Cell::Start => "🟩".with(Color::Green),
            Cell::End => "🟥".with(Color::Red),
            Cell::Visited => "* ".with(Color::Blue),
            Cell::OnPath => "🟨".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
