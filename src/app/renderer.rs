use std::{io::Write, time::Duration};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Cell, Grid},
    solvers::{EventKind, SearchOutcome, VisitationEvent},
};

/// Draws a grid and replays search events on a terminal-like writer.
pub struct Renderer<W: Write> {
    out: W,
    /// Grid as it looked when the search started; used to keep start/end tags on redraw
    snapshot: Option<Grid>,
    /// Time to wait after each replayed event
    frame_delay: Duration,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, frame_delay: Duration) -> Self {
        Self {
            out,
            snapshot: None,
            frame_delay,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clears the screen and draws every cell of `grid`.
    pub fn draw_grid(&mut self, grid: &Grid) -> std::io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All), cursor::Hide, cursor::MoveTo(0, 0))?;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                queue!(self.out, style::Print(grid[(row, col)]))?;
            }
            queue!(self.out, style::Print("\r\n"))?;
        }
        self.out.flush()?;
        self.snapshot = Some(grid.clone());
        Ok(())
    }

    /// Redraws the single cell an event refers to.
    pub fn draw_event(&mut self, event: &VisitationEvent) -> std::io::Result<()> {
        let Some(snapshot) = &self.snapshot else {
            tracing::debug!("[render] skipping {:?}, no grid drawn yet", event);
            return Ok(());
        };
        let Some(initial) = snapshot.get(event.position) else {
            return Ok(());
        };

        let (row, col) = event.position;
        queue!(self.out, cursor::MoveTo(col.saturating_mul(Cell::CELL_WIDTH), row))?;
        match (event.kind, initial.is_marker()) {
            (_, true) => queue!(self.out, style::Print(initial))?,
            (EventKind::Frontier, false) => {
                queue!(self.out, style::PrintStyledContent("+ ".with(Color::Cyan)))?
            }
            (EventKind::Visited | EventKind::EndReached, false) => {
                queue!(self.out, style::Print(Cell::Visited))?
            }
            (EventKind::OnPath, false) => queue!(self.out, style::Print(Cell::OnPath))?,
        }
        self.out.flush()?;

        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    /// Prints the result below the grid, truncated to the grid's drawn width.
    pub fn draw_status(&mut self, outcome: &SearchOutcome) -> std::io::Result<()> {
        let (height, max_width) = match &self.snapshot {
            Some(grid) => (
                grid.height(),
                grid.width() as usize * Cell::CELL_WIDTH as usize,
            ),
            None => (0, usize::MAX),
        };
        let msg = super::summary(outcome);
        let (msg, _) = msg.unicode_truncate(max_width);
        let color = if outcome.reached { Color::Green } else { Color::Yellow };

        queue!(
            self.out,
            cursor::MoveTo(0, height),
            style::PrintStyledContent(msg.with(color).attribute(Attribute::Bold)),
            style::Print("\r\n"),
            cursor::Show
        )?;
        self.out.flush()
    }
}
