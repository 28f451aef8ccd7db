pub mod renderer;

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{cursor, queue, terminal};
use thiserror::Error;

use crate::{
    app::renderer::Renderer,
    config::MazeConfig,
    error::MazeError,
    generators::generate_maze,
    solvers::{Search, SearchOutcome, solve_maze},
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Set a panic hook to restore the cursor on panic
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Clear the terminal and hide the cursor for animation
/// Also sets a panic hook to restore the terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    set_panic_hook();
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()
}

pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, cursor::Show)?;
    stdout.flush()
}

/// One-line description of a search result.
pub fn summary(outcome: &SearchOutcome) -> String {
    if outcome.reached {
        format!(
            "Path found! cost {}, visited {}",
            outcome.cost, outcome.visited_count
        )
    } else {
        format!("No path found, visited {}", outcome.visited_count)
    }
}

/// Generate a maze, then animate one search over it on `out`.
/// The caller controls pacing through `frame_delay`.
pub fn run<W: Write>(
    out: W,
    config: &MazeConfig,
    frame_delay: Duration,
) -> Result<SearchOutcome, RunError> {
    config.validate()?;
    let mut grid = generate_maze(config.height, config.width, config.seed)?;

    let mut renderer = Renderer::new(out, frame_delay);
    let mut search = Search::new(&mut grid, config.solver, config.start(), config.end())?;
    tracing::info!(
        "[render] animating {} on {}x{} maze",
        config.solver,
        config.height,
        config.width
    );
    renderer.draw_grid(search.grid())?;
    for event in search.by_ref() {
        renderer.draw_event(&event)?;
    }
    let outcome = search.finish();
    renderer.draw_status(&outcome)?;
    Ok(outcome)
}

/// Generate and solve without animation, printing the final grid in text form.
pub fn run_plain<W: Write>(mut out: W, config: &MazeConfig) -> Result<SearchOutcome, RunError> {
    config.validate()?;
    let mut grid = generate_maze(config.height, config.width, config.seed)?;
    let (outcome, events) = solve_maze(&mut grid, config.solver, config.start(), config.end())?;
    tracing::debug!("[render] plain run produced {} events", events.len());

    write!(out, "{}", grid)?;
    writeln!(out, "{}: {}", config.solver, summary(&outcome))?;
    out.flush()?;
    Ok(outcome)
}
