use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

use crate::{
    error::MazeError,
    maze::{Cell, Grid},
};
pub use recur_backtrack::recursive_backtrack;

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generates a perfect maze with `Start` at `(1, 1)` and `End` at `(height - 2, width - 2)`.
///
/// Carving moves in steps of two, so odd dimensions give a fully carved lattice.
/// With an even dimension the last carvable row or column is left as walls.
/// The same `seed` always yields the same maze; `None` seeds from the OS.
pub fn generate_maze(height: u16, width: u16, seed: Option<u64>) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(height, width)?;
    if (height - 2, width - 2) == (1, 1) {
        return Err(MazeError::Coincident((1, 1)));
    }

    let mut rng = get_rng(seed);
    recursive_backtrack(&mut grid, &mut rng);

    tracing::debug!(
        "[generate] carved {}x{} maze (seed {:?}), {} open cells",
        height,
        width,
        seed,
        grid.len() - grid.count(Cell::Wall)
    );
    Ok(grid)
}
