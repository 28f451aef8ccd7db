use std::time::Instant;

use mazesearch::{
    generators::generate_maze,
    solvers::{Search, Solver},
};

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(100);
    let size = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(101);

    let started = Instant::now();
    for seed in 0..num_iters {
        generate_maze(size, size, Some(seed)).map_err(std::io::Error::other)?;
    }
    println!(
        "generate {}x{}: {:?} per maze",
        size,
        size,
        started.elapsed() / num_iters.max(1) as u32
    );

    for solver in Solver::ALL {
        let mut elapsed = std::time::Duration::ZERO;
        let mut visited = 0;
        let mut reached = 0;
        for seed in 0..num_iters {
            let mut grid = generate_maze(size, size, Some(seed)).map_err(std::io::Error::other)?;
            let end = (size - 2, size - 2);

            let started = Instant::now();
            let outcome = Search::new(&mut grid, solver, (1, 1), end)
                .map_err(std::io::Error::other)?
                .finish();
            elapsed += started.elapsed();

            visited += outcome.visited_count;
            reached += usize::from(outcome.reached);
        }
        println!(
            "{}: {:?} total, {} visited on average, reached {}/{}",
            solver,
            elapsed,
            visited as u64 / num_iters.max(1),
            reached,
            num_iters
        );
    }
    Ok(())
}
