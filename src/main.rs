use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};

use mazesearch::{
    app::{self, RunError},
    config::MazeConfig,
    maze::Coord,
    solvers::Solver,
};

/// Generate a maze and animate a grid search over it in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Grid height in cells (odd values give a fully carved maze)
    #[arg(long, default_value_t = 21)]
    height: u16,
    /// Grid width in cells (odd values give a fully carved maze)
    #[arg(long, default_value_t = 21)]
    width: u16,
    /// Seed for maze generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Solver::AStar)]
    solver: Solver,
    /// Start position as ROW,COL [default: 1,1]
    #[arg(long, value_parser = parse_coord)]
    start: Option<Coord>,
    /// End position as ROW,COL [default: height-2,width-2]
    #[arg(long, value_parser = parse_coord)]
    end: Option<Coord>,
    /// Delay between animation frames in milliseconds
    #[arg(long, default_value_t = 20)]
    delay_ms: u64,
    /// Print the solved grid as text instead of animating
    #[arg(long)]
    plain: bool,
    #[arg(long, default_value = "mazesearch.log")]
    log_file: PathBuf,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {:?}", s))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u16>()
            .map_err(|e| format!("invalid coordinate {:?}: {}", part, e))
    };
    Ok((parse(row)?, parse(col)?))
}

/// Log to a file so log lines never interleave with the terminal drawing.
fn init_logging(path: &Path, verbose: bool) -> std::io::Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("mazesearch.log");

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(guard)
}

fn main() -> std::io::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_file, cli.verbose)?;

    let config = MazeConfig {
        height: cli.height,
        width: cli.width,
        seed: cli.seed,
        solver: cli.solver,
        start: cli.start,
        end: cli.end,
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return Ok(ExitCode::from(2));
    }
    tracing::info!("[main] starting with {:?}", config);

    let result = if cli.plain {
        app::run_plain(std::io::stdout(), &config)
    } else {
        let mut stdout = std::io::stdout();
        app::setup_terminal(&mut stdout)?;
        let result = app::run(&mut stdout, &config, Duration::from_millis(cli.delay_ms));
        app::restore_terminal(&mut stdout)?;
        result
    };

    match result {
        Ok(outcome) => {
            tracing::info!("[main] {}", app::summary(&outcome));
            Ok(ExitCode::SUCCESS)
        }
        Err(RunError::Maze(e)) => {
            eprintln!("{}", e);
            Ok(ExitCode::from(2))
        }
        Err(RunError::Io(e)) => Err(e),
    }
}
