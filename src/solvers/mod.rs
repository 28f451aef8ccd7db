use std::collections::{HashSet, VecDeque};

mod dfs;
mod dijkstra;
mod path;

use crate::{
    error::{Endpoint, MazeError},
    maze::{Cell, Coord, Grid, get_neighbors},
};
use dfs::DepthFirst;
use dijkstra::BestFirst;
use path::{ParentMap, reconstruct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Solver {
    Dfs,
    Dijkstra,
    #[value(name = "astar")]
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Dfs, Solver::Dijkstra, Solver::AStar];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The cell was finalized (entered by DFS, popped by Dijkstra/A*)
    Visited,
    /// The cell was discovered and queued with a better cost
    Frontier,
    /// The end cell was reached; no further expansion follows
    EndReached,
    /// The cell was marked as part of the reconstructed path
    OnPath,
}

/// One state transition emitted by a search, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitationEvent {
    pub position: Coord,
    /// Strictly increasing from zero within one search
    pub order_index: usize,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub reached: bool,
    /// Positions from start to end inclusive; empty when the end was not reached
    pub path: Vec<Coord>,
    /// Number of steps along `path`
    pub cost: usize,
    /// Number of cells finalized, including start and end
    pub visited_count: usize,
}

pub(crate) enum Step {
    Continue,
    Reached { cost: usize },
    Exhausted,
}

/// Bookkeeping shared by all strategies: visited set, parent links, grid marking and
/// the buffer of events not yet pulled by the caller.
pub(crate) struct Tracker<'g> {
    grid: &'g mut Grid,
    start: Coord,
    end: Coord,
    parents: ParentMap,
    visited: HashSet<Coord>,
    pending: VecDeque<VisitationEvent>,
    next_order: usize,
}

impl<'g> Tracker<'g> {
    fn new(grid: &'g mut Grid, start: Coord, end: Coord) -> Self {
        Tracker {
            grid,
            start,
            end,
            parents: ParentMap::new(start),
            visited: HashSet::new(),
            pending: VecDeque::new(),
            next_order: 0,
        }
    }

    fn emit(&mut self, position: Coord, kind: EventKind) {
        self.pending.push_back(VisitationEvent {
            position,
            order_index: self.next_order,
            kind,
        });
        self.next_order += 1;
    }

    /// Finalizes a cell. Start and end markers keep their tags.
    fn mark_visited(&mut self, coord: Coord) {
        self.visited.insert(coord);
        if self.grid[coord] == Cell::Open {
            self.grid.set(coord, Cell::Visited);
        }
    }

    pub(crate) fn end(&self) -> Coord {
        self.end
    }

    pub(crate) fn is_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    /// In bounds, not a wall and not yet visited.
    pub(crate) fn can_enter(&self, coord: Coord) -> bool {
        self.grid.get(coord).is_some_and(Cell::is_passable) && !self.is_visited(coord)
    }

    pub(crate) fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        get_neighbors(coord, &*self.grid, 1).collect()
    }

    pub(crate) fn set_parent(&mut self, child: Coord, parent: Coord) {
        self.parents.insert(child, parent);
    }

    pub(crate) fn visit(&mut self, coord: Coord) {
        self.mark_visited(coord);
        self.emit(coord, EventKind::Visited);
    }

    pub(crate) fn discover(&mut self, coord: Coord) {
        self.emit(coord, EventKind::Frontier);
    }

    pub(crate) fn reach_end(&mut self) {
        let end = self.end;
        self.mark_visited(end);
        self.emit(end, EventKind::EndReached);
    }

    /// Reconstructs the start-to-end path and emits one `OnPath` event per marked cell.
    fn mark_path(&mut self) -> Vec<Coord> {
        let path = reconstruct(&mut *self.grid, &self.parents, self.end);
        let marked = path
            .iter()
            .copied()
            .filter(|&coord| self.grid[coord] == Cell::OnPath)
            .collect::<Vec<_>>();
        for coord in marked {
            self.emit(coord, EventKind::OnPath);
        }
        path
    }
}

enum Traversal {
    DepthFirst(DepthFirst),
    BestFirst(BestFirst),
}

impl Traversal {
    fn step(&mut self, tracker: &mut Tracker<'_>) -> Step {
        match self {
            Traversal::DepthFirst(dfs) => dfs.step(tracker),
            Traversal::BestFirst(best_first) => best_first.step(tracker),
        }
    }
}

/// A single run of one solver over a grid.
///
/// The run owns the grid for its lifetime. Events are produced lazily: each call to
/// [`Iterator::next`] performs at most one expansion step. Dropping the search early
/// leaves partially visited cells marked `Visited`; the next search resets them.
pub struct Search<'g> {
    solver: Solver,
    tracker: Tracker<'g>,
    traversal: Traversal,
    outcome: Option<SearchOutcome>,
}

impl<'g> Search<'g> {
    /// Validates the endpoints and grid markers, then clears marks left by earlier runs.
    /// Nothing is mutated when validation fails.
    pub fn new(
        grid: &'g mut Grid,
        solver: Solver,
        start: Coord,
        end: Coord,
    ) -> Result<Self, MazeError> {
        validate(grid, start, end)?;

        let reset = grid.reset_search_marks();
        tracing::debug!(
            "[search] {} from {:?} to {:?} on {}x{} grid, reset {} cells",
            solver,
            start,
            end,
            grid.height(),
            grid.width(),
            reset
        );

        let traversal = match solver {
            Solver::Dfs => Traversal::DepthFirst(DepthFirst::new(start)),
            Solver::Dijkstra => Traversal::BestFirst(BestFirst::dijkstra(start)),
            Solver::AStar => Traversal::BestFirst(BestFirst::a_star(start, end)),
        };

        Ok(Search {
            solver,
            tracker: Tracker::new(grid, start, end),
            traversal,
            outcome: None,
        })
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Read-only view of the grid in its current state.
    pub fn grid(&self) -> &Grid {
        &*self.tracker.grid
    }

    /// The final result, once the traversal has terminated.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Runs the search to completion, discarding events not yet pulled.
    pub fn finish(mut self) -> SearchOutcome {
        while self.outcome.is_none() {
            self.advance();
            self.tracker.pending.clear();
        }
        self.outcome.take().unwrap_or_default()
    }

    fn advance(&mut self) {
        if self.outcome.is_some() {
            return;
        }

        let step = if self.tracker.start == self.tracker.end {
            self.tracker.reach_end();
            Step::Reached { cost: 0 }
        } else {
            self.traversal.step(&mut self.tracker)
        };

        let outcome = match step {
            Step::Continue => return,
            Step::Reached { cost } => {
                let path = self.tracker.mark_path();
                debug_assert_eq!(path.len(), cost + 1);
                SearchOutcome {
                    reached: !path.is_empty(),
                    path,
                    cost,
                    visited_count: self.tracker.visited.len(),
                }
            }
            Step::Exhausted => SearchOutcome {
                reached: false,
                path: Vec::new(),
                cost: 0,
                visited_count: self.tracker.visited.len(),
            },
        };

        tracing::info!(
            "[search] {} finished: reached={} cost={} visited={} events={}",
            self.solver,
            outcome.reached,
            outcome.cost,
            outcome.visited_count,
            self.tracker.next_order
        );
        self.outcome = Some(outcome);
    }
}

impl Iterator for Search<'_> {
    type Item = VisitationEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.tracker.pending.pop_front() {
                return Some(event);
            }
            if self.outcome.is_some() {
                return None;
            }
            self.advance();
        }
    }
}

fn validate(grid: &Grid, start: Coord, end: Coord) -> Result<(), MazeError> {
    for (endpoint, coord) in [(Endpoint::Start, start), (Endpoint::End, end)] {
        match grid.get(coord) {
            None => {
                return Err(MazeError::OutOfBounds {
                    endpoint,
                    coord,
                    height: grid.height(),
                    width: grid.width(),
                });
            }
            Some(Cell::Wall) => return Err(MazeError::OnWall { endpoint, coord }),
            Some(_) => {}
        }
    }

    for cell in [Cell::Start, Cell::End] {
        let count = grid.count(cell);
        if count > 1 {
            return Err(MazeError::DuplicateMarker { cell, count });
        }
    }
    Ok(())
}

/// Runs a search to completion and returns its outcome together with every event.
pub fn solve_maze(
    grid: &mut Grid,
    solver: Solver,
    start: Coord,
    end: Coord,
) -> Result<(SearchOutcome, Vec<VisitationEvent>), MazeError> {
    let mut search = Search::new(grid, solver, start, end)?;
    let events = search.by_ref().collect::<Vec<_>>();
    let outcome = search.finish();
    Ok((outcome, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::generate_maze, maze::manhattan};
    use proptest::prelude::*;

    const SCENARIO: &str = "\
S . # . E
# . # . #
. . . . .
. # # . #
. . . . .
";

    const ENCLOSED: &str = "\
S . . . .
# # # . #
. . . . #
. # # # #
# # # # E
";

    const SCENARIO_PATH: [Coord; 9] = [
        (0, 0),
        (0, 1),
        (1, 1),
        (2, 1),
        (2, 2),
        (2, 3),
        (1, 3),
        (0, 3),
        (0, 4),
    ];

    fn scenario() -> Grid {
        SCENARIO.parse().unwrap()
    }

    /// Checks the invariants every event stream must satisfy against its outcome.
    fn check_events(events: &[VisitationEvent], outcome: &SearchOutcome) {
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.order_index, i);
        }
        let count = |kind| events.iter().filter(|e| e.kind == kind).count();
        assert_eq!(
            count(EventKind::Visited) + count(EventKind::EndReached),
            outcome.visited_count
        );

        if outcome.reached {
            assert_eq!(count(EventKind::EndReached), 1);
            let end_idx = events
                .iter()
                .position(|e| e.kind == EventKind::EndReached)
                .unwrap();
            let tail = &events[end_idx + 1..];
            assert!(tail.iter().all(|e| e.kind == EventKind::OnPath));
            let marked = tail.iter().map(|e| e.position).collect::<Vec<_>>();
            let inner = &outcome.path[1..outcome.path.len().saturating_sub(1).max(1)];
            assert_eq!(marked, inner);
        } else {
            assert_eq!(count(EventKind::EndReached), 0);
            assert_eq!(count(EventKind::OnPath), 0);
            assert!(outcome.path.is_empty());
        }
    }

    fn check_path(grid: &Grid, outcome: &SearchOutcome, start: Coord, end: Coord) {
        let path = &outcome.path;
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_eq!(path.len(), outcome.cost + 1);
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
        for &coord in path {
            assert!(grid[coord].is_passable());
        }
        let unique = path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "path revisits a cell");
    }

    #[test]
    fn test_scenario_shortest_path() {
        for solver in [Solver::Dijkstra, Solver::AStar] {
            let mut grid = scenario();
            let (outcome, events) = solve_maze(&mut grid, solver, (0, 0), (0, 4)).unwrap();
            assert!(outcome.reached);
            assert_eq!(outcome.cost, 8);
            assert_eq!(outcome.path, SCENARIO_PATH);
            check_events(&events, &outcome);
            check_path(&grid, &outcome, (0, 0), (0, 4));

            assert_eq!(grid[(0, 0)], Cell::Start);
            assert_eq!(grid[(0, 4)], Cell::End);
            assert_eq!(grid.count(Cell::OnPath), 7);
            for &coord in &SCENARIO_PATH[1..8] {
                assert_eq!(grid[coord], Cell::OnPath);
            }
        }
    }

    #[test]
    fn test_scenario_astar_visits_no_more() {
        let mut grid = scenario();
        let (dijkstra, _) = solve_maze(&mut grid, Solver::Dijkstra, (0, 0), (0, 4)).unwrap();
        let (astar, _) = solve_maze(&mut grid, Solver::AStar, (0, 0), (0, 4)).unwrap();
        assert_eq!(dijkstra.cost, astar.cost);
        assert!(astar.visited_count <= dijkstra.visited_count);
    }

    #[test]
    fn test_scenario_dfs_order() {
        let mut grid = scenario();
        let (outcome, events) = solve_maze(&mut grid, Solver::Dfs, (0, 0), (0, 4)).unwrap();
        assert!(outcome.reached);
        assert_eq!(outcome.path, SCENARIO_PATH);
        // Down-first expansion explores the bottom loop before turning up at (2, 3)
        assert_eq!(outcome.visited_count, 17);
        let visited = events
            .iter()
            .filter(|e| e.kind == EventKind::Visited)
            .map(|e| e.position)
            .collect::<Vec<_>>();
        assert_eq!(&visited[..7], &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2), (2, 3), (3, 3)]);
        assert!(!visited.contains(&(2, 4)));
        assert!(events.iter().all(|e| e.kind != EventKind::Frontier));
        check_events(&events, &outcome);
    }

    #[test]
    fn test_start_equals_end() {
        for solver in Solver::ALL {
            let mut grid = scenario();
            let (outcome, events) = solve_maze(&mut grid, solver, (2, 2), (2, 2)).unwrap();
            assert_eq!(
                outcome,
                SearchOutcome {
                    reached: true,
                    path: vec![(2, 2)],
                    cost: 0,
                    visited_count: 1,
                }
            );
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind, EventKind::EndReached);
        }
    }

    #[test]
    fn test_unreachable_end() {
        for solver in Solver::ALL {
            let mut grid: Grid = ENCLOSED.parse().unwrap();
            let (outcome, events) = solve_maze(&mut grid, solver, (0, 0), (4, 4)).unwrap();
            assert!(!outcome.reached, "{} reached an enclosed end", solver);
            assert!(outcome.path.is_empty());
            assert_eq!(outcome.visited_count, 11);
            assert_eq!(grid.count(Cell::OnPath), 0);
            assert_eq!(grid[(4, 4)], Cell::End);
            check_events(&events, &outcome);
        }
    }

    #[test]
    fn test_configuration_errors() {
        let mut grid: Grid = "S v # . E\n# . # . #\n. . . . .".parse().unwrap();
        let before = grid.clone();

        assert_eq!(
            Search::new(&mut grid, Solver::Dfs, (0, 0), (3, 0)).err(),
            Some(MazeError::OutOfBounds {
                endpoint: Endpoint::End,
                coord: (3, 0),
                height: 3,
                width: 5
            })
        );
        assert_eq!(
            Search::new(&mut grid, Solver::Dijkstra, (1, 0), (0, 4)).err(),
            Some(MazeError::OnWall {
                endpoint: Endpoint::Start,
                coord: (1, 0)
            })
        );
        // Nothing was reset by the failed calls
        assert_eq!(grid, before);

        let mut grid: Grid = "S . S\n. . .\n. . E".parse().unwrap();
        assert_eq!(
            Search::new(&mut grid, Solver::AStar, (0, 0), (2, 2)).err(),
            Some(MazeError::DuplicateMarker {
                cell: Cell::Start,
                count: 2
            })
        );
    }

    #[test]
    fn test_events_are_lazy() {
        let mut grid = scenario();
        let mut search = Search::new(&mut grid, Solver::Dijkstra, (0, 0), (0, 4)).unwrap();
        let first = search.next().unwrap();
        assert_eq!(
            first,
            VisitationEvent {
                position: (0, 0),
                order_index: 0,
                kind: EventKind::Visited
            }
        );
        let second = search.next().unwrap();
        assert_eq!(second.kind, EventKind::Frontier);
        assert_eq!(second.position, (0, 1));
        assert!(search.outcome().is_none());
        assert_eq!(search.grid().count(Cell::Visited), 0);

        let outcome = search.finish();
        assert_eq!(outcome.cost, 8);
    }

    #[test]
    fn test_early_abandonment_then_rerun() {
        let mut grid = generate_maze(15, 15, Some(21)).unwrap();
        let start = (1, 1);
        let end = (13, 13);

        let mut fresh = grid.clone();
        let expected = solve_maze(&mut fresh, Solver::AStar, start, end).unwrap();

        {
            let search = Search::new(&mut grid, Solver::AStar, start, end).unwrap();
            assert_eq!(search.take(6).count(), 6);
        }
        assert!(grid.count(Cell::Visited) > 0);
        assert_eq!(grid.count(Cell::OnPath), 0);

        let rerun = solve_maze(&mut grid, Solver::AStar, start, end).unwrap();
        assert_eq!(rerun, expected);
        assert_eq!(grid, fresh);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut grid = generate_maze(21, 17, Some(8)).unwrap();
        for solver in Solver::ALL {
            let first = solve_maze(&mut grid, solver, (1, 1), (19, 15)).unwrap();
            let second = solve_maze(&mut grid, solver, (1, 1), (19, 15)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_untagged_endpoints() {
        // Endpoints need not carry the Start/End tags
        let mut grid: Grid = "S . . . E\n. # # # .\n. . . . .".parse().unwrap();
        let (outcome, _) = solve_maze(&mut grid, Solver::Dijkstra, (2, 0), (2, 4)).unwrap();
        assert_eq!(outcome.cost, 4);
        assert_eq!(grid[(2, 0)], Cell::Visited);
        assert_eq!(grid[(2, 4)], Cell::Visited);
        assert_eq!(grid.count(Cell::OnPath), 3);
    }

    fn odd_dim() -> impl Strategy<Value = u16> {
        (2u16..=20).prop_map(|n| 2 * n + 1)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_generated_maze_is_connected(height in odd_dim(), width in odd_dim(), seed in any::<u64>()) {
            let mut grid = generate_maze(height, width, Some(seed)).unwrap();
            let end = (height - 2, width - 2);
            let (outcome, _) = solve_maze(&mut grid, Solver::Dijkstra, (1, 1), end).unwrap();
            prop_assert!(outcome.reached);
        }

        #[test]
        fn prop_generation_is_deterministic(height in 4u16..40, width in 4u16..40, seed in any::<u64>()) {
            let a = generate_maze(height, width, Some(seed)).unwrap();
            let b = generate_maze(height, width, Some(seed)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_solvers_agree(height in odd_dim(), width in odd_dim(), seed in any::<u64>()) {
            let mut grid = generate_maze(height, width, Some(seed)).unwrap();
            let start = (1, 1);
            let end = (height - 2, width - 2);

            let (dijkstra, dijkstra_events) = solve_maze(&mut grid, Solver::Dijkstra, start, end).unwrap();
            check_events(&dijkstra_events, &dijkstra);
            check_path(&grid, &dijkstra, start, end);

            let (astar, astar_events) = solve_maze(&mut grid, Solver::AStar, start, end).unwrap();
            check_events(&astar_events, &astar);
            check_path(&grid, &astar, start, end);

            let (dfs, dfs_events) = solve_maze(&mut grid, Solver::Dfs, start, end).unwrap();
            check_events(&dfs_events, &dfs);
            check_path(&grid, &dfs, start, end);

            prop_assert_eq!(dijkstra.cost, astar.cost);
            prop_assert!(astar.visited_count <= dijkstra.visited_count);
            prop_assert!(dfs.cost >= dijkstra.cost);
        }

        #[test]
        fn prop_even_dimensions_reach_end(height in 4u16..30, width in 4u16..30, seed in any::<u64>()) {
            let mut grid = generate_maze(height, width, Some(seed)).unwrap();
            let end = (height - 2, width - 2);
            let (outcome, _) = solve_maze(&mut grid, Solver::AStar, (1, 1), end).unwrap();
            prop_assert!(outcome.reached);
        }
    }
}
