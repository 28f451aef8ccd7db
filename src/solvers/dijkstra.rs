use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
};

use super::{Step, Tracker};
use crate::maze::{Coord, manhattan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackedCell {
    /// Coordinates of the cell in the grid
    coord: Coord,
    /// Cost to reach this cell from the start
    traveling_cost: usize,
    /// Estimated cost to reach the goal from this cell (zero for Dijkstra)
    heuristic_cost: usize,
    /// Position in push order, used to break remaining ties first-in first-out
    insertion: usize,
}

impl TrackedCell {
    fn estimated_cost(&self) -> usize {
        self.traveling_cost + self.heuristic_cost
    }
}

/// Smaller pops first: lower estimated cost, then higher traveling cost, then earlier insertion.
impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimated_cost()
            .cmp(&other.estimated_cost())
            .then_with(|| other.traveling_cost.cmp(&self.traveling_cost))
            .then_with(|| self.insertion.cmp(&other.insertion))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority-queue traversal shared by Dijkstra and A*.
///
/// With no goal the heuristic is zero and this is uniform-cost Dijkstra. With a goal the
/// key becomes `g + h` where `h` is the Manhattan distance, which never overestimates on a
/// 4-connected unit-cost grid, so both variants return shortest paths.
pub(crate) struct BestFirst {
    // Using Reverse to turn the max-heap into a min-heap
    queue: BinaryHeap<Reverse<TrackedCell>>,
    /// Best known cost to reach each discovered cell; absent means unreached
    costs: HashMap<Coord, usize>,
    goal: Option<Coord>,
    insertions: usize,
}

impl BestFirst {
    pub(crate) fn dijkstra(start: Coord) -> Self {
        BestFirst::new(start, None)
    }

    pub(crate) fn a_star(start: Coord, end: Coord) -> Self {
        BestFirst::new(start, Some(end))
    }

    fn new(start: Coord, goal: Option<Coord>) -> Self {
        let mut best_first = BestFirst {
            queue: BinaryHeap::new(),
            costs: HashMap::new(),
            goal,
            insertions: 0,
        };
        best_first.costs.insert(start, 0);
        best_first.push(start, 0);
        best_first
    }

    fn heuristic(&self, coord: Coord) -> usize {
        self.goal.map_or(0, |goal| manhattan(coord, goal))
    }

    fn push(&mut self, coord: Coord, traveling_cost: usize) {
        let cell = TrackedCell {
            coord,
            traveling_cost,
            heuristic_cost: self.heuristic(coord),
            insertion: self.insertions,
        };
        self.insertions += 1;
        self.queue.push(Reverse(cell));
    }

    pub(crate) fn step(&mut self, tracker: &mut Tracker<'_>) -> Step {
        while let Some(Reverse(current)) = self.queue.pop() {
            // Stale entry for a cell that was already finalized
            if tracker.is_visited(current.coord) {
                continue;
            }

            if current.coord == tracker.end() {
                tracker.reach_end();
                return Step::Reached {
                    cost: current.traveling_cost,
                };
            }

            tracker.visit(current.coord);

            let new_cost = current.traveling_cost + 1; // Uniform cost for each step
            for neighbor in tracker.neighbors(current.coord) {
                if !tracker.can_enter(neighbor) {
                    continue;
                }
                let is_cheaper = self
                    .costs
                    .get(&neighbor)
                    .is_none_or(|&existing_cost| new_cost < existing_cost);
                if is_cheaper {
                    self.costs.insert(neighbor, new_cost);
                    tracker.set_parent(neighbor, current.coord);
                    self.push(neighbor, new_cost);
                    tracker.discover(neighbor);
                }
            }
            return Step::Continue;
        }
        Step::Exhausted
    }
}
