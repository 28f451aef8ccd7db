use super::{Step, Tracker};
use crate::maze::{Coord, Direction};

/// One level of the explicit DFS stack: a cell and the next direction to try from it.
struct Frame {
    coord: Coord,
    next_direction: usize,
}

impl Frame {
    fn new(coord: Coord) -> Self {
        Frame {
            coord,
            next_direction: 0,
        }
    }
}

/// Depth-first traversal with an explicit stack.
///
/// Visits cells in the same order as the recursive formulation that enters a cell,
/// marks it, then recurses down, up, right and left. The stack always holds the
/// current simple path from the start.
pub(crate) struct DepthFirst {
    root: Option<Coord>,
    stack: Vec<Frame>,
}

impl DepthFirst {
    pub(crate) fn new(start: Coord) -> Self {
        DepthFirst {
            root: Some(start),
            stack: Vec::new(),
        }
    }

    pub(crate) fn step(&mut self, tracker: &mut Tracker<'_>) -> Step {
        if let Some(root) = self.root.take() {
            tracker.visit(root);
            self.stack.push(Frame::new(root));
            return Step::Continue;
        }

        let Some(frame) = self.stack.last_mut() else {
            return Step::Exhausted;
        };
        let current = frame.coord;

        let mut next = None;
        while let Some(&direction) = Direction::ALL.get(frame.next_direction) {
            frame.next_direction += 1;
            if let Some(neighbor) = direction
                .step(current, 1)
                .filter(|&c| tracker.can_enter(c))
            {
                next = Some(neighbor);
                break;
            }
        }

        let Some(neighbor) = next else {
            // All directions tried, backtrack
            self.stack.pop();
            return Step::Continue;
        };

        tracker.set_parent(neighbor, current);
        if neighbor == tracker.end() {
            tracker.reach_end();
            return Step::Reached {
                cost: self.stack.len(),
            };
        }
        tracker.visit(neighbor);
        self.stack.push(Frame::new(neighbor));
        Step::Continue
    }
}
