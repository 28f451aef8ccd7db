use std::collections::HashMap;

use crate::maze::{Cell, Coord, Grid};

/// Links from each reached cell back to the cell it was reached from.
/// The root (the search start) has no entry.
#[derive(Debug, Clone)]
pub(crate) struct ParentMap {
    root: Coord,
    parents: HashMap<Coord, Coord>,
}

impl ParentMap {
    pub(crate) fn new(root: Coord) -> Self {
        ParentMap {
            root,
            parents: HashMap::new(),
        }
    }

    /// Records `parent` as the cell `child` was reached from, replacing any earlier link.
    pub(crate) fn insert(&mut self, child: Coord, parent: Coord) {
        self.parents.insert(child, parent);
    }

    pub(crate) fn get(&self, child: Coord) -> Option<Coord> {
        self.parents.get(&child).copied()
    }
}

/// Walks `end -> parent(end) -> ... -> root` and returns the path from root to `end`.
///
/// Every cell strictly between the two ends that is not a start/end marker becomes
/// `OnPath`. Returns an empty path, without touching the grid, when `end` was never reached.
pub(crate) fn reconstruct(grid: &mut Grid, parents: &ParentMap, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut current = end;
    while current != parents.root {
        match parents.get(current) {
            Some(parent) => {
                // A walk longer than the grid can only come from a cycle
                if path.len() > grid.len() {
                    return Vec::new();
                }
                path.push(parent);
                current = parent;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();

    if let Some((_, inner)) = path.split_first() {
        if let Some((_, inner)) = inner.split_last() {
            for &coord in inner {
                if !grid[coord].is_marker() {
                    grid.set(coord, Cell::OnPath);
                }
            }
        }
    }
    path
}
