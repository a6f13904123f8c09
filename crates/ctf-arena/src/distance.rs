//! All-pairs maze distances.
//!
//! Every move costs one step, so a breadth-first search from each open cell
//! yields exact shortest paths.  The table is built once per layout and
//! shared by every projected state through an `Arc`.

use std::collections::VecDeque;

use ctf_core::{Cell, Direction};
use tracing::debug;

use crate::Layout;

/// Marker for pairs with no connecting path.
const UNREACHABLE: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct DistanceTable {
    /// Row-major `cells × cells` matrix, indexed by [`Layout::index`].
    steps: Vec<u32>,
    cells: usize,
}

impl DistanceTable {
    pub fn build(layout: &Layout) -> Self {
        let cells = (layout.width() * layout.height()) as usize;
        let mut steps = vec![UNREACHABLE; cells * cells];
        let mut queue = VecDeque::new();

        for source in layout.open_cells() {
            let Some(src) = layout.index(source) else { continue };
            let row = &mut steps[src * cells..(src + 1) * cells];
            row[src] = 0;
            queue.clear();
            queue.push_back(source);

            while let Some(at) = queue.pop_front() {
                let Some(here) = layout.index(at) else { continue };
                let next_steps = row[here] + 1;
                for dir in [Direction::North, Direction::South, Direction::East, Direction::West] {
                    let to = at.step(dir);
                    if layout.is_wall(to) {
                        continue;
                    }
                    let Some(slot) = layout.index(to) else { continue };
                    if row[slot] == UNREACHABLE {
                        row[slot] = next_steps;
                        queue.push_back(to);
                    }
                }
            }
        }

        debug!(cells, "distance table built");
        Self { steps, cells }
    }

    /// Maze distance, or `None` when either cell is off the board or no
    /// path connects them.
    pub fn get(&self, layout: &Layout, a: Cell, b: Cell) -> Option<u32> {
        let (i, j) = (layout.index(a)?, layout.index(b)?);
        match self.steps[i * self.cells + j] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }
}
