//! One cash dispenser per block, against a real outer wall and never in a corner.

use crate::types::{Cell, Pos};

use super::grid::{BLOCK_SIZE, Grid};
use super::seed::RandomSource;

/// Non-corner cells along one block edge.
const EDGE_OPTIONS: i32 = BLOCK_SIZE - 2;
const POSITION_OPTIONS: i32 = EDGE_OPTIONS * 4;

pub(super) fn place_dispensers(grid: &mut Grid, random: &mut RandomSource) -> usize {
    let mut placed = 0;
    for origin in grid.block_origins() {
        let start = random.range(0, POSITION_OPTIONS);
        for step in 0..POSITION_OPTIONS {
            let (pos, outside) = edge_candidate(origin, (step + start) % POSITION_OPTIONS);
            if grid.cell_at(pos) != Cell::Empty || grid.is_within_bounds(outside) {
                continue;
            }
            grid.set(pos, Cell::Dispenser);
            placed += 1;
            break;
        }
    }
    placed
}

/// Candidate cell for `index`, walking north, south, east, then west edges, plus the cell
/// just outside the block behind it.
fn edge_candidate(origin: Pos, index: i32) -> (Pos, Pos) {
    let side = index / EDGE_OPTIONS;
    let along = 1 + index % EDGE_OPTIONS;
    match side {
        0 => {
            let pos = origin.offset(along, BLOCK_SIZE - 1);
            (pos, pos.offset(0, 1))
        }
        1 => {
            let pos = origin.offset(along, 0);
            (pos, pos.offset(0, -1))
        }
        2 => {
            let pos = origin.offset(BLOCK_SIZE - 1, along);
            (pos, pos.offset(1, 0))
        }
        _ => {
            let pos = origin.offset(0, along);
            (pos, pos.offset(-1, 0))
        }
    }
}
