//! Entrance placement at the bottom edge of the first in-bounds block column.

use tracing::warn;

use crate::types::{Cell, Pos};

use super::grid::{BLOCK_SIZE, Grid};
use super::seed::RandomSource;

/// Marks the first in-bounds scan position as the entrance.
///
/// Rows advance by whole blocks; inside a row the scan visits the middle of each block's
/// bottom edge. The random source is accepted for phase-signature symmetry and never drawn.
pub(super) fn place_entrance(grid: &mut Grid, _random: &mut RandomSource) -> Option<Pos> {
    for y in (0..grid.height()).step_by(BLOCK_SIZE as usize) {
        for x in ((BLOCK_SIZE / 2)..grid.width()).step_by(BLOCK_SIZE as usize) {
            let pos = Pos::new(x, y);
            if grid.is_within_bounds(pos) {
                grid.set(pos, Cell::Entrance);
                return Some(pos);
            }
        }
    }

    warn!(width = grid.width(), height = grid.height(), "couldn't place an entrance anywhere");
    None
}
