//! Outer silhouette: a block grid with one or two whole blocks knocked out.

use crate::settings::GenerationSettings;
use crate::types::{Cell, Pos};

use super::grid::{BLOCK_SIZE, Grid};
use super::seed::RandomSource;

/// Keeps `blocks * BLOCK_SIZE` squared well inside addressable memory for hostile settings.
pub(super) const MAX_BLOCKS_PER_AXIS: u32 = 256;

/// Row index that, when hit by the first carved block, makes the second one share its column.
const MIDDLE_ROW: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct CarvedShape {
    pub(super) grid: Grid,
    /// Block coordinates of the removed blocks, already in the final orientation.
    pub(super) removed: [Pos; 2],
    pub(super) transposed: bool,
}

pub(super) fn carve_shape(random: &mut RandomSource, settings: &GenerationSettings) -> CarvedShape {
    let blocks_x = settings.blocks_x.min(MAX_BLOCKS_PER_AXIS) as i32;
    let blocks_y = settings.blocks_y.min(MAX_BLOCKS_PER_AXIS) as i32;

    let first_x = random.range(0, blocks_x);
    let first_y = random.range(0, blocks_y);
    let (second_x, second_y) = if first_y == MIDDLE_ROW {
        // Any row in the same column; hitting the middle again leaves a C shape.
        (first_x, random.range(0, blocks_y))
    } else if random.coin_over_fifty() {
        (clamp_block(first_x + random.range(-1, 2), blocks_x), first_y)
    } else {
        (first_x, clamp_block(first_y + random.range(-1, 2), blocks_y))
    };

    let transposed = !random.coin_over_fifty();
    let (mut grid, removed) = if transposed {
        (
            Grid::new(blocks_y * BLOCK_SIZE, blocks_x * BLOCK_SIZE),
            [Pos::new(first_y, first_x), Pos::new(second_y, second_x)],
        )
    } else {
        (
            Grid::new(blocks_x * BLOCK_SIZE, blocks_y * BLOCK_SIZE),
            [Pos::new(first_x, first_y), Pos::new(second_x, second_y)],
        )
    };

    for block in removed {
        grid.fill_block(Pos::new(block.x * BLOCK_SIZE, block.y * BLOCK_SIZE), Cell::OutOfBounds);
    }

    CarvedShape { grid, removed, transposed }
}

fn clamp_block(value: i32, blocks: i32) -> i32 {
    value.min(blocks - 1).max(0)
}
