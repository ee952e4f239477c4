//! Booth islands: corner fillers first, then organic islands sprinkled from the centre out.

use crate::types::{Cell, Direction, Pos};

use super::budget::{PhaseStatus, StepBudget};
use super::grid::{BLOCK_SIZE, Grid};
use super::seed::RandomSource;

pub(super) const CORNER_ISLAND_SIZE: usize = 2;
pub(super) const MIN_ISLAND_SIZE: i32 = 3;
pub(super) const MAX_ISLAND_SIZE: i32 = 4;

/// Resumable position inside the island phase.
#[derive(Clone, Debug, Default)]
pub(super) struct IslandCursor {
    blocks: Option<Vec<Pos>>,
    next_block: usize,
    next_cell: usize,
    pub(super) islands: usize,
}

pub(super) fn advance_islands(
    grid: &mut Grid,
    random: &mut RandomSource,
    cursor: &mut IslandCursor,
    budget: &mut StepBudget,
) -> PhaseStatus {
    let blocks = cursor.blocks.get_or_insert_with(|| grid.block_origins()).clone();
    while cursor.next_block < blocks.len() {
        let origin = blocks[cursor.next_block];
        cursor.next_block += 1;
        cursor.islands += place_corner_islands(grid, origin, random);
        if budget.spend() {
            return PhaseStatus::Yielded;
        }
    }

    let width = grid.width();
    let height = grid.height();
    let total = (width * height) as usize;
    while cursor.next_cell < total {
        let raw = cursor.next_cell as i32;
        cursor.next_cell += 1;

        // Start from the centre so the boundary ends up the most fragmented.
        let x = (raw / height + width / 2) % width;
        let y = (raw % height + height / 2) % height;
        let pos = Pos::new(x, y);
        if can_place_booth(grid, pos, &[]) {
            let size = random.range(MIN_ISLAND_SIZE, MAX_ISLAND_SIZE + 1) as usize;
            place_booth_island(grid, pos, size, random);
            cursor.islands += 1;
        }
        if budget.spend() {
            return PhaseStatus::Yielded;
        }
    }

    PhaseStatus::Complete
}

/// Seeds a two-cell island in each block corner that sits against the boundary on both sides.
fn place_corner_islands(grid: &mut Grid, origin: Pos, random: &mut RandomSource) -> usize {
    let far = BLOCK_SIZE - 1;
    let west = !grid.is_within_bounds(origin.offset(-1, 0));
    let east = !grid.is_within_bounds(origin.offset(BLOCK_SIZE, 0));
    let south = !grid.is_within_bounds(origin.offset(0, -1));
    let north = !grid.is_within_bounds(origin.offset(0, BLOCK_SIZE));

    let corners = [
        (west && south, origin),
        (west && north, origin.offset(0, far)),
        (east && south, origin.offset(far, 0)),
        (east && north, origin.offset(far, far)),
    ];

    let mut placed = 0;
    for (concave, corner) in corners {
        if concave && grid.is_cell(corner, Cell::Empty) {
            place_booth_island(grid, corner, CORNER_ISLAND_SIZE, random);
            placed += 1;
        }
    }
    placed
}

/// True when `pos` is empty and every neighbour is empty, out of bounds, or in `ignored`.
pub(super) fn can_place_booth(grid: &Grid, pos: Pos, ignored: &[Pos]) -> bool {
    if !grid.is_cell(pos, Cell::Empty) {
        return false;
    }

    for dx in -1..=1 {
        for dy in -1..=1 {
            let neighbour = pos.offset(dx, dy);
            if grid.is_empty_or_out_of_bounds(neighbour) || ignored.contains(&neighbour) {
                continue;
            }
            return false;
        }
    }
    true
}

/// Grows a winding island from `start`, always extending from the most recent cell.
/// Returns the number of cells placed, which may fall short of `size`.
pub(super) fn place_booth_island(
    grid: &mut Grid,
    start: Pos,
    size: usize,
    random: &mut RandomSource,
) -> usize {
    let mut ignored = Vec::with_capacity(size);
    let mut current = start;
    grid.set(current, Cell::BoothEmpty);
    let mut placed = 1;

    while placed < size {
        ignored.push(current);
        let offset = random.below(Direction::ALL.len());
        let next = (0..Direction::ALL.len())
            .map(|step| current.step(Direction::ALL[(offset + step) % Direction::ALL.len()]))
            .find(|&candidate| can_place_booth(grid, candidate, &ignored));

        let Some(next) = next else {
            break;
        };
        current = next;
        grid.set(current, Cell::BoothEmpty);
        placed += 1;
    }
    placed
}
