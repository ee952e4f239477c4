//! Wall segments along every block side that faces the boundary.

use crate::content::ContentPack;
use crate::types::{Pos, Rotation};

use super::budget::{PhaseStatus, StepBudget};
use super::grid::{BLOCK_SIZE, Grid};
use super::model::{WallSegment, WallSide};

#[derive(Clone, Debug, Default)]
pub(super) struct PerimeterCursor {
    blocks: Option<Vec<Pos>>,
    next_block: usize,
}

pub(super) fn advance_perimeter(
    grid: &Grid,
    content: &ContentPack,
    cursor: &mut PerimeterCursor,
    walls: &mut Vec<WallSegment>,
    budget: &mut StepBudget,
) -> PhaseStatus {
    let blocks = cursor.blocks.get_or_insert_with(|| grid.block_origins());
    while let Some(&origin) = blocks.get(cursor.next_block) {
        cursor.next_block += 1;
        walls.extend(block_walls(grid, content, origin));
        if budget.spend() {
            return PhaseStatus::Yielded;
        }
    }
    PhaseStatus::Complete
}

/// Segments for one block in west, east, south, north order.
pub(super) fn block_walls(grid: &Grid, content: &ContentPack, origin: Pos) -> Vec<WallSegment> {
    let far = BLOCK_SIZE - 1;
    let within = |dx: i32, dy: i32| grid.is_within_bounds(origin.offset(dx, dy));
    let flags = |first: bool, second: bool| u8::from(first) | (u8::from(second) << 1);

    let sides = [
        (
            WallSide::West,
            !within(-1, 0),
            flags(within(0, -BLOCK_SIZE), within(0, BLOCK_SIZE)),
            origin,
            0,
        ),
        (
            WallSide::East,
            !within(BLOCK_SIZE, 0),
            flags(within(0, BLOCK_SIZE), within(0, -BLOCK_SIZE)),
            origin.offset(far, far),
            180,
        ),
        (
            WallSide::South,
            !within(0, -1),
            flags(within(BLOCK_SIZE, 0), within(-BLOCK_SIZE, 0)),
            origin.offset(far, 0),
            270,
        ),
        (
            WallSide::North,
            !within(0, BLOCK_SIZE),
            flags(within(-BLOCK_SIZE, 0), within(BLOCK_SIZE, 0)),
            origin.offset(0, far),
            90,
        ),
    ];

    sides
        .into_iter()
        .filter(|&(_, exposed, _, _, _)| exposed)
        .map(|(side, _, variant, anchor, degrees)| WallSegment {
            block: origin,
            side,
            anchor,
            rotation: Rotation::from_degrees(degrees),
            variant,
            visual: content.wall_visuals[usize::from(variant)],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::budget::BudgetLimit;
    use crate::types::Cell;

    fn sides(walls: &[WallSegment]) -> Vec<(WallSide, u8)> {
        walls.iter().map(|wall| (wall.side, wall.variant)).collect()
    }

    #[test]
    fn lone_block_is_walled_on_all_sides_with_straight_pieces() {
        let grid = Grid::new(8, 8);
        let walls = block_walls(&grid, &ContentPack::default(), Pos::new(0, 0));
        let expected = [WallSide::West, WallSide::East, WallSide::South, WallSide::North];
        assert_eq!(sides(&walls), expected.map(|side| (side, 0)).to_vec());
        assert_eq!(walls[1].anchor, Pos::new(7, 7));
        assert_eq!(walls[2].rotation.degrees(), 270);
        assert_eq!(walls[3].anchor, Pos::new(0, 7));
    }

    #[test]
    fn variants_flag_flanking_blocks() {
        // Two blocks stacked vertically: the lower block's west wall has an in-bounds block above.
        let grid = Grid::new(8, 16);
        let content = ContentPack::default();
        let lower = block_walls(&grid, &content, Pos::new(0, 0));
        let expected = vec![(WallSide::West, 2), (WallSide::East, 1), (WallSide::South, 0)];
        assert_eq!(sides(&lower), expected);
        assert_eq!(lower[0].visual, content.wall_visuals[2]);

        let upper = block_walls(&grid, &content, Pos::new(0, 8));
        let expected = vec![(WallSide::West, 1), (WallSide::East, 2), (WallSide::North, 0)];
        assert_eq!(sides(&upper), expected);
    }

    #[test]
    fn carved_neighbour_exposes_an_interior_side() {
        let mut grid = Grid::new(16, 8);
        grid.fill_block(Pos::new(8, 0), Cell::OutOfBounds);
        let walls = block_walls(&grid, &ContentPack::default(), Pos::new(0, 0));
        assert!(walls.iter().any(|wall| wall.side == WallSide::East));
    }

    #[test]
    fn every_in_bounds_block_is_visited_across_yields() {
        let grid = Grid::new(16, 24);
        let content = ContentPack::default();
        let mut cursor = PerimeterCursor::default();
        let mut walls = Vec::new();
        while advance_perimeter(
            &grid,
            &content,
            &mut cursor,
            &mut walls,
            &mut StepBudget::open(BudgetLimit::Steps(1)),
        ) == PhaseStatus::Yielded
        {}

        // 2x3 blocks: 3 west, 3 east, 2 south and 2 north sides face the boundary.
        assert_eq!(walls.len(), 10);
    }
}
