//! Promotes plain booth cells to prize and utility booths around random block anchors.

use crate::settings::GenerationSettings;
use crate::types::{Cell, Pos};

use super::grid::{BLOCK_SIZE, Grid};
use super::model::ActivationSummary;
use super::seed::RandomSource;

/// Ceiling on either requested booth count; settings above it are clamped before the draw.
pub(super) const MAX_REQUESTED_BOOTHS: u32 = 1024;

pub(super) fn activate_booths(
    grid: &mut Grid,
    settings: &GenerationSettings,
    random: &mut RandomSource,
) -> ActivationSummary {
    let clamp = |count: u32| count.min(MAX_REQUESTED_BOOTHS);
    let prize_requested = random.inclusive(clamp(settings.min_prize), clamp(settings.max_prize));
    let utility_requested =
        random.inclusive(clamp(settings.min_utility), clamp(settings.max_utility));

    let mut summary =
        ActivationSummary { prize_requested, utility_requested, ..ActivationSummary::default() };
    let origins = grid.block_origins();
    if origins.is_empty() {
        return summary;
    }

    let mut corners = Vec::new();
    let assignments =
        [(Cell::BoothPrize, prize_requested), (Cell::BoothUtility, utility_requested)];
    for (kind, requested) in assignments {
        for _ in 0..requested {
            if corners.is_empty() {
                corners = origins.clone();
            }
            let Some(corner) = random.pick_and_remove(&mut corners) else {
                continue;
            };
            let start = corner.offset(
                random.below(BLOCK_SIZE as usize) as i32,
                random.below(BLOCK_SIZE as usize) as i32,
            );
            let Some(target) = nearest_plain_booth(grid, start) else {
                continue;
            };

            grid.set(target, kind);
            match kind {
                Cell::BoothPrize => summary.prize_placed += 1,
                _ => summary.utility_placed += 1,
            }
        }
    }
    summary
}

/// The start cell itself, else the first plain booth on growing diamonds around it.
fn nearest_plain_booth(grid: &Grid, start: Pos) -> Option<Pos> {
    if grid.is_cell(start, Cell::BoothEmpty) {
        return Some(start);
    }

    for distance in 1..BLOCK_SIZE {
        for x_offset in 0..=distance {
            let y_offset = distance - x_offset;
            let mut candidates = vec![start.offset(x_offset, y_offset)];
            if x_offset != 0 {
                candidates.push(start.offset(-x_offset, y_offset));
            }
            if y_offset != 0 {
                candidates.push(start.offset(x_offset, -y_offset));
            }
            if x_offset != 0 && y_offset != 0 {
                candidates.push(start.offset(-x_offset, -y_offset));
            }
            let found = candidates.into_iter().find(|&pos| grid.is_cell(pos, Cell::BoothEmpty));
            if found.is_some() {
                return found;
            }
        }
    }
    None
}
