//! Flattened minimap icons re-derived from the finished grid and populated entities.

use slotmap::SlotMap;

use crate::types::{BoothId, DispenserId, Pos};

use super::budget::{PhaseStatus, StepBudget};
use super::grid::Grid;
use super::model::{Booth, BoothKind, Dispenser, MinimapIcon, MinimapIconKind};

#[derive(Clone, Copy, Debug)]
enum IconSource {
    Block(Pos),
    Booth(BoothId),
    Dispenser(DispenserId),
}

#[derive(Clone, Debug, Default)]
pub(super) struct MinimapCursor {
    plan: Option<Vec<IconSource>>,
    next: usize,
}

pub(super) struct MinimapInputs<'a> {
    pub(super) grid: &'a Grid,
    pub(super) booths: &'a SlotMap<BoothId, Booth>,
    pub(super) dispensers: &'a SlotMap<DispenserId, Dispenser>,
}

pub(super) fn advance_minimap(
    inputs: &MinimapInputs<'_>,
    cursor: &mut MinimapCursor,
    icons: &mut Vec<MinimapIcon>,
    budget: &mut StepBudget,
) -> PhaseStatus {
    let plan = cursor.plan.get_or_insert_with(|| plan_icons(inputs));
    while let Some(&source) = plan.get(cursor.next) {
        cursor.next += 1;
        if let Some(icon) = project(inputs, source) {
            icons.push(icon);
        }
        if budget.spend() {
            return PhaseStatus::Yielded;
        }
    }
    PhaseStatus::Complete
}

/// Blocks first, then booths and dispensers in the order they were populated.
fn plan_icons(inputs: &MinimapInputs<'_>) -> Vec<IconSource> {
    let blocks = inputs.grid.block_origins().into_iter().map(IconSource::Block);
    let booths = inputs.booths.keys().map(IconSource::Booth);
    let dispensers = inputs.dispensers.keys().map(IconSource::Dispenser);
    blocks.chain(booths).chain(dispensers).collect()
}

fn project(inputs: &MinimapInputs<'_>, source: IconSource) -> Option<MinimapIcon> {
    match source {
        IconSource::Block(origin) => Some(MinimapIcon::at(origin, MinimapIconKind::Block)),
        IconSource::Booth(id) => {
            let booth = inputs.booths.get(id)?;
            let sprite = booth.look.minimap_sprite();
            let kind = match booth.kind {
                BoothKind::Utility => MinimapIconKind::UtilityBooth { sprite },
                BoothKind::Prize => MinimapIconKind::PrizeBooth {
                    sprite,
                    booth: id,
                    item: booth.item.as_ref().map(|item| item.id.clone()),
                },
                BoothKind::Plain => MinimapIconKind::Booth { sprite },
            };
            Some(MinimapIcon::at(booth.pos, kind))
        }
        IconSource::Dispenser(id) => {
            let dispenser = inputs.dispensers.get(id)?;
            Some(MinimapIcon::at(dispenser.pos, MinimapIconKind::Dispenser))
        }
    }
}
