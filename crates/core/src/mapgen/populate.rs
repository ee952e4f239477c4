//! Full-grid scan that turns cell kinds into entities, spawn requests and lookup tables.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::content::{BoothLookOptions, ContentPack, ItemDef, ItemTier};
use crate::types::{BoothId, Cell, Direction, DispenserId, Pos, Rotation, VisualId, WorldPos};

use super::budget::{PhaseStatus, StepBudget};
use super::grid::Grid;
use super::model::{Booth, BoothKind, BoothLook, Dispenser, SpawnKind, SpawnRequest};
use super::seed::RandomSource;

const CROWD_OPTIONS: usize = 4;
const FLOOR_DECAL_OPTIONS: usize = 2;
/// Merchant sprite reserved for the signature merchant.
const SIGNATURE_MERCHANT: u32 = 0;

/// Cross-phase flags that used to be process-wide. One session spans a generation run, or
/// several runs when the host wants the signature booth to stay unique across them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationSession {
    pub signature_merchant_appeared: bool,
    pub signature_booth_claimed: bool,
}

impl GenerationSession {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything the scan produced, moved into the finished level afterwards.
#[derive(Debug, Default)]
pub(super) struct Population {
    pub(super) booths: SlotMap<BoothId, Booth>,
    pub(super) dispensers: SlotMap<DispenserId, Dispenser>,
    pub(super) interactive_booths: BTreeMap<Pos, BoothId>,
    pub(super) dispenser_at: BTreeMap<Pos, DispenserId>,
    pub(super) spawns: Vec<SpawnRequest>,
    /// Last prize booth populated.
    pub(super) bounty: Option<BoothId>,
}

#[derive(Debug, Default)]
pub(super) struct PopulateCursor {
    prize_pool: Option<Vec<ItemDef>>,
    next_cell: usize,
}

pub(super) struct PopulateContext<'a> {
    pub(super) grid: &'a Grid,
    pub(super) content: &'a ContentPack,
    pub(super) prize_slots: usize,
    pub(super) random: &'a mut RandomSource,
    pub(super) session: &'a mut GenerationSession,
}

pub(super) fn advance_populate(
    ctx: &mut PopulateContext<'_>,
    cursor: &mut PopulateCursor,
    population: &mut Population,
    budget: &mut StepBudget,
) -> PhaseStatus {
    if cursor.prize_pool.is_none() {
        cursor.prize_pool = Some(build_prize_pool(ctx.content, ctx.prize_slots, ctx.random));
        ctx.session.signature_merchant_appeared = false;
    }

    let height = ctx.grid.height();
    let total = (ctx.grid.width() * height) as usize;
    while cursor.next_cell < total {
        let index = cursor.next_cell as i32;
        cursor.next_cell += 1;

        let pos = Pos::new(index / height, index % height);
        let pool = cursor.prize_pool.get_or_insert_with(Vec::new);
        populate_cell(ctx, pos, pool, population);
        if budget.spend() {
            return PhaseStatus::Yielded;
        }
    }
    PhaseStatus::Complete
}

fn populate_cell(
    ctx: &mut PopulateContext<'_>,
    pos: Pos,
    prize_pool: &mut Vec<ItemDef>,
    population: &mut Population,
) {
    let random_rotation = Rotation::from_quarter_turns(ctx.random.below(4));
    let content = ctx.content;

    match ctx.grid.cell_at(pos) {
        Cell::Empty => {
            let crowd = ctx.random.below(CROWD_OPTIONS) as u8;
            let floor_decals = ctx.random.below(FLOOR_DECAL_OPTIONS) as u8;
            population.spawns.push(spawn(
                SpawnKind::FloorDressing { crowd, floor_decals },
                pos,
                random_rotation,
            ));
        }
        Cell::BoothEmpty => {
            let visual = ctx.random.pick(&content.empty_booth_visuals).copied();
            spawn_booth(ctx, population, pos, BoothKind::Plain, visual, random_rotation, None);
        }
        Cell::BoothPrize => {
            let mut visual = ctx.random.pick(&content.prize_booth_visuals).copied();
            let item = ctx.random.pick_and_remove(prize_pool);
            if let Some(item) = &item
                && item.signature
                && !ctx.session.signature_booth_claimed
                && let Some(signature_visual) = content.signature_booth_visual
            {
                visual = Some(signature_visual);
                ctx.session.signature_booth_claimed = true;
            }

            let id = spawn_booth(
                ctx,
                population,
                pos,
                BoothKind::Prize,
                visual,
                Rotation::IDENTITY,
                item,
            );
            population.interactive_booths.insert(pos, id);
            population.bounty = Some(id);
        }
        Cell::BoothUtility => {
            let visual = ctx.random.pick(&content.utility_booth_visuals).copied();
            let id = spawn_booth(
                ctx,
                population,
                pos,
                BoothKind::Utility,
                visual,
                random_rotation,
                None,
            );
            population.interactive_booths.insert(pos, id);
        }
        Cell::Entrance => {
            population.spawns.push(spawn(SpawnKind::PlayerStart, pos, Rotation::IDENTITY));
        }
        Cell::Dispenser => {
            let (rotation, interaction) = dispenser_facing(ctx.grid, pos);
            let id = population.dispensers.insert(Dispenser { pos, rotation, interaction });
            population.dispenser_at.insert(pos, id);
            population.spawns.push(spawn(SpawnKind::Dispenser(id), pos, rotation));
        }
        Cell::OutOfBounds => {}
    }
}

fn spawn_booth(
    ctx: &mut PopulateContext<'_>,
    population: &mut Population,
    pos: Pos,
    kind: BoothKind,
    visual: Option<VisualId>,
    spawn_rotation: Rotation,
    item: Option<ItemDef>,
) -> BoothId {
    let look = randomize_look(ctx.content.booth_look, ctx.random, ctx.session);
    let (rotation, interaction) = match booth_facing(ctx.grid, pos) {
        Some((rotation, direction)) => (rotation, Some(direction)),
        None => (spawn_rotation, None),
    };

    let id =
        population.booths.insert(Booth { pos, kind, visual, rotation, interaction, look, item });
    population.spawns.push(spawn(SpawnKind::Booth(id), pos, rotation));
    id
}

fn spawn(kind: SpawnKind, pos: Pos, rotation: Rotation) -> SpawnRequest {
    SpawnRequest { kind, pos, world: WorldPos::from(pos), rotation }
}

/// Draws materials, then a merchant; the signature merchant shows up at most once a session.
fn randomize_look(
    options: BoothLookOptions,
    random: &mut RandomSource,
    session: &mut GenerationSession,
) -> BoothLook {
    let body = random.below(options.body_materials as usize) as u32;
    let top = random.below(options.top_materials as usize) as u32;
    let left = random.below(options.side_materials as usize) as u32;
    let right = random.below(options.side_materials as usize) as u32;

    let mut merchant = random.below(options.merchants as usize) as u32;
    let can_redraw = options.merchants > 1;
    while merchant == SIGNATURE_MERCHANT && session.signature_merchant_appeared && can_redraw {
        merchant = random.below(options.merchants as usize) as u32;
    }
    if merchant == SIGNATURE_MERCHANT {
        session.signature_merchant_appeared = true;
    }

    BoothLook { body, top, left, right, merchant }
}

/// Booths face the first open aisle, checking south, north, west, then east.
fn booth_facing(grid: &Grid, pos: Pos) -> Option<(Rotation, Direction)> {
    let options = [
        (pos.offset(0, -1), 180, Direction::YPositive),
        (pos.offset(0, 1), 0, Direction::YNegative),
        (pos.offset(-1, 0), 270, Direction::XPositive),
        (pos.offset(1, 0), 90, Direction::XNegative),
    ];
    options
        .into_iter()
        .find(|&(neighbour, _, _)| grid.is_cell(neighbour, Cell::Empty))
        .map(|(_, degrees, direction)| (Rotation::from_degrees(degrees), direction))
}

/// Dispensers turn their back to the boundary they were placed against.
fn dispenser_facing(grid: &Grid, pos: Pos) -> (Rotation, Direction) {
    if !grid.is_within_bounds(pos.offset(0, 1)) {
        (Rotation::from_degrees(0), Direction::YPositive)
    } else if !grid.is_within_bounds(pos.offset(0, -1)) {
        (Rotation::from_degrees(180), Direction::YNegative)
    } else if !grid.is_within_bounds(pos.offset(1, 0)) {
        (Rotation::from_degrees(90), Direction::XPositive)
    } else {
        (Rotation::from_degrees(270), Direction::XNegative)
    }
}

/// Normal items trimmed to `slots - 2`, then one rare and one flawed item.
///
/// Normals are padded with random duplicates when the pack has fewer than needed.
pub(super) fn build_prize_pool(
    content: &ContentPack,
    slots: usize,
    random: &mut RandomSource,
) -> Vec<ItemDef> {
    let normal_slots = slots.saturating_sub(2);
    let mut pool = content.normal_items.clone();
    while pool.len() < normal_slots {
        let Some(extra) = random.pick(&content.normal_items) else {
            break;
        };
        pool.push(extra.clone());
    }
    while pool.len() > normal_slots {
        let index = random.below(pool.len());
        pool.remove(index);
    }

    for tier in [ItemTier::Rare, ItemTier::Flawed] {
        if let Some(item) = random.pick(content.items_of(tier)) {
            pool.push(item.clone());
        }
    }
    pool
}
