//! Public data models for a generated level and the requests it hands to collaborators.

use std::collections::BTreeMap;

use serde::Serialize;
use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::content::ItemDef;
use crate::settings::GenerationSettings;
use crate::types::{BoothId, Direction, DispenserId, Pos, Rotation, VisualId, WorldPos};

use super::grid::Grid;

/// Minimap units per grid cell.
pub const MINIMAP_SCALE: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BoothKind {
    Plain,
    Prize,
    Utility,
}

/// Cosmetic material and merchant choices drawn for a booth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BoothLook {
    pub body: u32,
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub merchant: u32,
}

impl BoothLook {
    pub fn minimap_sprite(self) -> u32 {
        self.body
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Booth {
    pub pos: Pos,
    pub kind: BoothKind,
    pub visual: Option<VisualId>,
    pub rotation: Rotation,
    /// Direction a player must face, from the aisle cell, to interact. `None` when enclosed.
    pub interaction: Option<Direction>,
    pub look: BoothLook,
    pub item: Option<ItemDef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dispenser {
    pub pos: Pos,
    pub rotation: Rotation,
    /// The wall side the dispenser backs onto; players stand on its cell facing this way.
    pub interaction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpawnKind {
    FloorDressing { crowd: u8, floor_decals: u8 },
    Booth(BoothId),
    Dispenser(DispenserId),
    PlayerStart,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub pos: Pos,
    pub world: WorldPos,
    pub rotation: Rotation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum WallSide {
    West,
    East,
    South,
    North,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WallSegment {
    pub block: Pos,
    pub side: WallSide,
    pub anchor: Pos,
    pub rotation: Rotation,
    /// Bit 0 and bit 1 flag the two blocks flanking this side as in-bounds.
    pub variant: u8,
    pub visual: VisualId,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum MinimapIconKind {
    Block,
    Booth { sprite: u32 },
    UtilityBooth { sprite: u32 },
    PrizeBooth { sprite: u32, booth: BoothId, item: Option<String> },
    Dispenser,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MinimapIcon {
    pub kind: MinimapIconKind,
    pub x: f32,
    pub y: f32,
}

impl MinimapIcon {
    pub fn at(pos: Pos, kind: MinimapIconKind) -> Self {
        Self { kind, x: pos.x as f32 * MINIMAP_SCALE, y: pos.y as f32 * MINIMAP_SCALE }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BountyMultiplier {
    Times10,
    Times5,
    Times2,
    TimesOneAndHalf,
}

impl BountyMultiplier {
    pub fn from_roll(roll: usize) -> Self {
        match roll {
            0 => Self::Times10,
            1..10 => Self::Times5,
            10..50 => Self::Times2,
            _ => Self::TimesOneAndHalf,
        }
    }

    pub fn factor(self) -> f32 {
        match self {
            Self::Times10 => 10.0,
            Self::Times5 => 5.0,
            Self::Times2 => 2.0,
            Self::TimesOneAndHalf => 1.5,
        }
    }
}

/// Counts requested from settings versus cells actually promoted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ActivationSummary {
    pub prize_requested: u32,
    pub utility_requested: u32,
    pub prize_placed: u32,
    pub utility_placed: u32,
}

/// Anything a player can interact with by facing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Interactable {
    Booth(BoothId),
    Dispenser(DispenserId),
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedLevel {
    pub seed: u64,
    pub settings: GenerationSettings,
    pub grid: Grid,
    pub entrance: Option<Pos>,
    pub booths: SlotMap<BoothId, Booth>,
    pub dispensers: SlotMap<DispenserId, Dispenser>,
    #[serde(skip)]
    pub interactive_booths: BTreeMap<Pos, BoothId>,
    #[serde(skip)]
    pub dispenser_at: BTreeMap<Pos, DispenserId>,
    pub spawns: Vec<SpawnRequest>,
    pub walls: Vec<WallSegment>,
    pub minimap: Vec<MinimapIcon>,
    pub activation: ActivationSummary,
    pub bounty: Option<BoothId>,
    pub bounty_multiplier: BountyMultiplier,
    /// Prize items the player is asked to collect, as shown by the UI counter.
    pub item_count: u32,
}

impl GeneratedLevel {
    pub fn player_start(&self) -> Option<Pos> {
        self.entrance
    }

    pub fn bounty_booth(&self) -> Option<&Booth> {
        self.bounty.and_then(|id| self.booths.get(id))
    }

    pub fn booths_of(&self, kind: BoothKind) -> impl Iterator<Item = &Booth> {
        self.booths.values().filter(move |booth| booth.kind == kind)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.seed.to_le_bytes().to_vec();
        bytes.extend(self.grid.canonical_bytes());
        match self.entrance {
            Some(pos) => {
                bytes.push(1);
                bytes.extend(pos.x.to_le_bytes());
                bytes.extend(pos.y.to_le_bytes());
            }
            None => bytes.push(0),
        }

        bytes.extend((self.booths.len() as u32).to_le_bytes());
        for booth in self.booths.values() {
            bytes.extend(booth.pos.x.to_le_bytes());
            bytes.extend(booth.pos.y.to_le_bytes());
            bytes.push(booth.kind as u8);
            bytes.extend(booth.visual.map_or(u32::MAX, |visual| visual.0).to_le_bytes());
            bytes.extend(booth.rotation.degrees().to_le_bytes());
            bytes.push(booth.interaction.map_or(u8::MAX, |direction| direction as u8));
            for part in [booth.look.body, booth.look.top, booth.look.left, booth.look.right] {
                bytes.extend(part.to_le_bytes());
            }
            bytes.extend(booth.look.merchant.to_le_bytes());
            if let Some(item) = &booth.item {
                bytes.extend(item.id.as_bytes());
            }
            bytes.push(0xFF);
        }

        bytes.extend((self.dispensers.len() as u32).to_le_bytes());
        for dispenser in self.dispensers.values() {
            bytes.extend(dispenser.pos.x.to_le_bytes());
            bytes.extend(dispenser.pos.y.to_le_bytes());
            bytes.push(dispenser.interaction as u8);
        }

        bytes.extend((self.spawns.len() as u32).to_le_bytes());
        for spawn in &self.spawns {
            if let SpawnKind::FloorDressing { crowd, floor_decals } = spawn.kind {
                bytes.push(crowd);
                bytes.push(floor_decals);
            }
            bytes.extend(spawn.rotation.degrees().to_le_bytes());
        }

        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for wall in &self.walls {
            bytes.extend(wall.anchor.x.to_le_bytes());
            bytes.extend(wall.anchor.y.to_le_bytes());
            bytes.push(wall.side as u8);
            bytes.push(wall.variant);
        }

        bytes.extend((self.minimap.len() as u32).to_le_bytes());
        bytes.push(self.bounty_booth().map_or(0, |_| 1));
        if let Some(booth) = self.bounty_booth() {
            bytes.extend(booth.pos.x.to_le_bytes());
            bytes.extend(booth.pos.y.to_le_bytes());
        }
        bytes.push(self.bounty_multiplier as u8);
        bytes.extend(self.item_count.to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
