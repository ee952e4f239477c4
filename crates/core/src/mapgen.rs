//! Procedural level generation split into one module per phase.

pub mod model;

mod activation;
mod budget;
mod dispensers;
mod entrance;
mod finalize;
mod grid;
mod interaction;
mod islands;
mod minimap;
mod perimeter;
mod pipeline;
mod populate;
mod seed;
mod shape;

pub use budget::BudgetLimit;
pub use grid::{BLOCK_SIZE, Grid};
pub use model::{
    ActivationSummary, Booth, BoothKind, BoothLook, BountyMultiplier, Dispenser, GeneratedLevel,
    Interactable, MINIMAP_SCALE, MinimapIcon, MinimapIconKind, SpawnKind, SpawnRequest,
    WallSegment, WallSide,
};
pub use pipeline::{AdvanceResult, AdvanceStopReason, LevelGenerator, Phase};
pub use populate::GenerationSession;
pub use seed::{RANDOM_SEED_SENTINEL, RandomSource, generate_runtime_seed, resolve_seed};

use crate::content::ContentPack;
use crate::settings::GenerationSettings;

/// Generates a whole level in one go. A `seed` of 0 picks a runtime seed.
pub fn generate_level(
    seed: u64,
    settings: &GenerationSettings,
    content: &ContentPack,
) -> GeneratedLevel {
    LevelGenerator::new(seed, settings.clone(), content.clone()).run_to_completion()
}
