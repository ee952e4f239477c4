//! Resumable phase state machine that drives a level from seed to finished layout.

use serde::Serialize;
use tracing::{debug, info};

use crate::content::ContentPack;
use crate::settings::GenerationSettings;
use crate::types::{Cell, Pos};

use super::activation::activate_booths;
use super::budget::{BudgetLimit, PhaseStatus, StepBudget};
use super::dispensers::place_dispensers;
use super::entrance::place_entrance;
use super::finalize::roll_bounty_multiplier;
use super::grid::Grid;
use super::islands::{IslandCursor, advance_islands};
use super::minimap::{MinimapCursor, MinimapInputs, advance_minimap};
use super::model::{
    ActivationSummary, BountyMultiplier, GeneratedLevel, MinimapIcon, WallSegment,
};
use super::perimeter::{PerimeterCursor, advance_perimeter};
use super::populate::{
    GenerationSession, PopulateContext, PopulateCursor, Population, advance_populate,
};
use super::seed::{RandomSource, resolve_seed};
use super::shape::carve_shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    Shape,
    Entrance,
    Dispensers,
    Islands,
    Activation,
    Populate,
    Perimeter,
    Minimap,
    Finalize,
    Done,
}

impl Phase {
    pub const ALL: [Self; 10] = [
        Self::Shape,
        Self::Entrance,
        Self::Dispensers,
        Self::Islands,
        Self::Activation,
        Self::Populate,
        Self::Perimeter,
        Self::Minimap,
        Self::Finalize,
        Self::Done,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Shape => Self::Entrance,
            Self::Entrance => Self::Dispensers,
            Self::Dispensers => Self::Islands,
            Self::Islands => Self::Activation,
            Self::Activation => Self::Populate,
            Self::Populate => Self::Perimeter,
            Self::Perimeter => Self::Minimap,
            Self::Minimap => Self::Finalize,
            Self::Finalize | Self::Done => Self::Done,
        }
    }

    /// Loading-screen text shown while this phase runs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Shape => "Generating level shape",
            Self::Entrance => "Creating entrance",
            Self::Dispensers => "Placing dispensers",
            Self::Islands => "Placing booths",
            Self::Activation => "Making booths interactive",
            Self::Populate => "Populating level",
            Self::Perimeter => "Spawning walls",
            Self::Minimap | Self::Finalize => "Generating minimap",
            Self::Done => "Done!",
        }
    }

    /// Loading gauge fill once every earlier phase has finished.
    pub fn progress(self) -> f32 {
        match self {
            Self::Shape => 0.0,
            Self::Entrance => 0.1,
            Self::Dispensers => 0.15,
            Self::Islands => 0.2,
            Self::Activation => 0.3,
            Self::Populate => 0.4,
            Self::Perimeter => 0.65,
            Self::Minimap | Self::Finalize => 0.75,
            Self::Done => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    /// The budget ran out; `phase` resumes on the next call.
    Checkpoint { phase: Phase },
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub steps: u32,
    pub stop_reason: AdvanceStopReason,
}

pub struct LevelGenerator {
    seed: u64,
    settings: GenerationSettings,
    content: ContentPack,
    session: GenerationSession,
    random: RandomSource,
    phase: Phase,
    grid: Grid,
    entrance: Option<Pos>,
    islands: IslandCursor,
    activation: ActivationSummary,
    populate: PopulateCursor,
    population: Population,
    perimeter: PerimeterCursor,
    walls: Vec<WallSegment>,
    minimap_cursor: MinimapCursor,
    minimap: Vec<MinimapIcon>,
    bounty_multiplier: BountyMultiplier,
}

impl LevelGenerator {
    /// `seed` 0 picks a runtime seed; read it back with [`LevelGenerator::seed`].
    pub fn new(seed: u64, settings: GenerationSettings, content: ContentPack) -> Self {
        Self::with_session(seed, settings, content, GenerationSession::default())
    }

    /// Continues an existing session, so the signature booth stays unique across levels.
    pub fn with_session(
        seed: u64,
        settings: GenerationSettings,
        content: ContentPack,
        session: GenerationSession,
    ) -> Self {
        let seed = resolve_seed(seed);
        info!(
            seed,
            blocks_x = settings.blocks_x,
            blocks_y = settings.blocks_y,
            "generating level"
        );
        Self {
            seed,
            settings,
            content,
            session,
            random: RandomSource::new(seed),
            phase: Phase::Shape,
            grid: Grid::new(0, 0),
            entrance: None,
            islands: IslandCursor::default(),
            activation: ActivationSummary::default(),
            populate: PopulateCursor::default(),
            population: Population::default(),
            perimeter: PerimeterCursor::default(),
            walls: Vec::new(),
            minimap_cursor: MinimapCursor::default(),
            minimap: Vec::new(),
            bounty_multiplier: BountyMultiplier::TimesOneAndHalf,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> GenerationSession {
        self.session
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Runs phases until the sequence finishes or `limit` asks for a yield.
    pub fn advance(&mut self, limit: BudgetLimit) -> AdvanceResult {
        let mut budget = StepBudget::open(limit);
        while self.phase != Phase::Done {
            if self.run_phase(&mut budget) == PhaseStatus::Yielded {
                return AdvanceResult {
                    steps: budget.spent(),
                    stop_reason: AdvanceStopReason::Checkpoint { phase: self.phase },
                };
            }

            self.log_phase_complete();
            self.phase = self.phase.next();
            if self.phase != Phase::Done && budget.spend() {
                return AdvanceResult {
                    steps: budget.spent(),
                    stop_reason: AdvanceStopReason::Checkpoint { phase: self.phase },
                };
            }
        }
        AdvanceResult { steps: budget.spent(), stop_reason: AdvanceStopReason::Finished }
    }

    pub fn run_to_completion(mut self) -> GeneratedLevel {
        while self.advance(BudgetLimit::Unlimited).stop_reason != AdvanceStopReason::Finished {}
        self.build_level()
    }

    /// The finished level, or `None` while phases remain.
    pub fn into_level(self) -> Option<GeneratedLevel> {
        if !self.is_finished() {
            return None;
        }
        Some(self.build_level())
    }

    fn run_phase(&mut self, budget: &mut StepBudget) -> PhaseStatus {
        match self.phase {
            Phase::Shape => {
                let shape = carve_shape(&mut self.random, &self.settings);
                debug!(
                    removed = ?shape.removed,
                    transposed = shape.transposed,
                    "blocks knocked out"
                );
                self.grid = shape.grid;
            }
            Phase::Entrance => {
                self.entrance = place_entrance(&mut self.grid, &mut self.random);
            }
            Phase::Dispensers => {
                place_dispensers(&mut self.grid, &mut self.random);
            }
            Phase::Islands => {
                return advance_islands(&mut self.grid, &mut self.random, &mut self.islands, budget);
            }
            Phase::Activation => {
                self.activation = activate_booths(&mut self.grid, &self.settings, &mut self.random);
            }
            Phase::Populate => {
                let mut ctx = PopulateContext {
                    grid: &self.grid,
                    content: &self.content,
                    prize_slots: self.activation.prize_requested as usize,
                    random: &mut self.random,
                    session: &mut self.session,
                };
                return advance_populate(&mut ctx, &mut self.populate, &mut self.population, budget);
            }
            Phase::Perimeter => {
                return advance_perimeter(
                    &self.grid,
                    &self.content,
                    &mut self.perimeter,
                    &mut self.walls,
                    budget,
                );
            }
            Phase::Minimap => {
                let inputs = MinimapInputs {
                    grid: &self.grid,
                    booths: &self.population.booths,
                    dispensers: &self.population.dispensers,
                };
                let cursor = &mut self.minimap_cursor;
                return advance_minimap(&inputs, cursor, &mut self.minimap, budget);
            }
            Phase::Finalize => {
                self.bounty_multiplier = roll_bounty_multiplier(&mut self.random);
            }
            Phase::Done => {}
        }
        PhaseStatus::Complete
    }

    fn log_phase_complete(&self) {
        match self.phase {
            Phase::Shape => debug!(
                width = self.grid.width(),
                height = self.grid.height(),
                blocks = self.grid.block_origins().len(),
                "shape carved"
            ),
            Phase::Entrance => debug!(entrance = ?self.entrance, "entrance placed"),
            Phase::Dispensers => {
                debug!(dispensers = self.grid.count(Cell::Dispenser), "dispensers placed");
            }
            Phase::Islands => debug!(
                islands = self.islands.islands,
                booths = self.grid.count(Cell::BoothEmpty),
                "booth islands placed"
            ),
            Phase::Activation => debug!(
                prize_requested = self.activation.prize_requested,
                prize_placed = self.activation.prize_placed,
                utility_requested = self.activation.utility_requested,
                utility_placed = self.activation.utility_placed,
                "booths activated"
            ),
            Phase::Populate => debug!(
                booths = self.population.booths.len(),
                dispensers = self.population.dispensers.len(),
                spawns = self.population.spawns.len(),
                "level populated"
            ),
            Phase::Perimeter => debug!(walls = self.walls.len(), "walls spawned"),
            Phase::Minimap => debug!(icons = self.minimap.len(), "minimap generated"),
            Phase::Finalize => {
                debug!(multiplier = self.bounty_multiplier.factor(), "bounty multiplier rolled");
            }
            Phase::Done => {}
        }
    }

    fn build_level(self) -> GeneratedLevel {
        let population = self.population;
        let level = GeneratedLevel {
            seed: self.seed,
            settings: self.settings,
            grid: self.grid,
            entrance: self.entrance,
            booths: population.booths,
            dispensers: population.dispensers,
            interactive_booths: population.interactive_booths,
            dispenser_at: population.dispenser_at,
            spawns: population.spawns,
            walls: self.walls,
            minimap: self.minimap,
            activation: self.activation,
            bounty: population.bounty,
            bounty_multiplier: self.bounty_multiplier,
            item_count: self.activation.prize_requested,
        };
        info!(
            seed = level.seed,
            fingerprint = %format!("{:016x}", level.fingerprint()),
            booths = level.booths.len(),
            "level generated"
        );
        level
    }
}
