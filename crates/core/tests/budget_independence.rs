use std::time::Duration;

use fairgen::mapgen::{AdvanceStopReason, BudgetLimit, Phase};
use fairgen::{ContentPack, GeneratedLevel, GenerationSettings, LevelGenerator, generate_level};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn run_with(seed: u64, limit: BudgetLimit) -> (GeneratedLevel, Vec<Phase>) {
    let mut generator =
        LevelGenerator::new(seed, GenerationSettings::default(), ContentPack::default());
    let mut checkpoints = Vec::new();
    loop {
        match generator.advance(limit).stop_reason {
            AdvanceStopReason::Checkpoint { phase } => checkpoints.push(phase),
            AdvanceStopReason::Finished => break,
        }
    }
    let level = generator.into_level().expect("finished generator yields a level");
    (level, checkpoints)
}

#[test]
fn test_any_step_budget_produces_the_unlimited_level() {
    let reference =
        generate_level(2024, &GenerationSettings::default(), &ContentPack::default()).fingerprint();
    for steps in [1, 2, 5, 64, 1_000] {
        let (level, _) = run_with(2024, BudgetLimit::Steps(steps));
        assert_eq!(level.fingerprint(), reference, "steps={steps}");
    }
}

#[test]
fn test_exhausted_wall_clock_budget_still_makes_progress() {
    let reference =
        generate_level(8, &GenerationSettings::default(), &ContentPack::default()).fingerprint();
    let (level, checkpoints) = run_with(8, BudgetLimit::WallClock(Duration::ZERO));
    assert_eq!(level.fingerprint(), reference);
    assert!(!checkpoints.is_empty());
}

#[test]
fn test_long_scans_checkpoint_inside_their_phase() {
    let (_, checkpoints) = run_with(99, BudgetLimit::Steps(1));
    for phase in [Phase::Islands, Phase::Populate, Phase::Perimeter, Phase::Minimap] {
        let inside = checkpoints.iter().filter(|&&checkpoint| checkpoint == phase).count();
        assert!(inside > 1, "{phase:?} never yielded mid-scan");
    }
    assert!(checkpoints.windows(2).all(|pair| pair[0] <= pair[1]), "phases ran out of order");

    let progress: Vec<f32> = checkpoints.iter().map(|phase| phase.progress()).collect();
    assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_budget_independence_for_arbitrary_seeds_and_budgets() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(16));
    runner
        .run(&(any::<u64>(), 1_u32..50), |(seed, steps)| {
            let seed = seed.max(1);
            let reference =
                generate_level(seed, &GenerationSettings::default(), &ContentPack::default());
            let (stepped, _) = run_with(seed, BudgetLimit::Steps(steps));
            if stepped.fingerprint() != reference.fingerprint() {
                return Err(TestCaseError::fail(format!("seed {seed} steps {steps} diverged")));
            }
            Ok(())
        })
        .expect("yield pattern must not change the level");
}
