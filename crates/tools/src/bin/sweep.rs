use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::Parser;
use fairgen::mapgen::{BLOCK_SIZE, BoothKind, BudgetLimit};
use fairgen::{Cell, ContentPack, GeneratedLevel, GenerationSettings, LevelGenerator, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Check layout invariants over a seed range", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    start: u64,
    #[arg(short, long, default_value_t = 500)]
    count: u64,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Default, Serialize)]
struct Report {
    levels: u64,
    violations: Vec<String>,
    multipliers: BTreeMap<String, u64>,
    prize_shortfall: u64,
    utility_shortfall: u64,
}

/// Drives the generator with small random budgets and checks it matches an unlimited run.
fn generate_stepped(
    seed: u64,
    settings: &GenerationSettings,
    content: &ContentPack,
    rng: &mut ChaCha8Rng,
) -> Option<GeneratedLevel> {
    let mut generator = LevelGenerator::new(seed, settings.clone(), content.clone());
    while !generator.is_finished() {
        let steps = 1 + rng.next_u32() % 64;
        generator.advance(BudgetLimit::Steps(steps));
    }
    generator.into_level()
}

fn check_level(level: &GeneratedLevel) -> Result<(), String> {
    let grid = &level.grid;
    if grid.count(Cell::Entrance) != 1 {
        return Err(format!("{} entrances", grid.count(Cell::Entrance)));
    }

    let mut per_block: BTreeMap<Pos, usize> = BTreeMap::new();
    for pos in grid.positions_of(Cell::Dispenser) {
        let block = Pos::new(pos.x - pos.x % BLOCK_SIZE, pos.y - pos.y % BLOCK_SIZE);
        *per_block.entry(block).or_default() += 1;
    }
    let blocks = grid.block_origins();
    if per_block.len() != blocks.len() || per_block.values().any(|&count| count != 1) {
        return Err(format!("dispensers per block {per_block:?}"));
    }

    let prize_cells = grid.count(Cell::BoothPrize);
    if level.bounty.is_some() != (prize_cells > 0) {
        return Err(format!("bounty {:?} with {prize_cells} prize booths", level.bounty));
    }
    if level.booths_of(BoothKind::Prize).any(|booth| booth.item.is_none()) {
        return Err("prize booth without an item".to_string());
    }
    if level.item_count != level.activation.prize_requested {
        return Err(format!("item count {}", level.item_count));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = GenerationSettings::default();
    let content = ContentPack::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.start);
    let mut report = Report::default();

    for seed in args.start..args.start.saturating_add(args.count) {
        let reference = fairgen::generate_level(seed, &settings, &content);
        report.levels += 1;

        if let Err(reason) = check_level(&reference) {
            report.violations.push(format!("seed {seed}: {reason}"));
        }
        match generate_stepped(seed, &settings, &content, &mut rng) {
            Some(stepped) if stepped.fingerprint() == reference.fingerprint() => {}
            _ => report.violations.push(format!("seed {seed}: stepped run diverged")),
        }

        let activation = reference.activation;
        if activation.prize_placed < activation.prize_requested {
            report.prize_shortfall += 1;
        }
        if activation.utility_placed < activation.utility_requested {
            report.utility_shortfall += 1;
        }
        *report.multipliers.entry(format!("{:?}", reference.bounty_multiplier)).or_default() += 1;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Checked {} levels from seed {}", report.levels, args.start);
        for (multiplier, count) in &report.multipliers {
            println!("  {multiplier:<16} {count}");
        }
        println!("Prize shortfalls: {}", report.prize_shortfall);
        println!("Utility shortfalls: {}", report.utility_shortfall);
    }

    if !report.violations.is_empty() {
        for violation in &report.violations {
            eprintln!("{violation}");
        }
        bail!("{} invariant violations", report.violations.len());
    }
    Ok(())
}
