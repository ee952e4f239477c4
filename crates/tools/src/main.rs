use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fairgen::mapgen::BoothKind;
use fairgen::{Cell, ContentPack, GeneratedLevel, SettingsCatalog, SettingsSelection};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Ascii,
    Json,
    Summary,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a shop-floor level layout", long_about = None)]
struct Args {
    /// Level seed; 0 picks one at runtime
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Zero-based progression level; omit for free play
    #[arg(short, long)]
    level: Option<usize>,
    /// Settings catalog (TOML, or JSON when the extension is .json)
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = match &args.settings {
        Some(path) => SettingsCatalog::load(path)
            .with_context(|| format!("Failed to load settings catalog: {}", path.display()))?,
        None => SettingsCatalog::default(),
    };
    let selection = catalog.select(args.level);
    info!(level = ?args.level, excess_levels = selection.excess_levels, "settings selected");

    let level =
        fairgen::generate_level(args.seed, &selection.settings, &ContentPack::default());

    match args.format {
        Format::Ascii => print!("{}", level.grid.render_ascii()),
        Format::Json => {
            let json = serde_json::to_string_pretty(&level)
                .context("Failed to serialize generated level")?;
            println!("{json}");
        }
        Format::Summary => print_summary(&level, &selection, args.level),
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "fairgen=warn",
        1 => "fairgen=debug",
        _ => "fairgen=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn print_summary(
    level: &GeneratedLevel,
    selection: &SettingsSelection,
    progression: Option<usize>,
) {
    let grid = &level.grid;
    println!("Seed: {}", level.seed);
    if let Some(index) = progression {
        println!("Level: {}", selection.settings.render_info(index));
    }
    println!("Grid: {}x{} ({} blocks)", grid.width(), grid.height(), grid.block_origins().len());
    match level.player_start() {
        Some(pos) => println!("Entrance: ({}, {})", pos.x, pos.y),
        None => println!("Entrance: none"),
    }
    println!("Dispensers: {}", grid.count(Cell::Dispenser));
    println!(
        "Booths: {} plain, {}/{} prize, {}/{} utility",
        level.booths_of(BoothKind::Plain).count(),
        level.activation.prize_placed,
        level.activation.prize_requested,
        level.activation.utility_placed,
        level.activation.utility_requested,
    );
    println!("Items to collect: {}", level.item_count);
    match level.bounty_booth() {
        Some(booth) => println!(
            "Bounty: ({}, {}) {} x{}",
            booth.pos.x,
            booth.pos.y,
            booth.item.as_ref().map_or("no item", |item| item.name.as_str()),
            level.bounty_multiplier.factor()
        ),
        None => println!("Bounty: none"),
    }
    if selection.excess_levels > 0 {
        println!(
            "Excess levels: {} (time bonus 1.0 becomes {:.2})",
            selection.excess_levels,
            selection.adjust_time_bonus(1.0)
        );
    }
    println!("Walls: {}  Minimap icons: {}", level.walls.len(), level.minimap.len());
    println!("Fingerprint: {:016x}", level.fingerprint());
}
