use std::collections::BTreeSet;

use fairgen::mapgen::{BLOCK_SIZE, BoothKind, SpawnKind, WallSide};
use fairgen::{
    Cell, ContentPack, GeneratedLevel, GenerationSettings, ItemTier, Pos, generate_level,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn example_settings() -> GenerationSettings {
    GenerationSettings {
        blocks_x: 2,
        blocks_y: 3,
        min_prize: 6,
        max_prize: 9,
        min_utility: 2,
        max_utility: 4,
        info_text: String::new(),
    }
}

/// Sizes of 8-connected booth components.
fn island_sizes(level: &GeneratedLevel) -> Vec<usize> {
    let grid = &level.grid;
    let mut seen = BTreeSet::new();
    let mut sizes = Vec::new();
    let cells = (0..grid.width()).flat_map(|x| (0..grid.height()).map(move |y| Pos::new(x, y)));
    for start in cells {
        if !grid.cell_at(start).is_booth() || !seen.insert(start) {
            continue;
        }
        let mut size = 0;
        let mut open = vec![start];
        while let Some(pos) = open.pop() {
            size += 1;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let next = pos.offset(dx, dy);
                    if grid.cell_at(next).is_booth() && seen.insert(next) {
                        open.push(next);
                    }
                }
            }
        }
        sizes.push(size);
    }
    sizes
}

fn check_structure(level: &GeneratedLevel) -> Result<(), String> {
    let grid = &level.grid;
    let blocks = grid.block_origins();

    if grid.width() % BLOCK_SIZE != 0 || grid.height() % BLOCK_SIZE != 0 {
        return Err(format!("grid {}x{} is not block aligned", grid.width(), grid.height()));
    }

    let entrances = grid.positions_of(Cell::Entrance);
    if entrances.len() != 1 || level.entrance != entrances.first().copied() {
        return Err(format!("expected one entrance, found {entrances:?}"));
    }

    let mut blocks_with_dispenser = BTreeSet::new();
    for pos in grid.positions_of(Cell::Dispenser) {
        let block = Pos::new(pos.x - pos.x % BLOCK_SIZE, pos.y - pos.y % BLOCK_SIZE);
        if !blocks_with_dispenser.insert(block) {
            return Err(format!("block {block:?} holds two dispensers"));
        }
    }
    if blocks_with_dispenser.len() != blocks.len() {
        return Err(format!(
            "{} of {} blocks have a dispenser",
            blocks_with_dispenser.len(),
            blocks.len()
        ));
    }

    if let Some(size) = island_sizes(level).into_iter().find(|&size| size > 4) {
        return Err(format!("booth islands merged into a group of {size}"));
    }

    let prize_cells = grid.count(Cell::BoothPrize) as u32;
    let utility_cells = grid.count(Cell::BoothUtility) as u32;
    let activation = level.activation;
    if prize_cells != activation.prize_placed || utility_cells != activation.utility_placed {
        return Err(format!("activation summary {activation:?} disagrees with the grid"));
    }
    if activation.prize_placed > activation.prize_requested
        || activation.utility_placed > activation.utility_requested
    {
        return Err(format!("placed more booths than requested: {activation:?}"));
    }
    if level.item_count != activation.prize_requested {
        return Err(format!("item count {} != requested prizes", level.item_count));
    }

    match level.bounty_booth() {
        Some(booth) if booth.kind != BoothKind::Prize => {
            return Err("bounty is not a prize booth".to_string());
        }
        None if prize_cells > 0 => return Err("prize booths placed without a bounty".to_string()),
        Some(_) if prize_cells == 0 => return Err("bounty without prize booths".to_string()),
        _ => {}
    }

    let prizes: Vec<_> = level.booths_of(BoothKind::Prize).collect();
    if prizes.iter().any(|booth| booth.item.is_none()) {
        return Err("prize booth without an item".to_string());
    }
    let tier_count = |tier| {
        prizes
            .iter()
            .filter_map(|booth| booth.item.as_ref())
            .filter(|item| item.tier == tier)
            .count()
    };
    if tier_count(ItemTier::Rare) > 1 || tier_count(ItemTier::Flawed) > 1 {
        return Err("more than one rare or flawed prize".to_string());
    }

    let interactive = (activation.prize_placed + activation.utility_placed) as usize;
    if level.interactive_booths.len() != interactive {
        return Err(format!("{} interactive booths indexed", level.interactive_booths.len()));
    }
    if level.dispenser_at.len() != level.dispensers.len() {
        return Err("dispenser index out of sync".to_string());
    }

    let starts = level.spawns.iter().filter(|spawn| spawn.kind == SpawnKind::PlayerStart).count();
    if starts != 1 {
        return Err(format!("{starts} player starts"));
    }

    let icons = blocks.len() + level.booths.len() + level.dispensers.len();
    if level.minimap.len() != icons {
        return Err(format!("{} minimap icons, expected {icons}", level.minimap.len()));
    }

    Ok(())
}

#[test]
fn test_example_scenario_seed_42() {
    let level = generate_level(42, &example_settings(), &ContentPack::default());
    let dims = (level.grid.width(), level.grid.height());
    assert!(dims == (16, 24) || dims == (24, 16), "unexpected dimensions {dims:?}");
    assert_eq!(level.grid.count(Cell::Entrance), 1);

    let prizes = level.grid.count(Cell::BoothPrize);
    let utilities = level.grid.count(Cell::BoothUtility);
    assert!((6..=9).contains(&prizes), "{prizes} prize booths");
    assert!((2..=4).contains(&utilities), "{utilities} utility booths");
    assert_eq!(level.activation.prize_placed, level.activation.prize_requested);

    let bounty = level.bounty_booth().expect("prize booths imply a bounty");
    assert_eq!(level.grid.cell_at(bounty.pos), Cell::BoothPrize);

    let items: Vec<_> = level.booths_of(BoothKind::Prize).filter_map(|b| b.item.as_ref()).collect();
    assert_eq!(items.iter().filter(|item| item.tier == ItemTier::Rare).count(), 1);
    assert_eq!(items.iter().filter(|item| item.tier == ItemTier::Flawed).count(), 1);

    check_structure(&level).expect("seed 42 satisfies every structural invariant");
}

#[test]
fn test_bounty_is_the_last_prize_in_scan_order() {
    for seed in 1..20 {
        let level = generate_level(seed, &example_settings(), &ContentPack::default());
        let last_prize = level.grid.positions_of(Cell::BoothPrize).last().copied();
        assert_eq!(level.bounty_booth().map(|booth| booth.pos), last_prize, "seed={seed}");
    }
}

#[test]
fn test_walls_cover_every_exposed_block_side() {
    let level = generate_level(9, &example_settings(), &ContentPack::default());
    let grid = &level.grid;
    for origin in grid.block_origins() {
        let exposed = [
            (WallSide::West, !grid.is_within_bounds(origin.offset(-1, 0))),
            (WallSide::East, !grid.is_within_bounds(origin.offset(BLOCK_SIZE, 0))),
            (WallSide::South, !grid.is_within_bounds(origin.offset(0, -1))),
            (WallSide::North, !grid.is_within_bounds(origin.offset(0, BLOCK_SIZE))),
        ];
        for (side, expected) in exposed {
            let present = level.walls.iter().any(|wall| wall.block == origin && wall.side == side);
            assert_eq!(present, expected, "block {origin:?} side {side:?}");
        }
    }
}

#[test]
fn test_structural_invariants_hold_across_seeds() {
    let settings = example_settings();
    let content = ContentPack::default();
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));

    runner
        .run(&any::<u64>(), |seed| {
            let level = generate_level(seed.max(1), &settings, &content);
            check_structure(&level)
                .map_err(|reason| TestCaseError::fail(format!("seed {seed}: {reason}")))
        })
        .expect("structural invariants should hold for every seed");
}

#[test]
fn test_extreme_settings_degrade_without_panicking() {
    let content = ContentPack::default();
    for (blocks_x, blocks_y) in [(0, 0), (1, 1), (1, 4), (5, 1), (6, 6)] {
        let settings = GenerationSettings {
            blocks_x,
            blocks_y,
            min_prize: 12,
            max_prize: 3,
            ..GenerationSettings::default()
        };
        let level = generate_level(31, &settings, &content);
        assert!(level.grid.count(Cell::Entrance) <= 1);
        assert_eq!(level.activation.prize_requested, 12);
        assert_eq!(level.bounty.is_some(), level.grid.count(Cell::BoothPrize) > 0);
    }
}

#[test]
fn test_validated_settings_with_huge_counts_still_generate() {
    let content = ContentPack::default();
    for (min_prize, max_prize) in [(0, u32::MAX), (u32::MAX, u32::MAX), (0, 2_000_000_000)] {
        let settings = GenerationSettings {
            min_prize,
            max_prize,
            min_utility: 0,
            max_utility: u32::MAX,
            ..example_settings()
        };
        settings.validate().expect("ordered ranges pass validation");

        let level = generate_level(42, &settings, &content);
        assert!(level.activation.prize_requested <= 1024, "{:?}", level.activation);
        assert!(level.activation.utility_requested <= 1024, "{:?}", level.activation);
        check_structure(&level).expect("huge counts degrade to fewer placed booths");
    }
}
