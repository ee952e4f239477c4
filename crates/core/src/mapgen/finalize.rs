//! Bounty multiplier roll.

use super::model::BountyMultiplier;
use super::seed::RandomSource;

const MULTIPLIER_ROLL_RANGE: usize = 100;

pub(super) fn roll_bounty_multiplier(random: &mut RandomSource) -> BountyMultiplier {
    BountyMultiplier::from_roll(random.below(MULTIPLIER_ROLL_RANGE))
}
