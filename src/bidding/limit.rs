//! Auction limits.

use crate::board::{SpaceIndex, SpaceKind};
use crate::core::RandomSource;
use crate::valuation::Valuation;

/// Cash at which strategic premiums count in full.
const REFERENCE_CASH: f64 = 1_500.0;
/// Premium for completing a monopoly, as a fraction of price.
const MONOPOLY_PREMIUM: f64 = 1.0;
/// Premium for denying an opponent a monopoly, as a fraction of price.
const BLOCK_PREMIUM: f64 = 0.6;
/// Premium per railroad already held, as a fraction of price.
const RAILROAD_PREMIUM: f64 = 0.15;

/// Scales strategic premiums by how much cash the bidder holds.
#[must_use]
pub fn wealth_weight(cash: i64) -> f64 {
    (cash as f64 / REFERENCE_CASH).clamp(0.5, 1.5)
}

/// Highest amount the agent is willing to bid for `space`.
///
/// Never exceeds spendable cash minus the reserve. Noise scales with the
/// profile's randomness.
pub fn calculate_auction_limit<R: RandomSource>(valuation: &Valuation<'_>, space: SpaceIndex, rng: &mut R) -> i64 {
    let profile = valuation.profile();
    let board = &valuation.state().board;
    let me = valuation.me();
    let def = board.def(space);
    let price = def.price as f64;
    let cash = valuation.cash();
    let weight = wealth_weight(cash);

    let mut limit = price * profile.auction_aggressiveness + (cash as f64 * 0.1).min(price * 0.5);
    if profile.monopoly_awareness && valuation.completes_monopoly(me, space) {
        limit += price * MONOPOLY_PREMIUM * weight;
    }
    if profile.blocking_awareness && valuation.blocks_opponent(space) {
        limit += price * BLOCK_PREMIUM * weight;
    }
    if def.kind == SpaceKind::Railroad {
        limit += price * RAILROAD_PREMIUM * board.railroads_owned(me) as f64;
    }
    limit *= 1.0 + rng.spread(profile.randomness);

    let cap = cash - valuation.reserve();
    (limit.round() as i64).min(cap).max(0)
}
