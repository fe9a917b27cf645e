//! Buy-or-auction decisions.

use crate::board::{SpaceIndex, SpaceKind};
use crate::valuation::{tier_weight, Valuation};

/// Weighted desirability of buying `space` at its printed price.
///
/// Combines affordability after the reserve, game phase, color tier,
/// progress toward the group, blocking value and cash surplus.
#[must_use]
pub fn purchase_score(valuation: &Valuation<'_>, space: SpaceIndex) -> f64 {
    let profile = valuation.profile();
    let board = &valuation.state().board;
    let me = valuation.me();
    let def = board.def(space);
    let price = def.price.max(1) as f64;
    let cash = valuation.cash();

    let affordability = ((cash - def.price - valuation.reserve()) as f64 / price).clamp(-1.0, 1.0);
    let phase = 1.0 - board.saturation();
    let tier = tier_weight(def.kind) - 1.0;

    let progress = match def.kind {
        SpaceKind::Property(group) if profile.monopoly_awareness => 0.15 * board.group_owned_count(me, group) as f64,
        SpaceKind::Railroad => 0.1 * board.railroads_owned(me) as f64,
        SpaceKind::Utility => 0.1 * board.utilities_owned(me) as f64,
        _ => 0.0,
    };
    let block = if profile.blocking_awareness && valuation.blocks_opponent(space) {
        0.4
    } else {
        0.0
    };
    let surplus = ((cash - 1_000) as f64 / 2_000.0).clamp(0.0, 0.2);

    0.35 * affordability + 0.2 * phase + tier + progress + block + surplus
}

/// Buy `space` rather than send it to auction.
#[must_use]
pub fn should_buy(valuation: &Valuation<'_>, space: SpaceIndex) -> bool {
    let price = valuation.state().board.def(space).price;
    if valuation.cash() < price {
        return false;
    }
    if valuation.completes_monopoly(valuation.me(), space) {
        return true;
    }
    purchase_score(valuation, space) >= valuation.profile().buy_threshold
}
