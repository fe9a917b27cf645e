//! How unwilling the agent is to fight for a lot.

use crate::board::{layout, SpaceIndex, SpaceKind};
use crate::valuation::Valuation;

/// Reluctance in `[0, 1]`; 0 means the agent wants the lot badly.
///
/// Rises as the board fills up and as the agent gets poorer than the table
/// average. Falls when the agent or an opponent already holds part of the
/// group. Targets that complete or block a monopoly are never reluctant.
#[must_use]
pub fn calculate_bid_reluctance(valuation: &Valuation<'_>, space: SpaceIndex) -> f64 {
    let state = valuation.state();
    let board = &state.board;
    let me = valuation.me();

    if valuation.completes_monopoly(me, space) || valuation.blocks_opponent(space) {
        return 0.0;
    }

    let (own, opponent_best) = match board.def(space).kind {
        SpaceKind::Property(group) => {
            let own = board.group_owned_count(me, group);
            let best = state
                .active_players()
                .filter(|&p| p != me)
                .map(|p| board.group_owned_count(p, group))
                .max()
                .unwrap_or(0);
            (own, best)
        }
        SpaceKind::Railroad => {
            let best = state
                .active_players()
                .filter(|&p| p != me)
                .map(|p| board.railroads_owned(p))
                .max()
                .unwrap_or(0);
            (board.railroads_owned(me), best)
        }
        SpaceKind::Utility => (board.utilities_owned(me), 0),
        _ => (0, 0),
    };

    let active = state.active_count().max(1) as f64;
    let average: f64 = state
        .active_players()
        .map(|p| state.player(p).spendable() as f64)
        .sum::<f64>()
        / active;
    let relative_wealth = if average > 0.0 {
        valuation.cash() as f64 / average
    } else {
        1.0
    };

    let concentration = opponent_best as f64 / group_size(space) as f64;
    let reluctance = 0.2 + 0.4 * board.saturation() - 0.15 * own as f64 - 0.2 * concentration
        + 0.15 * (1.0 - relative_wealth).clamp(-1.0, 1.0);
    reluctance.clamp(0.0, 1.0)
}

fn group_size(space: SpaceIndex) -> usize {
    match layout::space(space).kind {
        SpaceKind::Property(group) => layout::group_members(group).len(),
        SpaceKind::Railroad => layout::RAILROADS.len(),
        SpaceKind::Utility => layout::UTILITIES.len(),
        _ => 1,
    }
}
