//! Spending surplus cash on owned property: lifting mortgages and building.

use crate::board::{layout, ColorGroup, SpaceIndex};
use crate::engine::can_build;
use crate::valuation::Valuation;

/// Mortgaged property worth redeeming out of surplus cash, most valued first.
#[must_use]
pub fn next_unmortgage(valuation: &Valuation<'_>) -> Option<SpaceIndex> {
    let state = valuation.state();
    let surplus = valuation.surplus();
    state
        .board
        .owned_by(valuation.me())
        .into_iter()
        .filter(|&space| {
            let tile = state.board.state(space);
            tile.mortgaged && state.rules.unmortgage_cost(state.board.def(space).mortgage_value()) <= surplus
        })
        .max_by(|a, b| valuation.mortgage_priority(*a).total_cmp(&valuation.mortgage_priority(*b)))
}

/// Next house to build out of surplus cash, best group first.
#[must_use]
pub fn next_build(valuation: &Valuation<'_>) -> Option<SpaceIndex> {
    let state = valuation.state();
    let me = valuation.me();
    let surplus = valuation.surplus();

    let mut groups: Vec<ColorGroup> = ColorGroup::ALL
        .into_iter()
        .filter(|&g| state.board.owns_group(me, g))
        .collect();
    groups.sort_by(|a, b| valuation.group_rank(*b).total_cmp(&valuation.group_rank(*a)));

    groups
        .into_iter()
        .flat_map(|g| layout::group_members(g).iter().copied())
        .find(|&space| state.board.def(space).house_cost <= surplus && can_build(state, me, space))
}
