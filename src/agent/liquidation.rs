//! Raising cash to cover a debt.
//!
//! Buildings go first, from the least valuable group, then mortgages in
//! ascending keep-priority. With nothing left to sell the agent declares
//! bankruptcy.

use crate::board::{layout, ColorGroup};
use crate::core::Command;
use crate::engine::can_sell;
use crate::valuation::Valuation;

/// Next command toward covering the agent's obligation.
#[must_use]
pub fn next_liquidation_step(valuation: &Valuation<'_>) -> Command {
    let state = valuation.state();
    let board = &state.board;
    let me = valuation.me();

    let mut built: Vec<ColorGroup> = ColorGroup::ALL
        .into_iter()
        .filter(|&g| board.owns_group(me, g) && board.group_has_buildings(g))
        .collect();
    built.sort_by(|a, b| valuation.group_rank(*a).total_cmp(&valuation.group_rank(*b)));

    let sale = built
        .into_iter()
        .flat_map(|g| layout::group_members(g).iter().copied())
        .find(|&space| can_sell(state, me, space));
    if let Some(space) = sale {
        return Command::SellHouse { space };
    }

    let mortgage = board
        .owned_by(me)
        .into_iter()
        .filter(|&space| !board.state(space).mortgaged && !board.group_of_has_buildings(space))
        .min_by(|a, b| valuation.mortgage_priority(*a).total_cmp(&valuation.mortgage_priority(*b)));
    match mortgage {
        Some(space) => Command::MortgageProperty { space },
        None => Command::DeclareBankruptcy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::DifficultyProfile;
    use crate::core::{PlayerId, PublicState, RulesConfig};

    const ME: PlayerId = PlayerId::new(0);

    fn state() -> PublicState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect())
    }

    #[test]
    fn test_sells_from_cheapest_group_first() {
        let mut s = state();
        for space in [1, 3, 37, 39] {
            s.board.state_mut(space).owner = Some(ME);
        }
        s.board.state_mut(1).buildings = 1;
        s.board.state_mut(37).buildings = 1;
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        assert_eq!(next_liquidation_step(&v), Command::SellHouse { space: 1 });
    }

    #[test]
    fn test_mortgages_lowest_priority_after_buildings() {
        let mut s = state();
        s.board.state_mut(5).owner = Some(ME);
        s.board.state_mut(12).owner = Some(ME);
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        assert_eq!(next_liquidation_step(&v), Command::MortgageProperty { space: 12 });
    }

    #[test]
    fn test_bankruptcy_when_nothing_left() {
        let mut s = state();
        s.board.state_mut(5).owner = Some(ME);
        s.board.state_mut(5).mortgaged = true;
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        assert_eq!(next_liquidation_step(&v), Command::DeclareBankruptcy);
    }
}
