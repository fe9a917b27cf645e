//! Houses, hotels and mortgages.

use super::ledger::{self, Payee};
use crate::board::{SpaceIndex, SpaceKind};
use crate::core::{PlayerId, PublicState, RuleResult, RuleViolation};

/// Check that `player` owns the ownable space `space`.
pub(crate) fn check_owner(state: &PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    if !state.board.is_valid(space) {
        return Err(RuleViolation::InvalidSpace { space });
    }
    if !state.board.def(space).is_ownable() {
        return Err(RuleViolation::NotOwnable { space });
    }
    if state.board.owner(space) != Some(player) {
        return Err(RuleViolation::NotOwner { player, space });
    }
    Ok(())
}

/// Whether `build_house` would currently succeed, ignoring cash.
#[must_use]
pub fn can_build(state: &PublicState, player: PlayerId, space: SpaceIndex) -> bool {
    check_build(state, player, space).is_ok()
}

fn check_build(state: &PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_owner(state, player, space)?;
    let SpaceKind::Property(group) = state.board.def(space).kind else {
        return Err(RuleViolation::NotOwnable { space });
    };
    if !state.board.owns_group(player, group) {
        return Err(RuleViolation::IncompleteGroup);
    }
    if state.board.group_has_mortgage(group) {
        return Err(RuleViolation::GroupHasMortgage);
    }

    let buildings = state.board.state(space).buildings;
    if buildings >= 5 {
        return Err(RuleViolation::MaxBuildings { space });
    }
    let (min, _) = state.board.group_building_range(group);
    if buildings != min {
        return Err(RuleViolation::UnevenBuilding);
    }
    if buildings == 4 {
        if state.supply.hotels == 0 {
            return Err(RuleViolation::NoHotelsInSupply);
        }
    } else if state.supply.houses == 0 {
        return Err(RuleViolation::NoHousesInSupply);
    }
    Ok(())
}

pub(crate) fn build_house(state: &mut PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_build(state, player, space)?;
    let def = state.board.def(space);
    let available = state.player(player).spendable();
    if available < def.house_cost {
        return Err(RuleViolation::InsufficientFunds {
            required: def.house_cost,
            available,
        });
    }

    ledger::pay(state, player, Payee::Bank, def.house_cost);
    let tile = state.board.state_mut(space);
    tile.buildings += 1;
    let hotel = tile.has_hotel();
    if hotel {
        state.supply.hotels -= 1;
        state.supply.houses += 4;
    } else {
        state.supply.houses -= 1;
    }

    let what = if hotel { "a hotel" } else { "a house" };
    let message = format!("{} builds {what} on {}", state.name(player), def.name);
    state.log(message);
    Ok(())
}

/// Whether `sell_house` would currently succeed.
#[must_use]
pub fn can_sell(state: &PublicState, player: PlayerId, space: SpaceIndex) -> bool {
    check_sell(state, player, space).is_ok()
}

fn check_sell(state: &PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_owner(state, player, space)?;
    let buildings = state.board.state(space).buildings;
    if buildings == 0 {
        return Err(RuleViolation::NoBuildings { space });
    }
    if let Some(group) = state.board.def(space).group() {
        let (_, max) = state.board.group_building_range(group);
        if buildings != max {
            return Err(RuleViolation::UnevenBuilding);
        }
    }
    if buildings == 5 && state.supply.houses < 4 {
        return Err(RuleViolation::NoHousesInSupply);
    }
    Ok(())
}

/// Sell one building back to the bank at half its cost.
pub(crate) fn sell_house(state: &mut PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_sell(state, player, space)?;
    let def = state.board.def(space);
    let tile = state.board.state_mut(space);
    let hotel = tile.has_hotel();
    tile.buildings -= 1;
    if hotel {
        state.supply.hotels += 1;
        state.supply.houses -= 4;
    } else {
        state.supply.houses += 1;
    }

    let refund = def.house_cost / 2;
    let what = if hotel { "a hotel" } else { "a house" };
    let message = format!("{} sells {what} on {} for ${refund}", state.name(player), def.name);
    state.log(message);
    ledger::receive_from_bank(state, player, refund);
    Ok(())
}

pub(crate) fn mortgage(state: &mut PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_owner(state, player, space)?;
    if state.board.state(space).mortgaged {
        return Err(RuleViolation::AlreadyMortgaged { space });
    }
    if state.board.group_of_has_buildings(space) {
        return Err(RuleViolation::BuildingsInGroup);
    }

    let def = state.board.def(space);
    state.board.state_mut(space).mortgaged = true;
    let value = def.mortgage_value();
    let message = format!("{} mortgages {} for ${value}", state.name(player), def.name);
    state.log(message);
    ledger::receive_from_bank(state, player, value);
    Ok(())
}

pub(crate) fn unmortgage(state: &mut PublicState, player: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    check_owner(state, player, space)?;
    if !state.board.state(space).mortgaged {
        return Err(RuleViolation::NotMortgaged { space });
    }

    let def = state.board.def(space);
    let cost = state.rules.unmortgage_cost(def.mortgage_value());
    let available = state.player(player).spendable();
    if available < cost {
        return Err(RuleViolation::InsufficientFunds {
            required: cost,
            available,
        });
    }

    ledger::pay(state, player, Payee::Bank, cost);
    state.board.state_mut(space).mortgaged = false;
    let message = format!("{} lifts the mortgage on {} for ${cost}", state.name(player), def.name);
    state.log(message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;

    const A: PlayerId = PlayerId::new(0);

    fn state_with_dark_blue() -> PublicState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        let mut s = PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect());
        s.board.state_mut(37).owner = Some(A);
        s.board.state_mut(39).owner = Some(A);
        s
    }

    #[test]
    fn test_even_building() {
        let mut s = state_with_dark_blue();
        build_house(&mut s, A, 39).unwrap();
        assert_eq!(build_house(&mut s, A, 39), Err(RuleViolation::UnevenBuilding));
        build_house(&mut s, A, 37).unwrap();
        build_house(&mut s, A, 39).unwrap();

        assert_eq!(s.board.group_building_range(crate::board::ColorGroup::DarkBlue), (1, 2));
        assert_eq!(s.supply.houses, 29);
        assert_eq!(s.player(A).cash, 900);
        assert_eq!(sell_house(&mut s, A, 37), Err(RuleViolation::UnevenBuilding));
    }

    #[test]
    fn test_hotel_swaps_supply() {
        let mut s = state_with_dark_blue();
        s.players[A].cash = 10_000;
        for _ in 0..4 {
            build_house(&mut s, A, 37).unwrap();
            build_house(&mut s, A, 39).unwrap();
        }
        assert_eq!(s.supply.houses, 24);

        build_house(&mut s, A, 37).unwrap();
        assert!(s.board.state(37).has_hotel());
        assert_eq!(s.supply.houses, 28);
        assert_eq!(s.supply.hotels, 11);

        sell_house(&mut s, A, 37).unwrap();
        assert_eq!(s.board.state(37).buildings, 4);
        assert_eq!(s.supply.houses, 24);
        assert_eq!(s.supply.hotels, 12);
    }

    #[test]
    fn test_supply_limits() {
        let mut s = state_with_dark_blue();
        s.supply.houses = 1;
        build_house(&mut s, A, 37).unwrap();
        assert_eq!(build_house(&mut s, A, 39), Err(RuleViolation::NoHousesInSupply));
    }

    #[test]
    fn test_selling_hotel_needs_houses() {
        let mut s = state_with_dark_blue();
        s.board.state_mut(37).buildings = 5;
        s.board.state_mut(39).buildings = 5;
        s.supply.houses = 3;
        assert_eq!(sell_house(&mut s, A, 37), Err(RuleViolation::NoHousesInSupply));
    }

    #[test]
    fn test_build_requirements() {
        let mut s = state_with_dark_blue();
        s.board.state_mut(39).owner = None;
        assert_eq!(build_house(&mut s, A, 37), Err(RuleViolation::IncompleteGroup));

        s.board.state_mut(39).owner = Some(A);
        s.board.state_mut(39).mortgaged = true;
        assert_eq!(build_house(&mut s, A, 37), Err(RuleViolation::GroupHasMortgage));
    }

    #[test]
    fn test_mortgage_cycle() {
        let mut s = state_with_dark_blue();
        mortgage(&mut s, A, 39).unwrap();
        assert_eq!(s.player(A).cash, 1700);
        assert_eq!(mortgage(&mut s, A, 39), Err(RuleViolation::AlreadyMortgaged { space: 39 }));

        unmortgage(&mut s, A, 39).unwrap();
        assert_eq!(s.player(A).cash, 1480);
        assert!(s.money_is_conserved());
    }

    #[test]
    fn test_mortgage_blocked_by_buildings() {
        let mut s = state_with_dark_blue();
        build_house(&mut s, A, 39).unwrap();
        assert_eq!(mortgage(&mut s, A, 37), Err(RuleViolation::BuildingsInGroup));
    }
}
