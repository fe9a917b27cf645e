//! Movement, landing resolution and card effects.

use tracing::debug;

use super::ledger::{self, Payee};
use super::rent::{rent_due, RentMode};
use super::turn;
use crate::board::{layout, SpaceIndex, SpaceKind, BOARD_SIZE};
use crate::cards::{CardEffect, DeckKind};
use crate::core::{GameState, PendingAction, PlayerId, PublicState};

/// Move `player` forward, paying the GO bonus when GO is passed or reached.
pub(crate) fn move_by(state: &mut PublicState, player: PlayerId, steps: usize) {
    let from = state.player(player).position;
    let to = (from + steps) % BOARD_SIZE;
    state.players[player].position = to;
    if from + steps >= BOARD_SIZE {
        let bonus = state.rules.go_bonus;
        ledger::receive_from_bank(state, player, bonus);
        let message = format!("{} passes GO and collects ${bonus}", state.name(player));
        state.log(message);
    }
}

/// Move forward by a dice total and resolve the landing.
pub(crate) fn advance(game: &mut GameState, player: PlayerId, steps: usize) {
    move_by(&mut game.public, player, steps);
    resolve_landing(game, player, RentMode::Standard);
}

/// Move forward to `target` and resolve the landing.
fn advance_to(game: &mut GameState, player: PlayerId, target: SpaceIndex, mode: RentMode) {
    let from = game.public.player(player).position;
    let steps = (target + BOARD_SIZE - from) % BOARD_SIZE;
    move_by(&mut game.public, player, steps);
    resolve_landing(game, player, mode);
}

/// Apply the effect of the space `player` stands on.
pub(crate) fn resolve_landing(game: &mut GameState, player: PlayerId, mode: RentMode) {
    let state = &mut game.public;
    let space = state.player(player).position;
    let def = state.board.def(space);
    let message = format!("{} lands on {}", state.name(player), def.name);
    state.log(message);

    match def.kind {
        SpaceKind::Property(_) | SpaceKind::Railroad | SpaceKind::Utility => {
            land_on_ownable(state, player, space, mode);
        }
        SpaceKind::Tax(amount) => {
            ledger::pay(state, player, Payee::FreeParking, amount);
            let message = format!("{} pays ${amount} {}", state.name(player), def.name);
            state.log(message);
        }
        SpaceKind::Chance => draw_card(game, player, DeckKind::Chance),
        SpaceKind::CommunityChest => draw_card(game, player, DeckKind::CommunityChest),
        SpaceKind::GoToJail => turn::send_to_jail(state, player),
        SpaceKind::FreeParking => {
            let pool = std::mem::take(&mut state.free_parking);
            if pool > 0 {
                ledger::deposit(state, player, pool);
                let message = format!("{} collects ${pool} from free parking", state.name(player));
                state.log(message);
            }
        }
        SpaceKind::Go | SpaceKind::Jail => {}
    }
}

fn land_on_ownable(state: &mut PublicState, player: PlayerId, space: SpaceIndex, mode: RentMode) {
    match state.board.owner(space) {
        None => {
            state.pending = Some(PendingAction::BuyOrAuction { player, space });
        }
        Some(owner) if owner == player => {}
        Some(owner) => {
            let dice = state.turn.last_roll.map_or(0, |r| r.total());
            let rent = rent_due(&state.board, space, dice, mode);
            if rent > 0 {
                let message = format!("{} pays ${rent} rent to {}", state.name(player), state.name(owner));
                state.log(message);
                ledger::pay(state, player, Payee::Player(owner), rent);
            }
        }
    }
}

fn draw_card(game: &mut GameState, player: PlayerId, kind: DeckKind) {
    let card = {
        let GameState {
            chance,
            community_chest,
            rng,
            ..
        } = game;
        let deck = match kind {
            DeckKind::Chance => chance,
            DeckKind::CommunityChest => community_chest,
        };
        deck.draw(rng)
    };

    let message = format!("{} draws {}: {}", game.public.name(player), kind.name(), card.text);
    game.public.log(message);
    debug!(player = %player, card = card.text, "card drawn");
    apply_card(game, player, card.effect);
}

fn apply_card(game: &mut GameState, player: PlayerId, effect: CardEffect) {
    match effect {
        CardEffect::AdvanceTo(target) => advance_to(game, player, target, RentMode::Standard),
        CardEffect::AdvanceToNearestRailroad => {
            let target = layout::nearest_railroad(game.public.player(player).position);
            advance_to(game, player, target, RentMode::DoubleRailroad);
        }
        CardEffect::AdvanceToNearestUtility => {
            let target = layout::nearest_utility(game.public.player(player).position);
            advance_to(game, player, target, RentMode::UtilityTenTimes);
        }
        CardEffect::MoveBack(steps) => {
            let from = game.public.player(player).position;
            game.public.players[player].position = (from + BOARD_SIZE - usize::from(steps)) % BOARD_SIZE;
            resolve_landing(game, player, RentMode::Standard);
        }
        CardEffect::Collect(amount) => ledger::receive_from_bank(&mut game.public, player, amount),
        CardEffect::Pay(amount) => ledger::pay(&mut game.public, player, Payee::FreeParking, amount),
        CardEffect::CollectFromEach(amount) => {
            let others: Vec<PlayerId> = game.public.active_players().filter(|&p| p != player).collect();
            for other in others {
                ledger::pay(&mut game.public, other, Payee::Player(player), amount);
            }
        }
        CardEffect::PayEach(amount) => {
            let others: Vec<PlayerId> = game.public.active_players().filter(|&p| p != player).collect();
            for other in others {
                ledger::pay(&mut game.public, player, Payee::Player(other), amount);
            }
        }
        CardEffect::GoToJail => turn::send_to_jail(&mut game.public, player),
        CardEffect::JailCard => game.public.players[player].jail_cards += 1,
        CardEffect::Repairs { per_house, per_hotel } => {
            let (houses, hotels) = game.public.board.building_counts(player);
            let amount = i64::from(houses) * per_house + i64::from(hotels) * per_hotel;
            if amount > 0 {
                ledger::pay(&mut game.public, player, Payee::FreeParking, amount);
                let message = format!("{} pays ${amount} for repairs", game.public.name(player));
                game.public.log(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::{DiceRoll, GameRng, RulesConfig};

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn game() -> GameState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        let public = PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect());
        GameState::new(public, GameRng::new(5))
    }

    #[test]
    fn test_passing_go_pays_bonus() {
        let mut g = game();
        g.public.players[A].position = 38;
        move_by(&mut g.public, A, 4);
        assert_eq!(g.public.player(A).position, 2);
        assert_eq!(g.public.player(A).cash, 1700);
        assert!(g.public.money_is_conserved());
    }

    #[test]
    fn test_unowned_sets_pending_purchase() {
        let mut g = game();
        advance(&mut g, A, 1);
        assert_eq!(g.public.pending, Some(PendingAction::BuyOrAuction { player: A, space: 1 }));
    }

    #[test]
    fn test_tax_feeds_pool_and_free_parking_pays_out() {
        let mut g = game();
        advance(&mut g, A, 4);
        assert_eq!(g.public.free_parking, 200);
        assert_eq!(g.public.player(A).cash, 1300);

        advance(&mut g, B, 20);
        assert_eq!(g.public.free_parking, 0);
        assert_eq!(g.public.player(B).cash, 1700);
        assert!(g.public.money_is_conserved());
    }

    #[test]
    fn test_rent_paid_to_owner() {
        let mut g = game();
        g.public.board.state_mut(5).owner = Some(B);
        g.public.turn.last_roll = Some(DiceRoll::new(2, 3));
        advance(&mut g, A, 5);
        assert_eq!(g.public.player(A).cash, 1475);
        assert_eq!(g.public.player(B).cash, 1525);
    }

    #[test]
    fn test_nearest_railroad_card_doubles_rent() {
        let mut g = game();
        g.public.board.state_mut(15).owner = Some(B);
        // Chance card 4 is "Advance to the nearest Railroad"
        g.chance = Deck::stacked(DeckKind::Chance, vec![4]);
        g.public.players[A].position = 7;
        resolve_landing(&mut g, A, RentMode::Standard);

        assert_eq!(g.public.player(A).position, 15);
        assert_eq!(g.public.player(B).cash, 1550);
    }

    #[test]
    fn test_go_back_three_lands_on_tax() {
        let mut g = game();
        g.chance = Deck::stacked(DeckKind::Chance, vec![9]);
        g.public.players[A].position = 7;
        resolve_landing(&mut g, A, RentMode::Standard);

        assert_eq!(g.public.player(A).position, 4);
        assert_eq!(g.public.free_parking, 200);
    }

    #[test]
    fn test_birthday_collects_from_each() {
        let mut g = game();
        // Community chest card 8 is the birthday card
        g.community_chest = Deck::stacked(DeckKind::CommunityChest, vec![8]);
        g.public.players[A].position = 2;
        resolve_landing(&mut g, A, RentMode::Standard);

        assert_eq!(g.public.player(A).cash, 1510);
        assert_eq!(g.public.player(B).cash, 1490);
    }

    #[test]
    fn test_go_to_jail_space() {
        let mut g = game();
        g.public.players[A].position = 25;
        advance(&mut g, A, 5);
        assert_eq!(g.public.player(A).position, layout::JAIL);
        assert!(g.public.player(A).in_jail);
    }
}
