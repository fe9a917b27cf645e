//! Insolvency detection and bankruptcy.
//!
//! After every applied command the engine looks for a player with an
//! obligation (negative cash or a debt). Such a player gets a pending
//! action: `RaiseFunds` when selling and mortgaging could cover it,
//! `PayOrBankrupt` when it could not. Regaining solvency clears it.

use tracing::info;

use super::ledger::{self, Payee};
use super::trade;
use super::turn;
use crate::core::{PendingAction, PlayerId, PublicState, RuleResult, RuleViolation};

/// Set, update or clear the insolvency pending action.
pub(crate) fn check_bankruptcy(state: &mut PublicState) {
    if state.is_game_over() || state.auction.is_some() {
        return;
    }
    match state.pending {
        Some(PendingAction::BuyOrAuction { .. }) => return,
        Some(pending) => {
            let player = pending.player();
            if state.player(player).obligation() <= 0 {
                state.pending = None;
                let message = format!("{} is solvent again", state.name(player));
                state.log(message);
            } else {
                state.pending = Some(insolvency_action(state, player));
                return;
            }
        }
        None => {}
    }

    let debtor = state
        .from_current()
        .find(|&p| state.player(p).is_active() && state.player(p).obligation() > 0);
    if let Some(player) = debtor {
        let action = insolvency_action(state, player);
        let message = match action {
            PendingAction::PayOrBankrupt { shortfall, .. } => format!(
                "{} owes ${shortfall} and cannot raise it",
                state.name(player)
            ),
            _ => format!("{} must raise ${}", state.name(player), state.player(player).obligation()),
        };
        state.log(message);
        state.pending = Some(action);
    }
}

fn insolvency_action(state: &PublicState, player: PlayerId) -> PendingAction {
    let obligation = state.player(player).obligation();
    if state.board.liquidation_value(player) >= obligation {
        PendingAction::RaiseFunds {
            player,
            shortfall: obligation,
        }
    } else {
        PendingAction::PayOrBankrupt {
            player,
            shortfall: obligation,
        }
    }
}

/// Hand everything `player` has to their creditor and remove them from play.
pub(crate) fn declare_bankruptcy(state: &mut PublicState, player: PlayerId) -> RuleResult<()> {
    if state.player(player).obligation() <= 0 {
        return Err(RuleViolation::NoObligation);
    }
    let creditor = state.player(player).debt.map(|d| d.creditor);

    // Buildings go back to the bank at half price first.
    for space in state.board.owned_by(player) {
        let tile = *state.board.state(space);
        if tile.buildings == 0 {
            continue;
        }
        if tile.has_hotel() {
            state.supply.hotels += 1;
        } else {
            state.supply.houses += tile.buildings;
        }
        state.board.state_mut(space).buildings = 0;
        let refund = i64::from(tile.buildings) * state.board.def(space).house_cost / 2;
        ledger::receive_from_bank(state, player, refund);
    }

    let remaining_cash = state.player(player).cash;
    let jail_cards = state.player(player).jail_cards;
    match creditor {
        Some(creditor) => {
            if remaining_cash > 0 {
                state.players[player].debt = None;
                ledger::transfer(state, player, creditor, remaining_cash);
            }
            for space in state.board.owned_by(player) {
                state.board.state_mut(space).owner = Some(creditor);
            }
            state.players[creditor].jail_cards += jail_cards;
        }
        None => {
            if remaining_cash > 0 {
                ledger::pay(state, player, Payee::Bank, remaining_cash);
            }
            for space in state.board.owned_by(player) {
                let tile = state.board.state_mut(space);
                tile.owner = None;
                tile.mortgaged = false;
            }
        }
    }

    let written_off = (-state.player(player).cash).max(0);
    state.ledger.written_off += written_off;
    {
        let account = &mut state.players[player];
        account.cash = 0;
        account.debt = None;
        account.jail_cards = 0;
        account.in_jail = false;
        account.jail_turns = 0;
        account.bankrupt = true;
    }

    // Claims held by the bankrupt player lapse.
    for (_, other) in state.players.iter_mut() {
        if other.debt.is_some_and(|d| d.creditor == player) {
            other.debt = None;
        }
    }

    trade::drop_trades_of(state, player);
    if state.pending.is_some_and(|p| p.player() == player) {
        state.pending = None;
    }

    let message = match creditor {
        Some(creditor) => format!("{} is bankrupt; assets go to {}", state.name(player), state.name(creditor)),
        None => format!("{} is bankrupt; assets return to the bank", state.name(player)),
    };
    state.log(message);
    info!(player = %player, creditor = ?creditor, written_off, "bankruptcy");

    let survivors: Vec<PlayerId> = state.active_players().collect();
    if let [winner] = survivors[..] {
        state.winner = Some(winner);
        let message = format!("{} wins the game", state.name(winner));
        state.log(message);
        info!(winner = %winner, turn = state.turn_number, "game over");
        return Ok(());
    }

    if state.current_player() == player {
        turn::advance_turn(state);
    }
    Ok(())
}
