//! Dice, jail and turn progression.

use tracing::debug;

use super::landing;
use super::ledger::{self, Payee};
use crate::board::JAIL;
use crate::core::{GameState, PlayerId, PublicState, RuleResult, RuleViolation, TurnFlags};

/// Consecutive doubles that send a player to jail.
const DOUBLES_TO_JAIL: u8 = 3;

/// Whether the current player may roll.
#[must_use]
pub fn can_roll(state: &PublicState) -> bool {
    !state.turn.rolled || state.turn.roll_again
}

/// Whether the current player has finished rolling.
#[must_use]
pub fn can_end_turn(state: &PublicState) -> bool {
    state.turn.rolled && !state.turn.roll_again
}

pub(crate) fn roll(game: &mut GameState, player: PlayerId) -> RuleResult<()> {
    if !can_roll(&game.public) {
        return Err(RuleViolation::CannotRoll);
    }

    let dice = game.roll_dice();
    let state = &mut game.public;
    state.turn.rolled = true;
    state.turn.roll_again = false;
    state.turn.last_roll = Some(dice);
    let message = format!("{} rolls {dice}", state.name(player));
    state.log(message);
    debug!(player = %player, first = dice.first, second = dice.second, "roll");

    if state.player(player).in_jail {
        if dice.is_double() {
            release(state, player);
            let message = format!("{} rolls doubles and leaves jail", state.name(player));
            state.log(message);
        } else {
            state.players[player].jail_turns += 1;
            if state.player(player).jail_turns < state.rules.max_jail_turns {
                let message = format!("{} stays in jail", state.name(player));
                state.log(message);
                return Ok(());
            }
            let fine = state.rules.jail_fine;
            ledger::pay(state, player, Payee::Bank, fine);
            release(state, player);
            let message = format!("{} pays the ${fine} fine after three tries", state.name(player));
            state.log(message);
        }
        landing::advance(game, player, usize::from(dice.total()));
        return Ok(());
    }

    if dice.is_double() {
        state.turn.doubles += 1;
        if state.turn.doubles >= DOUBLES_TO_JAIL {
            let message = format!("{} rolls three doubles in a row", state.name(player));
            state.log(message);
            send_to_jail(state, player);
            return Ok(());
        }
        state.turn.roll_again = true;
    }

    landing::advance(game, player, usize::from(dice.total()));
    Ok(())
}

fn release(state: &mut PublicState, player: PlayerId) {
    let account = &mut state.players[player];
    account.in_jail = false;
    account.jail_turns = 0;
}

/// Move a player directly to jail. Their turn may not continue rolling.
pub(crate) fn send_to_jail(state: &mut PublicState, player: PlayerId) {
    {
        let account = &mut state.players[player];
        account.position = JAIL;
        account.in_jail = true;
        account.jail_turns = 0;
    }
    if state.current_player() == player {
        state.turn.roll_again = false;
        state.turn.doubles = 0;
    }
    let message = format!("{} goes to jail", state.name(player));
    state.log(message);
}

fn check_jail_option(state: &PublicState, player: PlayerId) -> RuleResult<()> {
    if !state.player(player).in_jail {
        return Err(RuleViolation::NotInJail { player });
    }
    if state.turn.rolled {
        return Err(RuleViolation::AlreadyRolled);
    }
    Ok(())
}

pub(crate) fn pay_jail_fine(state: &mut PublicState, player: PlayerId) -> RuleResult<()> {
    check_jail_option(state, player)?;
    let fine = state.rules.jail_fine;
    let available = state.player(player).spendable();
    if available < fine {
        return Err(RuleViolation::InsufficientFunds {
            required: fine,
            available,
        });
    }
    ledger::pay(state, player, Payee::Bank, fine);
    release(state, player);
    let message = format!("{} pays ${fine} to leave jail", state.name(player));
    state.log(message);
    Ok(())
}

pub(crate) fn use_jail_card(state: &mut PublicState, player: PlayerId) -> RuleResult<()> {
    check_jail_option(state, player)?;
    if state.player(player).jail_cards == 0 {
        return Err(RuleViolation::NoJailCard);
    }
    state.players[player].jail_cards -= 1;
    release(state, player);
    let message = format!("{} uses a get-out-of-jail card", state.name(player));
    state.log(message);
    Ok(())
}

pub(crate) fn end_turn(state: &mut PublicState) -> RuleResult<()> {
    if !state.turn.rolled {
        return Err(RuleViolation::MustRollFirst);
    }
    if state.turn.roll_again {
        return Err(RuleViolation::MustRollAgain);
    }
    advance_turn(state);
    Ok(())
}

/// Hand the turn to the next non-bankrupt player and reset per-turn flags.
pub(crate) fn advance_turn(state: &mut PublicState) {
    let n = state.turn_order.len();
    let next = (1..=n)
        .map(|offset| (state.current + offset) % n)
        .find(|&i| state.player(state.turn_order[i]).is_active());
    let Some(next) = next else {
        return;
    };

    state.current = next;
    state.turn_number += 1;
    state.turn = TurnFlags::default();
    let message = format!("It is {}'s turn", state.name(state.current_player()));
    state.log(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceRoll, GameRng, RulesConfig};

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn game() -> GameState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        let public = PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect());
        GameState::new(public, GameRng::new(11))
    }

    #[test]
    fn test_triple_doubles_jails() {
        let mut g = game();
        g.queue_dice([DiceRoll::new(3, 3), DiceRoll::new(2, 2), DiceRoll::new(1, 1)]);
        roll(&mut g, A).unwrap();
        assert!(g.public.turn.roll_again);
        g.public.pending = None;
        roll(&mut g, A).unwrap();
        g.public.pending = None;
        roll(&mut g, A).unwrap();

        assert!(g.public.player(A).in_jail);
        assert_eq!(g.public.player(A).position, JAIL);
        assert!(!g.public.turn.roll_again);
        assert_eq!(roll(&mut g, A), Err(RuleViolation::CannotRoll));
    }

    #[test]
    fn test_jail_doubles_release_without_bonus_roll() {
        let mut g = game();
        send_to_jail(&mut g.public, A);
        g.queue_dice([DiceRoll::new(4, 4)]);
        roll(&mut g, A).unwrap();

        assert!(!g.public.player(A).in_jail);
        assert_eq!(g.public.player(A).position, 18);
        assert!(!g.public.turn.roll_again);
    }

    #[test]
    fn test_third_failed_attempt_pays_fine() {
        let mut g = game();
        send_to_jail(&mut g.public, A);
        g.public.players[A].jail_turns = 2;
        g.queue_dice([DiceRoll::new(1, 2)]);
        roll(&mut g, A).unwrap();

        assert!(!g.public.player(A).in_jail);
        assert_eq!(g.public.player(A).position, 13);
        assert_eq!(g.public.player(A).cash, 1450);
    }

    #[test]
    fn test_failed_attempt_stays() {
        let mut g = game();
        send_to_jail(&mut g.public, A);
        g.queue_dice([DiceRoll::new(1, 2)]);
        roll(&mut g, A).unwrap();

        assert!(g.public.player(A).in_jail);
        assert_eq!(g.public.player(A).jail_turns, 1);
        assert_eq!(end_turn(&mut g.public), Ok(()));
        assert_eq!(g.public.current_player(), B);
    }

    #[test]
    fn test_jail_card_and_fine() {
        let mut g = game();
        assert_eq!(use_jail_card(&mut g.public, A), Err(RuleViolation::NotInJail { player: A }));

        send_to_jail(&mut g.public, A);
        assert_eq!(use_jail_card(&mut g.public, A), Err(RuleViolation::NoJailCard));
        g.public.players[A].jail_cards = 1;
        use_jail_card(&mut g.public, A).unwrap();
        assert!(!g.public.player(A).in_jail);

        send_to_jail(&mut g.public, A);
        pay_jail_fine(&mut g.public, A).unwrap();
        assert_eq!(g.public.player(A).cash, 1450);
    }

    #[test]
    fn test_end_turn_requirements() {
        let mut g = game();
        assert_eq!(end_turn(&mut g.public), Err(RuleViolation::MustRollFirst));
        g.public.turn.rolled = true;
        g.public.turn.roll_again = true;
        assert_eq!(end_turn(&mut g.public), Err(RuleViolation::MustRollAgain));
    }

    #[test]
    fn test_advance_skips_bankrupt() {
        let names: Vec<String> = (0..3).map(|i| format!("P{i}")).collect();
        let mut s = PublicState::new(RulesConfig::default(), &names, PlayerId::all(3).collect());
        s.players[B].bankrupt = true;
        advance_turn(&mut s);
        assert_eq!(s.current_player(), PlayerId::new(2));
        assert_eq!(s.turn_number, 2);
    }
}
