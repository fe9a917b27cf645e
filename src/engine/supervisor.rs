//! Turn and auction deadlines.
//!
//! The supervisor keeps a game moving when a participant stops responding.
//! Every forced transition is an ordinary command run through
//! `RulesEngine::apply_command`, so a timeout can never produce a state a
//! player could not have produced.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::monopoly::Monopoly;
use super::turn;
use crate::core::{Command, GameState, PendingAction, PlayerId, PublicState};
use crate::rules::RulesEngine;

/// Deadline lengths in logical milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Time allowed for any step of a turn, including pending decisions.
    pub turn_timeout_ms: u64,
    /// Time allowed between bids.
    pub auction_timeout_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            turn_timeout_ms: 60_000,
            auction_timeout_ms: 15_000,
        }
    }
}

impl SupervisorConfig {
    #[must_use]
    pub fn with_turn_timeout(mut self, ms: u64) -> Self {
        self.turn_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn with_auction_timeout(mut self, ms: u64) -> Self {
        self.auction_timeout_ms = ms;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadlineKind {
    Turn,
    Auction,
}

/// A deadline armed for one state version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    pub at_ms: u64,
    pub version: u64,
    pub kind: DeadlineKind,
}

#[derive(Clone, Debug, Default)]
pub struct Supervisor {
    config: SupervisorConfig,
    deadline: Option<Deadline>,
}

impl Supervisor {
    #[must_use]
    pub fn new(config: SupervisorConfig) -> Self {
        Self { config, deadline: None }
    }

    #[must_use]
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Arm a fresh deadline for the state at `version`.
    pub fn arm(&mut self, state: &PublicState, version: u64, now_ms: u64) {
        if state.is_game_over() {
            self.deadline = None;
            return;
        }
        let (kind, length) = if state.auction.is_some() {
            (DeadlineKind::Auction, self.config.auction_timeout_ms)
        } else {
            (DeadlineKind::Turn, self.config.turn_timeout_ms)
        };
        self.deadline = Some(Deadline {
            at_ms: now_ms.saturating_add(length),
            version,
            kind,
        });
    }

    /// The armed deadline for `version` has passed.
    #[must_use]
    pub fn is_expired(&self, version: u64, now_ms: u64) -> bool {
        self.deadline
            .is_some_and(|d| d.version == version && now_ms >= d.at_ms)
    }

    /// Resolve whatever the game is waiting on. Returns the number of
    /// commands that were applied.
    pub fn force_timeout(&mut self, rules: &Monopoly, game: &mut GameState) -> usize {
        self.deadline = None;
        let state = &game.public;
        if state.is_game_over() {
            return 0;
        }

        let forced: Vec<(PlayerId, Command)> = if let Some(auction) = &state.auction {
            auction
                .active_bidders()
                .filter(|&p| !auction.is_leader(p))
                .map(|p| (p, Command::PassBid))
                .collect()
        } else {
            match state.pending {
                Some(PendingAction::BuyOrAuction { player, .. }) => vec![(player, Command::DeclineProperty)],
                Some(pending) => vec![(pending.player(), Command::DeclareBankruptcy)],
                None if turn::can_end_turn(state) => vec![(state.current_player(), Command::EndTurn)],
                None => {
                    let player = state.current_player();
                    let message = format!("{} timed out", state.name(player));
                    game.public.log(message);
                    warn!(player = %player, "turn timed out before rolling");
                    return match rules.skip_turn(game) {
                        Ok(()) => 1,
                        Err(error) => {
                            warn!(%error, "forced skip rejected");
                            0
                        }
                    };
                }
            }
        };

        let mut applied = 0;
        for (player, command) in forced {
            let message = format!("{} timed out", game.public.name(player));
            game.public.log(message);
            warn!(player = %player, command = ?command.kind(), "forcing command after timeout");
            match rules.apply_command(game, player, &command) {
                Ok(()) => applied += 1,
                Err(error) => warn!(player = %player, %error, "forced command rejected"),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceRoll;
    use crate::engine::GameBuilder;

    fn setup() -> (Monopoly, GameState) {
        GameBuilder::new().player_count(3).fixed_order().build(1)
    }

    #[test]
    fn test_deadline_kinds_and_expiry() {
        let (_, game) = setup();
        let mut supervisor = Supervisor::new(SupervisorConfig::default().with_turn_timeout(100));
        supervisor.arm(&game.public, 3, 1_000);

        let deadline = supervisor.deadline().unwrap();
        assert_eq!(deadline.kind, DeadlineKind::Turn);
        assert_eq!(deadline.at_ms, 1_100);
        assert!(!supervisor.is_expired(3, 1_099));
        assert!(supervisor.is_expired(3, 1_100));
        assert!(!supervisor.is_expired(4, 5_000));
    }

    #[test]
    fn test_timeout_before_roll_skips_turn() {
        let (rules, mut game) = setup();
        let mut supervisor = Supervisor::new(SupervisorConfig::default());
        assert_eq!(supervisor.force_timeout(&rules, &mut game), 1);
        assert_eq!(game.public.current_player(), PlayerId::new(1));
        assert!(game.public.log.iter().any(|e| e.message.contains("timed out")));
    }

    #[test]
    fn test_timeout_declines_then_closes_auction() {
        let (rules, mut game) = setup();
        let mut supervisor = Supervisor::new(SupervisorConfig::default());
        let a = PlayerId::new(0);
        game.queue_dice([DiceRoll::new(1, 2)]);
        rules.apply_command(&mut game, a, &Command::Roll).unwrap();

        supervisor.force_timeout(&rules, &mut game);
        assert!(game.public.auction.is_some());

        rules
            .apply_command(&mut game, PlayerId::new(2), &Command::PlaceBid { amount: 20 })
            .unwrap();
        assert_eq!(supervisor.force_timeout(&rules, &mut game), 2);
        assert!(game.public.auction.is_none());
        assert_eq!(game.public.board.owner(3), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_timeout_with_debt_declares_bankruptcy() {
        let (rules, mut game) = setup();
        let mut supervisor = Supervisor::new(SupervisorConfig::default());
        let b = PlayerId::new(1);
        game.public.players[b].cash = -10;
        game.public.ledger.initial -= 1510;
        game.public.pending = Some(PendingAction::PayOrBankrupt { player: b, shortfall: 10 });

        assert_eq!(supervisor.force_timeout(&rules, &mut game), 1);
        assert!(game.public.player(b).bankrupt);
        assert!(game.public.money_is_conserved());
    }
}
