//! The rules engine and game construction.
//!
//! `Monopoly::apply_command` is the single entry point for state changes:
//!
//! 1. Gate the command against game over, auction and pending action
//! 2. Run the handler on a clone of the state
//! 3. Sweep debts and re-check solvency
//! 4. Record the command and commit
//!
//! A rejected command leaves the caller's state untouched.

use tracing::{debug, info};

use super::{auction, bankruptcy, building, ledger, trade, turn};
use crate::core::{
    Command, CommandKind, CommandRecord, GameRng, GameState, PendingAction, PlayerId, PublicState, RuleResult,
    RuleViolation, RulesConfig,
};
use crate::rules::{GameResult, RulesEngine};

/// The rules engine for the standard board.
#[derive(Clone, Debug, Default)]
pub struct Monopoly {
    config: RulesConfig,
}

impl Monopoly {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Forfeit the rest of the current turn without rolling.
    ///
    /// Only used by the supervisor when a player times out before rolling.
    pub fn skip_turn(&self, state: &mut GameState) -> RuleResult<()> {
        let public = &state.public;
        if public.is_game_over() {
            return Err(RuleViolation::GameOver);
        }
        if public.auction.is_some() {
            return Err(RuleViolation::AuctionInProgress);
        }
        if let Some(pending) = public.pending {
            return Err(RuleViolation::PendingActionBlocks { pending: pending.label() });
        }

        let skipped = public.current_player();
        let message = format!("{} forfeits the rest of their turn", public.name(skipped));
        state.public.log(message);
        turn::advance_turn(&mut state.public);
        Ok(())
    }

    /// Check whether `command` may be issued by `player` in this state.
    fn gate(&self, state: &PublicState, player: PlayerId, kind: CommandKind) -> RuleResult<()> {
        if state.is_game_over() {
            return Err(RuleViolation::GameOver);
        }
        if !state.players.contains(player) {
            return Err(RuleViolation::UnknownPlayer { player });
        }
        if state.player(player).bankrupt {
            return Err(RuleViolation::PlayerBankrupt { player });
        }

        let bidding = matches!(kind, CommandKind::PlaceBid | CommandKind::PassBid);
        if state.auction.is_some() {
            return if bidding {
                Ok(())
            } else {
                Err(RuleViolation::AuctionInProgress)
            };
        }
        if bidding {
            return Err(RuleViolation::NoAuction);
        }
        if kind.is_trade() {
            return Ok(());
        }

        match state.pending {
            Some(pending) => {
                let allowed = match pending {
                    PendingAction::BuyOrAuction { .. } => matches!(
                        kind,
                        CommandKind::BuyProperty
                            | CommandKind::DeclineProperty
                            | CommandKind::MortgageProperty
                            | CommandKind::SellHouse
                    ),
                    PendingAction::RaiseFunds { .. } | PendingAction::PayOrBankrupt { .. } => matches!(
                        kind,
                        CommandKind::SellHouse | CommandKind::MortgageProperty | CommandKind::DeclareBankruptcy
                    ),
                };
                if pending.player() != player || !allowed {
                    return Err(RuleViolation::PendingActionBlocks { pending: pending.label() });
                }
                Ok(())
            }
            None => match kind {
                CommandKind::BuyProperty | CommandKind::DeclineProperty => Err(RuleViolation::NoPendingPurchase),
                CommandKind::DeclareBankruptcy => {
                    if state.player(player).obligation() > 0 {
                        Ok(())
                    } else {
                        Err(RuleViolation::NoObligation)
                    }
                }
                _ if state.current_player() != player => Err(RuleViolation::NotYourTurn { player }),
                _ => Ok(()),
            },
        }
    }

    fn dispatch(&self, game: &mut GameState, player: PlayerId, command: &Command) -> RuleResult<()> {
        match command {
            Command::Roll => turn::roll(game, player),
            Command::BuyProperty => self.buy_property(&mut game.public, player),
            Command::DeclineProperty => self.decline_property(&mut game.public),
            Command::PlaceBid { amount } => auction::place_bid(&mut game.public, player, *amount),
            Command::PassBid => auction::pass_bid(&mut game.public, player),
            Command::ProposeTrade { to, offer, request } => {
                trade::propose_trade(&mut game.public, player, *to, offer.clone(), request.clone()).map(|_| ())
            }
            Command::AcceptTrade { trade_id } => trade::accept_trade(&mut game.public, player, *trade_id),
            Command::DeclineTrade { trade_id } => trade::decline_trade(&mut game.public, player, *trade_id),
            Command::BuildHouse { space } => building::build_house(&mut game.public, player, *space),
            Command::SellHouse { space } => building::sell_house(&mut game.public, player, *space),
            Command::MortgageProperty { space } => building::mortgage(&mut game.public, player, *space),
            Command::UnmortgageProperty { space } => building::unmortgage(&mut game.public, player, *space),
            Command::PayJailFine => turn::pay_jail_fine(&mut game.public, player),
            Command::UseJailCard => turn::use_jail_card(&mut game.public, player),
            Command::DeclareBankruptcy => bankruptcy::declare_bankruptcy(&mut game.public, player),
            Command::EndTurn => turn::end_turn(&mut game.public),
        }
    }

    fn buy_property(&self, state: &mut PublicState, player: PlayerId) -> RuleResult<()> {
        let Some(PendingAction::BuyOrAuction { space, .. }) = state.pending else {
            return Err(RuleViolation::NoPendingPurchase);
        };
        let def = state.board.def(space);
        let available = state.player(player).spendable();
        if available < def.price {
            return Err(RuleViolation::InsufficientFunds {
                required: def.price,
                available,
            });
        }

        ledger::pay(state, player, ledger::Payee::Bank, def.price);
        state.board.state_mut(space).owner = Some(player);
        state.pending = None;
        let message = format!("{} buys {} for ${}", state.name(player), def.name, def.price);
        state.log(message);
        Ok(())
    }

    fn decline_property(&self, state: &mut PublicState) -> RuleResult<()> {
        let Some(PendingAction::BuyOrAuction { player, space }) = state.pending else {
            return Err(RuleViolation::NoPendingPurchase);
        };
        state.pending = None;
        let message = format!("{} declines {}", state.name(player), state.board.def(space).name);
        state.log(message);
        auction::start_auction(state, space);
        Ok(())
    }
}

impl RulesEngine for Monopoly {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn legal_commands(&self, state: &PublicState, player: PlayerId) -> Vec<CommandKind> {
        use CommandKind::*;

        const ALL: [CommandKind; 16] = [
            Roll,
            BuyProperty,
            DeclineProperty,
            PlaceBid,
            PassBid,
            ProposeTrade,
            AcceptTrade,
            DeclineTrade,
            BuildHouse,
            SellHouse,
            MortgageProperty,
            UnmortgageProperty,
            PayJailFine,
            UseJailCard,
            DeclareBankruptcy,
            EndTurn,
        ];

        if !state.players.contains(player) {
            return Vec::new();
        }
        let me = state.player(player);
        let owned = state.board.owned_by(player);

        ALL.into_iter()
            .filter(|&kind| self.gate(state, player, kind).is_ok())
            .filter(|&kind| match kind {
                Roll => turn::can_roll(state),
                BuyProperty => match state.pending {
                    Some(PendingAction::BuyOrAuction { space, .. }) => me.spendable() >= state.board.def(space).price,
                    _ => false,
                },
                PlaceBid => state
                    .auction
                    .as_ref()
                    .is_some_and(|a| a.is_active_bidder(player) && me.cash >= a.next_minimum()),
                PassBid => state
                    .auction
                    .as_ref()
                    .is_some_and(|a| a.is_active_bidder(player) && !a.is_leader(player)),
                ProposeTrade => state.active_count() > 1,
                AcceptTrade => state.pending_trades().any(|t| t.recipient == player),
                DeclineTrade => state.pending_trades().any(|t| t.involves(player)),
                BuildHouse => owned.iter().any(|&s| building::can_build(state, player, s)),
                SellHouse => owned.iter().any(|&s| building::can_sell(state, player, s)),
                MortgageProperty => owned
                    .iter()
                    .any(|&s| !state.board.state(s).mortgaged && !state.board.group_of_has_buildings(s)),
                UnmortgageProperty => owned.iter().any(|&s| state.board.state(s).mortgaged),
                PayJailFine => me.in_jail && !state.turn.rolled && me.spendable() >= state.rules.jail_fine,
                UseJailCard => me.in_jail && !state.turn.rolled && me.jail_cards > 0,
                EndTurn => turn::can_end_turn(state),
                DeclineProperty | DeclareBankruptcy => true,
            })
            .collect()
    }

    fn apply_command(&self, state: &mut GameState, player: PlayerId, command: &Command) -> RuleResult<()> {
        self.gate(&state.public, player, command.kind())?;

        let mut next = state.clone();
        self.dispatch(&mut next, player, command)?;
        ledger::settle_debts(&mut next.public);
        bankruptcy::check_bankruptcy(&mut next.public);

        let sequence = next.history.len() as u32;
        let turn = next.public.turn_number;
        next.record(CommandRecord {
            player,
            command: command.clone(),
            turn,
            sequence,
        });
        debug!(player = %player, command = ?command.kind(), sequence, "command applied");

        *state = next;
        Ok(())
    }

    fn is_terminal(&self, state: &PublicState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}

/// Builder for a new game.
///
/// ```
/// use rust_monopoly::engine::GameBuilder;
/// use rust_monopoly::rules::RulesEngine;
///
/// let (rules, state) = GameBuilder::new().players(["Ada", "Grace"]).build(7);
/// assert_eq!(state.public.player_count(), 2);
/// assert!(rules.is_terminal(&state.public).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    names: Vec<String>,
    config: RulesConfig,
    shuffle_order: bool,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            names: vec!["Player 0".to_string(), "Player 1".to_string()],
            config: RulesConfig::default(),
            shuffle_order: true,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat names, in seat order.
    pub fn players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        assert!((2..=8).contains(&self.names.len()), "Player count must be 2-8");
        self
    }

    /// `count` seats with generated names.
    pub fn player_count(self, count: usize) -> Self {
        self.players((0..count).map(|i| format!("Player {i}")))
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep seat order as turn order instead of shuffling it.
    pub fn fixed_order(mut self) -> Self {
        self.shuffle_order = false;
        self
    }

    /// Build the engine and initial state.
    pub fn build(self, seed: u64) -> (Monopoly, GameState) {
        let mut rng = GameRng::new(seed);
        let mut order: Vec<PlayerId> = PlayerId::all(self.names.len()).collect();
        if self.shuffle_order {
            rng.shuffle(&mut order);
        }

        let mut public = PublicState::new(self.config.clone(), &self.names, order);
        let first = public.current_player();
        let message = format!("{} goes first", public.name(first));
        public.log(message);
        info!(players = self.names.len(), seed, "game created");

        (Monopoly::new(self.config), GameState::new(public, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceRoll, TradeSide};

    fn setup() -> (Monopoly, GameState, PlayerId, PlayerId) {
        let (rules, state) = GameBuilder::new().player_count(2).fixed_order().build(42);
        (rules, state, PlayerId::new(0), PlayerId::new(1))
    }

    #[test]
    fn test_builder_shuffles_order_deterministically() {
        let (_, a) = GameBuilder::new().player_count(4).build(9);
        let (_, b) = GameBuilder::new().player_count(4).build(9);
        assert_eq!(a.public.turn_order, b.public.turn_order);
        let mut sorted = a.public.turn_order.clone();
        sorted.sort();
        assert_eq!(sorted, PlayerId::all(4).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let (rules, mut state, _, b) = setup();
        let before = state.public.clone();

        assert_eq!(
            rules.apply_command(&mut state, b, &Command::Roll),
            Err(RuleViolation::NotYourTurn { player: b })
        );
        assert_eq!(
            rules.apply_command(&mut state, b, &Command::BuyProperty),
            Err(RuleViolation::NoPendingPurchase)
        );
        assert_eq!(state.public, before);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_buy_flow() {
        let (rules, mut state, a, _) = setup();
        state.queue_dice([DiceRoll::new(1, 2)]);
        rules.apply_command(&mut state, a, &Command::Roll).unwrap();

        assert_eq!(state.public.pending, Some(PendingAction::BuyOrAuction { player: a, space: 3 }));
        assert_eq!(
            rules.apply_command(&mut state, a, &Command::EndTurn),
            Err(RuleViolation::PendingActionBlocks { pending: "purchase decision" })
        );

        rules.apply_command(&mut state, a, &Command::BuyProperty).unwrap();
        assert_eq!(state.public.board.owner(3), Some(a));
        assert_eq!(state.public.player(a).cash, 1440);
        rules.apply_command(&mut state, a, &Command::EndTurn).unwrap();
        assert_eq!(state.history.len(), 3);
    }

    #[test]
    fn test_decline_starts_auction_and_blocks_other_commands() {
        let (rules, mut state, a, b) = setup();
        state.queue_dice([DiceRoll::new(1, 2)]);
        rules.apply_command(&mut state, a, &Command::Roll).unwrap();
        rules.apply_command(&mut state, a, &Command::DeclineProperty).unwrap();

        assert!(state.public.auction.is_some());
        assert_eq!(
            rules.apply_command(&mut state, a, &Command::EndTurn),
            Err(RuleViolation::AuctionInProgress)
        );
        assert_eq!(rules.legal_commands(&state.public, b), vec![CommandKind::PlaceBid, CommandKind::PassBid]);

        rules.apply_command(&mut state, b, &Command::PlaceBid { amount: 30 }).unwrap();
        rules.apply_command(&mut state, a, &Command::PassBid).unwrap();
        assert_eq!(state.public.board.owner(3), Some(b));
        assert_eq!(state.public.player(b).cash, 1470);
    }

    #[test]
    fn test_trades_allowed_off_turn() {
        let (rules, mut state, a, b) = setup();
        state.public.board.state_mut(1).owner = Some(a);
        let command = Command::ProposeTrade {
            to: a,
            offer: TradeSide::cash(100),
            request: TradeSide::properties(&[1]),
        };
        rules.apply_command(&mut state, b, &command).unwrap();
        rules.apply_command(&mut state, a, &Command::AcceptTrade { trade_id: 1 }).unwrap();
        assert_eq!(state.public.board.owner(1), Some(b));
    }

    #[test]
    fn test_rent_shortfall_creates_raise_funds() {
        let (rules, mut state, a, b) = setup();
        state.public.board.state_mut(39).owner = Some(b);
        state.public.board.state_mut(39).buildings = 5;
        state.public.board.state_mut(37).owner = Some(b);
        state.public.board.state_mut(37).buildings = 5;
        state.public.board.state_mut(1).owner = Some(a);
        state.public.players[a].position = 30;
        state.public.players[a].in_jail = false;
        state.queue_dice([DiceRoll::new(4, 5)]);

        rules.apply_command(&mut state, a, &Command::Roll).unwrap();

        // 1500 paid of 2000; Mediterranean mortgage (30) cannot cover 500
        assert_eq!(state.public.player(a).cash, 0);
        assert_eq!(
            state.public.pending,
            Some(PendingAction::PayOrBankrupt { player: a, shortfall: 500 })
        );
        assert_eq!(
            rules.apply_command(&mut state, a, &Command::EndTurn),
            Err(RuleViolation::PendingActionBlocks { pending: "bankruptcy decision" })
        );

        rules.apply_command(&mut state, a, &Command::DeclareBankruptcy).unwrap();
        assert_eq!(rules.is_terminal(&state.public), Some(GameResult::Winner(b)));
        assert_eq!(state.public.board.owner(1), Some(b));
        assert!(state.public.money_is_conserved());
    }

    #[test]
    fn test_legal_commands_at_start() {
        let (rules, state, a, b) = setup();
        let legal = rules.legal_commands(&state.public, a);
        assert!(legal.contains(&CommandKind::Roll));
        assert!(!legal.contains(&CommandKind::EndTurn));
        assert!(legal.contains(&CommandKind::ProposeTrade));

        assert_eq!(rules.legal_commands(&state.public, b), vec![CommandKind::ProposeTrade]);
    }

    #[test]
    fn test_skip_turn() {
        let (rules, mut state, _, b) = setup();
        rules.skip_turn(&mut state).unwrap();
        assert_eq!(state.public.current_player(), b);
    }
}
