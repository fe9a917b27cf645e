//! The decision agent.
//!
//! A `DecisionAgent` drives one seat. The host calls `observe` with every
//! new snapshot; when the seat has something to decide the agent asks for a
//! timer. When the timer fires the host calls `fire` with the latest
//! snapshot and submits the returned command like any other player would.
//!
//! Decision priority: auction bid, own pending action, incoming trade,
//! then the seat's own turn.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::development::{next_build, next_unmortgage};
use super::liquidation::next_liquidation_step;
use super::profile::DifficultyProfile;
use super::purchase::should_buy;
use super::scheduler::{ActionKey, Scheduler, TimerRequest, TimerToken};
use crate::bidding::{calculate_auction_limit, calculate_bid_reluctance, decide_bid};
use crate::core::{Command, GameRng, PendingAction, PlayerId, PublicState, RandomSource, Snapshot};
use crate::engine::{can_roll, is_executable, Trade, TradeStatus};
use crate::negotiation::{find_proposal, generate_counter_offer, NegotiationHistory, Proposal};
use crate::valuation::{evaluate_trade, Valuation};

pub struct DecisionAgent<R: RandomSource = GameRng> {
    seat: PlayerId,
    profile: DifficultyProfile,
    rng: R,
    scheduler: Scheduler,
    negotiation: NegotiationHistory,
    /// Last situation a command was produced for; never acted on twice.
    last_acted: Option<ActionKey>,
    /// Own proposals whose outcome has been recorded.
    outcomes_seen: FxHashSet<u32>,
    /// Limit fixed at the first decision of each auction.
    auction_limit: Option<(u32, i64)>,
    /// Turn in which the agent last considered proposing.
    proposal_turn: Option<u32>,
    queued_counter: Option<Proposal>,
}

impl DecisionAgent<GameRng> {
    /// Agent whose noise stream is derived from the table seed and its seat.
    #[must_use]
    pub fn seeded(seat: PlayerId, profile: DifficultyProfile, table_rng: &GameRng) -> Self {
        let rng = table_rng.for_context(&format!("agent-{}", seat.0));
        Self::new(seat, profile, rng)
    }
}

impl<R: RandomSource> DecisionAgent<R> {
    #[must_use]
    pub fn new(seat: PlayerId, profile: DifficultyProfile, rng: R) -> Self {
        let negotiation = NegotiationHistory::new(profile.negotiation.clone());
        Self {
            seat,
            profile,
            rng,
            scheduler: Scheduler::new(),
            negotiation,
            last_acted: None,
            outcomes_seen: FxHashSet::default(),
            auction_limit: None,
            proposal_turn: None,
            queued_counter: None,
        }
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    #[must_use]
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    #[must_use]
    pub fn negotiation(&self) -> &NegotiationHistory {
        &self.negotiation
    }

    /// React to a new snapshot. Returns a timer to arm when there is a
    /// fresh decision to make.
    pub fn observe(&mut self, snapshot: &Snapshot) -> Option<TimerRequest> {
        self.note_trade_outcomes(&snapshot.state);

        let Some(key) = action_key(self.seat, snapshot) else {
            self.scheduler.cancel();
            return None;
        };
        if self.last_acted == Some(key) || self.scheduler.pending_key() == Some(key) {
            return None;
        }

        let (low, high) = self.profile.think_time_ms;
        let spread = high.saturating_sub(low).min(u64::from(u32::MAX - 1)) as u32;
        let delay = low + u64::from(self.rng.next_range(0, spread + 1));
        Some(self.scheduler.schedule(key, delay))
    }

    /// Decide for a fired timer. Stale tokens, and tokens whose situation
    /// no longer matches `snapshot`, produce nothing.
    pub fn fire(&mut self, token: TimerToken, snapshot: &Snapshot) -> Option<Command> {
        let key = self.scheduler.take(token)?;
        if action_key(self.seat, snapshot) != Some(key) {
            debug!(seat = %self.seat, %token, "dropping stale decision");
            return None;
        }
        self.last_acted = Some(key);

        let command = match key {
            ActionKey::Auction { .. } => self.bid(&snapshot.state),
            ActionKey::Pending { .. } => self.resolve_pending(&snapshot.state),
            ActionKey::TradeResponse { trade_id } => self.respond_to_trade(&snapshot.state, trade_id),
            ActionKey::Turn { .. } => Some(self.take_turn(&snapshot.state)),
        };
        debug!(seat = %self.seat, ?key, ?command, "decision");
        command
    }

    fn bid(&mut self, state: &PublicState) -> Option<Command> {
        let auction = state.auction.as_ref()?;
        let valuation = Valuation::new(state, self.seat, &self.profile);
        let limit = match self.auction_limit {
            Some((id, limit)) if id == auction.id => limit,
            _ => {
                let limit = calculate_auction_limit(&valuation, auction.space, &mut self.rng);
                self.auction_limit = Some((auction.id, limit));
                limit
            }
        };
        let reluctance = calculate_bid_reluctance(&valuation, auction.space);
        decide_bid(&valuation, auction, limit, reluctance, &mut self.rng)
    }

    fn resolve_pending(&mut self, state: &PublicState) -> Option<Command> {
        let valuation = Valuation::new(state, self.seat, &self.profile);
        let command = match state.pending? {
            PendingAction::BuyOrAuction { space, .. } => {
                if should_buy(&valuation, space) {
                    Command::BuyProperty
                } else {
                    Command::DeclineProperty
                }
            }
            PendingAction::RaiseFunds { .. } => next_liquidation_step(&valuation),
            PendingAction::PayOrBankrupt { .. } => Command::DeclareBankruptcy,
        };
        Some(command)
    }

    fn respond_to_trade(&mut self, state: &PublicState, trade_id: u32) -> Option<Command> {
        let trade = state.trade(trade_id)?;
        let turn = state.turn_number;
        let decline = Command::DeclineTrade { trade_id };

        let hash = NegotiationHistory::offer_hash(trade);
        if self.negotiation.is_repeat(hash, turn) || !is_executable(state, trade) {
            return Some(decline);
        }

        let valuation = Valuation::new(state, self.seat, &self.profile);
        let assessment = evaluate_trade(&valuation, trade);
        if assessment.accept {
            return Some(Command::AcceptTrade { trade_id });
        }

        self.negotiation.remember_declined_offer(hash, turn);
        if let Some(counter) = generate_counter_offer(&valuation, trade, &assessment) {
            self.queued_counter = Some(counter);
        }
        Some(decline)
    }

    fn take_turn(&mut self, state: &PublicState) -> Command {
        if let Some(command) = self.jail_choice(state) {
            return command;
        }
        if can_roll(state) {
            return Command::Roll;
        }

        let valuation = Valuation::new(state, self.seat, &self.profile);
        if let Some(space) = next_unmortgage(&valuation) {
            return Command::UnmortgageProperty { space };
        }
        if let Some(space) = next_build(&valuation) {
            return Command::BuildHouse { space };
        }

        if self.proposal_turn != Some(state.turn_number) {
            self.proposal_turn = Some(state.turn_number);
            if let Some(proposal) = self.next_proposal(state) {
                return proposal.into_command();
            }
        }
        Command::EndTurn
    }

    /// Card, then staying put late in the game, then the fine when rich.
    /// `None` means roll for doubles.
    fn jail_choice(&self, state: &PublicState) -> Option<Command> {
        let me = state.player(self.seat);
        if !me.in_jail || state.turn.rolled {
            return None;
        }
        if me.jail_cards > 0 {
            return Some(Command::UseJailCard);
        }
        if state.board.saturation() >= self.profile.late_game_saturation {
            return None;
        }
        (me.spendable() >= self.profile.jail_fine_wealth).then_some(Command::PayJailFine)
    }

    fn next_proposal(&mut self, state: &PublicState) -> Option<Proposal> {
        if let Some(counter) = self.queued_counter.take() {
            if self.can_submit(state, &counter) {
                return Some(counter);
            }
        }
        if !self.profile.proactive_trades {
            return None;
        }

        let valuation = Valuation::new(state, self.seat, &self.profile);
        let proposal = find_proposal(&valuation, &self.negotiation, state.turn_number)?;
        if !self.can_submit(state, &proposal) {
            return None;
        }
        if let Some(target) = proposal.target {
            self.negotiation.record_proposal(proposal.to, target, state.turn_number);
        }
        Some(proposal)
    }

    /// The engine would take this proposal as it stands.
    fn can_submit(&self, state: &PublicState, proposal: &Proposal) -> bool {
        let duplicate = state
            .pending_trades()
            .any(|t| t.proposer == self.seat && t.recipient == proposal.to);
        let draft = Trade {
            id: 0,
            proposer: self.seat,
            recipient: proposal.to,
            offer: proposal.offer.clone(),
            request: proposal.request.clone(),
            status: TradeStatus::Pending,
        };
        !duplicate && is_executable(state, &draft)
    }

    /// Feed resolved own proposals into the negotiation history.
    fn note_trade_outcomes(&mut self, state: &PublicState) {
        for trade in state.trades.iter() {
            if trade.proposer != self.seat || trade.is_pending() || !self.outcomes_seen.insert(trade.id) {
                continue;
            }
            for &space in &trade.request.properties {
                match trade.status {
                    TradeStatus::Declined => self.negotiation.record_decline(trade.recipient, space, state.turn_number),
                    TradeStatus::Accepted => self.negotiation.record_accept(trade.recipient, space),
                    TradeStatus::Pending => {}
                }
            }
        }
    }
}

/// What, if anything, `seat` has to decide in `snapshot`.
fn action_key(seat: PlayerId, snapshot: &Snapshot) -> Option<ActionKey> {
    let state = &snapshot.state;
    if state.is_game_over() || !state.players.contains(seat) || state.player(seat).bankrupt {
        return None;
    }
    if let Some(auction) = &state.auction {
        return (auction.is_active_bidder(seat) && !auction.is_leader(seat)).then_some(ActionKey::Auction {
            auction_id: auction.id,
            bid_count: auction.bid_count,
        });
    }
    if state.pending.is_some_and(|p| p.player() == seat) {
        return Some(ActionKey::Pending {
            version: snapshot.version,
        });
    }
    if let Some(trade) = state.pending_trades().find(|t| t.recipient == seat) {
        return Some(ActionKey::TradeResponse { trade_id: trade.id });
    }
    if state.pending.is_none() && state.current_player() == seat {
        return Some(ActionKey::Turn {
            version: snapshot.version,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceRoll, GameState, TradeSide};
    use crate::engine::{GameBuilder, Monopoly};
    use crate::rules::RulesEngine;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn setup() -> (Monopoly, GameState) {
        GameBuilder::new().player_count(2).fixed_order().build(3)
    }

    fn agent(seat: PlayerId) -> DecisionAgent {
        DecisionAgent::seeded(seat, DifficultyProfile::medium(), &GameRng::new(3))
    }

    #[test]
    fn test_observe_schedules_within_think_time() {
        let (_, game) = setup();
        let mut bot = agent(A);
        let request = bot.observe(&game.snapshot(0)).unwrap();
        let (low, high) = DifficultyProfile::medium().think_time_ms;
        assert!((low..=high).contains(&request.delay_ms));

        // Same situation: the running timer stands.
        assert!(bot.observe(&game.snapshot(0)).is_none());
        // Not this seat's turn.
        assert!(agent(B).observe(&game.snapshot(0)).is_none());
    }

    #[test]
    fn test_stale_token_is_noop() {
        let (rules, mut game) = setup();
        let mut bot = agent(A);
        let request = bot.observe(&game.snapshot(0)).unwrap();

        game.queue_dice([DiceRoll::new(1, 2)]);
        rules.apply_command(&mut game, A, &Command::Roll).unwrap();
        let later = game.snapshot(1);
        assert_eq!(bot.fire(request.token, &later), None);

        let next = bot.observe(&later).unwrap();
        assert_eq!(bot.fire(next.token, &later), Some(Command::BuyProperty));
        assert_eq!(bot.fire(next.token, &later), None);
    }

    #[test]
    fn test_turn_starts_with_roll_and_never_repeats() {
        let (_, game) = setup();
        let mut bot = agent(A);
        let snapshot = game.snapshot(0);
        let request = bot.observe(&snapshot).unwrap();
        assert_eq!(bot.fire(request.token, &snapshot), Some(Command::Roll));
        assert!(bot.observe(&snapshot).is_none());
    }

    #[test]
    fn test_accepts_generous_offer() {
        let (rules, mut game) = setup();
        game.public.board.state_mut(1).owner = Some(B);
        let propose = Command::ProposeTrade {
            to: B,
            offer: TradeSide::cash(300),
            request: TradeSide::properties(&[1]),
        };
        rules.apply_command(&mut game, A, &propose).unwrap();

        let mut bot = agent(B);
        let snapshot = game.snapshot(1);
        let request = bot.observe(&snapshot).unwrap();
        assert_eq!(bot.fire(request.token, &snapshot), Some(Command::AcceptTrade { trade_id: 1 }));
    }

    #[test]
    fn test_declined_offer_is_refused_on_resubmission() {
        let (rules, mut game) = setup();
        game.public.board.state_mut(1).owner = Some(B);
        let propose = Command::ProposeTrade {
            to: B,
            offer: TradeSide::cash(20),
            request: TradeSide::properties(&[1]),
        };
        let mut bot = agent(B);

        rules.apply_command(&mut game, A, &propose).unwrap();
        let snapshot = game.snapshot(1);
        let request = bot.observe(&snapshot).unwrap();
        let answer = bot.fire(request.token, &snapshot).unwrap();
        assert_eq!(answer, Command::DeclineTrade { trade_id: 1 });
        rules.apply_command(&mut game, B, &answer).unwrap();

        rules.apply_command(&mut game, A, &propose).unwrap();
        let hash = NegotiationHistory::offer_hash(game.public.trade(2).unwrap());
        assert!(bot.negotiation().is_repeat(hash, game.public.turn_number));
    }

    #[test]
    fn test_jail_uses_card_first() {
        let (_, mut game) = setup();
        game.public.players[A].in_jail = true;
        game.public.players[A].position = crate::board::JAIL;
        game.public.players[A].jail_cards = 1;

        let mut bot = agent(A);
        let snapshot = game.snapshot(0);
        let request = bot.observe(&snapshot).unwrap();
        assert_eq!(bot.fire(request.token, &snapshot), Some(Command::UseJailCard));
    }

    #[test]
    fn test_leader_waits_during_auction() {
        let (rules, mut game) = setup();
        game.queue_dice([DiceRoll::new(1, 2)]);
        rules.apply_command(&mut game, A, &Command::Roll).unwrap();
        rules.apply_command(&mut game, A, &Command::DeclineProperty).unwrap();
        rules.apply_command(&mut game, B, &Command::PlaceBid { amount: 30 }).unwrap();

        let snapshot = game.snapshot(3);
        assert!(agent(B).observe(&snapshot).is_none());
        assert!(agent(A).observe(&snapshot).is_some());
    }
}
