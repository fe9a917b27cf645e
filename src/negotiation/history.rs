//! Per-agent memory of trade attempts.
//!
//! Each target (a counterparty and the property asked of them) has its own
//! record. Declines push the next attempt out exponentially and enough of
//! them end the pursuit. Incoming offers that were declined are remembered
//! by hash so an identical resubmission is refused without re-evaluation.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

use crate::board::SpaceIndex;
use crate::core::PlayerId;
use crate::engine::Trade;

/// Cooldown constants, in turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationConfig {
    /// Wait after the first decline.
    pub base_cooldown_turns: u32,
    /// Upper bound on any wait.
    pub max_cooldown_turns: u32,
    /// Declines after which a target is abandoned.
    pub give_up_after: u32,
    /// How long an identical declined offer is refused outright.
    pub repeat_cooldown_turns: u32,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            base_cooldown_turns: 2,
            max_cooldown_turns: 16,
            give_up_after: 4,
            repeat_cooldown_turns: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TargetRecord {
    declines: u32,
    last_attempt: u32,
    abandoned: bool,
}

#[derive(Clone, Debug, Default)]
pub struct NegotiationHistory {
    config: NegotiationConfig,
    targets: FxHashMap<(PlayerId, SpaceIndex), TargetRecord>,
    /// Offer hash -> turn it was declined.
    declined_offers: FxHashMap<u64, u32>,
}

impl NegotiationHistory {
    #[must_use]
    pub fn new(config: NegotiationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    /// Turns to wait after `declines` declines.
    #[must_use]
    pub fn cooldown(&self, declines: u32) -> u32 {
        if declines == 0 {
            return 0;
        }
        let factor = 1u32.checked_shl(declines - 1).unwrap_or(u32::MAX);
        self.config
            .base_cooldown_turns
            .saturating_mul(factor)
            .min(self.config.max_cooldown_turns)
    }

    /// Declines recorded against this target.
    #[must_use]
    pub fn declines(&self, counterparty: PlayerId, space: SpaceIndex) -> u32 {
        self.targets
            .get(&(counterparty, space))
            .map_or(0, |r| r.declines)
    }

    /// A proposal for this target may be made on `turn`.
    #[must_use]
    pub fn can_propose(&self, counterparty: PlayerId, space: SpaceIndex, turn: u32) -> bool {
        match self.targets.get(&(counterparty, space)) {
            None => true,
            Some(record) if record.abandoned => false,
            Some(record) => turn >= record.last_attempt.saturating_add(self.cooldown(record.declines)),
        }
    }

    pub fn record_proposal(&mut self, counterparty: PlayerId, space: SpaceIndex, turn: u32) {
        self.targets.entry((counterparty, space)).or_default().last_attempt = turn;
    }

    pub fn record_decline(&mut self, counterparty: PlayerId, space: SpaceIndex, turn: u32) {
        let give_up_after = self.config.give_up_after;
        let record = self.targets.entry((counterparty, space)).or_default();
        record.declines += 1;
        record.last_attempt = record.last_attempt.max(turn);
        if record.declines >= give_up_after {
            record.abandoned = true;
        }
    }

    /// The target changed hands; start over.
    pub fn record_accept(&mut self, counterparty: PlayerId, space: SpaceIndex) {
        self.targets.remove(&(counterparty, space));
    }

    /// Stable fingerprint of an incoming offer's content.
    #[must_use]
    pub fn offer_hash(trade: &Trade) -> u64 {
        let mut hasher = FxHasher::default();
        trade.proposer.hash(&mut hasher);
        trade.recipient.hash(&mut hasher);
        trade.offer.hash(&mut hasher);
        trade.request.hash(&mut hasher);
        hasher.finish()
    }

    pub fn remember_declined_offer(&mut self, hash: u64, turn: u32) {
        self.declined_offers.insert(hash, turn);
    }

    /// The same offer was declined within the repeat window.
    #[must_use]
    pub fn is_repeat(&self, hash: u64, turn: u32) -> bool {
        self.declined_offers
            .get(&hash)
            .is_some_and(|&at| turn < at.saturating_add(self.config.repeat_cooldown_turns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TradeSide;
    use crate::engine::TradeStatus;

    const OPP: PlayerId = PlayerId::new(1);

    #[test]
    fn test_exponential_cooldown() {
        let history = NegotiationHistory::new(NegotiationConfig::default());
        assert_eq!(history.cooldown(0), 0);
        assert_eq!(history.cooldown(1), 2);
        assert_eq!(history.cooldown(2), 4);
        assert_eq!(history.cooldown(3), 8);
        assert_eq!(history.cooldown(5), 16);
        assert_eq!(history.cooldown(40), 16);
    }

    #[test]
    fn test_declines_delay_then_abandon() {
        let mut history = NegotiationHistory::new(NegotiationConfig::default());
        assert!(history.can_propose(OPP, 39, 1));

        history.record_proposal(OPP, 39, 10);
        history.record_decline(OPP, 39, 10);
        assert!(!history.can_propose(OPP, 39, 11));
        assert!(history.can_propose(OPP, 39, 12));

        for turn in [12, 16, 24] {
            history.record_proposal(OPP, 39, turn);
            history.record_decline(OPP, 39, turn);
        }
        assert_eq!(history.declines(OPP, 39), 4);
        assert!(!history.can_propose(OPP, 39, 1_000));
        assert!(history.can_propose(OPP, 37, 24));

        history.record_accept(OPP, 39);
        assert!(history.can_propose(OPP, 39, 25));
    }

    #[test]
    fn test_repeat_offer_detection() {
        let mut history = NegotiationHistory::new(NegotiationConfig::default());
        let trade = Trade {
            id: 3,
            proposer: OPP,
            recipient: PlayerId::new(0),
            offer: TradeSide::cash(100),
            request: TradeSide::properties(&[39]),
            status: TradeStatus::Pending,
        };
        let mut resubmitted = trade.clone();
        resubmitted.id = 9;

        let hash = NegotiationHistory::offer_hash(&trade);
        assert_eq!(hash, NegotiationHistory::offer_hash(&resubmitted));

        history.remember_declined_offer(hash, 4);
        assert!(history.is_repeat(hash, 8));
        assert!(!history.is_repeat(hash, 9));

        resubmitted.offer.money = 150;
        assert!(!history.is_repeat(NegotiationHistory::offer_hash(&resubmitted), 5));
    }
}
