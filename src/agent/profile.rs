//! Difficulty tiers.
//!
//! Every threshold the bot uses lives in `DifficultyProfile`, so tiers are
//! plain data and a host can tune or mix them.

use serde::{Deserialize, Serialize};

use crate::negotiation::NegotiationConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Heuristic constants for one bot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,

    /// Cash never spent voluntarily.
    pub min_cash_reserve: i64,
    /// Additional reserve as a fraction of net worth.
    pub reserve_fraction: f64,

    /// Purchase score needed to buy.
    pub buy_threshold: f64,
    /// Values completing its own color groups.
    pub monopoly_awareness: bool,
    /// Values denying opponents their color groups.
    pub blocking_awareness: bool,

    /// Relative noise applied to auction limits.
    pub randomness: f64,
    /// Auction limit as a multiple of the printed price.
    pub auction_aggressiveness: f64,
    /// Scales the chance of passing early on an unattractive lot.
    pub reluctance_weight: f64,
    /// Scales the chance of dropping out once bids pass fair value.
    pub bluff_call_sensitivity: f64,

    /// Received/given value ratio needed to accept a mixed trade.
    pub trade_accept_ratio: f64,
    /// Cash/value ratio needed to accept a cash-only offer.
    pub cash_offer_multiplier: f64,
    pub counter_offers: bool,
    pub proactive_trades: bool,

    /// Cash above which the jail fine is paid instead of rolling.
    pub jail_fine_wealth: i64,
    /// Board saturation from which jail is a safe place to stay.
    pub late_game_saturation: f64,

    /// Deliberation delay range in milliseconds, inclusive.
    pub think_time_ms: (u64, u64),

    pub negotiation: NegotiationConfig,
}

impl DifficultyProfile {
    #[must_use]
    pub fn easy() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            min_cash_reserve: 50,
            reserve_fraction: 0.0,
            buy_threshold: 0.3,
            monopoly_awareness: false,
            blocking_awareness: false,
            randomness: 0.25,
            auction_aggressiveness: 0.8,
            reluctance_weight: 0.3,
            bluff_call_sensitivity: 0.2,
            trade_accept_ratio: 0.9,
            cash_offer_multiplier: 1.1,
            counter_offers: false,
            proactive_trades: false,
            jail_fine_wealth: 400,
            late_game_saturation: 0.85,
            think_time_ms: (1_500, 4_000),
            negotiation: NegotiationConfig::default(),
        }
    }

    #[must_use]
    pub fn medium() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            min_cash_reserve: 150,
            reserve_fraction: 0.05,
            buy_threshold: 0.45,
            monopoly_awareness: true,
            blocking_awareness: false,
            randomness: 0.12,
            auction_aggressiveness: 1.0,
            reluctance_weight: 0.5,
            bluff_call_sensitivity: 0.5,
            trade_accept_ratio: 1.1,
            cash_offer_multiplier: 1.3,
            counter_offers: true,
            proactive_trades: true,
            jail_fine_wealth: 700,
            late_game_saturation: 0.75,
            think_time_ms: (1_000, 2_500),
            negotiation: NegotiationConfig::default(),
        }
    }

    #[must_use]
    pub fn hard() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            min_cash_reserve: 200,
            reserve_fraction: 0.08,
            buy_threshold: 0.5,
            monopoly_awareness: true,
            blocking_awareness: true,
            randomness: 0.04,
            auction_aggressiveness: 1.1,
            reluctance_weight: 0.7,
            bluff_call_sensitivity: 0.8,
            trade_accept_ratio: 1.2,
            cash_offer_multiplier: 1.5,
            counter_offers: true,
            proactive_trades: true,
            jail_fine_wealth: 1_000,
            late_game_saturation: 0.7,
            think_time_ms: (700, 1_800),
            negotiation: NegotiationConfig::default(),
        }
    }

    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Medium => Self::medium(),
            Difficulty::Hard => Self::hard(),
        }
    }

    /// Cash to keep back given the bot's net worth.
    #[must_use]
    pub fn reserve(&self, net_worth: i64) -> i64 {
        let proportional = (net_worth.max(0) as f64 * self.reserve_fraction) as i64;
        self.min_cash_reserve.max(proportional)
    }

    /// Set the deliberation delay range.
    #[must_use]
    pub fn with_think_time(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.think_time_ms = (min_ms, max_ms.max(min_ms));
        self
    }

    /// Set auction noise.
    #[must_use]
    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    #[must_use]
    pub fn with_proactive_trades(mut self, enabled: bool) -> Self {
        self.proactive_trades = enabled;
        self
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::medium()
    }
}
