//! Deliberation timers.
//!
//! The agent never sleeps. It asks its host for a timer and gets called back
//! with the token; anything that changed in between makes the token stale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request for the host to call `fire` after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: TimerToken,
    pub delay_ms: u64,
}

/// The situation a decision was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKey {
    /// Bidding round of an auction.
    Auction { auction_id: u32, bid_count: u32 },
    /// A pending purchase or debt decision at this state version.
    Pending { version: u64 },
    /// An incoming trade awaiting an answer.
    TradeResponse { trade_id: u32 },
    /// A step of the agent's own turn at this state version.
    Turn { version: u64 },
}

/// At most one decision is outstanding; scheduling another replaces it.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next_token: u64,
    pending: Option<(TimerToken, ActionKey)>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: ActionKey, delay_ms: u64) -> TimerRequest {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending = Some((token, key));
        TimerRequest { token, delay_ms }
    }

    /// Claim the decision for `token`; `None` if it was replaced or cancelled.
    pub fn take(&mut self, token: TimerToken) -> Option<ActionKey> {
        match self.pending {
            Some((pending, key)) if pending == token => {
                self.pending = None;
                Some(key)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn pending_key(&self) -> Option<ActionKey> {
        self.pending.map(|(_, key)| key)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
