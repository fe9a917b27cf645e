//! Auctions for declined properties.
//!
//! Bidding is open: any un-passed participant may bid at any time. An
//! auction ends as soon as at most one un-passed participant remains and
//! that participant holds the high bid, or when everyone has passed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ledger::{self, Payee};
use crate::board::SpaceIndex;
use crate::core::{PlayerId, PublicState, RuleResult, RuleViolation};

/// An open auction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Increases with every auction in the game.
    pub id: u32,
    pub space: SpaceIndex,
    pub highest_bid: i64,
    pub highest_bidder: Option<PlayerId>,
    /// Players admitted at the start, in turn order from the decliner.
    pub participants: Vec<PlayerId>,
    pub passed: Vec<PlayerId>,
    /// Opening bid floor.
    pub min_bid: i64,
    /// Bids placed so far. Together with `id` it identifies a bidding round.
    pub bid_count: u32,
}

impl Auction {
    /// Smallest legal bid right now: a bid must beat both the floor and
    /// the standing bid.
    #[must_use]
    pub fn next_minimum(&self) -> i64 {
        opening_ask(self.min_bid).max(self.highest_bid + 1)
    }

    #[must_use]
    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.participants.contains(&player)
    }

    /// Participant that has not passed.
    #[must_use]
    pub fn is_active_bidder(&self, player: PlayerId) -> bool {
        self.is_participant(player) && !self.passed.contains(&player)
    }

    /// Participants that have not passed.
    pub fn active_bidders(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.participants
            .iter()
            .copied()
            .filter(|p| !self.passed.contains(p))
    }

    #[must_use]
    pub fn is_leader(&self, player: PlayerId) -> bool {
        self.highest_bidder == Some(player)
    }

    /// Whether the auction has reached a terminal configuration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        let mut active = self.active_bidders();
        match (active.next(), active.next()) {
            (None, _) => true,
            (Some(only), None) => self.highest_bidder == Some(only),
            _ => false,
        }
    }
}

/// Smallest opening bid for a floor of `min_bid`.
#[must_use]
pub fn opening_ask(min_bid: i64) -> i64 {
    min_bid + 1
}

/// Open an auction for `space`, admitting players who can afford the
/// opening ask.
pub(crate) fn start_auction(state: &mut PublicState, space: SpaceIndex) {
    let min_bid = state.rules.min_bid;
    let ask = opening_ask(min_bid);
    let participants: Vec<PlayerId> = state
        .from_current()
        .filter(|&p| {
            let player = state.player(p);
            player.is_active() && player.cash >= ask
        })
        .collect();

    let id = state.next_auction_id;
    state.next_auction_id += 1;

    let name = state.board.def(space).name;
    if participants.is_empty() {
        state.log(format!("Nobody can bid on {name}; it stays with the bank"));
        return;
    }

    state.log(format!("{name} goes to auction"));
    debug!(auction = id, space, bidders = participants.len(), "auction started");
    state.auction = Some(Auction {
        id,
        space,
        highest_bid: 0,
        highest_bidder: None,
        participants,
        passed: Vec::new(),
        min_bid,
        bid_count: 0,
    });
}

fn open_auction<'a>(state: &'a mut PublicState, player: PlayerId) -> RuleResult<&'a mut Auction> {
    let auction = state.auction.as_mut().ok_or(RuleViolation::NoAuction)?;
    if !auction.is_active_bidder(player) {
        return Err(RuleViolation::NotInAuction { player });
    }
    Ok(auction)
}

pub(crate) fn place_bid(state: &mut PublicState, player: PlayerId, amount: i64) -> RuleResult<()> {
    let available = state.player(player).cash;
    let auction = open_auction(state, player)?;

    let minimum = auction.next_minimum();
    if amount < minimum {
        return Err(RuleViolation::BidTooLow { minimum, offered: amount });
    }
    if amount > available {
        return Err(RuleViolation::InsufficientFunds {
            required: amount,
            available,
        });
    }

    auction.highest_bid = amount;
    auction.highest_bidder = Some(player);
    auction.bid_count += 1;

    let message = format!("{} bids ${amount}", state.name(player));
    state.log(message);
    resolve_if_finished(state);
    Ok(())
}

pub(crate) fn pass_bid(state: &mut PublicState, player: PlayerId) -> RuleResult<()> {
    let auction = open_auction(state, player)?;
    if auction.is_leader(player) {
        return Err(RuleViolation::HighBidderCannotPass);
    }
    auction.passed.push(player);

    let message = format!("{} passes", state.name(player));
    state.log(message);
    resolve_if_finished(state);
    Ok(())
}

/// Award or close the auction once it is terminal.
pub(crate) fn resolve_if_finished(state: &mut PublicState) {
    let finished = state.auction.as_ref().is_some_and(Auction::is_finished);
    if !finished {
        return;
    }
    let Some(auction) = state.auction.take() else {
        return;
    };

    let name = state.board.def(auction.space).name;
    match auction.highest_bidder {
        Some(winner) => {
            ledger::pay(state, winner, Payee::Bank, auction.highest_bid);
            state.board.state_mut(auction.space).owner = Some(winner);
            let message = format!("{} wins {name} for ${}", state.name(winner), auction.highest_bid);
            state.log(message);
            debug!(auction = auction.id, winner = %winner, price = auction.highest_bid, "auction won");
        }
        None => {
            state.log(format!("No bids for {name}; it stays with the bank"));
        }
    }
}
