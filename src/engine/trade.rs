//! Player-to-player trades.
//!
//! A trade moves two bundles at once. Both bundles are validated when the
//! trade is proposed and again when it is accepted, since holdings may have
//! changed in between.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ledger;
use crate::board::SpaceIndex;
use crate::core::{PlayerId, PublicState, RuleResult, RuleViolation, TradeSide};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeStatus {
    Pending,
    Accepted,
    Declined,
}

/// A proposed exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: u32,
    pub proposer: PlayerId,
    pub recipient: PlayerId,
    /// What the proposer gives.
    pub offer: TradeSide,
    /// What the proposer asks for.
    pub request: TradeSide,
    pub status: TradeStatus,
}

impl Trade {
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.proposer == player || self.recipient == player
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TradeStatus::Pending
    }
}

/// Check that `owner` can hand over `side`.
pub(crate) fn validate_side(state: &PublicState, owner: PlayerId, side: &TradeSide) -> RuleResult<()> {
    let player = state.player(owner);
    if side.money < 0 {
        return Err(RuleViolation::NegativeAmount);
    }
    if side.money > player.spendable() {
        return Err(RuleViolation::InsufficientFunds {
            required: side.money,
            available: player.spendable(),
        });
    }
    if side.jail_cards > player.jail_cards {
        return Err(RuleViolation::NotEnoughJailCards {
            required: side.jail_cards,
            held: player.jail_cards,
        });
    }

    for (i, &space) in side.properties.iter().enumerate() {
        if side.properties[..i].contains(&space) {
            return Err(RuleViolation::DuplicateProperty { space });
        }
        validate_property(state, owner, space)?;
    }
    Ok(())
}

fn validate_property(state: &PublicState, owner: PlayerId, space: SpaceIndex) -> RuleResult<()> {
    if !state.board.is_valid(space) {
        return Err(RuleViolation::InvalidSpace { space });
    }
    if !state.board.def(space).is_ownable() {
        return Err(RuleViolation::NotOwnable { space });
    }
    if state.board.owner(space) != Some(owner) {
        return Err(RuleViolation::NotOwner { player: owner, space });
    }
    if state.board.group_of_has_buildings(space) {
        return Err(RuleViolation::BuildingsInGroup);
    }
    Ok(())
}

fn validate_trade(
    state: &PublicState,
    proposer: PlayerId,
    recipient: PlayerId,
    offer: &TradeSide,
    request: &TradeSide,
) -> RuleResult<()> {
    if !state.players.contains(recipient) {
        return Err(RuleViolation::UnknownPlayer { player: recipient });
    }
    if state.player(recipient).bankrupt {
        return Err(RuleViolation::PlayerBankrupt { player: recipient });
    }
    if proposer == recipient {
        return Err(RuleViolation::TradeWithSelf);
    }
    if offer.is_empty() && request.is_empty() {
        return Err(RuleViolation::EmptyTrade);
    }
    validate_side(state, proposer, offer)?;
    validate_side(state, recipient, request)
}

/// Accepting `trade` right now would succeed.
#[must_use]
pub fn is_executable(state: &PublicState, trade: &Trade) -> bool {
    trade.is_pending()
        && validate_trade(state, trade.proposer, trade.recipient, &trade.offer, &trade.request).is_ok()
}

/// Record a new pending trade and return its id.
pub(crate) fn propose_trade(
    state: &mut PublicState,
    proposer: PlayerId,
    recipient: PlayerId,
    offer: TradeSide,
    request: TradeSide,
) -> RuleResult<u32> {
    validate_trade(state, proposer, recipient, &offer, &request)?;
    if state
        .pending_trades()
        .any(|t| t.proposer == proposer && t.recipient == recipient)
    {
        return Err(RuleViolation::DuplicateTrade);
    }

    let id = state.next_trade_id;
    state.next_trade_id += 1;
    state.trades.push_back(Trade {
        id,
        proposer,
        recipient,
        offer,
        request,
        status: TradeStatus::Pending,
    });

    let message = format!(
        "{} proposes a trade to {}",
        state.name(proposer),
        state.name(recipient)
    );
    state.log(message);
    debug!(trade = id, proposer = %proposer, recipient = %recipient, "trade proposed");
    Ok(id)
}

fn pending_index(state: &PublicState, trade_id: u32) -> RuleResult<usize> {
    state
        .trades
        .iter()
        .position(|t| t.id == trade_id && t.is_pending())
        .ok_or(RuleViolation::TradeNotFound { trade_id })
}

/// Execute a pending trade; only the recipient may accept.
pub(crate) fn accept_trade(state: &mut PublicState, player: PlayerId, trade_id: u32) -> RuleResult<()> {
    let index = pending_index(state, trade_id)?;
    let trade = state.trades[index].clone();
    if trade.recipient != player {
        return Err(RuleViolation::NotTradeRecipient { trade_id });
    }
    validate_trade(state, trade.proposer, trade.recipient, &trade.offer, &trade.request)?;

    move_side(state, trade.proposer, trade.recipient, &trade.offer);
    move_side(state, trade.recipient, trade.proposer, &trade.request);
    state.trades[index].status = TradeStatus::Accepted;

    let message = format!(
        "{} accepts the trade from {}",
        state.name(trade.recipient),
        state.name(trade.proposer)
    );
    state.log(message);
    prune(state);
    Ok(())
}

fn move_side(state: &mut PublicState, from: PlayerId, to: PlayerId, side: &TradeSide) {
    ledger::transfer(state, from, to, side.money);
    for &space in &side.properties {
        state.board.state_mut(space).owner = Some(to);
    }
    state.players[from].jail_cards -= side.jail_cards;
    state.players[to].jail_cards += side.jail_cards;
}

/// Reject a pending trade; either party may decline.
pub(crate) fn decline_trade(state: &mut PublicState, player: PlayerId, trade_id: u32) -> RuleResult<()> {
    let index = pending_index(state, trade_id)?;
    if !state.trades[index].involves(player) {
        return Err(RuleViolation::NotTradeRecipient { trade_id });
    }
    state.trades[index].status = TradeStatus::Declined;

    let message = format!("{} declines trade {trade_id}", state.name(player));
    state.log(message);
    prune(state);
    Ok(())
}

/// Drop every pending trade involving `player`.
pub(crate) fn drop_trades_of(state: &mut PublicState, player: PlayerId) {
    for trade in state.trades.iter_mut() {
        if trade.is_pending() && trade.involves(player) {
            trade.status = TradeStatus::Declined;
        }
    }
    prune(state);
}

/// Keep pending trades and the newest resolved ones.
fn prune(state: &mut PublicState) {
    let keep = state.rules.trade_history;
    let resolved = state.trades.iter().filter(|t| !t.is_pending()).count();
    let mut excess = resolved.saturating_sub(keep);
    if excess == 0 {
        return;
    }
    state.trades.retain(|t| {
        if excess > 0 && !t.is_pending() {
            excess -= 1;
            false
        } else {
            true
        }
    });
}
