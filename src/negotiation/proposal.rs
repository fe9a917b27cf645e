//! Proactive trade proposals.
//!
//! The agent goes after groups where it holds every member but one and an
//! opponent holds the last. It prefers a swap that finishes a group for the
//! opponent too, and falls back to a cash premium that grows with each
//! decline.

use crate::board::{layout, ColorGroup, SpaceIndex};
use crate::core::{Command, PlayerId, TradeSide};
use crate::valuation::Valuation;

use super::history::NegotiationHistory;

/// Opening cash premium as a multiple of the printed price.
const BASE_PREMIUM: f64 = 1.5;
/// Premium added per recorded decline.
const PREMIUM_STEP: f64 = 0.25;
const MAX_PREMIUM: f64 = 3.0;

/// A trade the agent wants to put forward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub to: PlayerId,
    /// What the agent gives.
    pub offer: TradeSide,
    /// What the agent asks for.
    pub request: TradeSide,
    /// Property this proposal is chasing, for cooldown bookkeeping.
    pub target: Option<SpaceIndex>,
}

impl Proposal {
    #[must_use]
    pub fn into_command(self) -> Command {
        Command::ProposeTrade {
            to: self.to,
            offer: self.offer,
            request: self.request,
        }
    }
}

/// Cash premium for a target after `declines` refusals.
#[must_use]
pub fn premium_factor(declines: u32) -> f64 {
    (BASE_PREMIUM + PREMIUM_STEP * declines as f64).min(MAX_PREMIUM)
}

/// Best proposal available on `turn`, if any.
#[must_use]
pub fn find_proposal(valuation: &Valuation<'_>, history: &NegotiationHistory, turn: u32) -> Option<Proposal> {
    let state = valuation.state();
    let board = &state.board;
    let me = valuation.me();

    let mut groups = ColorGroup::ALL.to_vec();
    groups.sort_by(|a, b| valuation.group_rank(*b).total_cmp(&valuation.group_rank(*a)));

    for group in groups {
        if board.group_has_buildings(group) {
            continue;
        }
        let mut missing = layout::group_members(group)
            .iter()
            .copied()
            .filter(|&m| board.owner(m) != Some(me));
        let (Some(target), None) = (missing.next(), missing.next()) else {
            continue;
        };
        let Some(owner) = board.owner(target) else {
            continue;
        };
        if state.player(owner).bankrupt
            || state.pending_trades().any(|t| t.proposer == me && t.recipient == owner)
            || !history.can_propose(owner, target, turn)
        {
            continue;
        }

        let declines = history.declines(owner, target);
        if let Some(proposal) = swap_proposal(valuation, owner, target, group, declines) {
            return Some(proposal);
        }
        if let Some(proposal) = cash_proposal(valuation, owner, target, declines) {
            return Some(proposal);
        }
    }
    None
}

fn cash_proposal(valuation: &Valuation<'_>, owner: PlayerId, target: SpaceIndex, declines: u32) -> Option<Proposal> {
    let price = layout::space(target).price as f64;
    let amount = (price * premium_factor(declines)).round() as i64;
    (amount <= valuation.surplus()).then(|| Proposal {
        to: owner,
        offer: TradeSide::cash(amount),
        request: TradeSide::properties(&[target]),
        target: Some(target),
    })
}

/// Give the opponent the last piece of one of their groups for ours.
fn swap_proposal(
    valuation: &Valuation<'_>,
    owner: PlayerId,
    target: SpaceIndex,
    group: ColorGroup,
    declines: u32,
) -> Option<Proposal> {
    let board = &valuation.state().board;
    let target_price = layout::space(target).price;

    let give = board
        .owned_by(valuation.me())
        .into_iter()
        .filter(|&q| {
            board
                .def(q)
                .group()
                .is_some_and(|h| h != group && !board.group_has_buildings(h))
                && valuation.completes_monopoly(owner, q)
        })
        .max_by_key(|&q| layout::space(q).price)?;

    let gap = (target_price - layout::space(give).price).max(0) as f64;
    let sweetener = (gap + PREMIUM_STEP * declines as f64 * target_price as f64).round() as i64;
    if sweetener > valuation.surplus() {
        return None;
    }
    Some(Proposal {
        to: owner,
        offer: TradeSide::properties(&[give]).with_money(sweetener),
        request: TradeSide::properties(&[target]),
        target: Some(target),
    })
}
