//! Trade evaluation from the recipient's side.

use crate::board::{layout, SpaceIndex};
use crate::core::TradeSide;
use crate::engine::Trade;

use super::property::{Perspective, Valuation};

/// Dollar equivalent of a get-out-of-jail card.
pub const JAIL_CARD_VALUE: f64 = 50.0;

/// Required ratio multiplier when a trade hands the proposer a monopoly.
pub const MONOPOLY_ESCALATION: f64 = 1.75;

/// Required ratio multiplier when a trade gives up a blocking property.
pub const BLOCK_ESCALATION: f64 = 1.25;

/// Cash offers this many times the value asked for are accepted outright.
const CASH_FAST_PATH: f64 = 4.0;

/// Bonus fraction of a group's printed price when a bundle completes it.
const BUNDLE_MONOPOLY_BONUS: f64 = 0.5;

/// Outcome of weighing a trade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TradeAssessment {
    /// Value of what the recipient would get.
    pub received: f64,
    /// Value of what the recipient would hand over.
    pub given: f64,
    /// Value the recipient needs to receive to say yes.
    pub required: f64,
    /// The proposer would complete a color group.
    pub grants_monopoly: bool,
    /// A property keeping some opponent from a monopoly would change hands.
    pub surrenders_block: bool,
    pub accept: bool,
}

impl TradeAssessment {
    /// How far the offer falls short, in dollars.
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        (self.required - self.received).max(0.0)
    }
}

/// Weigh `trade` for its recipient, who must be `valuation.me()`.
#[must_use]
pub fn evaluate_trade(valuation: &Valuation<'_>, trade: &Trade) -> TradeAssessment {
    let profile = valuation.profile();
    let state = valuation.state();

    let received = side_value(valuation, &trade.offer, Perspective::Receiving)
        + bundle_monopoly_bonus(valuation, &trade.offer.properties);
    let given = side_value(valuation, &trade.request, Perspective::Giving);

    let grants_monopoly = grants_monopoly(valuation, trade);
    let surrenders_block = profile.blocking_awareness
        && trade
            .request
            .properties
            .iter()
            .any(|&p| valuation.blocks_opponent(p));

    let mut escalation = 1.0;
    if grants_monopoly && profile.monopoly_awareness {
        escalation *= MONOPOLY_ESCALATION;
    }
    if surrenders_block {
        escalation *= BLOCK_ESCALATION;
    }

    let cash_only = trade.offer.is_cash_only();
    let base_ratio = if cash_only {
        profile.cash_offer_multiplier
    } else {
        profile.trade_accept_ratio
    };
    let required = given * base_ratio * escalation;

    let affordable = trade.request.money <= state.player(valuation.me()).spendable();
    let fast_path = cash_only
        && !trade.request.properties.is_empty()
        && trade.offer.money as f64 >= CASH_FAST_PATH * given;

    let accept = affordable && (fast_path || (received > 0.0 && received >= required));

    TradeAssessment {
        received,
        given,
        required,
        grants_monopoly,
        surrenders_block,
        accept,
    }
}

fn side_value(valuation: &Valuation<'_>, side: &TradeSide, perspective: Perspective) -> f64 {
    let properties: f64 = side
        .properties
        .iter()
        .map(|&p| valuation.property_value(p, perspective))
        .sum();
    side.money as f64 + f64::from(side.jail_cards) * JAIL_CARD_VALUE + properties
}

/// Extra value when two or more incoming properties together finish a group.
fn bundle_monopoly_bonus(valuation: &Valuation<'_>, incoming: &[SpaceIndex]) -> f64 {
    if !valuation.profile().monopoly_awareness {
        return 0.0;
    }
    let board = &valuation.state().board;
    let me = valuation.me();

    let mut groups: Vec<_> = incoming.iter().filter_map(|&p| board.def(p).group()).collect();
    groups.sort_unstable();
    groups.dedup();

    groups
        .into_iter()
        .filter(|&g| {
            let members = layout::group_members(g);
            let arriving = members.iter().filter(|m| incoming.contains(m)).count();
            arriving >= 2
                && members
                    .iter()
                    .all(|m| incoming.contains(m) || board.owner(*m) == Some(me))
        })
        .map(|g| {
            let price: i64 = layout::group_members(g).iter().map(|&m| layout::space(m).price).sum();
            price as f64 * BUNDLE_MONOPOLY_BONUS
        })
        .sum()
}

/// After the trade the proposer owns a whole group it does not own now.
fn grants_monopoly(valuation: &Valuation<'_>, trade: &Trade) -> bool {
    let board = &valuation.state().board;
    trade.request.properties.iter().any(|&p| {
        board.def(p).group().is_some_and(|g| {
            layout::group_members(g).iter().all(|m| {
                trade.request.properties.contains(m)
                    || (board.owner(*m) == Some(trade.proposer) && !trade.offer.properties.contains(m))
            })
        })
    })
}
