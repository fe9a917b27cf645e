//! Counter-offers for near-miss trades.

use crate::engine::Trade;
use crate::valuation::{TradeAssessment, Valuation};

use super::proposal::Proposal;

/// Offers worth at least this fraction of the requirement get a counter.
pub const COUNTER_WINDOW: f64 = 0.6;

/// A counter never asks for more than this share of the proposer's cash.
pub const COUNTER_CASH_CAP: f64 = 0.8;

const CASH_STEP: i64 = 10;

/// Build a counter to a declined trade: the same exchange with enough
/// extra cash from the proposer to close the gap.
#[must_use]
pub fn generate_counter_offer(
    valuation: &Valuation<'_>,
    trade: &Trade,
    assessment: &TradeAssessment,
) -> Option<Proposal> {
    if !valuation.profile().counter_offers || assessment.accept || assessment.grants_monopoly {
        return None;
    }
    if assessment.required <= 0.0 || assessment.received < COUNTER_WINDOW * assessment.required {
        return None;
    }

    let shortfall = assessment.shortfall().ceil() as i64;
    if shortfall <= 0 {
        return None;
    }
    let extra = (shortfall + CASH_STEP - 1) / CASH_STEP * CASH_STEP;
    let money = trade.offer.money + extra;

    let proposer_cash = valuation.state().player(trade.proposer).spendable();
    if money as f64 > COUNTER_CASH_CAP * proposer_cash as f64 {
        return None;
    }

    Some(Proposal {
        to: trade.proposer,
        offer: trade.request.clone(),
        request: trade.offer.clone().with_money(money),
        target: trade.offer.properties.first().copied(),
    })
}
