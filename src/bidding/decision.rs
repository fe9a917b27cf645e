//! One bidding decision.

use crate::core::{Command, RandomSource};
use crate::engine::Auction;
use crate::valuation::Valuation;

/// Cap on the chance of dropping out once bids pass fair value.
const MAX_BLUFF_CALL: f64 = 0.9;

/// Bid, pass, or stay quiet (when already leading).
///
/// `limit` comes from `calculate_auction_limit`, `reluctance` from
/// `calculate_bid_reluctance`.
pub fn decide_bid<R: RandomSource>(
    valuation: &Valuation<'_>,
    auction: &Auction,
    limit: i64,
    reluctance: f64,
    rng: &mut R,
) -> Option<Command> {
    let me = valuation.me();
    if !auction.is_active_bidder(me) || auction.is_leader(me) {
        return None;
    }

    let profile = valuation.profile();
    let minimum = auction.next_minimum();
    if minimum > limit {
        return Some(Command::PassBid);
    }
    if rng.chance(reluctance * profile.reluctance_weight) {
        return Some(Command::PassBid);
    }

    let fair = valuation.state().board.def(auction.space).price;
    if fair > 0 && minimum > fair {
        let overpay = minimum as f64 / fair as f64 - 1.0;
        if rng.chance((overpay * profile.bluff_call_sensitivity).min(MAX_BLUFF_CALL)) {
            return Some(Command::PassBid);
        }
    }

    let headroom = (limit - minimum) as f64;
    let eagerness = 1.0 - reluctance.clamp(0.0, 1.0);
    let increment = (headroom * (0.1 + 0.3 * eagerness)).round() as i64;
    let amount = (minimum + increment).clamp(minimum, limit);
    Some(Command::PlaceBid { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::DifficultyProfile;
    use crate::core::{GameRng, PlayerId, PublicState, RulesConfig};

    const ME: PlayerId = PlayerId::new(0);
    const OPP: PlayerId = PlayerId::new(1);

    fn state() -> PublicState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect())
    }

    fn auction(highest: Option<(PlayerId, i64)>) -> Auction {
        Auction {
            id: 1,
            space: 24,
            highest_bid: highest.map_or(0, |(_, b)| b),
            highest_bidder: highest.map(|(p, _)| p),
            participants: vec![ME, OPP],
            passed: Vec::new(),
            min_bid: 10,
            bid_count: u32::from(highest.is_some()),
        }
    }

    #[test]
    fn test_pass_above_limit() {
        let s = state();
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        let command = decide_bid(&v, &auction(Some((OPP, 300))), 250, 0.0, &mut GameRng::new(1));
        assert_eq!(command, Some(Command::PassBid));
    }

    #[test]
    fn test_leader_stays_quiet() {
        let s = state();
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        assert!(decide_bid(&v, &auction(Some((ME, 50))), 250, 0.0, &mut GameRng::new(1)).is_none());
    }

    #[test]
    fn test_eager_bid_within_limit() {
        let s = state();
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        // headroom 189, eagerness 1: 11 + 76
        let command = decide_bid(&v, &auction(None), 200, 0.0, &mut GameRng::new(1));
        assert_eq!(command, Some(Command::PlaceBid { amount: 87 }));
    }

    #[test]
    fn test_bids_stay_in_bounds() {
        let s = state();
        let profile = DifficultyProfile::hard();
        let v = Valuation::new(&s, ME, &profile);
        for seed in 0..50 {
            let a = auction(Some((OPP, 260)));
            match decide_bid(&v, &a, 320, 0.3, &mut GameRng::new(seed)) {
                Some(Command::PlaceBid { amount }) => assert!((261..=320).contains(&amount)),
                Some(Command::PassBid) => {}
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
