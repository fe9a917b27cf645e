//! Property values from one player's point of view.
//!
//! Values are heuristic, in dollars. They start from the printed price
//! (or the cost of lifting a mortgage), add buildings, apply a color tier
//! and then adjust for monopolies and blocks depending on who gains.

use crate::agent::DifficultyProfile;
use crate::board::{layout, ColorGroup, SpaceIndex, SpaceKind};
use crate::core::{PlayerId, PublicState};

/// Multiplier for a property that completes (or would break) a monopoly.
pub const MONOPOLY_MULTIPLIER: f64 = 2.0;

/// Premium for giving up a property that keeps an opponent from a monopoly.
pub const BLOCK_PREMIUM: f64 = 1.5;

/// Value gained per railroad already held.
const RAILROAD_STEP: f64 = 0.25;

/// Whose hands a property is moving into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    /// The evaluating player would receive it.
    Receiving,
    /// The evaluating player would give it away.
    Giving,
}

/// Relative desirability of a space kind.
#[must_use]
pub fn tier_weight(kind: SpaceKind) -> f64 {
    match kind {
        SpaceKind::Property(group) => match group {
            ColorGroup::Brown => 0.8,
            ColorGroup::LightBlue => 0.9,
            ColorGroup::Pink => 1.0,
            ColorGroup::Orange => 1.2,
            ColorGroup::Red => 1.1,
            ColorGroup::Yellow => 1.05,
            ColorGroup::Green => 1.0,
            ColorGroup::DarkBlue => 1.1,
        },
        SpaceKind::Railroad => 1.0,
        SpaceKind::Utility => 0.7,
        _ => 0.0,
    }
}

/// Read-only valuation context for one player.
#[derive(Clone, Copy, Debug)]
pub struct Valuation<'a> {
    state: &'a PublicState,
    me: PlayerId,
    profile: &'a DifficultyProfile,
}

impl<'a> Valuation<'a> {
    #[must_use]
    pub fn new(state: &'a PublicState, me: PlayerId, profile: &'a DifficultyProfile) -> Self {
        Self { state, me, profile }
    }

    #[must_use]
    pub fn state(&self) -> &'a PublicState {
        self.state
    }

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn profile(&self) -> &'a DifficultyProfile {
        self.profile
    }

    /// Spendable cash of the evaluating player.
    #[must_use]
    pub fn cash(&self) -> i64 {
        self.state.player(self.me).spendable()
    }

    /// Cash the evaluating player keeps back.
    #[must_use]
    pub fn reserve(&self) -> i64 {
        self.profile.reserve(self.state.net_worth(self.me))
    }

    /// Cash available for discretionary spending.
    #[must_use]
    pub fn surplus(&self) -> i64 {
        self.cash() - self.reserve()
    }

    /// `player` would own the whole color group of `space` after acquiring it.
    #[must_use]
    pub fn completes_monopoly(&self, player: PlayerId, space: SpaceIndex) -> bool {
        let Some(group) = self.state.board.def(space).group() else {
            return false;
        };
        self.state.board.owner(space) != Some(player)
            && layout::group_members(group)
                .iter()
                .all(|&m| m == space || self.state.board.owner(m) == Some(player))
    }

    /// Some active opponent would complete a monopoly with `space`.
    #[must_use]
    pub fn blocks_opponent(&self, space: SpaceIndex) -> bool {
        self.state
            .active_players()
            .filter(|&p| p != self.me)
            .any(|p| self.completes_monopoly(p, space))
    }

    /// The evaluating player owns the whole group of `space`.
    #[must_use]
    pub fn holds_monopoly(&self, space: SpaceIndex) -> bool {
        self.state
            .board
            .def(space)
            .group()
            .is_some_and(|g| self.state.board.owns_group(self.me, g))
    }

    /// Heuristic value of `space` for the evaluating player.
    #[must_use]
    pub fn property_value(&self, space: SpaceIndex, perspective: Perspective) -> f64 {
        let board = &self.state.board;
        let def = board.def(space);
        let tile = board.state(space);

        let mut value = if tile.mortgaged {
            self.state.rules.unmortgage_cost(def.mortgage_value()) as f64
        } else {
            def.price as f64
        };
        value += f64::from(tile.buildings) * def.house_cost as f64;
        value *= tier_weight(def.kind);

        let railroads = board.railroads_owned(self.me) as f64;
        match perspective {
            Perspective::Receiving => {
                match def.kind {
                    SpaceKind::Railroad => value *= 1.0 + RAILROAD_STEP * railroads,
                    SpaceKind::Utility if board.utilities_owned(self.me) > 0 => value *= 1.25,
                    _ => {}
                }
                if self.profile.monopoly_awareness && self.completes_monopoly(self.me, space) {
                    value *= MONOPOLY_MULTIPLIER;
                }
            }
            Perspective::Giving => {
                if def.kind == SpaceKind::Railroad {
                    value *= 1.0 + RAILROAD_STEP * (railroads - 1.0).max(0.0);
                }
                if self.profile.monopoly_awareness && self.holds_monopoly(space) {
                    value *= MONOPOLY_MULTIPLIER;
                }
                if self.profile.blocking_awareness && self.blocks_opponent(space) {
                    value *= BLOCK_PREMIUM;
                }
            }
        }
        value
    }

    /// How much the evaluating player wants to keep `space` unmortgaged.
    ///
    /// Liquidation mortgages in ascending order of this score.
    #[must_use]
    pub fn mortgage_priority(&self, space: SpaceIndex) -> f64 {
        let board = &self.state.board;
        let def = board.def(space);
        let mut score = def.price as f64 / 100.0 + tier_weight(def.kind);

        if self.blocks_opponent(space) {
            score += 2.0;
        }
        match def.kind {
            SpaceKind::Property(group) => {
                let owned = board.group_owned_count(self.me, group) as f64;
                let total = layout::group_members(group).len() as f64;
                score += 2.0 * owned / total;
            }
            SpaceKind::Railroad => score += 0.5 * board.railroads_owned(self.me) as f64,
            SpaceKind::Utility => score += 0.25 * board.utilities_owned(self.me) as f64,
            _ => {}
        }
        score
    }

    /// Ranking of a color group for building and for keeping buildings.
    #[must_use]
    pub fn group_rank(&self, group: ColorGroup) -> f64 {
        let members = layout::group_members(group);
        let top_rent: i64 = members.iter().map(|&m| layout::space(m).rent[3]).sum();
        tier_weight(SpaceKind::Property(group)) * top_rent as f64 / members.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;

    const ME: PlayerId = PlayerId::new(0);
    const OPP: PlayerId = PlayerId::new(1);

    fn state() -> PublicState {
        let names: Vec<String> = (0..2).map(|i| format!("P{i}")).collect();
        PublicState::new(RulesConfig::default(), &names, PlayerId::all(2).collect())
    }

    #[test]
    fn test_monopoly_completion_multiplier() {
        let mut s = state();
        s.board.state_mut(37).owner = Some(ME);
        let hard = DifficultyProfile::hard();
        let easy = DifficultyProfile::easy();

        let aware = Valuation::new(&s, ME, &hard).property_value(39, Perspective::Receiving);
        let naive = Valuation::new(&s, ME, &easy).property_value(39, Perspective::Receiving);
        assert!((naive - 440.0).abs() < 1e-9);
        assert!((aware - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_blocking_premium_when_giving() {
        let mut s = state();
        s.board.state_mut(37).owner = Some(OPP);
        s.board.state_mut(39).owner = Some(ME);
        let hard = DifficultyProfile::hard();
        let v = Valuation::new(&s, ME, &hard);

        assert!(v.blocks_opponent(39));
        assert!((v.property_value(39, Perspective::Giving) - 660.0).abs() < 1e-9);
    }

    #[test]
    fn test_mortgaged_valued_at_unmortgage_cost() {
        let mut s = state();
        s.board.state_mut(5).owner = Some(ME);
        s.board.state_mut(5).mortgaged = true;
        let profile = DifficultyProfile::easy();
        let v = Valuation::new(&s, ME, &profile);
        // 110 to lift, no other railroads held
        assert!((v.property_value(5, Perspective::Giving) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_railroads_scale_with_count() {
        let mut s = state();
        s.board.state_mut(5).owner = Some(ME);
        s.board.state_mut(15).owner = Some(ME);
        let profile = DifficultyProfile::medium();
        let v = Valuation::new(&s, ME, &profile);
        assert!((v.property_value(25, Perspective::Receiving) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_mortgage_priority_prefers_keeping_blocks() {
        let mut s = state();
        s.board.state_mut(1).owner = Some(ME);
        s.board.state_mut(39).owner = Some(ME);
        s.board.state_mut(37).owner = Some(OPP);
        let profile = DifficultyProfile::hard();
        let v = Valuation::new(&s, ME, &profile);
        assert!(v.mortgage_priority(39) > v.mortgage_priority(1));
    }
}
