//! Board ownership state and group queries.
//!
//! Ownership is a single array of `SpaceState` indexed by board position.
//! Players never hold references to spaces; "what does X own" is always a
//! scan of this array.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::layout::{self, BOARD_SIZE, RAILROADS, UTILITIES};
use super::space::{ColorGroup, SpaceDef, SpaceIndex, SpaceKind, SpaceState};
use crate::core::PlayerId;

/// Mutable ownership layer over the static layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vector<SpaceState>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with every space unowned.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spaces: (0..BOARD_SIZE).map(|_| SpaceState::default()).collect(),
        }
    }

    /// Static definition of a space.
    #[must_use]
    pub fn def(&self, index: SpaceIndex) -> &'static SpaceDef {
        layout::space(index)
    }

    #[must_use]
    pub fn is_valid(&self, index: SpaceIndex) -> bool {
        index < BOARD_SIZE
    }

    /// Ownership state of a space.
    #[must_use]
    pub fn state(&self, index: SpaceIndex) -> &SpaceState {
        &self.spaces[index]
    }

    /// Mutable ownership state of a space.
    pub fn state_mut(&mut self, index: SpaceIndex) -> &mut SpaceState {
        &mut self.spaces[index]
    }

    #[must_use]
    pub fn owner(&self, index: SpaceIndex) -> Option<PlayerId> {
        self.spaces[index].owner
    }

    /// Spaces owned by `player`, in board order.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> Vec<SpaceIndex> {
        self.spaces
            .iter()
            .enumerate()
            .filter(|(_, s)| s.owner == Some(player))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of ownable spaces that have an owner.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.spaces.iter().filter(|s| s.owner.is_some()).count()
    }

    /// Fraction of ownable spaces already owned, in `[0, 1]`.
    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.owned_count() as f64 / layout::OWNABLE_COUNT as f64
    }

    /// Count of a group's members owned by `player`.
    #[must_use]
    pub fn group_owned_count(&self, player: PlayerId, group: ColorGroup) -> usize {
        layout::group_members(group)
            .iter()
            .filter(|&&i| self.owner(i) == Some(player))
            .count()
    }

    /// `player` owns every member of `group`.
    #[must_use]
    pub fn owns_group(&self, player: PlayerId, group: ColorGroup) -> bool {
        layout::group_members(group)
            .iter()
            .all(|&i| self.owner(i) == Some(player))
    }

    /// Minimum and maximum building counts across a group.
    #[must_use]
    pub fn group_building_range(&self, group: ColorGroup) -> (u8, u8) {
        let counts = layout::group_members(group)
            .iter()
            .map(|&i| self.spaces[i].buildings);
        let min = counts.clone().min().unwrap_or(0);
        let max = counts.max().unwrap_or(0);
        (min, max)
    }

    /// Any member of the group has buildings.
    #[must_use]
    pub fn group_has_buildings(&self, group: ColorGroup) -> bool {
        self.group_building_range(group).1 > 0
    }

    /// Any member of the group is mortgaged.
    #[must_use]
    pub fn group_has_mortgage(&self, group: ColorGroup) -> bool {
        layout::group_members(group)
            .iter()
            .any(|&i| self.spaces[i].mortgaged)
    }

    /// Whether buildings on `index` block trading or mortgaging it.
    #[must_use]
    pub fn group_of_has_buildings(&self, index: SpaceIndex) -> bool {
        self.def(index)
            .group()
            .is_some_and(|g| self.group_has_buildings(g))
    }

    /// Railroads owned by `player`, mortgaged ones included.
    #[must_use]
    pub fn railroads_owned(&self, player: PlayerId) -> usize {
        RAILROADS.iter().filter(|&&i| self.owner(i) == Some(player)).count()
    }

    /// Utilities owned by `player`, mortgaged ones included.
    #[must_use]
    pub fn utilities_owned(&self, player: PlayerId) -> usize {
        UTILITIES.iter().filter(|&&i| self.owner(i) == Some(player)).count()
    }

    /// Houses and hotels placed by `player`.
    #[must_use]
    pub fn building_counts(&self, player: PlayerId) -> (u32, u32) {
        self.spaces
            .iter()
            .filter(|s| s.owner == Some(player))
            .fold((0, 0), |(houses, hotels), s| {
                if s.has_hotel() {
                    (houses, hotels + 1)
                } else {
                    (houses + u32::from(s.buildings), hotels)
                }
            })
    }

    /// Cash `player` could raise by selling every building and mortgaging
    /// every unmortgaged property.
    #[must_use]
    pub fn liquidation_value(&self, player: PlayerId) -> i64 {
        self.spaces
            .iter()
            .enumerate()
            .filter(|(_, s)| s.owner == Some(player))
            .map(|(i, s)| {
                let def = self.def(i);
                let buildings = i64::from(s.buildings) * def.house_cost / 2;
                let mortgage = if s.mortgaged { 0 } else { def.mortgage_value() };
                buildings + mortgage
            })
            .sum()
    }

    /// Members of the same group as `index` other than `index` itself.
    pub fn group_mates(&self, index: SpaceIndex) -> impl Iterator<Item = SpaceIndex> + '_ {
        let members: &'static [SpaceIndex] = match self.def(index).kind {
            SpaceKind::Property(group) => layout::group_members(group),
            SpaceKind::Railroad => &RAILROADS,
            SpaceKind::Utility => &UTILITIES,
            _ => &[],
        };
        members.iter().copied().filter(move |&i| i != index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn give(board: &mut Board, player: PlayerId, spaces: &[SpaceIndex]) {
        for &s in spaces {
            board.state_mut(s).owner = Some(player);
        }
    }

    #[test]
    fn test_new_board_unowned() {
        let board = Board::new();
        assert_eq!(board.owned_count(), 0);
        assert_eq!(board.saturation(), 0.0);
        assert!(board.owner(39).is_none());
    }

    #[test]
    fn test_group_ownership() {
        let mut board = Board::new();
        let p = PlayerId::new(0);
        give(&mut board, p, &[37]);
        assert!(!board.owns_group(p, ColorGroup::DarkBlue));
        assert_eq!(board.group_owned_count(p, ColorGroup::DarkBlue), 1);

        give(&mut board, p, &[39]);
        assert!(board.owns_group(p, ColorGroup::DarkBlue));
        assert_eq!(board.owned_by(p), vec![37, 39]);
    }

    #[test]
    fn test_building_range_and_counts() {
        let mut board = Board::new();
        let p = PlayerId::new(1);
        give(&mut board, p, &[6, 8, 9]);
        board.state_mut(6).buildings = 2;
        board.state_mut(8).buildings = 1;
        board.state_mut(9).buildings = 5;

        assert_eq!(board.group_building_range(ColorGroup::LightBlue), (1, 5));
        assert_eq!(board.building_counts(p), (3, 1));
        assert!(board.group_of_has_buildings(9));
    }

    #[test]
    fn test_liquidation_value() {
        let mut board = Board::new();
        let p = PlayerId::new(0);
        give(&mut board, p, &[1, 3, 5]);
        board.state_mut(1).buildings = 1;
        board.state_mut(5).mortgaged = true;

        // Mediterranean 30 + house 25, Baltic 30, Reading mortgaged 0
        assert_eq!(board.liquidation_value(p), 85);
    }

    #[test]
    fn test_transport_counts_and_mates() {
        let mut board = Board::new();
        let p = PlayerId::new(0);
        give(&mut board, p, &[5, 25, 12]);
        assert_eq!(board.railroads_owned(p), 2);
        assert_eq!(board.utilities_owned(p), 1);

        let mates: Vec<_> = board.group_mates(5).collect();
        assert_eq!(mates, vec![15, 25, 35]);
        let mates: Vec<_> = board.group_mates(39).collect();
        assert_eq!(mates, vec![37]);
        assert_eq!(board.group_mates(0).count(), 0);
    }
}
