//! Rent computation.

use crate::board::{Board, SpaceIndex, SpaceKind};

/// How the landing that triggers rent came about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RentMode {
    /// A normal dice move.
    #[default]
    Standard,
    /// Sent by the nearest-railroad card: railroad rent is doubled.
    DoubleRailroad,
    /// Sent by the nearest-utility card: rent is ten times the dice.
    UtilityTenTimes,
}

/// Rent owed for landing on `space`, or 0 when unowned or mortgaged.
///
/// `dice_total` is the roll that moved the player; utilities scale with it.
#[must_use]
pub fn rent_due(board: &Board, space: SpaceIndex, dice_total: u8, mode: RentMode) -> i64 {
    let state = board.state(space);
    let Some(owner) = state.owner else {
        return 0;
    };
    if state.mortgaged {
        return 0;
    }

    let def = board.def(space);
    match def.kind {
        SpaceKind::Property(group) => {
            let base = def.rent[usize::from(state.buildings)];
            if state.buildings == 0 && board.owns_group(owner, group) {
                base * 2
            } else {
                base
            }
        }
        SpaceKind::Railroad => {
            let owned = board.railroads_owned(owner).max(1) as u32;
            let rent = 25 * (1_i64 << (owned - 1));
            if mode == RentMode::DoubleRailroad {
                rent * 2
            } else {
                rent
            }
        }
        SpaceKind::Utility => {
            let multiplier = if mode == RentMode::UtilityTenTimes || board.utilities_owned(owner) == 2 {
                10
            } else {
                4
            };
            i64::from(dice_total) * multiplier
        }
        _ => 0,
    }
}
