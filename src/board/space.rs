//! Space definitions and mutable per-space state.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Board position, 0 (GO) through 39.
pub type SpaceIndex = usize;

/// Color group of a street property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

impl ColorGroup {
    /// All groups in board order.
    pub const ALL: [ColorGroup; 8] = [
        ColorGroup::Brown,
        ColorGroup::LightBlue,
        ColorGroup::Pink,
        ColorGroup::Orange,
        ColorGroup::Red,
        ColorGroup::Yellow,
        ColorGroup::Green,
        ColorGroup::DarkBlue,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorGroup::Brown => "brown",
            ColorGroup::LightBlue => "light blue",
            ColorGroup::Pink => "pink",
            ColorGroup::Orange => "orange",
            ColorGroup::Red => "red",
            ColorGroup::Yellow => "yellow",
            ColorGroup::Green => "green",
            ColorGroup::DarkBlue => "dark blue",
        }
    }
}

/// What a space does when landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceKind {
    Go,
    Property(ColorGroup),
    Railroad,
    Utility,
    /// Flat tax paid into the free-parking pool.
    Tax(i64),
    Chance,
    CommunityChest,
    Jail,
    GoToJail,
    FreeParking,
}

/// Static description of a space.
#[derive(Clone, Copy, Debug)]
pub struct SpaceDef {
    pub name: &'static str,
    pub kind: SpaceKind,
    /// Purchase price; 0 for non-ownable spaces.
    pub price: i64,
    /// Rent by building count; index 5 is a hotel. Only used by streets.
    pub rent: [i64; 6],
    /// Cost of one house (or the hotel step).
    pub house_cost: i64,
}

impl SpaceDef {
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        matches!(
            self.kind,
            SpaceKind::Property(_) | SpaceKind::Railroad | SpaceKind::Utility
        )
    }

    /// Street color group, if this is a street.
    #[must_use]
    pub fn group(&self) -> Option<ColorGroup> {
        match self.kind {
            SpaceKind::Property(group) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub fn mortgage_value(&self) -> i64 {
        self.price / 2
    }
}

/// Mutable ownership state of one space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceState {
    pub owner: Option<PlayerId>,
    /// 0-4 houses, 5 = hotel.
    pub buildings: u8,
    pub mortgaged: bool,
}

impl SpaceState {
    #[must_use]
    pub fn has_hotel(&self) -> bool {
        self.buildings == 5
    }

    #[must_use]
    pub fn houses(&self) -> u8 {
        if self.has_hotel() {
            0
        } else {
            self.buildings
        }
    }
}
