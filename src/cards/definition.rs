//! Card definitions and their effects.

use serde::{Deserialize, Serialize};

use crate::board::SpaceIndex;

/// Which pile a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DeckKind::Chance => "Chance",
            DeckKind::CommunityChest => "Community Chest",
        }
    }
}

/// What happens when a card is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEffect {
    /// Move forward to a space, collecting GO when passing it.
    AdvanceTo(SpaceIndex),
    /// Move to the next railroad; an owner collects double rent.
    AdvanceToNearestRailroad,
    /// Move to the next utility; an owner collects ten times the dice.
    AdvanceToNearestUtility,
    /// Move backwards without collecting GO.
    MoveBack(u8),
    /// Receive money from the bank.
    Collect(i64),
    /// Pay money into the free-parking pool.
    Pay(i64),
    /// Every other active player pays the drawer.
    CollectFromEach(i64),
    /// The drawer pays every other active player.
    PayEach(i64),
    GoToJail,
    JailCard,
    /// Pay into the pool per house and per hotel owned.
    Repairs { per_house: i64, per_hotel: i64 },
}

/// A printed card.
#[derive(Clone, Copy, Debug)]
pub struct CardDef {
    pub text: &'static str,
    pub effect: CardEffect,
}

impl CardDef {
    pub const fn new(text: &'static str, effect: CardEffect) -> Self {
        Self { text, effect }
    }
}
