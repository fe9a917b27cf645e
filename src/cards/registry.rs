//! The printed Chance and Community Chest cards.

use super::definition::{CardDef, CardEffect, DeckKind};

use CardEffect::*;

pub static CHANCE_CARDS: [CardDef; 16] = [
    CardDef::new("Advance to Boardwalk", AdvanceTo(39)),
    CardDef::new("Advance to GO (Collect $200)", AdvanceTo(0)),
    CardDef::new("Advance to Illinois Avenue", AdvanceTo(24)),
    CardDef::new("Advance to St. Charles Place", AdvanceTo(11)),
    CardDef::new("Advance to the nearest Railroad", AdvanceToNearestRailroad),
    CardDef::new("Advance to the nearest Railroad", AdvanceToNearestRailroad),
    CardDef::new("Advance to the nearest Utility", AdvanceToNearestUtility),
    CardDef::new("Bank pays you dividend of $50", Collect(50)),
    CardDef::new("Get Out of Jail Free", JailCard),
    CardDef::new("Go Back 3 Spaces", MoveBack(3)),
    CardDef::new("Go to Jail", GoToJail),
    CardDef::new(
        "Make general repairs on all your property",
        Repairs { per_house: 25, per_hotel: 100 },
    ),
    CardDef::new("Speeding fine $15", Pay(15)),
    CardDef::new("Take a trip to Reading Railroad", AdvanceTo(5)),
    CardDef::new("You have been elected Chairman of the Board", PayEach(50)),
    CardDef::new("Your building loan matures", Collect(150)),
];

pub static COMMUNITY_CHEST_CARDS: [CardDef; 16] = [
    CardDef::new("Advance to GO (Collect $200)", AdvanceTo(0)),
    CardDef::new("Bank error in your favor", Collect(200)),
    CardDef::new("Doctor's fee", Pay(50)),
    CardDef::new("From sale of stock you get $50", Collect(50)),
    CardDef::new("Get Out of Jail Free", JailCard),
    CardDef::new("Go to Jail", GoToJail),
    CardDef::new("Holiday fund matures", Collect(100)),
    CardDef::new("Income tax refund", Collect(20)),
    CardDef::new("It is your birthday", CollectFromEach(10)),
    CardDef::new("Life insurance matures", Collect(100)),
    CardDef::new("Pay hospital fees of $100", Pay(100)),
    CardDef::new("Pay school fees of $50", Pay(50)),
    CardDef::new("Receive $25 consultancy fee", Collect(25)),
    CardDef::new(
        "You are assessed for street repairs",
        Repairs { per_house: 40, per_hotel: 115 },
    ),
    CardDef::new("You have won second prize in a beauty contest", Collect(10)),
    CardDef::new("You inherit $100", Collect(100)),
];

/// The printed cards of a pile.
#[must_use]
pub fn cards(kind: DeckKind) -> &'static [CardDef] {
    match kind {
        DeckKind::Chance => &CHANCE_CARDS,
        DeckKind::CommunityChest => &COMMUNITY_CHEST_CARDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_pile_has_one_jail_card() {
        for kind in [DeckKind::Chance, DeckKind::CommunityChest] {
            let count = cards(kind).iter().filter(|c| c.effect == JailCard).count();
            assert_eq!(count, 1, "{}", kind.name());
        }
    }

    #[test]
    fn test_advance_targets_are_on_board() {
        for card in CHANCE_CARDS.iter().chain(COMMUNITY_CHEST_CARDS.iter()) {
            if let AdvanceTo(target) = card.effect {
                assert!(target < crate::board::BOARD_SIZE);
            }
        }
    }
}
