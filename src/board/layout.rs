//! The standard 40-space board.

use super::space::{ColorGroup, SpaceDef, SpaceIndex, SpaceKind};

pub const BOARD_SIZE: usize = 40;
pub const GO: SpaceIndex = 0;
pub const JAIL: SpaceIndex = 10;
pub const FREE_PARKING: SpaceIndex = 20;
pub const GO_TO_JAIL: SpaceIndex = 30;

pub const RAILROADS: [SpaceIndex; 4] = [5, 15, 25, 35];
pub const UTILITIES: [SpaceIndex; 2] = [12, 28];

/// Number of ownable spaces (22 streets, 4 railroads, 2 utilities).
pub const OWNABLE_COUNT: usize = 28;

const fn street(
    name: &'static str,
    group: ColorGroup,
    price: i64,
    rent: [i64; 6],
    house_cost: i64,
) -> SpaceDef {
    SpaceDef {
        name,
        kind: SpaceKind::Property(group),
        price,
        rent,
        house_cost,
    }
}

const fn railroad(name: &'static str) -> SpaceDef {
    SpaceDef {
        name,
        kind: SpaceKind::Railroad,
        price: 200,
        rent: [0; 6],
        house_cost: 0,
    }
}

const fn utility(name: &'static str) -> SpaceDef {
    SpaceDef {
        name,
        kind: SpaceKind::Utility,
        price: 150,
        rent: [0; 6],
        house_cost: 0,
    }
}

const fn special(name: &'static str, kind: SpaceKind) -> SpaceDef {
    SpaceDef {
        name,
        kind,
        price: 0,
        rent: [0; 6],
        house_cost: 0,
    }
}

use ColorGroup::*;

pub static BOARD: [SpaceDef; BOARD_SIZE] = [
    special("GO", SpaceKind::Go),
    street("Mediterranean Avenue", Brown, 60, [2, 10, 30, 90, 160, 250], 50),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Baltic Avenue", Brown, 60, [4, 20, 60, 180, 320, 450], 50),
    special("Income Tax", SpaceKind::Tax(200)),
    railroad("Reading Railroad"),
    street("Oriental Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550], 50),
    special("Chance", SpaceKind::Chance),
    street("Vermont Avenue", LightBlue, 100, [6, 30, 90, 270, 400, 550], 50),
    street("Connecticut Avenue", LightBlue, 120, [8, 40, 100, 300, 450, 600], 50),
    special("Jail", SpaceKind::Jail),
    street("St. Charles Place", Pink, 140, [10, 50, 150, 450, 625, 750], 100),
    utility("Electric Company"),
    street("States Avenue", Pink, 140, [10, 50, 150, 450, 625, 750], 100),
    street("Virginia Avenue", Pink, 160, [12, 60, 180, 500, 700, 900], 100),
    railroad("Pennsylvania Railroad"),
    street("St. James Place", Orange, 180, [14, 70, 200, 550, 750, 950], 100),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Tennessee Avenue", Orange, 180, [14, 70, 200, 550, 750, 950], 100),
    street("New York Avenue", Orange, 200, [16, 80, 220, 600, 800, 1000], 100),
    special("Free Parking", SpaceKind::FreeParking),
    street("Kentucky Avenue", Red, 220, [18, 90, 250, 700, 875, 1050], 150),
    special("Chance", SpaceKind::Chance),
    street("Indiana Avenue", Red, 220, [18, 90, 250, 700, 875, 1050], 150),
    street("Illinois Avenue", Red, 240, [20, 100, 300, 750, 925, 1100], 150),
    railroad("B&O Railroad"),
    street("Atlantic Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150], 150),
    street("Ventnor Avenue", Yellow, 260, [22, 110, 330, 800, 975, 1150], 150),
    utility("Water Works"),
    street("Marvin Gardens", Yellow, 280, [24, 120, 360, 850, 1025, 1200], 150),
    special("Go To Jail", SpaceKind::GoToJail),
    street("Pacific Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275], 200),
    street("North Carolina Avenue", Green, 300, [26, 130, 390, 900, 1100, 1275], 200),
    special("Community Chest", SpaceKind::CommunityChest),
    street("Pennsylvania Avenue", Green, 320, [28, 150, 450, 1000, 1200, 1400], 200),
    railroad("Short Line"),
    special("Chance", SpaceKind::Chance),
    street("Park Place", DarkBlue, 350, [35, 175, 500, 1100, 1300, 1500], 200),
    special("Luxury Tax", SpaceKind::Tax(100)),
    street("Boardwalk", DarkBlue, 400, [50, 200, 600, 1400, 1700, 2000], 200),
];

/// Static definition of a space. Panics on an index past the board.
#[must_use]
pub fn space(index: SpaceIndex) -> &'static SpaceDef {
    &BOARD[index]
}

/// Board indices of a color group, in board order.
#[must_use]
pub fn group_members(group: ColorGroup) -> &'static [SpaceIndex] {
    match group {
        Brown => &[1, 3],
        LightBlue => &[6, 8, 9],
        Pink => &[11, 13, 14],
        Orange => &[16, 18, 19],
        Red => &[21, 23, 24],
        Yellow => &[26, 27, 29],
        Green => &[31, 32, 34],
        DarkBlue => &[37, 39],
    }
}

/// All ownable indices in board order.
pub fn ownable_spaces() -> impl Iterator<Item = SpaceIndex> {
    (0..BOARD_SIZE).filter(|&i| BOARD[i].is_ownable())
}

/// Next railroad strictly ahead of `from`, wrapping.
#[must_use]
pub fn nearest_railroad(from: SpaceIndex) -> SpaceIndex {
    nearest_of(&RAILROADS, from)
}

/// Next utility strictly ahead of `from`, wrapping.
#[must_use]
pub fn nearest_utility(from: SpaceIndex) -> SpaceIndex {
    nearest_of(&UTILITIES, from)
}

fn nearest_of(candidates: &[SpaceIndex], from: SpaceIndex) -> SpaceIndex {
    candidates
        .iter()
        .copied()
        .find(|&c| c > from)
        .unwrap_or(candidates[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_shape() {
        assert_eq!(BOARD.len(), 40);
        assert_eq!(ownable_spaces().count(), OWNABLE_COUNT);
        assert_eq!(space(GO).kind, SpaceKind::Go);
        assert_eq!(space(JAIL).kind, SpaceKind::Jail);
        assert_eq!(space(GO_TO_JAIL).kind, SpaceKind::GoToJail);
        assert_eq!(space(FREE_PARKING).kind, SpaceKind::FreeParking);
    }

    #[test]
    fn test_group_members_match_kinds() {
        for group in ColorGroup::ALL {
            for &index in group_members(group) {
                assert_eq!(space(index).group(), Some(group), "space {index}");
            }
        }
        let streets: usize = ColorGroup::ALL.iter().map(|&g| group_members(g).len()).sum();
        assert_eq!(streets, 22);
    }

    #[test]
    fn test_nearest_transport() {
        assert_eq!(nearest_railroad(7), 15);
        assert_eq!(nearest_railroad(36), 5);
        assert_eq!(nearest_utility(7), 12);
        assert_eq!(nearest_utility(22), 28);
        assert_eq!(nearest_utility(36), 12);
    }

    #[test]
    fn test_mortgage_values() {
        assert_eq!(space(39).mortgage_value(), 200);
        assert_eq!(space(5).mortgage_value(), 100);
        assert_eq!(space(12).mortgage_value(), 75);
    }
}
