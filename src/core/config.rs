//! Rule constants for a game.
//!
//! The board and decks are fixed content; the numbers that table hosts
//! commonly tweak live here so they travel with saved games.

use serde::{Deserialize, Serialize};

/// Economic and turn constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cash each player starts with.
    pub starting_cash: i64,

    /// Paid by the bank when a player passes or lands on GO.
    pub go_bonus: i64,

    /// Fine to leave jail without doubles.
    pub jail_fine: i64,

    /// Failed doubles attempts before the fine becomes mandatory.
    pub max_jail_turns: u8,

    /// Houses available in the bank at game start.
    pub house_supply: u8,

    /// Hotels available in the bank at game start.
    pub hotel_supply: u8,

    /// Lowest opening bid in an auction.
    pub min_bid: i64,

    /// Unmortgage interest in percent of the mortgage value.
    pub unmortgage_interest_pct: i64,

    /// Maximum number of retained log records.
    pub log_capacity: usize,

    /// Resolved trades kept for clients to observe outcomes.
    pub trade_history: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_cash: 1500,
            go_bonus: 200,
            jail_fine: 50,
            max_jail_turns: 3,
            house_supply: 32,
            hotel_supply: 12,
            min_bid: 10,
            unmortgage_interest_pct: 10,
            log_capacity: 100,
            trade_history: 16,
        }
    }
}

impl RulesConfig {
    /// Set starting cash.
    #[must_use]
    pub fn with_starting_cash(mut self, cash: i64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Set the GO bonus.
    #[must_use]
    pub fn with_go_bonus(mut self, bonus: i64) -> Self {
        self.go_bonus = bonus;
        self
    }

    /// Set the bank building supply.
    #[must_use]
    pub fn with_building_supply(mut self, houses: u8, hotels: u8) -> Self {
        self.house_supply = houses;
        self.hotel_supply = hotels;
        self
    }

    /// Set the auction opening bid.
    #[must_use]
    pub fn with_min_bid(mut self, min_bid: i64) -> Self {
        self.min_bid = min_bid;
        self
    }

    /// Set the log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Cost to lift a mortgage worth `mortgage_value`, floor-rounded.
    #[must_use]
    pub fn unmortgage_cost(&self, mortgage_value: i64) -> i64 {
        mortgage_value * (100 + self.unmortgage_interest_pct) / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.starting_cash, 1500);
        assert_eq!(config.go_bonus, 200);
        assert_eq!(config.house_supply, 32);
        assert_eq!(config.hotel_supply, 12);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RulesConfig::default()
            .with_starting_cash(2000)
            .with_building_supply(4, 1)
            .with_min_bid(5);

        assert_eq!(config.starting_cash, 2000);
        assert_eq!(config.house_supply, 4);
        assert_eq!(config.hotel_supply, 1);
        assert_eq!(config.min_bid, 5);
    }

    #[test]
    fn test_unmortgage_cost_floors() {
        let config = RulesConfig::default();
        assert_eq!(config.unmortgage_cost(30), 33);
        assert_eq!(config.unmortgage_cost(35), 38); // 38.5 floored
        assert_eq!(config.unmortgage_cost(175), 192); // 192.5 floored
    }

    #[test]
    fn test_serialization() {
        let config = RulesConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
