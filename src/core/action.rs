//! Command representation.
//!
//! Commands are the only way anyone, human or bot, changes a game. Each
//! variant carries exactly the payload it needs; trade bundles are tagged
//! structs with explicit money, property and jail-card fields.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::SpaceIndex;

/// One side of a trade: what that participant hands over.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeSide {
    /// Cash paid.
    pub money: i64,

    /// Board indices of properties handed over.
    /// SmallVec keeps typical bundles (0-3 properties) off the heap.
    pub properties: SmallVec<[SpaceIndex; 4]>,

    /// Get-out-of-jail cards handed over.
    pub jail_cards: u8,
}

impl TradeSide {
    /// A bundle containing only cash.
    #[must_use]
    pub fn cash(money: i64) -> Self {
        Self {
            money,
            ..Self::default()
        }
    }

    /// A bundle containing only properties.
    #[must_use]
    pub fn properties(properties: &[SpaceIndex]) -> Self {
        Self {
            properties: SmallVec::from_slice(properties),
            ..Self::default()
        }
    }

    /// Add cash to the bundle.
    #[must_use]
    pub fn with_money(mut self, money: i64) -> Self {
        self.money = money;
        self
    }

    /// Add a property to the bundle.
    #[must_use]
    pub fn with_property(mut self, space: SpaceIndex) -> Self {
        self.properties.push(space);
        self
    }

    /// Add jail cards to the bundle.
    #[must_use]
    pub fn with_jail_cards(mut self, count: u8) -> Self {
        self.jail_cards = count;
        self
    }

    /// Nothing is handed over.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.money == 0 && self.properties.is_empty() && self.jail_cards == 0
    }

    /// Only cash is handed over.
    #[must_use]
    pub fn is_cash_only(&self) -> bool {
        self.money > 0 && self.properties.is_empty() && self.jail_cards == 0
    }
}

/// A command issued by a participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Roll,
    BuyProperty,
    /// Decline the pending purchase, sending the space to auction.
    DeclineProperty,
    PlaceBid { amount: i64 },
    PassBid,
    ProposeTrade {
        to: PlayerId,
        /// What the proposer gives.
        offer: TradeSide,
        /// What the proposer asks for.
        request: TradeSide,
    },
    AcceptTrade { trade_id: u32 },
    DeclineTrade { trade_id: u32 },
    BuildHouse { space: SpaceIndex },
    SellHouse { space: SpaceIndex },
    MortgageProperty { space: SpaceIndex },
    UnmortgageProperty { space: SpaceIndex },
    PayJailFine,
    UseJailCard,
    DeclareBankruptcy,
    EndTurn,
}

/// Payload-free command discriminant, used for legality listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Roll,
    BuyProperty,
    DeclineProperty,
    PlaceBid,
    PassBid,
    ProposeTrade,
    AcceptTrade,
    DeclineTrade,
    BuildHouse,
    SellHouse,
    MortgageProperty,
    UnmortgageProperty,
    PayJailFine,
    UseJailCard,
    DeclareBankruptcy,
    EndTurn,
}

impl Command {
    /// The command's discriminant.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Roll => CommandKind::Roll,
            Command::BuyProperty => CommandKind::BuyProperty,
            Command::DeclineProperty => CommandKind::DeclineProperty,
            Command::PlaceBid { .. } => CommandKind::PlaceBid,
            Command::PassBid => CommandKind::PassBid,
            Command::ProposeTrade { .. } => CommandKind::ProposeTrade,
            Command::AcceptTrade { .. } => CommandKind::AcceptTrade,
            Command::DeclineTrade { .. } => CommandKind::DeclineTrade,
            Command::BuildHouse { .. } => CommandKind::BuildHouse,
            Command::SellHouse { .. } => CommandKind::SellHouse,
            Command::MortgageProperty { .. } => CommandKind::MortgageProperty,
            Command::UnmortgageProperty { .. } => CommandKind::UnmortgageProperty,
            Command::PayJailFine => CommandKind::PayJailFine,
            Command::UseJailCard => CommandKind::UseJailCard,
            Command::DeclareBankruptcy => CommandKind::DeclareBankruptcy,
            Command::EndTurn => CommandKind::EndTurn,
        }
    }
}

impl CommandKind {
    /// Trade commands are legal outside a player's own turn.
    #[must_use]
    pub fn is_trade(self) -> bool {
        matches!(
            self,
            CommandKind::ProposeTrade | CommandKind::AcceptTrade | CommandKind::DeclineTrade
        )
    }

    /// Commands that raise cash from holdings.
    #[must_use]
    pub fn is_liquidation(self) -> bool {
        matches!(self, CommandKind::SellHouse | CommandKind::MortgageProperty)
    }
}

/// A recorded command with metadata for replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The player who issued the command.
    pub player: PlayerId,

    /// The command applied.
    pub command: Command,

    /// Turn number when applied.
    pub turn: u32,

    /// Sequence number within the game.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_side_builders() {
        let side = TradeSide::cash(100).with_property(1).with_jail_cards(1);
        assert_eq!(side.money, 100);
        assert_eq!(side.properties.as_slice(), &[1]);
        assert!(!side.is_cash_only());
        assert!(TradeSide::cash(50).is_cash_only());
        assert!(TradeSide::default().is_empty());
    }

    #[test]
    fn test_command_kind() {
        assert_eq!(Command::PlaceBid { amount: 10 }.kind(), CommandKind::PlaceBid);
        assert!(CommandKind::AcceptTrade.is_trade());
        assert!(!CommandKind::Roll.is_trade());
        assert!(CommandKind::MortgageProperty.is_liquidation());
    }

    #[test]
    fn test_command_serialization() {
        let command = Command::ProposeTrade {
            to: PlayerId::new(2),
            offer: TradeSide::cash(300),
            request: TradeSide::properties(&[37]),
        };
        let json = serde_json::to_string(&command).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(command, deserialized);
    }
}
