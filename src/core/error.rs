//! Rejection reasons.
//!
//! Every rejected command returns one of these with a human-readable
//! message. A rejection never mutates state.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::SpaceIndex;

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("The game is over")]
    GameOver,
    #[error("{player} is not seated at this table")]
    UnknownPlayer { player: PlayerId },
    #[error("{player} is bankrupt")]
    PlayerBankrupt { player: PlayerId },
    #[error("It is not {player}'s turn")]
    NotYourTurn { player: PlayerId },
    #[error("Resolve the pending {pending} first")]
    PendingActionBlocks { pending: &'static str },
    #[error("An auction is in progress")]
    AuctionInProgress,
    #[error("There is no auction in progress")]
    NoAuction,
    #[error("{player} is not bidding in this auction")]
    NotInAuction { player: PlayerId },
    #[error("Bid of {offered} is below the minimum of {minimum}")]
    BidTooLow { minimum: i64, offered: i64 },
    #[error("The high bidder cannot pass")]
    HighBidderCannotPass,
    #[error("There is no purchase decision pending")]
    NoPendingPurchase,
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("Rolling is not allowed now")]
    CannotRoll,
    #[error("Roll the dice before ending the turn")]
    MustRollFirst,
    #[error("Doubles were rolled; roll again before ending the turn")]
    MustRollAgain,
    #[error("{player} is not in jail")]
    NotInJail { player: PlayerId },
    #[error("Jail options must be used before rolling")]
    AlreadyRolled,
    #[error("No get-out-of-jail card to use")]
    NoJailCard,
    #[error("Space {space} does not exist")]
    InvalidSpace { space: SpaceIndex },
    #[error("Space {space} cannot be owned")]
    NotOwnable { space: SpaceIndex },
    #[error("{player} does not own space {space}")]
    NotOwner { player: PlayerId, space: SpaceIndex },
    #[error("Buildings require the complete color group")]
    IncompleteGroup,
    #[error("A property in the color group is mortgaged")]
    GroupHasMortgage,
    #[error("Buildings must be spread evenly across the color group")]
    UnevenBuilding,
    #[error("Space {space} already has a hotel")]
    MaxBuildings { space: SpaceIndex },
    #[error("Space {space} has no buildings")]
    NoBuildings { space: SpaceIndex },
    #[error("The bank has no houses left")]
    NoHousesInSupply,
    #[error("The bank has no hotels left")]
    NoHotelsInSupply,
    #[error("Sell the buildings in the color group first")]
    BuildingsInGroup,
    #[error("Space {space} is already mortgaged")]
    AlreadyMortgaged { space: SpaceIndex },
    #[error("Space {space} is not mortgaged")]
    NotMortgaged { space: SpaceIndex },
    #[error("Trade {trade_id} does not exist or is no longer pending")]
    TradeNotFound { trade_id: u32 },
    #[error("Only the recipient can accept trade {trade_id}")]
    NotTradeRecipient { trade_id: u32 },
    #[error("Cannot trade with yourself")]
    TradeWithSelf,
    #[error("A trade must move something")]
    EmptyTrade,
    #[error("A trade between these players is already pending")]
    DuplicateTrade,
    #[error("Not enough get-out-of-jail cards: required {required}, held {held}")]
    NotEnoughJailCards { required: u8, held: u8 },
    #[error("Space {space} appears twice in the trade")]
    DuplicateProperty { space: SpaceIndex },
    #[error("Nothing is owed; bankruptcy is not available")]
    NoObligation,
    #[error("Money amounts cannot be negative")]
    NegativeAmount,
}

/// Result type for command handlers.
pub type RuleResult<T> = Result<T, RuleViolation>;

/// Failure to encode or decode a saved game.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Saved game encoding failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("Saved game is inconsistent: {0}")]
    Inconsistent(String),
}
