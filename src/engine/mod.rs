//! The game engine: a deterministic state machine over `GameState`.
//!
//! - `monopoly`: `Monopoly` (the `RulesEngine`), command gating and `GameBuilder`
//! - `turn`: rolling, jail and turn progression
//! - `landing`: movement, space effects and cards
//! - `rent`: rent formulas
//! - `ledger`: payments, debt interception and bank bookkeeping
//! - `auction`: open auctions for declined properties
//! - `trade`: trade proposal, acceptance and decline
//! - `building`: houses, hotels and mortgages
//! - `bankruptcy`: insolvency detection and asset transfer
//! - `supervisor`: deadlines that keep a stalled game moving
//!
//! ## Turn flow
//!
//! ```text
//! AwaitingRoll -> Rolling -> LandingResolution
//!     -> PendingAction | AuctionActive | AwaitingRoll (doubles) | TurnEnd
//! ```
//!
//! The game ends when one non-bankrupt player remains.

pub mod auction;
pub mod bankruptcy;
pub mod building;
pub mod landing;
pub mod ledger;
pub mod monopoly;
pub mod rent;
pub mod supervisor;
pub mod trade;
pub mod turn;

pub use auction::{opening_ask, Auction};
pub use building::{can_build, can_sell};
pub use ledger::Payee;
pub use monopoly::{GameBuilder, Monopoly};
pub use rent::{rent_due, RentMode};
pub use supervisor::{Deadline, DeadlineKind, Supervisor, SupervisorConfig};
pub use trade::{is_executable, Trade, TradeStatus};
pub use turn::{can_end_turn, can_roll};
