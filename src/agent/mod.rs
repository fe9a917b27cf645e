//! Difficulty-scaled decision agent.
//!
//! - `profile`: difficulty tiers as data
//! - `scheduler`: timer tokens and the situation each one decides
//! - `purchase`: buy or send to auction
//! - `development`: unmortgaging and building from surplus
//! - `liquidation`: raising cash for a debt
//! - `bot`: `DecisionAgent`, which ties the above to bidding and negotiation
//!
//! The agent only reads snapshots and returns commands. It never touches
//! engine state directly.

pub mod bot;
pub mod development;
pub mod liquidation;
pub mod profile;
pub mod purchase;
pub mod scheduler;

pub use bot::DecisionAgent;
pub use liquidation::next_liquidation_step;
pub use profile::{Difficulty, DifficultyProfile};
pub use purchase::{purchase_score, should_buy};
pub use scheduler::{ActionKey, Scheduler, TimerRequest, TimerToken};
