//! Heuristic valuation used by the decision agent.
//!
//! - `property`: per-property values, monopoly and block detection
//! - `trade`: accept/decline assessment of incoming trades

pub mod property;
pub mod trade;

pub use property::{tier_weight, Perspective, Valuation, BLOCK_PREMIUM, MONOPOLY_MULTIPLIER};
pub use trade::{evaluate_trade, TradeAssessment, JAIL_CARD_VALUE};
