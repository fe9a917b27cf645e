//! Bot-side negotiation.
//!
//! - `history`: cooldowns, give-up and repeat-offer detection
//! - `counter`: counters for offers that fall just short
//! - `proposal`: unsolicited proposals toward near-complete groups

pub mod counter;
pub mod history;
pub mod proposal;

pub use counter::generate_counter_offer;
pub use history::{NegotiationConfig, NegotiationHistory};
pub use proposal::{find_proposal, Proposal};
