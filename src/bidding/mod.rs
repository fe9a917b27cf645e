//! Auction behavior for the decision agent.
//!
//! - `limit`: the most the agent will pay
//! - `reluctance`: how readily it walks away
//! - `decision`: turning both into a bid or a pass

pub mod decision;
pub mod limit;
pub mod reluctance;

pub use decision::decide_bid;
pub use limit::{calculate_auction_limit, wealth_weight};
pub use reluctance::calculate_bid_reluctance;
