//! Hosting games in process.
//!
//! - `table`: `Table`, the engine plus versioned snapshots and deadlines
//! - `self_play`: bot-only games on a logical clock

pub mod self_play;
pub mod table;

pub use self_play::{GameOutcome, SelfPlayConfig, SelfPlayRunner};
pub use table::Table;
