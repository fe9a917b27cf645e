//! Rules engine contract.
//!
//! `RulesEngine` is the seam between hosts and the rules:
//! - Legal commands for each state
//! - How commands modify state
//! - Win conditions
//!
//! Hosts and bots drive a game only through this trait and snapshots.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
