//! Core types: players, state, commands, RNG, configuration, errors, log.
//!
//! These are shared by the engine, the bots and hosts. Nothing here knows
//! how a command is resolved; that lives in `engine`.

pub mod action;
pub mod config;
pub mod error;
pub mod log;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Command, CommandKind, CommandRecord, TradeSide};
pub use config::RulesConfig;
pub use error::{PersistenceError, RuleResult, RuleViolation};
pub use log::{GameLog, LogEntry};
pub use player::{Debt, Player, PlayerId, PlayerMap};
pub use rng::{DiceRoll, GameRng, GameRngState, RandomSource};
pub use state::{
    BuildingSupply, GameState, MoneyLedger, PendingAction, PublicState, SavedGame, Snapshot, TurnFlags,
};
