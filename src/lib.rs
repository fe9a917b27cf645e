//! # rust-monopoly
//!
//! Rules engine and difficulty-scaled decision bot for a property-trading
//! board game.
//!
//! ## Design Principles
//!
//! 1. **One Way In**: Humans, bots and the supervisor change a game only by
//!    submitting commands to `RulesEngine::apply_command`. A rejected command
//!    leaves the state untouched.
//!
//! 2. **Deterministic**: Dice, decks and bot noise all come from seeded
//!    `GameRng` streams. Same seed and same commands give the same game.
//!
//! 3. **Money Is Conserved**: Every dollar is accounted for by the ledger
//!    in `PublicState`, including debts that are forgiven.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im` for
//!   clone-and-commit command application and cheap snapshots.
//!
//! - **Reactive Bots**: A `DecisionAgent` reads snapshots and asks its host
//!   for timers; it never blocks and never reaches into engine state.
//!
//! ## Modules
//!
//! - `core`: players, state, commands, RNG, configuration, errors, log
//! - `board`: the 40-space board and ownership queries
//! - `cards`: Chance and Community Chest decks
//! - `rules`: the `RulesEngine` trait
//! - `engine`: the game state machine and its supervisor
//! - `valuation`: property and trade values
//! - `negotiation`: counters, proposals and cooldown history
//! - `bidding`: auction limits and bids
//! - `agent`: difficulty profiles and `DecisionAgent`
//! - `play`: an in-process `Table` and bot-only self-play

pub mod agent;
pub mod bidding;
pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod negotiation;
pub mod play;
pub mod rules;
pub mod valuation;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandKind, DiceRoll, GameRng, GameRngState, GameState, PendingAction, PersistenceError, Player,
    PlayerId, PlayerMap, PublicState, RandomSource, RuleResult, RuleViolation, RulesConfig, SavedGame, Snapshot,
    TradeSide,
};

pub use crate::board::{Board, ColorGroup, SpaceIndex, SpaceKind};

pub use crate::cards::{CardEffect, Deck, DeckKind};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::engine::{Auction, GameBuilder, Monopoly, Supervisor, SupervisorConfig, Trade, TradeStatus};

pub use crate::agent::{DecisionAgent, Difficulty, DifficultyProfile, TimerRequest, TimerToken};

pub use crate::play::{GameOutcome, SelfPlayConfig, SelfPlayRunner, Table};
