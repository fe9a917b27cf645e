//! Rules engine trait.
//!
//! The rules engine defines:
//! - Which commands a player may issue
//! - How a command modifies state
//! - When the game is over

use crate::core::{Command, CommandKind, GameState, PlayerId, PublicState, RuleResult, RulesConfig};

/// Result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single remaining solvent player.
    Winner(PlayerId),
    /// Play was stopped early; `leader` had the highest net worth.
    Unfinished { leader: PlayerId },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Unfinished { .. } => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_commands`: Return empty vec if the player can't act
/// - `apply_command`: Must be deterministic given the state's RNG, and must
///   leave `state` untouched when it returns an error
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the rule constants.
    fn config(&self) -> &RulesConfig;

    /// Kinds of command `player` may issue right now.
    ///
    /// Payload validity (bid amounts, trade contents, target spaces) is
    /// checked when the command is applied.
    fn legal_commands(&self, state: &PublicState, player: PlayerId) -> Vec<CommandKind>;

    /// Validate and apply a command atomically.
    fn apply_command(&self, state: &mut GameState, player: PlayerId, command: &Command) -> RuleResult<()>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &PublicState) -> Option<GameResult>;

    /// Whether `player` has anything to do.
    fn can_act(&self, state: &PublicState, player: PlayerId) -> bool {
        !self.legal_commands(state, player).is_empty()
    }
}
