//! An in-process game table.
//!
//! `Table` owns the engine, the state and the supervisor. It is the host
//! side of the snapshot contract: the version goes up once per applied
//! command and every change produces a fresh snapshot.

use tracing::info;

use crate::core::{Command, GameState, PersistenceError, PlayerId, PublicState, RuleResult, SavedGame, Snapshot};
use crate::engine::{Deadline, Monopoly, Supervisor, SupervisorConfig};
use crate::rules::{GameResult, RulesEngine};

pub struct Table {
    rules: Monopoly,
    game: GameState,
    version: u64,
    supervisor: Supervisor,
}

impl Table {
    /// Open a table and arm the first deadline at `now_ms`.
    #[must_use]
    pub fn new(rules: Monopoly, game: GameState, supervisor: SupervisorConfig, now_ms: u64) -> Self {
        let mut table = Self {
            rules,
            game,
            version: 0,
            supervisor: Supervisor::new(supervisor),
        };
        table.supervisor.arm(&table.game.public, table.version, now_ms);
        table
    }

    /// Reopen a saved game. The version resumes where the saving table left
    /// off so clients never see a number reused.
    pub fn restore(
        rules: Monopoly,
        saved: SavedGame,
        supervisor: SupervisorConfig,
        now_ms: u64,
    ) -> Result<Self, PersistenceError> {
        let version = saved.version.max(saved.history.len() as u64);
        let game = saved.restore()?;
        let mut table = Self::new(rules, game, supervisor, now_ms);
        table.version = version;
        table.supervisor.arm(&table.game.public, table.version, now_ms);
        Ok(table)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot(self.version)
    }

    #[must_use]
    pub fn public(&self) -> &PublicState {
        &self.game.public
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn rules(&self) -> &Monopoly {
        &self.rules
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Deadline> {
        self.supervisor.deadline()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game.public.is_game_over()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.game.public)
    }

    /// Apply a command from `player`. On success the new snapshot is
    /// returned and the deadline re-armed; on rejection nothing changes.
    pub fn submit(&mut self, player: PlayerId, command: &Command, now_ms: u64) -> RuleResult<Snapshot> {
        self.rules.apply_command(&mut self.game, player, command)?;
        self.version += 1;
        self.supervisor.arm(&self.game.public, self.version, now_ms);
        if let Some(winner) = self.game.public.winner {
            info!(winner = %winner, turn = self.game.public.turn_number, "game over");
        }
        Ok(self.snapshot())
    }

    /// Resolve an expired deadline. Returns the new snapshot if anything
    /// was forced.
    pub fn tick(&mut self, now_ms: u64) -> Option<Snapshot> {
        if !self.supervisor.is_expired(self.version, now_ms) {
            return None;
        }
        let applied = self.supervisor.force_timeout(&self.rules, &mut self.game);
        // A timeout always writes to the log, even if nothing was applied.
        self.version += applied.max(1) as u64;
        self.supervisor.arm(&self.game.public, self.version, now_ms);
        Some(self.snapshot())
    }

    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame {
            version: self.version,
            ..self.game.save()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceRoll;
    use crate::engine::{DeadlineKind, GameBuilder};

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn table() -> Table {
        let (rules, game) = GameBuilder::new().player_count(2).fixed_order().build(5);
        Table::new(rules, game, SupervisorConfig::default().with_turn_timeout(1_000), 0)
    }

    #[test]
    fn test_version_counts_applied_commands() {
        let mut table = table();
        assert_eq!(table.version(), 0);

        assert!(table.submit(B, &Command::Roll, 10).is_err());
        assert_eq!(table.version(), 0);

        let snapshot = table.submit(A, &Command::Roll, 20).unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(table.deadline().unwrap().at_ms, 1_020);
    }

    #[test]
    fn test_tick_forces_after_deadline() {
        let mut table = table();
        assert!(table.tick(999).is_none());

        let snapshot = table.tick(1_000).unwrap();
        assert_eq!(snapshot.current_player(), B);
        assert!(snapshot.version > 0);
        assert_eq!(table.deadline().unwrap().kind, DeadlineKind::Turn);
    }

    #[test]
    fn test_save_and_restore() {
        let (rules, mut game) = GameBuilder::new().player_count(2).fixed_order().build(5);
        game.queue_dice([DiceRoll::new(3, 4)]);
        let mut table = Table::new(rules.clone(), game, SupervisorConfig::default(), 0);
        table.submit(A, &Command::Roll, 5).unwrap();

        let bytes = table.save().to_bytes().unwrap();
        let saved = SavedGame::from_bytes(&bytes).unwrap();
        let restored = Table::restore(rules, saved, SupervisorConfig::default(), 10).unwrap();

        assert_eq!(restored.version(), 1);
        assert_eq!(restored.public(), table.public());
    }

    #[test]
    fn test_restore_resumes_after_timeouts() {
        let (rules, game) = GameBuilder::new().player_count(2).fixed_order().build(5);
        let config = SupervisorConfig::default().with_turn_timeout(1_000);
        let mut table = Table::new(rules.clone(), game, config.clone(), 0);
        table.tick(1_000).unwrap();
        table.tick(2_000).unwrap();
        let seen = table.version();
        assert!(seen >= table.game().history.len() as u64);

        let bytes = table.save().to_bytes().unwrap();
        let saved = SavedGame::from_bytes(&bytes).unwrap();
        assert_eq!(saved.version, seen);
        let mut restored = Table::restore(rules, saved, config, 2_000).unwrap();
        assert_eq!(restored.version(), seen);
        assert_eq!(restored.public(), table.public());

        let current = restored.public().current_player();
        let next = restored.submit(current, &Command::Roll, 2_010).unwrap();
        assert_eq!(next.version, seen + 1);
    }
}
