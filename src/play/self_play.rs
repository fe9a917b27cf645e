//! Bot-only games on a logical clock.
//!
//! Every seat is a `DecisionAgent`. Agent timers and supervisor deadlines
//! are processed in time order, so a game is fully reproducible from its
//! seed and configuration.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::table::Table;
use crate::agent::{DecisionAgent, DifficultyProfile, TimerToken};
use crate::core::{GameRng, PlayerId, PublicState, RulesConfig, Snapshot};
use crate::engine::{GameBuilder, SupervisorConfig};
use crate::rules::GameResult;

/// Self-play configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    pub player_count: usize,

    /// Profiles assigned to seats in order, repeating as needed.
    pub profiles: Vec<DifficultyProfile>,

    /// Applied commands after which a game is stopped.
    pub max_commands: usize,

    pub rules: RulesConfig,

    pub supervisor: SupervisorConfig,

    /// Seed offset combined with the game index.
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            profiles: vec![DifficultyProfile::medium()],
            max_commands: 20_000,
            rules: RulesConfig::default(),
            supervisor: SupervisorConfig::default(),
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<DifficultyProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.max_commands = max;
        self
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_supervisor(mut self, supervisor: SupervisorConfig) -> Self {
        self.supervisor = supervisor;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Profile for `seat`.
    pub fn profile_for(&self, seat: PlayerId) -> DifficultyProfile {
        if self.profiles.is_empty() {
            return DifficultyProfile::default();
        }
        self.profiles[seat.index() % self.profiles.len()].clone()
    }
}

/// How a self-play game went.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOutcome {
    pub seed: u64,
    pub result: GameResult,
    /// Commands applied, forced ones included.
    pub commands: usize,
    /// Supervisor interventions.
    pub timeouts: usize,
    /// Logical milliseconds elapsed.
    pub elapsed_ms: u64,
    pub final_state: PublicState,
}

impl GameOutcome {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            GameResult::Winner(player) => Some(player),
            GameResult::Unfinished { .. } => None,
        }
    }
}

/// Pending agent timers ordered by due time, then by issue order.
#[derive(Default)]
struct TimerQueue {
    heap: BinaryHeap<Reverse<(u64, u64, usize, TimerToken)>>,
    issued: u64,
}

impl TimerQueue {
    fn push(&mut self, due_ms: u64, seat: usize, token: TimerToken) {
        self.issued += 1;
        self.heap.push(Reverse((due_ms, self.issued, seat, token)));
    }

    fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due, ..))| *due)
    }

    fn pop(&mut self) -> Option<(u64, usize, TimerToken)> {
        self.heap.pop().map(|Reverse((due, _, seat, token))| (due, seat, token))
    }
}

/// Runs bot-only games.
pub struct SelfPlayRunner {
    config: SelfPlayConfig,
}

impl SelfPlayRunner {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game to completion or to the command cap.
    pub fn play_game(&self, seed: u64) -> GameOutcome {
        let config = &self.config;
        let (rules, game) = GameBuilder::new()
            .player_count(config.player_count)
            .config(config.rules.clone())
            .build(seed);
        let table_rng = GameRng::new(seed);
        let mut agents: Vec<DecisionAgent> = PlayerId::all(config.player_count)
            .map(|seat| DecisionAgent::seeded(seat, config.profile_for(seat), &table_rng))
            .collect();

        let mut table = Table::new(rules, game, config.supervisor.clone(), 0);
        let mut timers = TimerQueue::default();
        let mut now = 0;
        let mut commands = 0;
        let mut timeouts = 0;

        let mut snapshot = table.snapshot();
        broadcast(&mut agents, &snapshot, now, &mut timers);

        while !table.is_over() && commands < config.max_commands {
            let deadline = table.deadline().map(|d| d.at_ms);
            let timer_first = match (timers.next_due(), deadline) {
                (Some(due), Some(at)) => due <= at,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };

            if timer_first {
                let Some((due, seat, token)) = timers.pop() else {
                    break;
                };
                now = due;
                let Some(command) = agents[seat].fire(token, &snapshot) else {
                    continue;
                };
                let player = agents[seat].seat();
                match table.submit(player, &command, now) {
                    Ok(next) => {
                        commands += 1;
                        snapshot = next;
                        broadcast(&mut agents, &snapshot, now, &mut timers);
                    }
                    Err(error) => debug!(player = %player, %error, ?command, "agent command rejected"),
                }
            } else if let Some(at) = deadline {
                now = now.max(at);
                let before = table.version();
                let Some(next) = table.tick(now) else {
                    break;
                };
                timeouts += 1;
                commands += (next.version - before) as usize;
                snapshot = next;
                broadcast(&mut agents, &snapshot, now, &mut timers);
            }
        }

        let result = table.result().unwrap_or_else(|| GameResult::Unfinished {
            leader: leader(table.public()),
        });
        info!(seed, ?result, commands, timeouts, "self-play game finished");

        GameOutcome {
            seed,
            result,
            commands,
            timeouts,
            elapsed_ms: now,
            final_state: table.public().clone(),
        }
    }

    /// Play `count` games with seeds offset by the config.
    pub fn play_games(&self, count: usize) -> Vec<GameOutcome> {
        (0..count)
            .map(|i| self.play_game(self.config.seed_offset.wrapping_add(i as u64)))
            .collect()
    }
}

fn broadcast(agents: &mut [DecisionAgent], snapshot: &Snapshot, now: u64, timers: &mut TimerQueue) {
    for (seat, agent) in agents.iter_mut().enumerate() {
        if let Some(request) = agent.observe(snapshot) {
            timers.push(now + request.delay_ms, seat, request.token);
        }
    }
}

/// Active player with the highest net worth; earliest seat on ties.
fn leader(state: &PublicState) -> PlayerId {
    state
        .active_players()
        .fold(None, |best: Option<(PlayerId, i64)>, p| {
            let worth = state.net_worth(p);
            match best {
                Some((_, top)) if top >= worth => best,
                _ => Some((p, worth)),
            }
        })
        .map_or(PlayerId::new(0), |(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_play_config_default() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.max_commands, 20_000);
        assert_eq!(config.profile_for(PlayerId::new(3)), DifficultyProfile::medium());
    }

    #[test]
    fn test_profiles_cycle_over_seats() {
        let config = SelfPlayConfig::default()
            .with_profiles(vec![DifficultyProfile::easy(), DifficultyProfile::hard()]);
        assert_eq!(config.profile_for(PlayerId::new(0)), DifficultyProfile::easy());
        assert_eq!(config.profile_for(PlayerId::new(1)), DifficultyProfile::hard());
        assert_eq!(config.profile_for(PlayerId::new(2)), DifficultyProfile::easy());
    }

    #[test]
    fn test_timer_queue_orders_by_due_then_issue() {
        let mut queue = TimerQueue::default();
        queue.push(50, 1, TimerToken(1));
        queue.push(10, 2, TimerToken(1));
        queue.push(10, 0, TimerToken(2));
        assert_eq!(queue.pop(), Some((10, 2, TimerToken(1))));
        assert_eq!(queue.pop(), Some((10, 0, TimerToken(2))));
        assert_eq!(queue.pop(), Some((50, 1, TimerToken(1))));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_short_game_respects_cap_and_conserves_money() {
        let runner = SelfPlayRunner::new(
            SelfPlayConfig::default()
                .with_player_count(3)
                .with_max_commands(300),
        );
        let outcome = runner.play_game(11);
        assert!(outcome.commands <= 300 + 3);
        assert!(outcome.final_state.money_is_conserved());
        assert!(outcome.final_state.turn_number > 1);
    }
}
