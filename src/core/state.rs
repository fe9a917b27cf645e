//! Game state: public and private information.
//!
//! ## PublicState
//!
//! Everything a participant may observe:
//! - Players, turn order and per-turn dice flags
//! - Board ownership, buildings and mortgages
//! - The pending structured action, open auction and trades
//! - Bank supply, free-parking pool, money ledger and log
//!
//! ## GameState
//!
//! Complete game state:
//! - Public state
//! - Deck order for both card piles
//! - RNG and scripted dice
//! - Command history
//!
//! ## Snapshot
//!
//! A versioned copy of the public state handed to clients and bots.

use std::collections::VecDeque;
use std::ops::Deref;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::CommandRecord;
use super::config::RulesConfig;
use super::error::PersistenceError;
use super::log::GameLog;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::{DiceRoll, GameRng, GameRngState};
use crate::board::{Board, SpaceIndex};
use crate::cards::{Deck, DeckKind};
use crate::engine::auction::Auction;
use crate::engine::trade::{Trade, TradeStatus};

/// The structured decision blocking normal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// `player` landed on an unowned space and must buy or decline it.
    BuyOrAuction { player: PlayerId, space: SpaceIndex },
    /// `player` owes money but can cover it by selling or mortgaging.
    RaiseFunds { player: PlayerId, shortfall: i64 },
    /// `player` owes more than their holdings can raise.
    PayOrBankrupt { player: PlayerId, shortfall: i64 },
}

impl PendingAction {
    /// The player who must resolve the action.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            PendingAction::BuyOrAuction { player, .. }
            | PendingAction::RaiseFunds { player, .. }
            | PendingAction::PayOrBankrupt { player, .. } => player,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PendingAction::BuyOrAuction { .. } => "purchase decision",
            PendingAction::RaiseFunds { .. } => "debt payment",
            PendingAction::PayOrBankrupt { .. } => "bankruptcy decision",
        }
    }

    /// Insolvency actions, as opposed to a purchase decision.
    #[must_use]
    pub fn is_insolvency(&self) -> bool {
        !matches!(self, PendingAction::BuyOrAuction { .. })
    }
}

/// Dice flags of the current turn. Reset when the turn advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    /// The current player has rolled at least once.
    pub rolled: bool,
    /// Consecutive doubles this turn.
    pub doubles: u8,
    /// Doubles entitle the current player to another roll.
    pub roll_again: bool,
    pub last_roll: Option<DiceRoll>,
}

/// Houses and hotels still held by the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSupply {
    pub houses: u8,
    pub hotels: u8,
}

/// Running totals of money entering and leaving circulation.
///
/// Conservation: `Σ cash + free_parking = initial + paid_by_bank - paid_to_bank + written_off`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyLedger {
    /// Money created at game start.
    pub initial: i64,
    /// Salaries, card income, mortgages and building refunds.
    pub paid_by_bank: i64,
    /// Purchases, fines, building costs and unmortgage payments.
    pub paid_to_bank: i64,
    /// Negative balances forgiven at bankruptcy.
    pub written_off: i64,
}

impl MoneyLedger {
    /// Money that should currently be in player hands plus the pool.
    #[must_use]
    pub fn expected_circulation(&self) -> i64 {
        self.initial + self.paid_by_bank - self.paid_to_bank + self.written_off
    }
}

/// Public game state - observable by all players.
///
/// Uses `im` persistent data structures so cloning for clone-and-commit
/// command application and for snapshots is cheap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicState {
    /// Rule constants this game was created with.
    pub rules: RulesConfig,

    pub players: PlayerMap<Player>,

    /// Seats in play order, fixed at game start.
    pub turn_order: Vec<PlayerId>,

    /// Index into `turn_order` of the player whose turn it is.
    pub current: usize,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    pub turn: TurnFlags,

    pub board: Board,

    pub pending: Option<PendingAction>,

    pub auction: Option<Auction>,

    /// Pending trades plus the most recently resolved ones.
    pub trades: Vector<Trade>,

    /// Taxes and card fees waiting on free parking.
    pub free_parking: i64,

    pub supply: BuildingSupply,

    pub ledger: MoneyLedger,

    pub log: GameLog,

    pub next_auction_id: u32,

    pub next_trade_id: u32,

    pub winner: Option<PlayerId>,
}

impl PublicState {
    /// Create the opening state for the given players in play order.
    #[must_use]
    pub fn new(rules: RulesConfig, names: &[String], turn_order: Vec<PlayerId>) -> Self {
        let players = PlayerMap::new(names.len(), |id| {
            Player::new(id, names[id.index()].clone(), rules.starting_cash)
        });
        let ledger = MoneyLedger {
            initial: rules.starting_cash * names.len() as i64,
            ..MoneyLedger::default()
        };

        Self {
            supply: BuildingSupply {
                houses: rules.house_supply,
                hotels: rules.hotel_supply,
            },
            log: GameLog::new(rules.log_capacity),
            rules,
            players,
            turn_order,
            current: 0,
            turn_number: 1,
            turn: TurnFlags::default(),
            board: Board::new(),
            pending: None,
            auction: None,
            trades: Vector::new(),
            free_parking: 0,
            ledger,
            next_auction_id: 1,
            next_trade_id: 1,
            winner: None,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.current]
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Non-bankrupt players in turn order.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.turn_order
            .iter()
            .copied()
            .filter(|&p| self.players[p].is_active())
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Turn order rotated to start at the current player.
    pub fn from_current(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let n = self.turn_order.len();
        (0..n).map(move |offset| self.turn_order[(self.current + offset) % n])
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Trades still awaiting an answer.
    pub fn pending_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| t.status == TradeStatus::Pending)
    }

    #[must_use]
    pub fn trade(&self, trade_id: u32) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == trade_id)
    }

    /// Sum of all player balances.
    #[must_use]
    pub fn total_cash(&self) -> i64 {
        self.players.iter().map(|(_, p)| p.cash).sum()
    }

    /// Whether balances and the pool match the ledger.
    #[must_use]
    pub fn money_is_conserved(&self) -> bool {
        self.total_cash() + self.free_parking == self.ledger.expected_circulation()
    }

    /// Cash plus the mortgage and building value of holdings.
    #[must_use]
    pub fn net_worth(&self, id: PlayerId) -> i64 {
        let player = &self.players[id];
        if player.bankrupt {
            return 0;
        }
        player.cash - player.debt.map_or(0, |d| d.amount) + self.board.liquidation_value(id)
    }

    /// Append a log record for the current turn.
    pub fn log(&mut self, message: impl Into<String>) {
        let turn = self.turn_number;
        self.log.push(turn, message);
    }

    /// Display name of a seat.
    #[must_use]
    pub fn name(&self, id: PlayerId) -> &str {
        &self.players[id].name
    }
}

/// Full game state including private information.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Public state (observable by all).
    pub public: PublicState,

    pub chance: Deck,

    pub community_chest: Deck,

    /// Deterministic RNG for dice and reshuffles.
    pub rng: GameRng,

    /// Dice consumed before the RNG is consulted. Used for replays and tests.
    pub loaded_dice: VecDeque<DiceRoll>,

    /// Every applied command in order.
    pub history: Vector<CommandRecord>,
}

impl GameState {
    /// Create a game state with freshly shuffled decks.
    #[must_use]
    pub fn new(public: PublicState, mut rng: GameRng) -> Self {
        let chance = Deck::shuffled(DeckKind::Chance, &mut rng);
        let community_chest = Deck::shuffled(DeckKind::CommunityChest, &mut rng);
        Self {
            public,
            chance,
            community_chest,
            rng,
            loaded_dice: VecDeque::new(),
            history: Vector::new(),
        }
    }

    /// Queue dice results to be used before the RNG.
    pub fn queue_dice(&mut self, rolls: impl IntoIterator<Item = DiceRoll>) {
        self.loaded_dice.extend(rolls);
    }

    /// Roll two dice, honoring queued results first.
    pub fn roll_dice(&mut self) -> DiceRoll {
        match self.loaded_dice.pop_front() {
            Some(roll) => roll,
            None => self.rng.roll_dice(),
        }
    }

    pub fn deck_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }

    /// Versioned copy of the public state.
    #[must_use]
    pub fn snapshot(&self, version: u64) -> Snapshot {
        Snapshot {
            version,
            state: self.public.clone(),
        }
    }

    /// Record an applied command.
    pub fn record(&mut self, record: CommandRecord) {
        self.history.push_back(record);
    }

    /// Capture everything needed to rebuild an equivalent game.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame {
            public: self.public.clone(),
            chance: self.chance.clone(),
            community_chest: self.community_chest.clone(),
            rng: self.rng.state(),
            loaded_dice: self.loaded_dice.iter().copied().collect(),
            history: self.history.clone(),
            version: self.history.len() as u64,
        }
    }
}

/// Read-only, versioned view of the public state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Incremented exactly once per applied command.
    pub version: u64,
    pub state: PublicState,
}

impl Deref for Snapshot {
    type Target = PublicState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

/// Serializable form of a complete game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedGame {
    pub public: PublicState,
    pub chance: Deck,
    pub community_chest: Deck,
    pub rng: GameRngState,
    pub loaded_dice: Vec<DiceRoll>,
    pub history: Vector<CommandRecord>,
    /// Last snapshot version handed out before saving. Never below the
    /// history length.
    pub version: u64,
}

impl SavedGame {
    /// Rebuild the game state.
    pub fn restore(self) -> Result<GameState, PersistenceError> {
        let public = self.public;
        if public.turn_order.len() != public.player_count() {
            return Err(PersistenceError::Inconsistent(format!(
                "turn order lists {} seats for {} players",
                public.turn_order.len(),
                public.player_count()
            )));
        }
        if public.current >= public.turn_order.len() {
            return Err(PersistenceError::Inconsistent(format!(
                "current turn index {} is out of range",
                public.current
            )));
        }
        if let Some(missing) = public.turn_order.iter().find(|p| !public.players.contains(**p)) {
            return Err(PersistenceError::Inconsistent(format!(
                "turn order names unknown seat {missing}"
            )));
        }

        Ok(GameState {
            public,
            chance: self.chance,
            community_chest: self.community_chest,
            rng: GameRng::from_state(&self.rng),
            loaded_dice: self.loaded_dice.into_iter().collect(),
            history: self.history,
        })
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
