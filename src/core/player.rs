//! Player identification, per-player storage and the player record.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based and fixed for the game;
//! turn order is a separate shuffled list of seats.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Balance, position, jail status and debt. Holdings are never stored on the
//! player: ownership lives on the board and is looked up by index.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::board::SpaceIndex;

/// A seat at the table. At most eight seats are used in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// 0-based seat number, usable as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seats `0..seats` in seat order.
    ///
    /// ```
    /// use rust_monopoly::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], PlayerId::new(3));
    /// ```
    pub fn all(seats: usize) -> impl Iterator<Item = PlayerId> {
        (0..seats as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use rust_monopoly::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<i64> = PlayerMap::new(4, |_| 1500);
/// cash[PlayerId::new(1)] -= 200;
/// assert_eq!(cash[PlayerId::new(1)], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat with `init`.
    pub fn new(seats: usize, init: impl Fn(PlayerId) -> T) -> Self {
        assert!(seats > 0, "a table needs at least one seat");
        assert!(seats <= usize::from(u8::MAX), "seat numbers are limited to u8");
        Self {
            seats: PlayerId::all(seats).map(init).collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.seats.len()
    }

    /// Entry for `player`. Panics on an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    /// Entries in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}

/// Outstanding claim of a creditor against a player.
///
/// While a debt exists every positive balance change of the debtor is routed
/// to the creditor first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Amount still owed.
    pub amount: i64,
    /// Player owed the money.
    pub creditor: PlayerId,
}

/// A participant's economic and positional record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name supplied by the lobby.
    pub name: String,
    /// Cash balance. Negative means money owed to the bank.
    pub cash: i64,
    pub position: SpaceIndex,
    pub in_jail: bool,
    /// Failed doubles attempts during the current jail stay.
    pub jail_turns: u8,
    pub jail_cards: u8,
    pub bankrupt: bool,
    pub debt: Option<Debt>,
}

impl Player {
    /// Create a player standing on GO.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, cash: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cash,
            position: 0,
            in_jail: false,
            jail_turns: 0,
            jail_cards: 0,
            bankrupt: false,
            debt: None,
        }
    }

    /// Total amount this player must still raise: negative cash plus debt.
    #[must_use]
    pub fn obligation(&self) -> i64 {
        let owed_to_bank = (-self.cash).max(0);
        let owed_to_player = self.debt.map_or(0, |d| d.amount);
        owed_to_bank + owed_to_player
    }

    /// Cash that can actually be spent right now.
    #[must_use]
    pub fn spendable(&self) -> i64 {
        self.cash.max(0)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.bankrupt
    }
}
