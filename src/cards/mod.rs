//! Chance and Community Chest cards.
//!
//! - `definition`: card effects and pile kinds
//! - `registry`: the printed cards of each pile
//! - `deck`: a seeded, self-reshuffling draw order

pub mod deck;
pub mod definition;
pub mod registry;

pub use deck::Deck;
pub use definition::{CardDef, CardEffect, DeckKind};
