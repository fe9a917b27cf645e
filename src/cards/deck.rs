//! Shuffled card piles.
//!
//! A deck stores an order over the printed cards and a cursor. Drawing past
//! the end reshuffles the whole pile with the game RNG, so the order is part
//! of the saved game and replays reproduce every draw.

use serde::{Deserialize, Serialize};

use super::definition::{CardDef, DeckKind};
use super::registry;
use crate::core::GameRng;

/// A pile of cards in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    kind: DeckKind,
    order: Vec<u8>,
    next: usize,
}

impl Deck {
    /// A freshly shuffled pile.
    #[must_use]
    pub fn shuffled(kind: DeckKind, rng: &mut GameRng) -> Self {
        let mut order: Vec<u8> = (0..registry::cards(kind).len() as u8).collect();
        rng.shuffle(&mut order);
        Self { kind, order, next: 0 }
    }

    /// A pile in printed order. Used by tests and replays that stack the deck.
    #[must_use]
    pub fn stacked(kind: DeckKind, order: Vec<u8>) -> Self {
        Self { kind, order, next: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.next)
    }

    /// The card that would be drawn next, if the pile is not exhausted.
    #[must_use]
    pub fn peek(&self) -> Option<&'static CardDef> {
        self.order
            .get(self.next)
            .map(|&i| &registry::cards(self.kind)[usize::from(i)])
    }

    /// Draw the next card, reshuffling first if the pile is exhausted.
    pub fn draw(&mut self, rng: &mut GameRng) -> &'static CardDef {
        if self.next >= self.order.len() {
            rng.shuffle(&mut self.order);
            self.next = 0;
        }
        let index = usize::from(self.order[self.next]);
        self.next += 1;
        &registry::cards(self.kind)[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardEffect;

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = GameRng::new(3);
        let deck = Deck::shuffled(DeckKind::Chance, &mut rng);
        let mut order = deck.order.clone();
        order.sort_unstable();
        assert_eq!(order, (0..16).collect::<Vec<u8>>());
        assert_eq!(deck.remaining(), 16);
    }

    #[test]
    fn test_draw_cycles_and_reshuffles() {
        let mut rng = GameRng::new(9);
        let mut deck = Deck::shuffled(DeckKind::CommunityChest, &mut rng);

        let first_cycle: Vec<_> = (0..16).map(|_| deck.draw(&mut rng).text).collect();
        assert_eq!(deck.remaining(), 0);

        // 17th draw reshuffles and starts a new cycle
        deck.draw(&mut rng);
        assert_eq!(deck.remaining(), 15);
        assert_eq!(first_cycle.len(), 16);
    }

    #[test]
    fn test_stacked_deck_draws_in_order() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::stacked(DeckKind::Chance, vec![10, 8]);
        assert_eq!(deck.peek().map(|c| c.effect), Some(CardEffect::GoToJail));
        assert_eq!(deck.draw(&mut rng).effect, CardEffect::GoToJail);
        assert_eq!(deck.draw(&mut rng).effect, CardEffect::JailCard);
    }
}
