//! Piles and the pot.
//!
//! A `Pile` is one side's ordered stack: index 0 is the top, the next card
//! to be played. Won cards are appended to the bottom in the order they were
//! won. The `Pot` collects the cards disputed during a round or war and
//! remembers who put each one in.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::Side;

/// Error dealing from a pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    #[error("pile is empty")]
    Empty,
}

/// One side's stack of cards, top first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<CardId>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Next card to be played, without removing it.
    #[must_use]
    pub fn top(&self) -> Option<CardId> {
        self.cards.front().copied()
    }

    /// Remove and return the top card.
    pub fn deal_top(&mut self) -> Result<CardId, PileError> {
        self.cards.pop_front().ok_or(PileError::Empty)
    }

    /// Append cards to the bottom, keeping their order.
    pub fn push_all(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.cards.extend(cards);
    }

    /// Cards from top to bottom.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }
}

impl FromIterator<CardId> for Pile {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Cards in dispute, in the order they were put in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    entries: SmallVec<[(Side, CardId); 8]>,
}

impl Pot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card contributed by `side`.
    pub fn push(&mut self, side: Side, card: CardId) {
        self.entries.push((side, card));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (contributor, card) pairs in accumulation order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, CardId)> + '_ {
        self.entries.iter().copied()
    }

    /// Cards in accumulation order.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.entries.iter().map(|&(_, card)| card)
    }

    /// Number of cards `side` has put in.
    #[must_use]
    pub fn contributed_by(&self, side: Side) -> usize {
        self.entries.iter().filter(|(s, _)| *s == side).count()
    }

    /// Empty the pot, returning its entries in accumulation order.
    pub fn drain(&mut self) -> SmallVec<[(Side, CardId); 8]> {
        std::mem::take(&mut self.entries)
    }
}
