//! The 52-card deck and the operations that prepare a game from it.
//!
//! `Deck` owns every `Card` of a session; piles and the pot only hold
//! `CardId` handles into it. Cards are never destroyed, only relocated.

use crate::cards::{Card, CardId, Rank, Suit};
use crate::core::GameRng;
use crate::scene::{Renderer, Scene};

use super::pile::Pile;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Arena of the session's cards, indexed by `CardId`.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All card handles in canonical (suit-major, ace-first) order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.cards.len() as u32).map(CardId)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Look up the handle of a specific card.
    #[must_use]
    pub fn find(&self, rank: Rank, suit: Suit) -> Option<CardId> {
        self.cards
            .iter()
            .position(|c| c.rank() == rank && c.suit() == suit)
            .map(|i| CardId(i as u32))
    }

    /// Iterate over (CardId, &Card) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards.iter().enumerate().map(|(i, c)| (CardId(i as u32), c))
    }

    /// Iterate over (CardId, &mut Card) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CardId, &mut Card)> {
        self.cards
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (CardId(i as u32), c))
    }
}

/// Create one card per (rank, suit) pair, hidden and face down.
pub fn build_deck<R: Renderer>(scene: &mut Scene<R>, card_width: i32, card_height: i32) -> Deck {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::all() {
            cards.push(Card::sized(scene, rank, suit, card_width, card_height));
        }
    }
    Deck { cards }
}

/// Uniformly permute `cards` in place (Fisher-Yates).
pub fn shuffle<T>(cards: &mut [T], rng: &mut GameRng) {
    rng.shuffle(cards);
}

/// First `n / 2` cards to the first pile, the rest (one more when `n` is odd)
/// to the second.
#[must_use]
pub fn split_in_half(cards: &[CardId]) -> (Pile, Pile) {
    let (upper, lower) = cards.split_at(cards.len() / 2);
    (
        upper.iter().copied().collect(),
        lower.iter().copied().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NullRenderer;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_build_deck_has_every_card_once() {
        let mut scene = Scene::new(NullRenderer);
        let deck = build_deck(&mut scene, 120, 175);

        assert_eq!(deck.len(), DECK_SIZE);
        let pairs: FxHashSet<_> = deck.iter().map(|(_, c)| (c.rank(), c.suit())).collect();
        assert_eq!(pairs.len(), DECK_SIZE);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_find() {
        let mut scene = Scene::new(NullRenderer);
        let deck = build_deck(&mut scene, 120, 175);

        let id = deck.find(Rank::KING, Suit::Spades).unwrap();
        let card = deck.get(id).unwrap();
        assert_eq!(card.rank(), Rank::KING);
        assert_eq!(card.suit(), Suit::Spades);
    }

    #[test]
    fn test_split_even() {
        let cards: Vec<_> = (0..52).map(CardId).collect();
        let (a, b) = split_in_half(&cards);
        assert_eq!(a.len(), 26);
        assert_eq!(b.len(), 26);
        assert_eq!(a.top(), Some(CardId(0)));
        assert_eq!(b.top(), Some(CardId(26)));
    }

    #[test]
    fn test_split_odd_gives_extra_to_second() {
        let cards: Vec<_> = (0..5).map(CardId).collect();
        let (a, b) = split_in_half(&cards);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_shuffle_changes_order() {
        let mut rng = GameRng::new(42);
        let original: Vec<_> = (0..52).map(CardId).collect();

        let mut first = original.clone();
        shuffle(&mut first, &mut rng);
        let mut second = original.clone();
        shuffle(&mut second, &mut rng);

        assert_ne!(first, original);
        assert_ne!(first, second);
    }
}
