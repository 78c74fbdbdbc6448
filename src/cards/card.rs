//! Playing cards: rank, suit, comparison value and the two-sided visual.
//!
//! A `Card` is a drawable made of two image shapes, its face and its back.
//! Exactly one of them is registered with the scene while the card is shown,
//! selected by `face_up`. Flipping a shown card swaps the two in a single
//! registry change, so no frame ever paints both or neither.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::asset::{face_asset, BACK_ASSET};
use crate::scene::{Drawable, DrawableId, Renderer, Scene, Shape};

/// Default scaled card width, in pixels.
pub const CARD_WIDTH: i32 = 120;

/// Default scaled card height, in pixels.
pub const CARD_HEIGHT: i32 = 175;

/// Error constructing a card from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("invalid rank {0}: expected 1 (ace) through 13 (king)")]
    InvalidRank(u8),
    #[error("invalid suit {0:?}: expected hearts, diamonds, clubs or spades")]
    InvalidSuit(String),
}

/// Handle of a card within a session's deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rank, 1 (ace) through 13 (king).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Validate a raw rank.
    pub fn new(rank: u8) -> Result<Self, CardError> {
        if (1..=13).contains(&rank) {
            Ok(Self(rank))
        } else {
            Err(CardError::InvalidRank(rank))
        }
    }

    /// All thirteen ranks, ace first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Comparison key for War: ace is highest (13), every other rank is one
    /// below its face number (2 -> 1, ..., king -> 12).
    #[must_use]
    pub const fn value(self) -> u8 {
        if self.0 == 1 {
            13
        } else {
            self.0 - 1
        }
    }

    /// Token used in asset names: `a`, `2`..`10`, `j`, `q`, `k`.
    #[must_use]
    pub fn token(self) -> String {
        match self.0 {
            1 => "a".to_string(),
            11 => "j".to_string(),
            12 => "q".to_string(),
            13 => "k".to_string(),
            n => n.to_string(),
        }
    }

    /// Display name: "Ace", "2".."10", "Jack", "Queen", "King".
    #[must_use]
    pub fn name(self) -> String {
        match self.0 {
            1 => "Ace".to_string(),
            11 => "Jack".to_string(),
            12 => "Queen".to_string(),
            13 => "King".to_string(),
            n => n.to_string(),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Rank::new(rank)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// The four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Lower-case initial used in asset names.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Spades => 's',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

/// Accepts a full suit name or its initial, in any case.
impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Suit::ALL
            .into_iter()
            .find(|suit| {
                lower == suit.name().to_ascii_lowercase() || lower == suit.initial().to_string()
            })
            .ok_or_else(|| CardError::InvalidSuit(s.to_string()))
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A playing card on the table.
#[derive(Clone, Debug)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
    face: Shape,
    back: Shape,
}

impl Card {
    /// Create a face-down, hidden card at the default size.
    pub fn new<R: Renderer>(scene: &mut Scene<R>, rank: Rank, suit: Suit) -> Self {
        Self::sized(scene, rank, suit, CARD_WIDTH, CARD_HEIGHT)
    }

    /// Create a face-down, hidden card scaled to `width` x `height`.
    pub fn sized<R: Renderer>(scene: &mut Scene<R>, rank: Rank, suit: Suit, width: i32, height: i32) -> Self {
        // Spread fresh cards out by rank until they are placed
        let x = i32::from(rank.get()) * 50;
        Self {
            rank,
            suit,
            face_up: false,
            face: Shape::image(scene, face_asset(rank, suit), x, 0, width, height),
            back: Shape::image(scene, BACK_ASSET, x, 0, width, height),
        }
    }

    /// Create a card from a raw rank and suit name.
    ///
    /// ```
    /// use canvas_war::cards::{Card, CardError};
    /// use canvas_war::scene::{NullRenderer, Scene};
    ///
    /// let mut scene = Scene::new(NullRenderer);
    /// let queen = Card::try_new(&mut scene, 12, "hearts").unwrap();
    /// assert_eq!(queen.label(), "Queen of Hearts");
    ///
    /// assert_eq!(Card::try_new(&mut scene, 14, "hearts").unwrap_err(), CardError::InvalidRank(14));
    /// ```
    pub fn try_new<R: Renderer>(scene: &mut Scene<R>, rank: u8, suit: &str) -> Result<Self, CardError> {
        let rank = Rank::new(rank)?;
        let suit = suit.parse()?;
        Ok(Self::new(scene, rank, suit))
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// War comparison value; see [`Rank::value`].
    #[must_use]
    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Human-readable name, e.g. "Ace of Spades".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit)
    }

    #[must_use]
    pub fn face_id(&self) -> DrawableId {
        self.face.id()
    }

    #[must_use]
    pub fn back_id(&self) -> DrawableId {
        self.back.id()
    }

    /// Check whether a registry handle belongs to this card.
    #[must_use]
    pub fn owns(&self, id: DrawableId) -> bool {
        self.face.id() == id || self.back.id() == id
    }

    /// Flip to the given side. A shown card swaps payloads atomically.
    pub fn set_face_up<R: Renderer>(&mut self, scene: &mut Scene<R>, face_up: bool) {
        if self.face_up == face_up {
            return;
        }
        self.face_up = face_up;
        if !self.is_shown() {
            return;
        }
        if face_up {
            self.back.swap_into(&mut self.face, scene);
        } else {
            self.face.swap_into(&mut self.back, scene);
        }
    }

    pub fn turn_face_up<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.set_face_up(scene, true);
    }

    pub fn turn_face_down<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.set_face_up(scene, false);
    }

    /// Move both payloads so a later flip never jumps.
    pub fn move_to<R: Renderer>(&mut self, scene: &mut Scene<R>, x: i32, y: i32) {
        self.set_position(scene, x, y);
    }

    /// Raise a shown card above everything else.
    pub fn bring_to_front<R: Renderer>(&self, scene: &mut Scene<R>) {
        self.visible_side().bring_to_front(scene);
    }

    fn visible_side(&self) -> &Shape {
        if self.face_up {
            &self.face
        } else {
            &self.back
        }
    }
}

impl Drawable for Card {
    fn show<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        if self.is_shown() {
            return;
        }
        if self.face_up {
            self.face.show(scene);
        } else {
            self.back.show(scene);
        }
    }

    fn hide<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        if !self.is_shown() {
            return;
        }
        scene.batch(|scene| {
            self.face.hide(scene);
            self.back.hide(scene);
        });
    }

    fn is_shown(&self) -> bool {
        self.face.is_shown() || self.back.is_shown()
    }

    fn set_position<R: Renderer>(&mut self, scene: &mut Scene<R>, x: i32, y: i32) {
        self.face.set_position(scene, x, y);
        self.back.set_position(scene, x, y);
    }

    fn x(&self) -> i32 {
        self.face.x()
    }

    fn y(&self) -> i32 {
        self.face.y()
    }

    fn width(&self) -> i32 {
        self.face.width()
    }

    fn height(&self) -> i32 {
        self.face.height()
    }

    fn contains_point(&self, x: i32, y: i32) -> bool {
        self.visible_side().contains_point(x, y)
    }
}
