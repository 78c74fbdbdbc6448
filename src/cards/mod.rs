//! Playing cards and their image assets.
//!
//! - `Rank`, `Suit`: validated identity; `Rank::value` is the War
//!   comparison key (ace high)
//! - `Card`: a two-sided drawable (face image, back image)
//! - `asset`: the on-disk naming convention for card images

pub mod asset;
mod card;

pub use card::{Card, CardError, CardId, Rank, Suit, CARD_HEIGHT, CARD_WIDTH};
