//! Card image naming convention.
//!
//! Face images live at `cards/<rank token><suit initial>.png`, lower-case:
//! the queen of hearts is `cards/qh.png`, the ten of clubs `cards/10c.png`.
//! Every card shares `cards/back.png` for its back.

use super::card::{Rank, Suit};

/// Directory card images are resolved under.
pub const ASSET_DIR: &str = "cards";

/// Image file extension.
pub const EXTENSION: &str = "png";

/// Shared back-face image.
pub const BACK_ASSET: &str = "cards/back.png";

/// Asset name of a card's face image.
#[must_use]
pub fn face_asset(rank: Rank, suit: Suit) -> String {
    format!("{ASSET_DIR}/{}{}.{EXTENSION}", rank.token(), suit.initial())
}
