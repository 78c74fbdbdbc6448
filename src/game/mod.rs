//! The War card game.
//!
//! ## Overview
//!
//! - `deck`: the 52-card arena, shuffling and the initial split
//! - `pile`: per-side piles and the disputed pot
//! - `schedule`: the timed steps a war is animated with
//! - `table`: text indicators around the table
//! - `engine`: `WarGame`, the session that ties them together
//!
//! ## Usage
//!
//! ```
//! use canvas_war::core::{Pacing, WarConfig};
//! use canvas_war::game::{InstantPacer, Phase, WarGame};
//! use canvas_war::scene::NullRenderer;
//!
//! let config = WarConfig::default().with_seed(11).with_pacing(Pacing::instant());
//! let mut game = WarGame::new(NullRenderer, config);
//! let mut pacer = InstantPacer::default();
//!
//! for _ in 0..20 {
//!     game.play_round_paced(&mut pacer).unwrap();
//! }
//! assert_ne!(game.phase(), Phase::RoundInProgress);
//! ```

pub mod deck;
mod engine;
mod event;
pub mod pile;
pub mod schedule;
mod table;

pub use deck::{build_deck, shuffle, split_in_half, Deck, DECK_SIZE};
pub use engine::WarGame;
pub use event::{ClickOutcome, GameEvent, Phase, RoundOutcome};
pub use pile::{Pile, PileError, Pot};
pub use schedule::{InstantPacer, Pacer, SleepPacer, Step, Timeline, ANTES_PER_WAR};
pub use table::Table;

/// Errors returned by `WarGame` operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A round or war is still running.
    #[error("a round is already in flight")]
    RoundInFlight,
    /// The operation is only allowed between rounds.
    #[error("operation only allowed between rounds")]
    NotIdle,
    /// Internal bookkeeping went wrong; the round was abandoned.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
    #[error("invalid arrangement: {0}")]
    InvalidArrangement(String),
}
