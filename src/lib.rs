//! # canvas-war
//!
//! A small retained-mode drawing toolkit and the card game War built on it.
//!
//! ## Design Principles
//!
//! 1. **One scene per session**: there is no global canvas. A `Scene` owns
//!    the paint order and decides when frames are painted; drawables only
//!    register and unregister their payloads.
//!
//! 2. **No flicker by construction**: face swaps replace a payload in its
//!    paint slot, and multi-step table changes are batched with
//!    `pause`/`resume` so each shows up as a single frame.
//!
//! 3. **Non-blocking wars**: a war is a queue of timed steps. Event-loop
//!    hosts feed elapsed time in; blocking hosts hand a `Pacer` over.
//!
//! ## Modules
//!
//! - `core`: sides, seedable RNG, configuration
//! - `scene`: drawables, shapes, the scene registry and the renderer seam
//! - `cards`: ranks, suits and two-sided card drawables
//! - `game`: deck, piles, pot, war timeline and the `WarGame` session

pub mod core;
pub mod scene;
pub mod cards;
pub mod game;

// Re-export commonly used types
pub use crate::core::{GameRng, Layout, Pacing, Side, SideMap, WarConfig};

pub use crate::scene::{
    Color, Drawable, DrawableId, NullRenderer, RecordingRenderer, RenderWarning, Renderer,
    Scene, Shape, Visual, VisualKind,
};

pub use crate::cards::{Card, CardError, CardId, Rank, Suit};

pub use crate::game::{
    ClickOutcome, EngineError, GameEvent, InstantPacer, Pacer, Phase, Pile, PileError, Pot,
    RoundOutcome, SleepPacer, WarGame,
};
