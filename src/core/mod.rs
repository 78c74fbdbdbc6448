//! Core building blocks shared by the scene and the game: sides, RNG and
//! configuration.

pub mod side;
pub mod rng;
pub mod config;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{Layout, Pacing, WarConfig};
