//! Session configuration.
//!
//! A War session is configured at startup by providing:
//! - `Layout`: canvas size, card size and where piles, the pot and the
//!   revealed cards sit on the table
//! - `Pacing`: the delays between animated war steps
//! - `WarConfig`: combines both with the shuffle seed

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Side;

/// Table geometry, in canvas pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Canvas width.
    pub canvas_width: i32,
    /// Canvas height.
    pub canvas_height: i32,
    /// Width every card image is scaled to.
    pub card_width: i32,
    /// Height every card image is scaled to.
    pub card_height: i32,
    /// Distance of the player's reveal column from the left edge.
    /// The computer's column mirrors it from the right edge.
    pub column_inset: i32,
    /// Gap between a pile and the canvas edge.
    pub pile_margin: i32,
    /// Vertical offset between stacked cards in a pile or the pot.
    pub stack_step: i32,
    /// Row where the round's two cards are revealed.
    pub round_row: i32,
    /// Row where a war's face-up cards are revealed.
    pub war_row: i32,
    /// Row where the first war ante lands.
    pub pot_row: i32,
    /// Horizontal offset of each side's antes from the pot column.
    pub pot_offset: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 700,
            card_width: 120,
            card_height: 175,
            column_inset: 200,
            pile_margin: 10,
            stack_step: 5,
            round_row: 200,
            war_row: 400,
            pot_row: 390,
            pot_offset: 10,
        }
    }
}

impl Layout {
    /// X position of a side's reveal column.
    #[must_use]
    pub fn column_x(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.column_inset,
            Side::Computer => self.canvas_width - self.column_inset - self.card_width,
        }
    }

    /// X position of a side's pile.
    #[must_use]
    pub fn pile_x(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.pile_margin,
            Side::Computer => self.canvas_width - self.card_width - self.pile_margin,
        }
    }

    /// Y position of the bottom-most card of a pile.
    #[must_use]
    pub fn pile_base_y(&self) -> i32 {
        self.canvas_height - self.card_height - self.pile_margin
    }

    /// X position of the pot column centre.
    #[must_use]
    pub fn pot_x(&self) -> i32 {
        (self.canvas_width - self.card_width) / 2
    }

    /// X position where a side's war antes land.
    #[must_use]
    pub fn ante_x(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.pot_x() - self.pot_offset,
            Side::Computer => self.pot_x() + self.pot_offset,
        }
    }
}

/// Delays between animated war steps, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// How long the background stays red when a war starts.
    pub flash_ms: u64,
    /// Pause after the player's ante before the computer antes.
    pub player_ante_ms: u64,
    /// Pause after the computer's ante before the next step.
    pub computer_ante_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            flash_ms: 500,
            player_ante_ms: 200,
            computer_ante_ms: 300,
        }
    }
}

impl Pacing {
    /// No delays at all; every step is due immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            flash_ms: 0,
            player_ante_ms: 0,
            computer_ante_ms: 0,
        }
    }

    #[must_use]
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    /// Delay that follows a side's ante.
    #[must_use]
    pub fn after_ante(&self, side: Side) -> Duration {
        match side {
            Side::Player => Duration::from_millis(self.player_ante_ms),
            Side::Computer => Duration::from_millis(self.computer_ante_ms),
        }
    }
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use canvas_war::core::{Pacing, WarConfig};
///
/// let config = WarConfig::default()
///     .with_seed(7)
///     .with_pacing(Pacing::instant());
///
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.pacing.flash_ms, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarConfig {
    /// Shuffle seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Table geometry.
    #[serde(default)]
    pub layout: Layout,

    /// War animation delays.
    #[serde(default)]
    pub pacing: Pacing,
}

impl WarConfig {
    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the table layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the war pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_mirror() {
        let layout = Layout::default();
        assert_eq!(layout.column_x(Side::Player), 200);
        assert_eq!(layout.column_x(Side::Computer), 1000 - 200 - 120);
        assert_eq!(layout.pile_x(Side::Player), 10);
        assert_eq!(layout.pile_x(Side::Computer), 1000 - 120 - 10);
    }

    #[test]
    fn test_pot_columns() {
        let layout = Layout::default();
        assert_eq!(layout.pot_x(), 440);
        assert_eq!(layout.ante_x(Side::Player), 430);
        assert_eq!(layout.ante_x(Side::Computer), 450);
        assert_eq!(layout.pile_base_y(), 700 - 175 - 10);
    }

    #[test]
    fn test_pacing_delays() {
        let pacing = Pacing::default();
        assert_eq!(pacing.flash(), Duration::from_millis(500));
        assert_eq!(pacing.after_ante(Side::Player), Duration::from_millis(200));
        assert_eq!(pacing.after_ante(Side::Computer), Duration::from_millis(300));

        let instant = Pacing::instant();
        assert_eq!(instant.after_ante(Side::Computer), Duration::ZERO);
    }

    #[test]
    fn test_config_builder() {
        let config = WarConfig::default().with_seed(11).with_pacing(Pacing::instant());
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.pacing, Pacing::instant());
        assert_eq!(config.layout, Layout::default());
    }

    #[test]
    fn test_config_serde() {
        let config = WarConfig::default().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: WarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: WarConfig = serde_json::from_str(r#"{"seed": null}"#).unwrap();
        assert_eq!(config, WarConfig::default());
    }
}
