//! Game phases, round outcomes and the event log.
//!
//! Every card movement the engine makes is appended to the log as a
//! `GameEvent`, in the order it happened. Replaying a seeded game yields the
//! same log.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Side;

/// Where the session is between and during rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the next click.
    Idle,
    /// Top cards are being dealt and compared.
    RoundInProgress,
    /// A war's timed steps are still pending.
    WarInProgress { depth: u32 },
    /// A pile ran out; the next click starts a new game.
    GameOver { winner: Side },
    /// Neither side could finish a war; the next click starts a new game.
    Drawn,
}

impl Phase {
    /// True while a round or war still has work to do.
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::RoundInProgress | Phase::WarInProgress { .. })
    }
}

/// How a round (or the war it led into) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// `winner` took a pot of `cards` cards after `wars` war escalations.
    Won { winner: Side, cards: usize, wars: u32 },
    /// Top values tied; the war is now running on the timeline.
    War { depth: u32 },
    /// Neither side could finish the war. `returned` cards went back home and
    /// the game is drawn.
    Stalemate { returned: usize },
    /// A pile was already empty at the start of the round.
    GameOver { winner: Side },
}

impl RoundOutcome {
    /// Side that took the pot or the game, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::Won { winner, .. } | RoundOutcome::GameOver { winner } => Some(winner),
            RoundOutcome::War { .. } | RoundOutcome::Stalemate { .. } => None,
        }
    }
}

/// Result of dispatching a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The finished game was replaced by a fresh deal.
    Reset,
    /// A round was played.
    Round(RoundOutcome),
}

/// One entry of the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        seed: u64,
        player_cards: usize,
        computer_cards: usize,
    },
    RoundStarted { round: u32 },
    /// A card was dealt face up and entered the pot.
    Revealed { side: Side, card: CardId, value: u8 },
    WarDeclared { depth: u32, pot: usize },
    /// A face-down war card entered the pot.
    Ante { side: Side, card: CardId },
    /// `side` kept its last card instead of anteing.
    AnteSkipped { side: Side, remaining: usize },
    /// `side` had no card to reveal and gave up the pot.
    Forfeited { side: Side },
    PotAwarded { side: Side, cards: usize },
    PotReturned { cards: usize },
    GameOver { winner: Side },
    Drawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight() {
        assert!(!Phase::Idle.is_in_flight());
        assert!(Phase::RoundInProgress.is_in_flight());
        assert!(Phase::WarInProgress { depth: 2 }.is_in_flight());
        assert!(!Phase::GameOver { winner: Side::Player }.is_in_flight());
        assert!(!Phase::Drawn.is_in_flight());
    }

    #[test]
    fn test_outcome_winner() {
        let won = RoundOutcome::Won {
            winner: Side::Computer,
            cards: 2,
            wars: 0,
        };
        assert_eq!(won.winner(), Some(Side::Computer));
        assert_eq!(RoundOutcome::War { depth: 1 }.winner(), None);
        assert_eq!(RoundOutcome::Stalemate { returned: 4 }.winner(), None);
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::Ante {
            side: Side::Player,
            card: CardId(7),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
