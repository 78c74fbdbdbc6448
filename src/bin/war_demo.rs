//! Headless War demo.
//!
//! Plays one game to completion against a recording renderer and logs the
//! result. Pass a seed for a reproducible game; `--paced` sleeps through war
//! animations like the windowed game would.

use canvas_war::{
    InstantPacer, Pacing, Phase, RecordingRenderer, RoundOutcome, SleepPacer, WarConfig, WarGame,
};
use clap::Parser;
use tracing::{info, warn};

/// Stop games that keep cycling the same cards.
const MAX_ROUNDS: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "war-demo", about = "Play one headless game of War")]
struct Args {
    /// Shuffle seed; random when omitted.
    seed: Option<u64>,

    /// Sleep through war animations.
    #[arg(long)]
    paced: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = WarConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if !args.paced {
        config = config.with_pacing(Pacing::instant());
    }

    let mut game = WarGame::new(RecordingRenderer::new(), config);
    let mut wars = 0;

    while game.rounds() < MAX_ROUNDS {
        let played = if args.paced {
            game.play_round_paced(&mut SleepPacer)
        } else {
            game.play_round_paced(&mut InstantPacer::default())
        };
        match played {
            Ok(RoundOutcome::GameOver { .. } | RoundOutcome::Stalemate { .. }) => break,
            Ok(RoundOutcome::Won { wars: w, .. }) => wars += w,
            Ok(RoundOutcome::War { .. }) => {}
            Err(e) => {
                warn!(%e, "round failed");
                if !matches!(game.phase(), Phase::Idle) {
                    break;
                }
            }
        }
    }

    let frames = game.scene().frames_painted();
    match game.phase() {
        Phase::GameOver { winner } => {
            info!(%winner, rounds = game.rounds(), wars, frames, "finished");
        }
        phase => {
            info!(?phase, rounds = game.rounds(), wars, frames, "stopped without a winner");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_seed_and_paced() {
        let args = Args::try_parse_from(["war-demo", "7", "--paced"]).unwrap();
        assert_eq!(args.seed, Some(7));
        assert!(args.paced);
    }

    #[test]
    fn test_args_default_to_unseeded_instant() {
        let args = Args::try_parse_from(["war-demo"]).unwrap();
        assert_eq!(args.seed, None);
        assert!(!args.paced);
    }

    #[test]
    fn test_args_reject_unknown_flag() {
        assert!(Args::try_parse_from(["war-demo", "--pace"]).is_err());
        assert!(Args::try_parse_from(["war-demo", "seven"]).is_err());
    }
}
