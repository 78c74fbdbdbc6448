//! The War session: deals, compares and redistributes cards.
//!
//! ## Round flow
//!
//! ```text
//! Idle --play_round--> RoundInProgress --+--> Idle              (higher card won)
//!                                        +--> WarInProgress     (tie)
//!                                        +--> GameOver          (a pile was empty)
//!
//! WarInProgress --tick/finish--> Idle | WarInProgress (tie again) | Drawn
//! ```
//!
//! `Drawn` is reached when both piles run dry mid-war. Returning the pot
//! rebuilds the exact piles that tied, so the game stops there instead of
//! replaying the same war.
//!
//! A tie does not block. `play_round` queues the war's timed steps and
//! returns `RoundOutcome::War`; the host then drives them with `tick` from an
//! event loop or `finish` with a `Pacer`. Clicks that arrive while steps are
//! pending are rejected.
//!
//! ## Example
//!
//! ```
//! use canvas_war::core::{Pacing, WarConfig};
//! use canvas_war::game::{RoundOutcome, WarGame};
//! use canvas_war::scene::NullRenderer;
//!
//! let config = WarConfig::default().with_seed(3).with_pacing(Pacing::instant());
//! let mut game = WarGame::new(NullRenderer, config);
//!
//! let outcome = match game.play_round().unwrap() {
//!     RoundOutcome::War { .. } => game.skip_animation().unwrap().unwrap(),
//!     outcome => outcome,
//! };
//! assert!(!matches!(outcome, RoundOutcome::War { .. }));
//! assert_eq!(game.total_cards(), 52);
//! ```

use std::cmp::Ordering;
use std::time::Duration;

use rustc_hash::FxHashSet;
use tracing::{debug, error, info, warn};

use super::deck::{build_deck, shuffle, split_in_half, Deck};
use super::event::{ClickOutcome, GameEvent, Phase, RoundOutcome};
use super::pile::{Pile, Pot};
use super::schedule::{InstantPacer, Pacer, Step, Timeline};
use super::table::Table;
use super::EngineError;
use crate::cards::{Card, CardId};
use crate::core::{GameRng, Side, SideMap, WarConfig};
use crate::scene::{Color, Drawable, Renderer, Scene};

/// One game of War bound to a scene.
#[derive(Debug)]
pub struct WarGame<R: Renderer> {
    config: WarConfig,
    scene: Scene<R>,
    deck: Deck,
    piles: SideMap<Pile>,
    pot: Pot,
    table: Table,
    rng: GameRng,
    phase: Phase,
    timeline: Timeline,
    /// Escalations in the current round; zero outside a war.
    war_depth: u32,
    /// Row where the next war ante lands.
    next_pot_y: i32,
    events: Vec<GameEvent>,
    rounds: u32,
}

impl<R: Renderer> WarGame<R> {
    /// Build the deck, shuffle it and deal both piles.
    ///
    /// Without a configured seed the shuffle is seeded from the OS.
    pub fn new(renderer: R, config: WarConfig) -> Self {
        let mut scene = Scene::new(renderer);
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let layout = &config.layout;
        let deck = build_deck(&mut scene, layout.card_width, layout.card_height);
        let table = Table::new(&mut scene, layout);
        let next_pot_y = layout.pot_row;

        let mut game = Self {
            config,
            scene,
            deck,
            piles: SideMap::new(|_| Pile::new()),
            pot: Pot::new(),
            table,
            rng,
            phase: Phase::Idle,
            timeline: Timeline::new(),
            war_depth: 0,
            next_pot_y,
            events: Vec::new(),
            rounds: 0,
        };
        game.deal_new_game();
        game
    }

    /// Reshuffle and deal a fresh game. Not allowed while a war is running.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        if self.phase.is_in_flight() {
            warn!(phase = ?self.phase, "reset rejected");
            return Err(EngineError::NotIdle);
        }
        self.deal_new_game();
        Ok(())
    }

    /// Put exactly the given cards in play, top first.
    ///
    /// Every other card is set aside hidden. Meant for staging specific
    /// match-ups; card conservation then holds over the arranged cards.
    pub fn arrange(&mut self, player: &[CardId], computer: &[CardId]) -> Result<(), EngineError> {
        if self.phase.is_in_flight() {
            return Err(EngineError::NotIdle);
        }
        let mut seen = FxHashSet::default();
        for &id in player.iter().chain(computer) {
            if self.deck.get(id).is_none() {
                return Err(EngineError::InvalidArrangement(format!("{id} is not in the deck")));
            }
            if !seen.insert(id) {
                return Err(EngineError::InvalidArrangement(format!("{id} appears twice")));
            }
        }

        self.piles[Side::Player] = player.iter().copied().collect();
        self.piles[Side::Computer] = computer.iter().copied().collect();
        self.start_game();
        Ok(())
    }

    /// Play one round: deal both top cards face up and compare them.
    ///
    /// A tie returns `RoundOutcome::War` with the war queued on the timeline.
    pub fn play_round(&mut self) -> Result<RoundOutcome, EngineError> {
        match self.phase {
            Phase::Idle => {}
            Phase::GameOver { winner } => return Ok(RoundOutcome::GameOver { winner }),
            Phase::Drawn => return Ok(RoundOutcome::Stalemate { returned: 0 }),
            Phase::RoundInProgress | Phase::WarInProgress { .. } => {
                warn!(phase = ?self.phase, "round requested while one is in flight");
                return Err(EngineError::RoundInFlight);
            }
        }

        self.scene.pause();
        self.table.clear_round(&mut self.scene);
        self.next_pot_y = self.config.layout.pot_row;
        for side in Side::ALL {
            self.line_up(side);
        }
        self.scene.resume();

        if let Some(winner) = self.leader_by_default() {
            return Ok(self.game_over(winner));
        }

        self.rounds += 1;
        self.phase = Phase::RoundInProgress;
        self.events.push(GameEvent::RoundStarted { round: self.rounds });
        debug!(round = self.rounds, "round started");

        let row = self.config.layout.round_row;
        self.reveal_and_compare(row).or_else(|e| self.recover(e))
    }

    /// Play a round and, if it ties, drive the war to completion with `pacer`.
    pub fn play_round_paced(&mut self, pacer: &mut impl Pacer) -> Result<RoundOutcome, EngineError> {
        match self.play_round()? {
            RoundOutcome::War { depth } => Ok(self.finish(pacer)?.unwrap_or(RoundOutcome::War { depth })),
            outcome => Ok(outcome),
        }
    }

    /// Credit `elapsed` time to the war timeline and run every step now due.
    ///
    /// Returns the outcome once the war resolves.
    pub fn tick(&mut self, elapsed: Duration) -> Result<Option<RoundOutcome>, EngineError> {
        self.timeline.advance(elapsed);
        while let Some(step) = self.timeline.pop_due() {
            if let Some(outcome) = self.run_step(step)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Run every pending step, letting `pacer` wait out each delay.
    ///
    /// Returns `None` if nothing was pending.
    pub fn finish(&mut self, pacer: &mut impl Pacer) -> Result<Option<RoundOutcome>, EngineError> {
        while let Some((owed, step)) = self.timeline.pop_next() {
            pacer.wait(owed);
            if let Some(outcome) = self.run_step(step)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Run every pending step immediately.
    pub fn skip_animation(&mut self) -> Result<Option<RoundOutcome>, EngineError> {
        self.finish(&mut InstantPacer::default())
    }

    /// Dispatch a click: a finished or drawn game resets, otherwise a round
    /// is played.
    pub fn on_click(&mut self, x: i32, y: i32) -> Result<ClickOutcome, EngineError> {
        debug!(x, y, phase = ?self.phase, "click");
        if let Phase::GameOver { .. } | Phase::Drawn = self.phase {
            self.reset()?;
            return Ok(ClickOutcome::Reset);
        }
        self.play_round().map(ClickOutcome::Round)
    }

    /// Card under the pointer, if any.
    pub fn on_pointer_move(&mut self, x: i32, y: i32) -> Option<CardId> {
        let hit = self.scene.hit_test(x, y)?;
        self.deck.iter().find(|(_, card)| card.owns(hit)).map(|(id, _)| id)
    }

    // === Observers ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn pile(&self, side: Side) -> &Pile {
        &self.piles[side]
    }

    #[must_use]
    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    /// Everything that happened since the current game was dealt.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn scene(&self) -> &Scene<R> {
        &self.scene
    }

    #[must_use]
    pub fn config(&self) -> &WarConfig {
        &self.config
    }

    /// Rounds started in the current game.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Time until the next war step is due, if one is pending.
    #[must_use]
    pub fn time_until_next_step(&self) -> Option<Duration> {
        self.timeline.time_until_next()
    }

    /// Cards in both piles plus the pot.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(|(_, pile)| pile.len()).sum::<usize>() + self.pot.len()
    }

    // === Setup ===

    fn deal_new_game(&mut self) {
        let mut ids: Vec<CardId> = self.deck.ids().collect();
        shuffle(&mut ids, &mut self.rng);
        let (player, computer) = split_in_half(&ids);
        self.piles[Side::Player] = player;
        self.piles[Side::Computer] = computer;
        self.start_game();
    }

    /// Clear the table and lay out the current piles as a fresh game.
    fn start_game(&mut self) {
        self.pot = Pot::new();
        self.timeline.clear();
        self.phase = Phase::Idle;
        self.war_depth = 0;
        self.rounds = 0;
        self.next_pot_y = self.config.layout.pot_row;
        self.events.clear();

        self.scene.pause();
        for (_, card) in self.deck.iter_mut() {
            card.hide(&mut self.scene);
            card.turn_face_down(&mut self.scene);
        }
        self.table.hide_all(&mut self.scene);
        self.scene.set_background(Color::WHITE);
        for side in Side::ALL {
            self.line_up(side);
        }
        self.table.show_intro(&mut self.scene);
        self.scene.resume();

        let (player_cards, computer_cards) = (self.piles[Side::Player].len(), self.piles[Side::Computer].len());
        self.events.push(GameEvent::GameStarted {
            seed: self.rng.seed(),
            player_cards,
            computer_cards,
        });
        info!(seed = self.rng.seed(), player_cards, computer_cards, "game dealt");
    }

    /// Stack a side's pile face down at its edge, top card painted last.
    fn line_up(&mut self, side: Side) {
        let layout = &self.config.layout;
        let x = layout.pile_x(side);
        let mut y = layout.pile_base_y();
        for id in self.piles[side].iter().rev() {
            if let Some(card) = self.deck.get_mut(id) {
                card.turn_face_down(&mut self.scene);
                card.move_to(&mut self.scene, x, y);
                card.show(&mut self.scene);
                card.bring_to_front(&mut self.scene);
            }
            y -= layout.stack_step;
        }
    }

    // === Round resolution ===

    /// Side left holding cards when the other pile is empty.
    fn leader_by_default(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.piles[side].is_empty())
            .map(Side::opponent)
    }

    fn game_over(&mut self, winner: Side) -> RoundOutcome {
        self.phase = Phase::GameOver { winner };
        self.table.show_banner(&mut self.scene, winner);
        self.events.push(GameEvent::GameOver { winner });
        info!(%winner, rounds = self.rounds, "game over");
        RoundOutcome::GameOver { winner }
    }

    /// Deal one face-up card per side at `row` and settle the comparison.
    fn reveal_and_compare(&mut self, row: i32) -> Result<RoundOutcome, EngineError> {
        self.scene.pause();
        let revealed = self.reveal_pair(row);
        self.scene.resume();
        let values = revealed?;

        let outcome = match values[Side::Player].cmp(&values[Side::Computer]) {
            Ordering::Greater => self.award(Side::Player),
            Ordering::Less => self.award(Side::Computer),
            Ordering::Equal => self.declare_war(),
        };
        Ok(outcome)
    }

    fn reveal_pair(&mut self, row: i32) -> Result<SideMap<u8>, EngineError> {
        let mut values = SideMap::new(|_| 0);
        for side in Side::ALL {
            let id = self.deal(side)?;
            self.pot.push(side, id);
            let x = self.config.layout.column_x(side);
            let card = card_mut(&mut self.deck, id)?;
            card.move_to(&mut self.scene, x, row);
            card.turn_face_up(&mut self.scene);
            card.show(&mut self.scene);
            card.bring_to_front(&mut self.scene);
            let value = card.value();
            debug!(%side, card = %card.label(), value, "revealed");

            values[side] = value;
            self.events.push(GameEvent::Revealed { side, card: id, value });
        }
        Ok(values)
    }

    /// Move the whole pot to the bottom of `winner`'s pile.
    fn award(&mut self, winner: Side) -> RoundOutcome {
        let wars = self.war_depth;
        let cards = self.pot.len();
        let won = self.pot.drain();
        self.piles[winner].push_all(won.into_iter().map(|(_, card)| card));

        if wars == 0 {
            self.table.show_round_win(&mut self.scene, winner);
        } else {
            self.table.show_war_win(&mut self.scene, winner);
        }
        self.events.push(GameEvent::PotAwarded { side: winner, cards });
        info!(%winner, cards, wars, "pot awarded");

        self.settle();
        RoundOutcome::Won { winner, cards, wars }
    }

    /// Send every pot card back to the side that put it in.
    fn return_pot(&mut self) -> usize {
        let entries = self.pot.drain();
        let returned = entries.len();
        for (side, card) in entries {
            self.piles[side].push_all([card]);
        }
        returned
    }

    fn settle(&mut self) {
        self.war_depth = 0;
        self.timeline.clear();
        self.phase = Phase::Idle;
    }

    // === War ===

    fn declare_war(&mut self) -> RoundOutcome {
        self.war_depth += 1;
        let depth = self.war_depth;
        self.phase = Phase::WarInProgress { depth };
        self.events.push(GameEvent::WarDeclared {
            depth,
            pot: self.pot.len(),
        });
        info!(depth, pot = self.pot.len(), "war");

        self.scene.pause();
        self.scene.set_background(Color::RED);
        self.table.show_war(&mut self.scene);
        self.scene.resume();

        self.timeline.push_war(&self.config.pacing);
        RoundOutcome::War { depth }
    }

    /// Execute one war step. Returns the outcome once the war is settled.
    fn run_step(&mut self, step: Step) -> Result<Option<RoundOutcome>, EngineError> {
        debug!(?step, depth = self.war_depth, "war step");
        match step {
            Step::FlashOff => {
                self.scene.set_background(Color::WHITE);
                Ok(None)
            }
            Step::Ante(side) => self.ante(side).map(|()| None),
            Step::FaceUp => {
                let outcome = self.war_face_up().or_else(|e| self.recover(e))?;
                match outcome {
                    RoundOutcome::War { .. } => Ok(None),
                    settled => Ok(Some(settled)),
                }
            }
        }
    }

    /// Put one face-down card in the pot unless it is the side's last.
    fn ante(&mut self, side: Side) -> Result<(), EngineError> {
        let remaining = self.piles[side].len();
        if remaining <= 1 {
            self.events.push(GameEvent::AnteSkipped { side, remaining });
            debug!(%side, remaining, "ante skipped");
            return Ok(());
        }

        let id = self.deal(side)?;
        self.pot.push(side, id);
        let (x, y) = (self.config.layout.ante_x(side), self.next_pot_y);
        let card = card_mut(&mut self.deck, id)?;
        card.turn_face_down(&mut self.scene);
        card.move_to(&mut self.scene, x, y);
        card.show(&mut self.scene);
        card.bring_to_front(&mut self.scene);

        self.next_pot_y += self.config.layout.stack_step;
        self.events.push(GameEvent::Ante { side, card: id });
        Ok(())
    }

    /// Reveal the deciding war cards, or settle the pot when a side cannot.
    fn war_face_up(&mut self) -> Result<RoundOutcome, EngineError> {
        let empty: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|&side| self.piles[side].is_empty())
            .collect();

        match empty.as_slice() {
            [] => {
                let row = self.config.layout.war_row;
                self.reveal_and_compare(row)
            }
            [loser] => {
                let loser = *loser;
                self.events.push(GameEvent::Forfeited { side: loser });
                info!(side = %loser, "no card left for the war, pot forfeited");
                Ok(self.award(loser.opponent()))
            }
            _ => {
                let returned = self.return_pot();
                self.events.push(GameEvent::PotReturned { cards: returned });
                self.settle();
                self.phase = Phase::Drawn;
                self.table.show_draw_banner(&mut self.scene);
                self.events.push(GameEvent::Drawn);
                info!(returned, rounds = self.rounds, "neither side can finish the war, game drawn");
                Ok(RoundOutcome::Stalemate { returned })
            }
        }
    }

    // === Invariants ===

    fn deal(&mut self, side: Side) -> Result<CardId, EngineError> {
        debug_assert!(!self.piles[side].is_empty(), "dealt from an empty {side} pile");
        self.piles[side].deal_top().map_err(|e| {
            error!(%side, %e, "dealt from an empty pile");
            EngineError::InvariantViolation("dealt from an empty pile")
        })
    }

    /// Put the pot back where it came from and re-check for game over, then
    /// hand the original error back.
    fn recover(&mut self, err: EngineError) -> Result<RoundOutcome, EngineError> {
        let returned = self.return_pot();
        self.settle();
        warn!(%err, returned, "round abandoned");
        if let Some(winner) = self.leader_by_default() {
            self.game_over(winner);
        }
        Err(err)
    }
}

fn card_mut(deck: &mut Deck, id: CardId) -> Result<&mut Card, EngineError> {
    deck.get_mut(id).ok_or_else(|| {
        error!(%id, "card handle outside the deck");
        EngineError::InvariantViolation("card handle outside the deck")
    })
}
