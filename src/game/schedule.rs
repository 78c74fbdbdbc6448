//! Timed steps of a war animation.
//!
//! A war is not a sleeping call. It is a queue of steps, each due a fixed
//! delay after the previous one:
//!
//! ```text
//! FlashOff -> Ante(Player) -> Ante(Computer) -> ... (x3) -> FaceUp
//! ```
//!
//! An event loop feeds elapsed time in with `Timeline::advance` and runs
//! whatever `pop_due` hands back. A blocking host instead asks `pop_next` for
//! the remaining wait, hands it to a `Pacer`, then runs the step.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Pacing, Side};

/// Number of face-down antes each side makes per war.
pub const ANTES_PER_WAR: usize = 3;

/// One unit of war animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Restore the background after the war flash.
    FlashOff,
    /// One side puts a face-down card in the pot, if it can spare one.
    Ante(Side),
    /// Both sides reveal a card and the pair is compared.
    FaceUp,
}

/// A step and the delay that must pass before it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub step: Step,
}

/// FIFO of pending steps plus the time already waited on the front one.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    queue: VecDeque<Scheduled>,
    waited: Duration,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Pending steps, in run order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.queue.iter().map(|s| s.step)
    }

    pub fn push(&mut self, delay: Duration, step: Step) {
        self.queue.push_back(Scheduled { delay, step });
    }

    /// Queue one full war: flash, three rounds of antes, face-up compare.
    ///
    /// The player always antes before the computer.
    pub fn push_war(&mut self, pacing: &Pacing) {
        self.push(pacing.flash(), Step::FlashOff);
        let mut delay = Duration::ZERO;
        for _ in 0..ANTES_PER_WAR {
            self.push(delay, Step::Ante(Side::Player));
            self.push(pacing.after_ante(Side::Player), Step::Ante(Side::Computer));
            delay = pacing.after_ante(Side::Computer);
        }
        self.push(delay, Step::FaceUp);
    }

    /// Credit elapsed wall time toward the front step.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.queue.is_empty() {
            self.waited = self.waited.saturating_add(elapsed);
        }
    }

    /// Pop the front step if its delay has fully elapsed.
    ///
    /// Leftover time carries over to the next step.
    pub fn pop_due(&mut self) -> Option<Step> {
        let front = self.queue.front()?;
        if front.delay > self.waited {
            return None;
        }
        self.waited -= front.delay;
        let step = self.queue.pop_front().map(|s| s.step);
        if self.queue.is_empty() {
            self.waited = Duration::ZERO;
        }
        step
    }

    /// Pop the front step regardless of time, with the wait still owed on it.
    pub fn pop_next(&mut self) -> Option<(Duration, Step)> {
        let front = self.queue.pop_front()?;
        let owed = front.delay.saturating_sub(self.waited);
        self.waited = Duration::ZERO;
        Some((owed, front.step))
    }

    /// Time left before the front step is due.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .front()
            .map(|s| s.delay.saturating_sub(self.waited))
    }

    /// Total delay still queued.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let total: Duration = self.queue.iter().map(|s| s.delay).sum();
        total.saturating_sub(self.waited)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.waited = Duration::ZERO;
    }
}

/// Blocks between steps when a host drives a war synchronously.
pub trait Pacer {
    fn wait(&mut self, delay: Duration);
}

/// Pacer that really sleeps the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn wait(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Pacer that never blocks; it only adds up the waits it skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPacer {
    pub skipped: Duration,
}

impl Pacer for InstantPacer {
    fn wait(&mut self, delay: Duration) {
        self.skipped += delay;
    }
}
