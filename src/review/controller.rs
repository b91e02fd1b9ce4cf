//! Review round state machine
//!
//! Owns one round's lifecycle: selection, countdown, answer capture, counter
//! write-back, and the advance to the next round. The controller itself is
//! synchronous and single-owner; timer ticks and the post-reveal advance are
//! driven externally (see [`super::session`]).

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

use super::selector::{select_next, SelectorConfig};
use crate::phrases::{Phrase, PhraseStore};

/// Countdown ticks each phrase stays on screen before timing out
pub const WAIT_TIME: u32 = 30;

/// Pause between reveal and the start of the next round, in milliseconds
pub const TRANSITION_DELAY_MS: u64 = 1500;

/// Where the controller is within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No session running
    Idle,
    /// Countdown running, answer not yet given
    Presenting,
    /// Translation shown, auto-advance pending
    Revealed,
    /// No phrases available
    Finished,
}

/// Renderable view of the current round
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub phrase: Option<Phrase>,
    pub time_left: u32,
    pub show_translation: bool,
}

/// State machine for a timed review session.
///
/// Holds an in-memory snapshot of the phrase collection and writes counter
/// updates back through the store before the next round is selected, so
/// selection always observes fresh risk scores.
pub struct ReviewController<R: Rng = StdRng> {
    store: Arc<dyn PhraseStore>,
    config: SelectorConfig,
    rng: R,
    phrases: Vec<Phrase>,
    phase: Phase,
    current: Option<Phrase>,
    time_left: u32,
    show_translation: bool,
    transitioning: bool,
    last_phrase_id: Option<Uuid>,
}

impl ReviewController<StdRng> {
    pub fn new(store: Arc<dyn PhraseStore>, config: SelectorConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_entropy())
    }
}

impl<R: Rng> ReviewController<R> {
    pub fn with_rng(store: Arc<dyn PhraseStore>, config: SelectorConfig, rng: R) -> Self {
        Self {
            store,
            config,
            rng,
            phrases: Vec::new(),
            phase: Phase::Idle,
            current: None,
            time_left: WAIT_TIME,
            show_translation: false,
            transitioning: false,
            last_phrase_id: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_phrase(&self) -> Option<&Phrase> {
        self.current.as_ref()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn show_translation(&self) -> bool {
        self.show_translation
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            phrase: self.current.clone(),
            time_left: self.time_left,
            show_translation: self.show_translation,
        }
    }

    /// Load the working set from the store and begin the first round
    pub fn start(&mut self) {
        self.phrases = match self.store.load_all() {
            Ok(phrases) => phrases,
            Err(e) => {
                log::warn!("Failed to load phrases, starting empty: {}", e);
                Vec::new()
            }
        };
        self.last_phrase_id = None;
        self.begin_round();
    }

    /// One countdown tick. Reaching zero takes the timeout path, which is
    /// equivalent to answering "don't know".
    pub fn tick(&mut self) {
        if self.phase != Phase::Presenting || self.show_translation {
            return;
        }
        if self.time_left > 0 {
            self.time_left -= 1;
        }
        if self.time_left == 0 {
            self.answer(false);
        }
    }

    /// Record the round's outcome and reveal the translation.
    ///
    /// Returns false when no answer is accepted: outside `Presenting`, or a
    /// duplicate answer while the reveal transition is already in progress.
    pub fn answer(&mut self, correct: bool) -> bool {
        if self.phase != Phase::Presenting || self.transitioning {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        self.transitioning = true;

        current.record_outcome(correct);
        if let Some(phrase) = self.phrases.iter_mut().find(|p| p.id == current.id) {
            phrase.record_outcome(correct);
        }

        // Write-back before the next selection. On failure the in-memory
        // snapshot stays authoritative and the session continues degraded.
        if let Err(e) = self.store.save_all(&self.phrases) {
            log::error!("Failed to persist review outcome: {}", e);
        }

        self.show_translation = true;
        self.phase = Phase::Revealed;
        true
    }

    /// Move from the reveal to the next round. No-op outside `Revealed`.
    pub fn advance(&mut self) {
        if self.phase != Phase::Revealed {
            return;
        }
        self.begin_round();
    }

    /// Abandon the session: discard in-round state without mutating
    /// counters. The caller is responsible for voiding pending timers.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.current = None;
        self.time_left = WAIT_TIME;
        self.show_translation = false;
        self.transitioning = false;
        self.last_phrase_id = None;
    }

    /// Replace the working set wholesale after an external store mutation.
    ///
    /// If the active phrase was deleted mid-round the round is abandoned
    /// (no counter mutation) and the next round starts immediately.
    pub fn refresh(&mut self, phrases: Vec<Phrase>) {
        self.phrases = phrases;

        match self.phase {
            Phase::Presenting => {
                let current_gone = self
                    .current
                    .as_ref()
                    .map_or(true, |c| !self.phrases.iter().any(|p| p.id == c.id));
                if current_gone {
                    log::info!("Active phrase removed externally, abandoning round");
                    self.begin_round();
                }
            }
            Phase::Finished => {
                // New material may have arrived
                if !self.phrases.is_empty() {
                    self.begin_round();
                }
            }
            Phase::Idle | Phase::Revealed => {}
        }
    }

    fn begin_round(&mut self) {
        let picked = select_next(
            &self.phrases,
            self.last_phrase_id,
            &self.config,
            &mut self.rng,
        )
        .cloned();

        match picked {
            Some(phrase) => {
                self.last_phrase_id = Some(phrase.id);
                self.current = Some(phrase);
                self.time_left = WAIT_TIME;
                self.show_translation = false;
                self.transitioning = false;
                self.phase = Phase::Presenting;
            }
            None => {
                self.current = None;
                self.show_translation = false;
                self.transitioning = false;
                self.phase = Phase::Finished;
            }
        }
    }
}
