//! Async driver for a review session
//!
//! Runs the countdown and transition timers and feeds user intents into the
//! state machine. The loop selects over an intent channel and a single
//! state-dependent timer: a one-tick sleep while `Presenting`, the
//! transition delay while `Revealed`, nothing otherwise. The timer is
//! recomputed from the controller phase on every pass, so an intent that
//! changes phase also voids whatever timer was pending.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::{mpsc, watch};

use super::controller::{Phase, ReviewController, RoundSnapshot, TRANSITION_DELAY_MS};
use super::selector::SelectorConfig;
use crate::phrases::{Phrase, PhraseStore};

/// Milliseconds per countdown tick
const TICK_MS: u64 = 1000;

/// Intents accepted by a running session
#[derive(Debug)]
pub enum ReviewIntent {
    /// Answer the current round (true = knew it)
    Answer(bool),
    /// Abandon the session and return to the list
    Return,
    /// Replace the working set after an external store mutation
    Refresh(Vec<Phrase>),
}

/// Handle to a spawned review session
pub struct ReviewSession {
    intents: mpsc::Sender<ReviewIntent>,
    snapshots: watch::Receiver<RoundSnapshot>,
    handle: tokio::task::JoinHandle<()>,
}

impl ReviewSession {
    /// Spawn a session over `store` and start the first round
    pub fn spawn(store: Arc<dyn PhraseStore>, config: SelectorConfig) -> Self {
        Self::spawn_with(ReviewController::new(store, config))
    }

    /// Spawn a session around a pre-built controller (seeded RNG in tests)
    pub fn spawn_with(mut controller: ReviewController<StdRng>) -> Self {
        controller.start();

        let (intent_tx, intent_rx) = mpsc::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let handle = tokio::spawn(session_loop(controller, intent_rx, snapshot_tx));

        Self {
            intents: intent_tx,
            snapshots: snapshot_rx,
            handle,
        }
    }

    /// Sender for forwarding intents from the presentation layer
    pub fn intents(&self) -> mpsc::Sender<ReviewIntent> {
        self.intents.clone()
    }

    /// Receiver observing round state changes
    pub fn snapshots(&self) -> watch::Receiver<RoundSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the session task to finish (after a `Return` intent or once
    /// all senders are dropped)
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

async fn session_loop(
    mut controller: ReviewController<StdRng>,
    mut intents: mpsc::Receiver<ReviewIntent>,
    snapshots: watch::Sender<RoundSnapshot>,
) {
    loop {
        let timer = match controller.phase() {
            Phase::Presenting => Some(Duration::from_millis(TICK_MS)),
            Phase::Revealed => Some(Duration::from_millis(TRANSITION_DELAY_MS)),
            Phase::Idle | Phase::Finished => None,
        };

        tokio::select! {
            _ = tokio::time::sleep(timer.unwrap_or_default()), if timer.is_some() => {
                match controller.phase() {
                    Phase::Presenting => controller.tick(),
                    Phase::Revealed => controller.advance(),
                    Phase::Idle | Phase::Finished => {}
                }
            }

            intent = intents.recv() => {
                match intent {
                    Some(ReviewIntent::Answer(correct)) => {
                        if !controller.answer(correct) {
                            log::debug!("Ignoring answer outside an active round");
                        }
                    }
                    Some(ReviewIntent::Refresh(phrases)) => {
                        controller.refresh(phrases);
                    }
                    Some(ReviewIntent::Return) | None => {
                        controller.cancel();
                        let _ = snapshots.send(controller.snapshot());
                        break;
                    }
                }
            }
        }

        let _ = snapshots.send(controller.snapshot());
    }
}
