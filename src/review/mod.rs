//! Adaptive review loop for Fraza
//!
//! This module provides:
//! - Risk scoring (empirical failure rate per phrase)
//! - Biased random selection of the next phrase to drill
//! - The timed review-round state machine
//! - An async session driver for the countdown and transition timers

pub mod controller;
pub mod risk;
pub mod selector;
pub mod session;

pub use controller::{
    Phase, ReviewController, RoundSnapshot, TRANSITION_DELAY_MS, WAIT_TIME,
};
pub use risk::risk_score;
pub use selector::{select_next, SelectorConfig};
pub use session::{ReviewIntent, ReviewSession};
