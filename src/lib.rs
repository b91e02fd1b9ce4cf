//! Fraza — personal phrase trainer with timed recall drills
//!
//! Phrases are short text/translation pairs kept in a local JSON store.
//! The review loop scores each phrase by its empirical failure rate, picks
//! the next one with a bias toward weak material, and drives a timed
//! presentation/reveal cycle per round.

pub mod phrases;
pub mod review;

pub use phrases::{JsonPhraseStore, MemoryPhraseStore, Phrase, PhraseStorageError, PhraseStore};
pub use review::{Phase, ReviewController, ReviewIntent, ReviewSession, SelectorConfig};
