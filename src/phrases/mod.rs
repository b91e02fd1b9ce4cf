//! Phrase collection for Fraza
//!
//! This module provides:
//! - The phrase data model (text, translation, review counters)
//! - Collection CRUD over a JSON file store
//! - The `PhraseStore` repository trait the review flow depends on
//! - A file watcher for multi-view store coherence

pub mod models;
pub mod storage;
pub mod watcher;

pub use models::Phrase;
pub use storage::{
    JsonPhraseStore, MemoryPhraseStore, PhraseStorageError, PhraseStore,
};
pub use watcher::watch_store;
