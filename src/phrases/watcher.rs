//! File watcher for external mutations of the phrase store
//!
//! Another window or process may rewrite `phrases.json` while a review
//! session is running. The session host watches the store and replaces its
//! working set wholesale whenever the file changes.

use std::path::Path;
use std::time::Duration;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

use super::storage::Result;

/// Watch the backing store file and invoke `callback` whenever it is
/// written or replaced. Watching stops when the returned watcher is dropped.
///
/// The parent directory is watched rather than the file itself so writers
/// that replace the file atomically are still observed.
pub fn watch_store<F>(store_path: &Path, callback: F) -> Result<RecommendedWatcher>
where
    F: Fn() + Send + 'static,
{
    let file_name = store_path.file_name().map(|n| n.to_os_string());
    let watch_dir = store_path.parent().unwrap_or(store_path).to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }
                let matches_store = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if matches_store {
                    callback();
                }
            }
            Err(e) => log::warn!("Phrase store watcher error: {}", e),
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    Ok(watcher)
}
