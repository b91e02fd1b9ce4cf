use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use uuid::Uuid;

use fraza_lib::phrases::{watch_store, PhraseStore};
use fraza_lib::review::{Phase, ReviewIntent, ReviewSession, RoundSnapshot, SelectorConfig};

use crate::app::App;

pub fn run(app: &App, use_color: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(train(app, use_color))
}

async fn train(app: &App, use_color: bool) -> Result<()> {
    let store = Arc::new(app.storage.clone());
    let session = ReviewSession::spawn(
        Arc::clone(&store) as Arc<dyn PhraseStore>,
        SelectorConfig::default(),
    );
    let intents = session.intents();
    let mut snapshots = session.snapshots();

    // Reload the working set when another process rewrites the store
    let refresh_intents = intents.clone();
    let refresh_store = Arc::clone(&store);
    let _watcher = match watch_store(&store.phrases_path(), move || {
        if let Ok(phrases) = refresh_store.load_all() {
            let _ = refresh_intents.try_send(ReviewIntent::Refresh(phrases));
        }
    }) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            log::warn!("Store watcher unavailable: {}", e);
            None
        }
    };

    let mut lines = spawn_stdin_reader();

    println!("Answer with y (know it), n (don't know), or q to return.");

    // (phrase id, revealed) of the round already printed, to avoid
    // reprinting on every countdown tick
    let mut printed: Option<(Uuid, bool)> = None;

    // The first round is already underway when the session handle returns;
    // render it before waiting for changes.
    let initial = snapshots.borrow_and_update().clone();
    if initial.phase == Phase::Finished {
        println!("\nNo phrases available. Add some phrases first to start training.");
        let _ = intents.send(ReviewIntent::Return).await;
        session.join().await;
        return Ok(());
    }
    render_round(&initial, &mut printed, use_color)?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow().clone();
                match snapshot.phase {
                    Phase::Finished => {
                        println!("\nNo phrases available. Add some phrases first to start training.");
                        let _ = intents.send(ReviewIntent::Return).await;
                        break;
                    }
                    Phase::Idle => break,
                    Phase::Presenting | Phase::Revealed => {
                        render_round(&snapshot, &mut printed, use_color)?;
                    }
                }
            }

            line = lines.recv() => {
                match line.as_deref() {
                    Some("y") | Some("Y") => {
                        let _ = intents.send(ReviewIntent::Answer(true)).await;
                    }
                    Some("n") | Some("N") | Some("") => {
                        let _ = intents.send(ReviewIntent::Answer(false)).await;
                    }
                    Some("q") | Some("Q") | None => {
                        let _ = intents.send(ReviewIntent::Return).await;
                        break;
                    }
                    Some(other) => {
                        println!("  Unrecognized input '{}' (y/n/q)", other);
                    }
                }
            }
        }
    }

    session.join().await;
    println!("\nSession ended.");
    Ok(())
}

fn render_round(
    snapshot: &RoundSnapshot,
    printed: &mut Option<(Uuid, bool)>,
    use_color: bool,
) -> Result<()> {
    let Some(phrase) = &snapshot.phrase else {
        return Ok(());
    };

    let key = (phrase.id, snapshot.show_translation);
    if *printed != Some(key) {
        *printed = Some(key);

        if snapshot.show_translation {
            println!();
            println!("  → {}", phrase.translation);
            println!(
                "  Success: {} | Fails: {}",
                phrase.success_count, phrase.failure_count
            );
        } else {
            println!();
            if use_color {
                println!("  \x1b[1m{}\x1b[0m", phrase.text);
            } else {
                println!("  {}", phrase.text);
            }
        }
    }

    if snapshot.phase == Phase::Presenting {
        print!("\r  {:>2}s  [y/n/q] ", snapshot.time_left);
        std::io::stdout().flush()?;
    }

    Ok(())
}

/// Forward stdin lines into the async loop from a blocking reader thread
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = std::io::BufRead::read_line(&mut stdin.lock(), &mut buf);
            if read.unwrap_or(0) == 0 {
                break;
            }
            if tx.blocking_send(buf.trim().to_string()).is_err() {
                break;
            }
        }
    });

    rx
}
