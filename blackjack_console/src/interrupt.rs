//! Ctrl-C handling. The game thread blocks on the console, so a watcher thread waits for the
//! signal, prints the most recent stats and exits the process.

use crate::console::print_summary;
use blackjack_lib::prelude::GameSummary;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Latest stats published by the game, shared with the interrupt watcher.
#[derive(Debug, Clone, Default)]
pub struct StatsBoard {
    latest: Arc<Mutex<Option<GameSummary>>>,
}

impl StatsBoard {
    pub fn publish(&self, summary: GameSummary) {
        match self.latest.lock() {
            Ok(mut guard) => *guard = Some(summary),
            Err(poisoned) => *poisoned.into_inner() = Some(summary),
        }
    }

    pub fn latest(&self) -> Option<GameSummary> {
        match self.latest.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Spawns the watcher thread. On Ctrl-C it prints the latest stats from `board`, then "Bye.", and
/// exits with status 0.
pub fn watch_for_interrupt(board: StatsBoard, json: bool) -> std::io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "unable to listen for ctrl-c");
                    return;
                }
                tracing::info!("received interrupt");
                println!();
                if let Some(summary) = board.latest() {
                    if let Err(e) = print_summary(&summary, json) {
                        tracing::warn!(error = %e, "unable to print final stats");
                    }
                }
                println!("Bye.");
                std::process::exit(0);
            })
        })
}
