pub mod config;
pub mod console;
pub mod interrupt;

use blackjack_lib::prelude::*;
pub use config::{Args, ConfigError, GameConfig, GameConfigBuilder};
pub use console::{ConsoleDisplay, ConsoleInput};
pub use interrupt::{watch_for_interrupt, StatsBoard};
use std::io::Write;
use thiserror::Error;

pub mod prelude {
    pub use super::{
        build_table, play_game, play_table, write_report, Args, ConfigError, ConsoleDisplay,
        ConsoleError, ConsoleInput, Ending, GameConfig, GameConfigBuilder, GameReport,
        StatsBoard, watch_for_interrupt,
    };
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Game(#[from] BlackjackGameError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Every player was eliminated.
    Finished,
    /// The dealer had no cards left to deal.
    DeckExhausted,
    /// The input ran dry before the game was over.
    InputClosed,
}

/// How the game ended together with the stats at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub ending: Ending,
    pub summary: GameSummary,
}

/// Seats the configured players at a table with a fresh deck, seeded if the config has a seed.
pub fn build_table(config: &GameConfig) -> BlackjackTable {
    let deck = match config.seed {
        Some(seed) => Deck::with_seed(seed),
        None => Deck::new(),
    };
    let players = config
        .player_names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(PlayerId(i as u32 + 1), name.clone(), config.starting_balance))
        .collect();
    BlackjackTable::new(Dealer::with_deck(deck), players)
}

/// Plays the game configured by `config` to its end.
pub fn play_game<I, W>(
    config: &GameConfig,
    input: I,
    display: ConsoleDisplay<W>,
) -> Result<GameReport, ConsoleError>
where
    I: PlayerInput,
    W: Write,
{
    tracing::info!(
        players = config.player_names.len(),
        starting_balance = config.starting_balance,
        seed = ?config.seed,
        auto = config.auto,
        "starting game"
    );
    play_table(build_table(config), input, display)
}

/// Plays rounds at `table` until the game ends. Running out of cards and running out of input both
/// count as an ending, anything else is an error.
pub fn play_table<I, W>(
    table: BlackjackTable,
    input: I,
    display: ConsoleDisplay<W>,
) -> Result<GameReport, ConsoleError>
where
    I: PlayerInput,
    W: Write,
{
    let mut game = BlackjackGame::new(table, input, display);
    let ending = match game.run() {
        Ok(_) => Ending::Finished,
        Err(BlackjackGameError::DeckExhausted) => Ending::DeckExhausted,
        Err(BlackjackGameError::InputClosed) => Ending::InputClosed,
        Err(e) => return Err(e.into()),
    };
    Ok(GameReport {
        ending,
        summary: game.summary(),
    })
}

/// Writes the closing lines for `report`.
pub fn write_report<W: Write>(report: &GameReport, json: bool, mut out: W) -> std::io::Result<()> {
    match report.ending {
        Ending::Finished => {
            writeln!(out, "{}", console::render_summary(&report.summary, json))?;
            writeln!(out, "Game Over.")?;
        }
        Ending::DeckExhausted => writeln!(out, "No more cards left. Game Over.")?,
        Ending::InputClosed => {
            writeln!(out)?;
            writeln!(out, "{}", console::render_summary(&report.summary, json))?;
            writeln!(out, "Bye.")?;
        }
    }
    out.flush()
}
