use blackjack_console::prelude::*;
use blackjack_lib::prelude::HouseStrategy;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match GameConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let board = StatsBoard::default();
    if let Err(e) = watch_for_interrupt(board.clone(), config.json) {
        tracing::warn!(error = %e, "ctrl-c will exit without printing stats");
    }

    let display = ConsoleDisplay::new(io::stdout()).with_board(board);
    let result = if config.auto {
        let strategy = HouseStrategy::new(config.auto_stake, config.stand_on);
        play_game(&config, strategy, display)
    } else {
        let input = ConsoleInput::new(io::stdin().lock(), io::stdout());
        play_game(&config, input, display)
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_report(&report, config.json, io::stdout()) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match report.ending {
        Ending::DeckExhausted => ExitCode::FAILURE,
        Ending::Finished | Ending::InputClosed => ExitCode::SUCCESS,
    }
}
