//! Game configuration: defaults, an optional JSON file, and command line flags layered on top.

use clap::{ArgAction, Parser};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Command line arguments for the `blackjack` binary.
#[derive(Debug, Parser)]
#[command(name = "blackjack", about = "Play single deck blackjack against the dealer")]
pub struct Args {
    /// Starting balance for every player
    #[arg(short, long)]
    pub balance: Option<f64>,
    /// Name of a player, repeat the flag to seat more players
    #[arg(short, long = "player")]
    pub players: Vec<String>,
    /// Number of players to seat when no names are given
    #[arg(short, long)]
    pub num_players: Option<u32>,
    /// Seed for the deck, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
    /// Let the computer play every seat
    #[arg(long)]
    pub auto: bool,
    /// Stake placed each round when playing automatically
    #[arg(long)]
    pub auto_stake: Option<f64>,
    /// Hand value the automatic player stands on
    #[arg(long)]
    pub stand_on: Option<u32>,
    /// Print the final stats as JSON
    #[arg(long)]
    pub json: bool,
    /// Path to a JSON config file, flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Log more, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("starting balance must be a positive amount, got {0}")]
    InvalidBalance(f64),
    #[error("auto stake must be a non-negative amount, got {0}")]
    InvalidAutoStake(f64),
    #[error("at least one player is needed")]
    NoPlayers,
}

/// The layout of a JSON config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub starting_balance: Option<f64>,
    pub players: Option<Vec<String>>,
    pub num_players: Option<u32>,
    pub seed: Option<u64>,
    pub auto: Option<bool>,
    pub auto_stake: Option<f64>,
    pub stand_on: Option<u32>,
    pub json: Option<bool>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ConfigFile, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Struct holding everything needed to set up a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub starting_balance: f64,
    pub player_names: Vec<String>,
    pub seed: Option<u64>,
    pub auto: bool,
    pub auto_stake: f64,
    pub stand_on: u32,
    pub json: bool,
}

impl GameConfig {
    /// Associated method for returning a new `GameConfigBuilder` object with nothing set.
    pub fn new() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Builds the configuration from the defaults, then the config file named in `args` if any,
    /// then the flags in `args`.
    pub fn from_args(args: &Args) -> Result<GameConfig, ConfigError> {
        let mut builder = match args.config {
            Some(ref path) => GameConfigBuilder::from(ConfigFile::load(path)?),
            None => GameConfig::new(),
        };
        builder.apply_args(args);
        builder.build()
    }
}

impl Default for GameConfig {
    /// One player named "Player 1" with a balance of 50.
    fn default() -> Self {
        GameConfig {
            starting_balance: 50.0,
            player_names: vec!["Player 1".to_string()],
            seed: None,
            auto: false,
            auto_stake: 10.0,
            stand_on: 17,
            json: false,
        }
    }
}

/// Struct to implement builder pattern for `GameConfig`
#[derive(Debug, Clone, Default)]
pub struct GameConfigBuilder {
    starting_balance: Option<f64>,
    player_names: Option<Vec<String>>,
    num_players: Option<u32>,
    seed: Option<u64>,
    auto: Option<bool>,
    auto_stake: Option<f64>,
    stand_on: Option<u32>,
    json: Option<bool>,
}

impl GameConfigBuilder {
    /// Method for changing the starting balance of every player.
    pub fn starting_balance(&mut self, balance: f64) -> &mut Self {
        self.starting_balance = Some(balance);
        self
    }

    /// Method for naming the players, one seat per name.
    pub fn player_names<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        names: I,
    ) -> &mut Self {
        self.player_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Method for seating `n` players named "Player 1" to "Player n". Ignored when names are set.
    pub fn num_players(&mut self, n: u32) -> &mut Self {
        self.num_players = Some(n);
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn auto(&mut self, auto: bool) -> &mut Self {
        self.auto = Some(auto);
        self
    }

    pub fn auto_stake(&mut self, stake: f64) -> &mut Self {
        self.auto_stake = Some(stake);
        self
    }

    pub fn stand_on(&mut self, value: u32) -> &mut Self {
        self.stand_on = Some(value);
        self
    }

    pub fn json(&mut self, json: bool) -> &mut Self {
        self.json = Some(json);
        self
    }

    /// Overrides whatever has been set so far with the flags actually given on the command line.
    pub fn apply_args(&mut self, args: &Args) -> &mut Self {
        if let Some(balance) = args.balance {
            self.starting_balance(balance);
        }
        if !args.players.is_empty() {
            self.player_names(args.players.iter().cloned());
        }
        if let Some(n) = args.num_players {
            self.player_names = None;
            self.num_players(n);
        }
        if let Some(seed) = args.seed {
            self.seed(seed);
        }
        if args.auto {
            self.auto(true);
        }
        if let Some(stake) = args.auto_stake {
            self.auto_stake(stake);
        }
        if let Some(value) = args.stand_on {
            self.stand_on(value);
        }
        if args.json {
            self.json(true);
        }
        self
    }

    /// Method for building a `GameConfig` object, falling back to the defaults for anything not set.
    pub fn build(&self) -> Result<GameConfig, ConfigError> {
        let defaults = GameConfig::default();

        let starting_balance = self.starting_balance.unwrap_or(defaults.starting_balance);
        if !starting_balance.is_finite() || starting_balance <= 0.0 {
            return Err(ConfigError::InvalidBalance(starting_balance));
        }
        let auto_stake = self.auto_stake.unwrap_or(defaults.auto_stake);
        if !auto_stake.is_finite() || auto_stake < 0.0 {
            return Err(ConfigError::InvalidAutoStake(auto_stake));
        }

        let player_names = match (&self.player_names, self.num_players) {
            (Some(names), _) => names.clone(),
            (None, Some(n)) => (1..=n).map(|i| format!("Player {}", i)).collect(),
            (None, None) => defaults.player_names,
        };
        if player_names.is_empty() {
            return Err(ConfigError::NoPlayers);
        }

        Ok(GameConfig {
            starting_balance,
            player_names,
            seed: self.seed.or(defaults.seed),
            auto: self.auto.unwrap_or(defaults.auto),
            auto_stake,
            stand_on: self.stand_on.unwrap_or(defaults.stand_on),
            json: self.json.unwrap_or(defaults.json),
        })
    }
}

impl From<ConfigFile> for GameConfigBuilder {
    fn from(file: ConfigFile) -> Self {
        GameConfigBuilder {
            starting_balance: file.starting_balance,
            player_names: file.players,
            num_players: file.num_players,
            seed: file.seed,
            auto: file.auto,
            auto_stake: file.auto_stake,
            stand_on: file.stand_on,
            json: file.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = GameConfig::new().build().unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.starting_balance, 50.0);
        assert_eq!(config.player_names, vec!["Player 1".to_string()]);
    }

    #[test]
    fn builder_sets_values() {
        let config = GameConfig::new()
            .starting_balance(100.0)
            .num_players(3)
            .seed(9)
            .auto(true)
            .build()
            .unwrap();
        assert_eq!(config.starting_balance, 100.0);
        assert_eq!(config.player_names, vec!["Player 1", "Player 2", "Player 3"]);
        assert_eq!(config.seed, Some(9));
        assert!(config.auto);
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(matches!(
            GameConfig::new().starting_balance(0.0).build(),
            Err(ConfigError::InvalidBalance(_))
        ));
        assert!(matches!(
            GameConfig::new().num_players(0).build(),
            Err(ConfigError::NoPlayers)
        ));
        assert!(matches!(
            GameConfig::new().auto_stake(-5.0).build(),
            Err(ConfigError::InvalidAutoStake(_))
        ));
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"starting_balance": 75.0, "players": ["Ada", "Bea"], "seed": 3}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from(["blackjack", "--config", &path, "--seed", "8"]).unwrap();
        let config = GameConfig::from_args(&args).unwrap();
        assert_eq!(config.starting_balance, 75.0);
        assert_eq!(config.player_names, vec!["Ada", "Bea"]);
        assert_eq!(config.seed, Some(8));

        let args =
            Args::try_parse_from(["blackjack", "-c", &path, "-p", "Cy", "--balance", "20"]).unwrap();
        let config = GameConfig::from_args(&args).unwrap();
        assert_eq!(config.starting_balance, 20.0);
        assert_eq!(config.player_names, vec!["Cy"]);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_decks": 6}}"#).unwrap();
        assert!(matches!(
            ConfigFile::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConfigFile::load("/definitely/not/here.json"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn verbosity_counts() {
        let args = Args::try_parse_from(["blackjack", "-vv", "--auto"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.auto);
    }
}
