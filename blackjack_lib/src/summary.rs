use crate::participant::{Participant, Player, PlayerId};
use serde::Serialize;
use std::fmt::Display;

/// Snapshot of a single player, recorded for the running stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub balance: f64,
    pub stake: f64,
    pub cards: usize,
    pub eliminated: bool,
}

impl PlayerSummary {
    pub fn new(player: &Player, eliminated: bool) -> Self {
        PlayerSummary {
            id: player.id,
            name: player.name.clone(),
            balance: player.balance,
            stake: player.stake,
            cards: player.hand().len(),
            eliminated,
        }
    }
}

/// Simple struct for recording the state of the table at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub rounds_played: u32,
    pub cards_left: usize,
    pub players: Vec<PlayerSummary>,
}

impl Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "cards left in the deck".len() + 8;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;

        writeln!(f, "{:-^WIDTH$}", "stats")?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "rounds played", self.rounds_played
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "cards left in the deck", self.cards_left
        )?;
        for player in &self.players {
            let header = format!(" {} ({}) ", player.name, player.id);
            writeln!(f, "{:-^WIDTH$}", header)?;
            writeln!(
                f,
                "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
                "balance", player.balance
            )?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}", "stake", player.stake)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "cards held", player.cards)?;
            writeln!(
                f,
                "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
                "eliminated", player.eliminated
            )?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}
