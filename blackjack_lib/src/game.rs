//! Module that runs a whole game: rounds are played back to back until nobody is left at the
//! table or the dealer runs out of cards.

use crate::events::{TableEvent, TableObserver};
use crate::strategy::PlayerInput;
use crate::summary::GameSummary;
use crate::table::{BlackjackTable, RoundOutcome};
use crate::BlackjackGameError;

/// Struct that provides the functionality to play a game of blackjack.
/// Decisions come from `input`, everything that happens is reported to `observer`.
pub struct BlackjackGame<I, O>
where
    I: PlayerInput,
    O: TableObserver,
{
    table: BlackjackTable,
    input: I,
    observer: O,
}

impl<I, O> BlackjackGame<I, O>
where
    I: PlayerInput,
    O: TableObserver,
{
    pub fn new(table: BlackjackTable, input: I, observer: O) -> BlackjackGame<I, O> {
        BlackjackGame {
            table,
            input,
            observer,
        }
    }

    /// Plays rounds until the table reports there is nobody left to play.
    /// Returns the final stats, or the error that stopped the game (running out of cards included).
    pub fn run(&mut self) -> Result<GameSummary, BlackjackGameError> {
        if self.table.players().is_empty() {
            return Ok(self.table.summary());
        }
        loop {
            let outcome = self.play_round()?;
            if !outcome.continue_play {
                break;
            }
        }
        tracing::info!(rounds = self.table.rounds_played(), "game over");
        Ok(self.table.summary())
    }

    /// Stakes, deals, plays and clears a single round. Stats are published once the round is
    /// settled and again after the hands are cleared.
    pub fn play_round(&mut self) -> Result<RoundOutcome, BlackjackGameError> {
        tracing::debug!(round = self.table.rounds_played() + 1, "starting round");
        self.table
            .collect_stakes(&mut self.input, &mut self.observer)?;
        self.table.deal_initial_hands(&mut self.observer)?;
        let outcome = self.table.play_round(&mut self.input, &mut self.observer)?;
        // settled stats with the round's hands still on the table
        self.observer
            .notify(TableEvent::Snapshot(self.table.summary()));
        self.table.clear_hands();
        self.observer
            .notify(TableEvent::Snapshot(self.table.summary()));
        Ok(outcome)
    }

    pub fn table(&self) -> &BlackjackTable {
        &self.table
    }

    pub fn summary(&self) -> GameSummary {
        self.table.summary()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::deck::Deck;
    use crate::participant::{Dealer, Player, PlayerId};
    use crate::strategy::HouseStrategy;

    /// Counts snapshots so we can check when stats are published.
    #[derive(Default)]
    struct SnapshotCounter {
        snapshots: Vec<GameSummary>,
    }

    impl TableObserver for SnapshotCounter {
        fn notify(&mut self, event: TableEvent<'_>) {
            if let TableEvent::Snapshot(summary) = event {
                self.snapshots.push(summary);
            }
        }
    }

    fn tens_only_dealer() -> Dealer {
        let cards = ["King", "Queen", "Jack"]
            .iter()
            .flat_map(|rank| {
                ["Spades", "Clubs", "Hearts", "Diamonds"]
                    .iter()
                    .map(move |suit| format!("{} of {}", rank, suit).parse::<Card>().unwrap())
            })
            .collect();
        Dealer::with_deck(Deck::from_cards(cards, 5))
    }

    #[test]
    fn all_in_tie_eliminates_the_only_player() {
        // every card is worth ten: the dealer stands on 20 and the player ties on 20
        let table = BlackjackTable::new(
            tens_only_dealer(),
            vec![Player::new(PlayerId(1), "Ada", 20.0)],
        );
        let mut game = BlackjackGame::new(
            table,
            HouseStrategy::new(20.0, 17),
            SnapshotCounter::default(),
        );

        let summary = game.run().unwrap();

        assert_eq!(summary.rounds_played, 1);
        assert_eq!(summary.cards_left, 8);
        assert_eq!(summary.players.len(), 1);
        assert!(summary.players[0].eliminated);
        assert_eq!(summary.players[0].balance, 0.0);
        assert_eq!(summary.players[0].cards, 0);
        assert!(game.table().players().is_empty());
        // after stakes, after settlement and after the hands are cleared
        let snapshots = &game.observer().snapshots;
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].players[0].stake, 20.0);
        assert!(!snapshots[0].players[0].eliminated);
        assert!(snapshots[1].players[0].eliminated);
        assert_eq!(snapshots[1].players[0].balance, 0.0);
        assert_eq!(snapshots[1].players[0].cards, 2);
        assert_eq!(snapshots[2], summary);
    }

    #[test]
    fn ties_keep_costing_stakes_until_the_deck_runs_out() {
        // 12 cards, 4 per round: three rounds are played and the fourth cannot be dealt
        let table = BlackjackTable::new(
            tens_only_dealer(),
            vec![Player::new(PlayerId(1), "Ada", 50.0)],
        );
        let mut game = BlackjackGame::new(table, HouseStrategy::new(10.0, 17), ());

        assert_eq!(game.run(), Err(BlackjackGameError::DeckExhausted));
        let summary = game.summary();
        assert_eq!(summary.rounds_played, 3);
        assert_eq!(summary.players[0].balance, 10.0);
        assert_eq!(summary.players[0].stake, 10.0);
    }

    #[test]
    fn seeded_game_keeps_money_non_negative() {
        let players = (1..=3)
            .map(|i| Player::new(PlayerId(i), format!("Player {}", i), 50.0))
            .collect();
        let table = BlackjackTable::new(Dealer::with_deck(Deck::with_seed(2024)), players);
        let mut game = BlackjackGame::new(table, HouseStrategy::default(), ());

        loop {
            let seated = game.table().players().len();
            match game.play_round() {
                Ok(outcome) => {
                    assert!(game.table().players().iter().all(|p| p.balance >= 0.0));
                    assert_eq!(outcome.settlements.len(), seated);
                    if !outcome.continue_play {
                        break;
                    }
                }
                Err(e) => {
                    assert_eq!(e, BlackjackGameError::DeckExhausted);
                    break;
                }
            }
        }
        let summary = game.summary();
        assert_eq!(summary.players.len(), 3);
        assert!(summary.players.iter().all(|p| p.balance >= 0.0));
    }

    #[test]
    fn empty_table_returns_immediately() {
        let table = BlackjackTable::new(Dealer::with_deck(Deck::with_seed(1)), vec![]);
        let mut game = BlackjackGame::new(table, HouseStrategy::default(), ());
        let summary = game.run().unwrap();
        assert_eq!(summary.rounds_played, 0);
        assert_eq!(summary.cards_left, 48);
    }
}
