//! Single deck blackjack: the deck, hand values, the dealer and players, and the table that plays
//! out a round and pays the stakes.
//!
//! Rules are deliberately simple. The deck has no tens, aces are always worth 11, the dealer stands
//! on 17 or more, a hand worth exactly 21 multiplies the player's whole balance by 2.5 and there are
//! no splits, doubles or insurance.

pub mod card;
pub mod deck;
mod error;
pub mod events;
pub mod game;
pub mod participant;
pub mod scoring;
pub mod strategy;
pub mod summary;
pub mod table;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use error::BlackjackGameError;
pub use game::BlackjackGame;
pub use participant::{Dealer, Participant, Player, PlayerId, Recipient};
pub use table::BlackjackTable;

pub mod prelude {
    pub use super::{
        events::{TableEvent, TableObserver},
        scoring::{card_value, hand_value},
        strategy::{HouseStrategy, PlayerAction, PlayerInput},
        summary::{GameSummary, PlayerSummary},
        table::{DealerOutcome, RoundOutcome, Settlement},
        BlackjackGame, BlackjackGameError, BlackjackTable, Card, Dealer, Deck, Participant,
        Player, PlayerId, Rank, Recipient, Suit,
    };
}
