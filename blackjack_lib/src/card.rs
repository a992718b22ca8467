use crate::BlackjackGameError;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// The four suits of a deck. Suits are cosmetic and never affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Spades,
    Clubs,
    Hearts,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Hearts, Suit::Diamonds];

    fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
        }
    }
}

/// The ranks dealt at the table. There is no ten, a deck holds twelve ranks per suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Face cards come first so a freshly generated deck reads Ace, King, Queen, Jack, 2..9 per suit.
    pub const ALL: [Rank; 12] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
    ];

    /// Returns the number printed on the card for numeric ranks, `None` for face cards and aces.
    pub fn pips(&self) -> Option<u32> {
        match self {
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => None,
        }
    }

    fn name(&self) -> String {
        match self {
            Rank::Jack => "Jack".to_string(),
            Rank::Queen => "Queen".to_string(),
            Rank::King => "King".to_string(),
            Rank::Ace => "Ace".to_string(),
            numeric => numeric.pips().map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

impl FromStr for Rank {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_lowercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "jack" => Rank::Jack,
            "queen" => Rank::Queen,
            "king" => Rank::King,
            "ace" => Rank::Ace,
            _ => return Err(BlackjackGameError::InvalidCard(s.to_string())),
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BlackjackGameError::InvalidCard(s.to_string()))
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit.name())
    }
}

/// Parses the display form, e.g. `"King of Spades"` or `"5 of Clubs"`.
impl FromStr for Card {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match (words.next(), words.next(), words.next(), words.next()) {
            (Some(rank), Some(of), Some(suit), None) if of.eq_ignore_ascii_case("of") => {
                let rank = rank
                    .parse::<Rank>()
                    .map_err(|_| BlackjackGameError::InvalidCard(s.to_string()))?;
                let suit = suit
                    .parse::<Suit>()
                    .map_err(|_| BlackjackGameError::InvalidCard(s.to_string()))?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(BlackjackGameError::InvalidCard(s.to_string())),
        }
    }
}
