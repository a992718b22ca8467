use crate::card::Card;
use crate::deck::Deck;
use crate::scoring::hand_value;
use crate::BlackjackGameError;
use serde::Serialize;
use std::fmt::Display;

/// Stable identifier handed to a player when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub u32);

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who received a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Dealer,
    Player(PlayerId),
}

/// Anything sitting at the table that holds a hand.
pub trait Participant {
    fn hand(&self) -> &[Card];
    fn receive_card(&mut self, card: Card);
    fn clear_hand(&mut self);

    /// Value of the current hand.
    fn hand_value(&self) -> u32 {
        hand_value(self.hand())
    }
}

/// The dealer owns the only deck at the table.
#[derive(Debug)]
pub struct Dealer {
    deck: Deck,
    hand: Vec<Card>,
}

impl Dealer {
    /// Associated function to create a new `Dealer` with a full, freshly generated deck.
    pub fn new() -> Dealer {
        Dealer::with_deck(Deck::new())
    }

    pub fn with_deck(deck: Deck) -> Dealer {
        Dealer {
            deck,
            hand: Vec::new(),
        }
    }

    /// Draws a card and gives it to `player`.
    pub fn deal(&mut self, player: &mut Player) -> Result<Card, BlackjackGameError> {
        let card = self.draw()?;
        tracing::debug!(player = %player.id, card = %card, "dealt card to player");
        player.receive_card(card);
        Ok(card)
    }

    /// Draws a card into the dealer's own hand.
    pub fn deal_self(&mut self) -> Result<Card, BlackjackGameError> {
        let card = self.draw()?;
        tracing::debug!(card = %card, "dealer dealt itself a card");
        self.hand.push(card);
        Ok(card)
    }

    fn draw(&mut self) -> Result<Card, BlackjackGameError> {
        self.deck.draw().map_err(|e| {
            tracing::warn!("dealer tried to draw from an empty deck");
            e
        })
    }

    pub fn cards_left(&self) -> usize {
        self.deck.remaining()
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Dealer::new()
    }
}

impl Participant for Dealer {
    fn hand(&self) -> &[Card] {
        &self.hand
    }

    fn receive_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    fn clear_hand(&mut self) {
        self.hand.clear();
    }
}

impl Display for Dealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dealer with {} cards left in the deck.", self.cards_left())
    }
}

/// A player with a balance and the stake currently riding on their hand.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    hand: Vec<Card>,
    pub balance: f64,
    pub stake: f64,
}

impl Player {
    pub fn new<S: Into<String>>(id: PlayerId, name: S, balance: f64) -> Player {
        Player {
            id,
            name: name.into(),
            hand: Vec::new(),
            balance,
            stake: 0.0,
        }
    }

    /// Moves `amount` from the balance onto the table. The amount must lie within `[0, balance]`.
    pub fn place_stake(&mut self, amount: f64) -> Result<(), BlackjackGameError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BlackjackGameError::InvalidStake(amount));
        }
        if amount > self.balance {
            return Err(BlackjackGameError::StakeExceedsBalance {
                stake: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        self.stake = amount;
        Ok(())
    }

    /// Pays out twice the stake and takes the stake off the table.
    pub fn win_stake(&mut self) {
        self.balance += self.stake * 2.0;
        self.stake = 0.0;
    }

    /// The stake is forfeited, it was already taken from the balance when placed.
    pub fn lose_stake(&mut self) {
        self.stake = 0.0;
    }

    pub fn is_broke(&self) -> bool {
        self.balance == 0.0
    }
}

impl Participant for Player {
    fn hand(&self) -> &[Card] {
        &self.hand
    }

    fn receive_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    fn clear_hand(&mut self) {
        self.hand.clear();
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
