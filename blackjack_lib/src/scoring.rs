//! Card and hand values. Aces always count as 11.

use crate::card::{Card, Rank};

/// Dealer keeps drawing while below this value.
pub const DEALER_STANDS_ON: u32 = 17;
/// Highest value that is not a bust.
pub const BLACKJACK: u32 = 21;

pub fn card_value(card: &Card) -> u32 {
    match card.rank {
        Rank::Ace => 11,
        Rank::King | Rank::Queen | Rank::Jack => 10,
        numeric => numeric.pips().unwrap_or(0),
    }
}

pub fn hand_value<'a, I>(cards: I) -> u32
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().map(card_value).sum()
}

pub fn is_bust(value: u32) -> bool {
    value > BLACKJACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(names: &[&str]) -> Vec<Card> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn fixed_card_values() {
        assert_eq!(card_value(&Card::new(Rank::Ace, Suit::Clubs)), 11);
        assert_eq!(card_value(&Card::new(Rank::King, Suit::Clubs)), 10);
        assert_eq!(card_value(&Card::new(Rank::Queen, Suit::Clubs)), 10);
        assert_eq!(card_value(&Card::new(Rank::Jack, Suit::Clubs)), 10);
        assert_eq!(card_value(&Card::new(Rank::Two, Suit::Clubs)), 2);
        assert_eq!(card_value(&Card::new(Rank::Nine, Suit::Clubs)), 9);
    }

    #[test]
    fn dealer_must_draw_on_fourteen() {
        let hand = cards(&["5 of Spades", "9 of Clubs"]);
        assert_eq!(hand_value(&hand), 14);
        assert!(hand_value(&hand) < DEALER_STANDS_ON);
    }

    #[test]
    fn king_and_ace_is_twenty_one() {
        let hand = cards(&["King of Spades", "Ace of Hearts"]);
        assert_eq!(hand_value(&hand), BLACKJACK);
    }

    #[test]
    fn two_aces_bust() {
        let hand = cards(&["Ace of Spades", "Ace of Hearts"]);
        assert_eq!(hand_value(&hand), 22);
        assert!(is_bust(hand_value(&hand)));
    }

    #[test]
    fn value_does_not_depend_on_order() {
        let mut hand = cards(&["3 of Spades", "Queen of Hearts", "Ace of Clubs", "7 of Diamonds"]);
        let value = hand_value(&hand);
        assert_eq!(value, 31);
        hand.reverse();
        assert_eq!(hand_value(&hand), value);
        hand.rotate_left(1);
        assert_eq!(hand_value(&hand), value);
    }

    #[test]
    fn empty_hand_is_zero() {
        assert_eq!(hand_value(&Vec::<Card>::new()), 0);
    }
}
