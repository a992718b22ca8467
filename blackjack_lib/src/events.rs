use crate::card::Card;
use crate::participant::{Player, Recipient};
use crate::summary::GameSummary;

/// Things that happen at the table that a front end may want to show.
#[derive(Debug)]
pub enum TableEvent<'a> {
    StakePlaced {
        player: &'a Player,
    },
    CardDealt {
        recipient: Recipient,
        card: Card,
    },
    /// A player is about to act, `player` holds the cards dealt so far.
    PlayerTurn {
        player: &'a Player,
    },
    /// A player took a card during their turn.
    HandUpdated {
        player: &'a Player,
    },
    DealerBust {
        dealer_value: u32,
    },
    DealerStands {
        dealer_value: u32,
    },
    Blackjack {
        player: &'a Player,
    },
    PlayerWon {
        player: &'a Player,
        player_value: u32,
        dealer_value: u32,
    },
    PlayerLost {
        player: &'a Player,
        player_value: u32,
        dealer_value: u32,
    },
    PlayerEliminated {
        player: &'a Player,
    },
    /// Fresh stats, published after stakes are placed, once the round is settled and after the
    /// hands are cleared.
    Snapshot(GameSummary),
}

/// Receives every `TableEvent`. The unit type ignores them all.
pub trait TableObserver {
    fn notify(&mut self, event: TableEvent<'_>);
}

impl TableObserver for () {
    fn notify(&mut self, _event: TableEvent<'_>) {}
}

impl<T: TableObserver + ?Sized> TableObserver for &mut T {
    fn notify(&mut self, event: TableEvent<'_>) {
        (**self).notify(event)
    }
}
