use crate::events::{TableEvent, TableObserver};
use crate::participant::{Dealer, Participant, Player, PlayerId, Recipient};
use crate::scoring::{is_bust, BLACKJACK, DEALER_STANDS_ON};
use crate::strategy::{PlayerAction, PlayerInput};
use crate::summary::{GameSummary, PlayerSummary};
use crate::BlackjackGameError;
use std::collections::HashSet;

/// How the dealer's hand ended up once it stopped drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerOutcome {
    Bust(u32),
    Stands(u32),
}

/// How a single player's round was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Dealer went bust, the stake was paid twice over regardless of the player's hand.
    DealerBust,
    /// Hand totalled 21, the whole balance was multiplied by 2.5 and settlement skipped.
    Blackjack,
    Won,
    Lost,
    /// Lost with nothing left, the player has left the table.
    Eliminated,
}

/// Everything that came out of one call to `BlackjackTable::play_round`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub dealer: DealerOutcome,
    pub settlements: Vec<(PlayerId, Settlement)>,
    /// False once nobody is left at the table.
    pub continue_play: bool,
}

/// Struct for a blackjack table: the dealer and the players still in the game.
/// Plays a round from the dealer's draw through to paying out stakes.
#[derive(Debug)]
pub struct BlackjackTable {
    dealer: Dealer,
    players: Vec<Player>,
    eliminated: Vec<Player>,
    rounds_played: u32,
}

impl BlackjackTable {
    pub fn new(dealer: Dealer, players: Vec<Player>) -> BlackjackTable {
        BlackjackTable {
            dealer,
            players,
            eliminated: Vec::new(),
            rounds_played: 0,
        }
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// The active players, in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn eliminated(&self) -> &[Player] {
        &self.eliminated
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Asks `input` for every active player's stake and takes it off their balance.
    pub fn collect_stakes<I, O>(
        &mut self,
        input: &mut I,
        observer: &mut O,
    ) -> Result<(), BlackjackGameError>
    where
        I: PlayerInput + ?Sized,
        O: TableObserver + ?Sized,
    {
        for player in self.players.iter_mut() {
            let stake = input.stake(player)?;
            player.place_stake(stake)?;
            tracing::info!(player = %player.id, stake, balance = player.balance, "stake placed");
            observer.notify(TableEvent::StakePlaced { player });
        }
        observer.notify(TableEvent::Snapshot(self.summary()));
        Ok(())
    }

    /// Two cards to each player, one pass per card, then a single card to the dealer.
    pub fn deal_initial_hands<O>(&mut self, observer: &mut O) -> Result<(), BlackjackGameError>
    where
        O: TableObserver + ?Sized,
    {
        for _ in 0..2 {
            for player in self.players.iter_mut() {
                let card = self.dealer.deal(player)?;
                observer.notify(TableEvent::CardDealt {
                    recipient: Recipient::Player(player.id),
                    card,
                });
            }
        }
        let card = self.dealer.deal_self()?;
        observer.notify(TableEvent::CardDealt {
            recipient: Recipient::Dealer,
            card,
        });
        Ok(())
    }

    /// Plays out a round with the hands currently dealt.
    ///
    /// The dealer draws to 17 first. A dealer bust pays every stake twice over and ends the round.
    /// Otherwise each player acts in turn, a hand worth exactly 21 multiplies the player's balance
    /// by 2.5, and everybody else is settled against the dealer's value. Players who lose with a
    /// balance of zero are removed once settlement is done.
    pub fn play_round<I, O>(
        &mut self,
        input: &mut I,
        observer: &mut O,
    ) -> Result<RoundOutcome, BlackjackGameError>
    where
        I: PlayerInput + ?Sized,
        O: TableObserver + ?Sized,
    {
        let dealer_value = match self.dealer_draw(observer)? {
            DealerOutcome::Bust(dealer_value) => {
                let settlements = self.pay_dealer_bust(dealer_value, observer);
                self.rounds_played += 1;
                return Ok(RoundOutcome {
                    dealer: DealerOutcome::Bust(dealer_value),
                    settlements,
                    continue_play: true,
                });
            }
            DealerOutcome::Stands(dealer_value) => dealer_value,
        };
        observer.notify(TableEvent::DealerStands { dealer_value });

        let naturals = self.player_turns(input, observer)?;
        let mut settlements = naturals
            .iter()
            .map(|id| (*id, Settlement::Blackjack))
            .collect::<Vec<_>>();
        settlements.extend(self.settle(dealer_value, &naturals, observer));
        self.rounds_played += 1;

        let continue_play = !self.players.is_empty();
        tracing::info!(
            round = self.rounds_played,
            dealer_value,
            active_players = self.players.len(),
            "round settled"
        );
        Ok(RoundOutcome {
            dealer: DealerOutcome::Stands(dealer_value),
            settlements,
            continue_play,
        })
    }

    fn dealer_draw<O>(&mut self, observer: &mut O) -> Result<DealerOutcome, BlackjackGameError>
    where
        O: TableObserver + ?Sized,
    {
        let mut dealer_value = self.dealer.hand_value();
        while dealer_value < DEALER_STANDS_ON && !is_bust(dealer_value) {
            let card = self.dealer.deal_self()?;
            observer.notify(TableEvent::CardDealt {
                recipient: Recipient::Dealer,
                card,
            });
            dealer_value = self.dealer.hand_value();
        }
        tracing::debug!(dealer_value, "dealer finished drawing");

        if is_bust(dealer_value) {
            Ok(DealerOutcome::Bust(dealer_value))
        } else {
            Ok(DealerOutcome::Stands(dealer_value))
        }
    }

    fn pay_dealer_bust<O>(
        &mut self,
        dealer_value: u32,
        observer: &mut O,
    ) -> Vec<(PlayerId, Settlement)>
    where
        O: TableObserver + ?Sized,
    {
        tracing::info!(dealer_value, "dealer went bust, paying every stake");
        for player in self.players.iter_mut() {
            player.win_stake();
        }
        observer.notify(TableEvent::DealerBust { dealer_value });
        self.players
            .iter()
            .map(|p| (p.id, Settlement::DealerBust))
            .collect()
    }

    /// Lets every player act until they stand. Returns the ids of players whose hand came to 21.
    fn player_turns<I, O>(
        &mut self,
        input: &mut I,
        observer: &mut O,
    ) -> Result<HashSet<PlayerId>, BlackjackGameError>
    where
        I: PlayerInput + ?Sized,
        O: TableObserver + ?Sized,
    {
        let mut naturals = HashSet::new();
        for player in self.players.iter_mut() {
            observer.notify(TableEvent::PlayerTurn { player });
            loop {
                match input.action(player)? {
                    PlayerAction::Stand => break,
                    PlayerAction::Hit => {
                        let card = self.dealer.deal(player)?;
                        observer.notify(TableEvent::CardDealt {
                            recipient: Recipient::Player(player.id),
                            card,
                        });
                        observer.notify(TableEvent::HandUpdated { player });
                    }
                    PlayerAction::Neither => {}
                }
            }

            if player.hand_value() == BLACKJACK {
                player.balance *= 2.5;
                tracing::info!(player = %player.id, balance = player.balance, "player hit 21");
                observer.notify(TableEvent::Blackjack { player });
                naturals.insert(player.id);
            }
        }
        Ok(naturals)
    }

    fn settle<O>(
        &mut self,
        dealer_value: u32,
        naturals: &HashSet<PlayerId>,
        observer: &mut O,
    ) -> Vec<(PlayerId, Settlement)>
    where
        O: TableObserver + ?Sized,
    {
        let mut settlements = Vec::new();
        let mut leaving = HashSet::new();

        for player in self
            .players
            .iter_mut()
            .filter(|p| !naturals.contains(&p.id))
        {
            let player_value = player.hand_value();
            if player_value > dealer_value && !is_bust(player_value) {
                player.win_stake();
                tracing::info!(player = %player.id, player_value, dealer_value, "player won");
                observer.notify(TableEvent::PlayerWon {
                    player,
                    player_value,
                    dealer_value,
                });
                settlements.push((player.id, Settlement::Won));
            } else {
                player.lose_stake();
                tracing::info!(player = %player.id, player_value, dealer_value, "player lost");
                observer.notify(TableEvent::PlayerLost {
                    player,
                    player_value,
                    dealer_value,
                });
                if player.is_broke() {
                    leaving.insert(player.id);
                    settlements.push((player.id, Settlement::Eliminated));
                } else {
                    settlements.push((player.id, Settlement::Lost));
                }
            }
        }

        if !leaving.is_empty() {
            let (gone, staying): (Vec<Player>, Vec<Player>) = std::mem::take(&mut self.players)
                .into_iter()
                .partition(|p| leaving.contains(&p.id));
            self.players = staying;
            for player in gone {
                tracing::info!(player = %player.id, "player eliminated");
                observer.notify(TableEvent::PlayerEliminated { player: &player });
                self.eliminated.push(player);
            }
        }
        settlements
    }

    /// Empties every hand at the table, the dealer's and those of players who just left included.
    pub fn clear_hands(&mut self) {
        for player in self.players.iter_mut().chain(self.eliminated.iter_mut()) {
            player.clear_hand();
        }
        self.dealer.clear_hand();
    }

    /// Returns a snapshot of the table, eliminated players included, ordered by player id.
    pub fn summary(&self) -> GameSummary {
        let mut players = self
            .players
            .iter()
            .map(|p| PlayerSummary::new(p, false))
            .chain(self.eliminated.iter().map(|p| PlayerSummary::new(p, true)))
            .collect::<Vec<_>>();
        players.sort_by_key(|p| p.id);
        GameSummary {
            rounds_played: self.rounds_played,
            cards_left: self.dealer.cards_left(),
            players,
        }
    }
}
