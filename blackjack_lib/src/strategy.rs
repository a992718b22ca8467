//! Where stakes and playing decisions come from. The table never reads input itself, it asks a
//! `PlayerInput` and trusts the answer.

use crate::participant::{Participant, Player};
use crate::scoring::DEALER_STANDS_ON;
use crate::BlackjackGameError;

/// The options a player has once the cards are out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Stop drawing, the hand is final.
    Stand,
    /// Take another card.
    Hit,
    /// Do nothing and be asked again.
    Neither,
}

/// Trait for anything that can make decisions on behalf of a player.
pub trait PlayerInput {
    /// Returns the stake `player` puts on the next round. Implementers must only return amounts in
    /// `[0, player.balance]`.
    fn stake(&mut self, player: &Player) -> Result<f64, BlackjackGameError>;

    /// Returns the next action for `player`'s current hand.
    fn action(&mut self, player: &Player) -> Result<PlayerAction, BlackjackGameError>;
}

/// A non-interactive player that plays the dealer's own rule: hit below `stand_on`, otherwise stand.
/// Stakes a fixed amount each round, or the whole balance if it has less than that left.
#[derive(Debug, Clone, Copy)]
pub struct HouseStrategy {
    stake: f64,
    stand_on: u32,
}

impl HouseStrategy {
    pub fn new(stake: f64, stand_on: u32) -> HouseStrategy {
        HouseStrategy { stake, stand_on }
    }
}

impl Default for HouseStrategy {
    fn default() -> Self {
        HouseStrategy::new(10.0, DEALER_STANDS_ON)
    }
}

impl PlayerInput for HouseStrategy {
    fn stake(&mut self, player: &Player) -> Result<f64, BlackjackGameError> {
        Ok(self.stake.max(0.0).min(player.balance))
    }

    fn action(&mut self, player: &Player) -> Result<PlayerAction, BlackjackGameError> {
        if player.hand_value() < self.stand_on {
            Ok(PlayerAction::Hit)
        } else {
            Ok(PlayerAction::Stand)
        }
    }
}
