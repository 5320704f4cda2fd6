//! Whose turn it is.

use serde::{Deserialize, Serialize};

use crate::board::piece::Side;

/// Identity of an acting player as the authority knows it (an account address).
pub type PlayerId = String;

/// The two identities bound at game start. The first one plays white and
/// moves first; after that only the index of the acting identity changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTracker {
    players: [PlayerId; 2],
    current: usize,
}

impl TurnTracker {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self {
            players: [first, second],
            current: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.players[self.current]
    }

    pub fn opponent(&self) -> &str {
        &self.players[1 - self.current]
    }

    pub fn current_side(&self) -> Side {
        Self::side_at(self.current)
    }

    pub fn advance(&mut self) {
        self.current = 1 - self.current;
    }

    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        self.players
            .iter()
            .position(|p| p == player_id)
            .map(Self::side_at)
    }

    fn side_at(index: usize) -> Side {
        if index == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}
