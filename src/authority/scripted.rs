//! Authority that answers from a queue of canned verdicts. Used by tests and
//! offline demos; it keeps no board of its own.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::authority::{GameId, MoveAttempt, MoveAuthority, SpawnedGame};
use crate::error::AuthorityError;

pub struct ScriptedAuthority {
    game: SpawnedGame,
    verdicts: Mutex<VecDeque<Result<bool, AuthorityError>>>,
    checkmates: Mutex<VecDeque<bool>>,
    attempts: Mutex<Vec<MoveAttempt>>,
    fallback: bool,
}

impl ScriptedAuthority {
    /// Spawns `game`; any move beyond the queued verdicts gets `fallback`.
    pub fn new(game: SpawnedGame, fallback: bool) -> Self {
        Self {
            game,
            verdicts: Mutex::new(VecDeque::new()),
            checkmates: Mutex::new(VecDeque::new()),
            attempts: Mutex::new(Vec::new()),
            fallback,
        }
    }

    pub fn push_verdict(&self, verdict: Result<bool, AuthorityError>) {
        if let Ok(mut verdicts) = self.verdicts.lock() {
            verdicts.push_back(verdict);
        }
    }

    /// Queue the answer to the next `is_in_checkmate` call (default `false`).
    pub fn push_checkmate(&self, checkmate: bool) {
        if let Ok(mut checkmates) = self.checkmates.lock() {
            checkmates.push_back(checkmate);
        }
    }

    /// Every attempt received so far, in call order.
    pub fn attempts(&self) -> Vec<MoveAttempt> {
        self.attempts
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

#[tonic::async_trait]
impl MoveAuthority for ScriptedAuthority {
    async fn spawn_game(&self) -> Result<SpawnedGame, AuthorityError> {
        Ok(self.game.clone())
    }

    async fn validate_move(&self, attempt: &MoveAttempt) -> Result<bool, AuthorityError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push(attempt.clone());
        }
        self.verdicts
            .lock()
            .ok()
            .and_then(|mut v| v.pop_front())
            .unwrap_or(Ok(self.fallback))
    }

    async fn is_in_checkmate(
        &self,
        _player_id: &str,
        game_id: GameId,
    ) -> Result<bool, AuthorityError> {
        if game_id != self.game.game_id {
            return Err(AuthorityError::UnknownGame(game_id));
        }
        Ok(self
            .checkmates
            .lock()
            .ok()
            .and_then(|mut c| c.pop_front())
            .unwrap_or(false))
    }
}
