//! Game lifecycle: `Init -> Spawning -> Playing -> Ended -> Init`.

use std::sync::Arc;

use serde::Serialize;

use crate::authority::MoveAuthority;
use crate::board::{BoardGeometry, Pixel, PlayerId};
use crate::client::GameClient;
use crate::error::SessionError;
use crate::interaction::MoveOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Init,
    Spawning,
    Playing,
    Ended,
}

pub struct GameSession {
    authority: Arc<dyn MoveAuthority>,
    geometry: BoardGeometry,
    phase: Phase,
    client: Option<GameClient>,
    winner: Option<PlayerId>,
}

impl GameSession {
    pub fn new(authority: Arc<dyn MoveAuthority>, geometry: BoardGeometry) -> Self {
        Self {
            authority,
            geometry,
            phase: Phase::Init,
            client: None,
            winner: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn client(&self) -> Option<&GameClient> {
        self.client.as_ref()
    }

    /// Identity that delivered checkmate, once the game has ended.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Spawn a game on the authority and start playing it. A failed spawn
    /// returns the session to `Init`.
    pub async fn start(&mut self) -> Result<&mut GameClient, SessionError> {
        if self.phase == Phase::Playing || self.phase == Phase::Spawning {
            return Err(SessionError::AlreadyPlaying);
        }
        self.phase = Phase::Spawning;
        self.winner = None;
        self.client = None;

        let game = match self.authority.spawn_game().await {
            Ok(game) => game,
            Err(e) => {
                tracing::error!(error = %e, "error spawning board");
                self.phase = Phase::Init;
                return Err(SessionError::Spawn(e));
            }
        };
        tracing::info!(
            game_id = game.game_id,
            white = %game.white,
            black = %game.black,
            "game started"
        );

        self.phase = Phase::Playing;
        Ok(self
            .client
            .insert(GameClient::new(Arc::clone(&self.authority), self.geometry, &game)))
    }

    fn playing(&mut self) -> Result<&mut GameClient, SessionError> {
        match (self.phase, self.client.as_mut()) {
            (Phase::Playing, Some(client)) => Ok(client),
            (phase, _) => Err(SessionError::NotPlaying(phase)),
        }
    }

    pub fn grab(&mut self, pointer: Pixel) -> Result<bool, SessionError> {
        Ok(self.playing()?.on_grab(pointer))
    }

    pub fn drag_move(&mut self, pointer: Pixel) -> Result<Option<Pixel>, SessionError> {
        Ok(self.playing()?.on_drag_move(pointer))
    }

    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.playing()?.cancel();
        Ok(())
    }

    /// Pointer-up; ends the game when the move delivers checkmate.
    pub async fn release(&mut self, pointer: Pixel) -> Result<Option<MoveOutcome>, SessionError> {
        let client = self.playing()?;
        let outcome = client.on_release(pointer).await?;
        if let Some(MoveOutcome::Accepted(accepted)) = &outcome {
            if accepted.checkmate {
                let winner = client.turns().opponent().to_string();
                tracing::info!(game_id = client.game_id(), %winner, "checkmate, game over");
                self.winner = Some(winner);
                self.phase = Phase::Ended;
            }
        }
        Ok(outcome)
    }

    /// "Play one more time": drop the finished game and go back to `Init`.
    pub fn reset(&mut self) {
        self.client = None;
        self.winner = None;
        self.phase = Phase::Init;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{DevAuthority, GameId, MoveAttempt, SpawnedGame};
    use crate::board::Cell;
    use crate::error::AuthorityError;

    struct Unreachable;

    #[tonic::async_trait]
    impl MoveAuthority for Unreachable {
        async fn spawn_game(&self) -> Result<SpawnedGame, AuthorityError> {
            Err(AuthorityError::Transport("connection refused".into()))
        }

        async fn validate_move(&self, _attempt: &MoveAttempt) -> Result<bool, AuthorityError> {
            Err(AuthorityError::Transport("connection refused".into()))
        }

        async fn is_in_checkmate(&self, _p: &str, _g: GameId) -> Result<bool, AuthorityError> {
            Err(AuthorityError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_spawn_failure_halts_start() {
        let mut session = GameSession::new(Arc::new(Unreachable), BoardGeometry::default());
        let err = session.start().await.err().unwrap();
        assert!(matches!(err, SessionError::Spawn(_)));
        assert_eq!(session.phase(), Phase::Init);
        assert!(session.client().is_none());
        assert!(matches!(
            session.grab(Pixel::new(50.0, 50.0)),
            Err(SessionError::NotPlaying(Phase::Init))
        ));
    }

    #[tokio::test]
    async fn test_checkmate_ends_game_and_reset() {
        let geometry = BoardGeometry::default();
        let mut session = GameSession::new(Arc::new(DevAuthority::new(5)), geometry);
        let white = session.start().await.unwrap().current_player().to_string();
        assert_eq!(session.phase(), Phase::Playing);
        assert!(matches!(session.start().await, Err(SessionError::AlreadyPlaying)));

        // queen e1 takes the king on d8; the dev authority calls that mate
        assert!(session.grab(geometry.cell_center(Cell::new(4, 0))).unwrap());
        let outcome = session
            .release(geometry.cell_center(Cell::new(3, 7)))
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(session.winner(), Some(white.as_str()));

        session.reset();
        assert_eq!(session.phase(), Phase::Init);
        session.start().await.unwrap();
        assert_eq!(session.client().unwrap().game_id(), 2);
    }
}
