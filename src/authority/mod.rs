//! The move authority: the remote rules engine that decides whether a move
//! is legal. The client never checks chess rules itself.

pub mod grpc;
pub mod local;
pub mod scripted;

use serde::{Deserialize, Serialize};

use crate::board::{Cell, PlayerId};
use crate::error::AuthorityError;

pub use grpc::GrpcAuthority;
pub use local::DevAuthority;
pub use scripted::ScriptedAuthority;

pub type GameId = u32;

/// Result of `spawn_game`: the game id and the two bound identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedGame {
    pub game_id: GameId,
    pub white: PlayerId,
    pub black: PlayerId,
}

/// One candidate move as submitted to the authority. Built fresh per
/// pointer-up and dropped once the verdict is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAttempt {
    pub origin: Cell,
    pub destination: Cell,
    pub player_id: PlayerId,
    pub game_id: GameId,
}

/// Capability the client consumes. `validate_move` returns `Ok(false)` for an
/// explicitly illegal move and `Err` only when the call itself failed.
#[tonic::async_trait]
pub trait MoveAuthority: Send + Sync {
    async fn spawn_game(&self) -> Result<SpawnedGame, AuthorityError>;

    /// Validate and, if legal, apply the move on the authority's side.
    async fn validate_move(&self, attempt: &MoveAttempt) -> Result<bool, AuthorityError>;

    async fn is_in_checkmate(
        &self,
        player_id: &str,
        game_id: GameId,
    ) -> Result<bool, AuthorityError>;
}
