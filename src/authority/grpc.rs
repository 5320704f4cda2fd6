//! gRPC client for a remote move authority.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use crate::authority::{GameId, MoveAttempt, MoveAuthority, SpawnedGame};
use crate::board::Cell;
use crate::config::AuthorityConfig;
use crate::error::AuthorityError;

pub mod proto {
    tonic::include_proto!("chess.authority.v1");
}

use proto::authority_service_client::AuthorityServiceClient;
use proto::{IsInCheckmateRequest, SpawnGameRequest, ValidateMoveRequest, Vec2};

#[derive(Debug, Clone)]
pub struct GrpcAuthority {
    client: AuthorityServiceClient<Channel>,
}

impl GrpcAuthority {
    pub async fn connect(config: &AuthorityConfig) -> Result<Self, AuthorityError> {
        let mut endpoint = Endpoint::from_shared(config.endpoint.clone())?;
        if let Some(ms) = config.timeout_ms {
            endpoint = endpoint.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            endpoint = endpoint.connect_timeout(Duration::from_millis(ms));
        }
        let channel = endpoint.connect().await?;
        tracing::info!(endpoint = %config.endpoint, "connected to move authority");
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: AuthorityServiceClient::new(channel),
        }
    }
}

// --- Conversion helpers: board cells <-> protobuf ---

pub(crate) fn cell_to_proto(cell: Cell) -> Result<Vec2, AuthorityError> {
    if !cell.is_on_board() {
        return Err(AuthorityError::Protocol(format!(
            "cell {} cannot be sent to the authority",
            cell
        )));
    }
    Ok(Vec2 {
        x: cell.file as u32,
        y: cell.rank as u32,
    })
}

pub(crate) fn proto_to_cell(v: Option<&Vec2>, field: &str) -> Result<Cell, AuthorityError> {
    let v = v.ok_or_else(|| AuthorityError::Protocol(format!("{} is required", field)))?;
    let cell = Cell::new(
        i32::try_from(v.x).unwrap_or(i32::MAX),
        i32::try_from(v.y).unwrap_or(i32::MAX),
    );
    Ok(cell)
}

#[tonic::async_trait]
impl MoveAuthority for GrpcAuthority {
    async fn spawn_game(&self) -> Result<SpawnedGame, AuthorityError> {
        let mut client = self.client.clone();
        let resp = client.spawn_game(SpawnGameRequest {}).await?.into_inner();
        if resp.white_address.is_empty() || resp.black_address.is_empty() {
            return Err(AuthorityError::Protocol(
                "spawn response is missing a player address".into(),
            ));
        }
        Ok(SpawnedGame {
            game_id: resp.game_id,
            white: resp.white_address,
            black: resp.black_address,
        })
    }

    async fn validate_move(&self, attempt: &MoveAttempt) -> Result<bool, AuthorityError> {
        let request = ValidateMoveRequest {
            curr_position: Some(cell_to_proto(attempt.origin)?),
            next_position: Some(cell_to_proto(attempt.destination)?),
            caller: attempt.player_id.clone(),
            game_id: attempt.game_id,
        };
        let mut client = self.client.clone();
        let resp = client.validate_move(request).await?.into_inner();
        Ok(resp.accepted)
    }

    async fn is_in_checkmate(
        &self,
        player_id: &str,
        game_id: GameId,
    ) -> Result<bool, AuthorityError> {
        let mut client = self.client.clone();
        let resp = client
            .is_in_checkmate(IsInCheckmateRequest {
                caller: player_id.to_string(),
                game_id,
            })
            .await?
            .into_inner();
        Ok(resp.checkmate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        let v = cell_to_proto(Cell::new(3, 6)).unwrap();
        assert_eq!((v.x, v.y), (3, 6));
        assert_eq!(proto_to_cell(Some(&v), "next_position").unwrap(), Cell::new(3, 6));
        assert!(cell_to_proto(Cell::new(-1, 0)).is_err());
        assert!(matches!(
            proto_to_cell(None, "curr_position"),
            Err(AuthorityError::Protocol(_))
        ));
    }
}
