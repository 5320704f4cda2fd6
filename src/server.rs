//! gRPC server implementation for AuthorityService.
//!
//! Exposes any [`MoveAuthority`] over the wire; the `dev_authority` binary
//! serves a [`DevAuthority`](crate::authority::DevAuthority) with it.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::authority::grpc::proto;
use crate::authority::grpc::{cell_to_proto, proto_to_cell};
use crate::authority::{MoveAttempt, MoveAuthority};
use crate::error::AuthorityError;

use proto::authority_service_server::AuthorityService;
use proto::*;

pub use proto::authority_service_server::AuthorityServiceServer;

/// The gRPC service implementation.
pub struct AuthorityServer {
    authority: Arc<dyn MoveAuthority>,
}

impl AuthorityServer {
    pub fn new(authority: Arc<dyn MoveAuthority>) -> Self {
        Self { authority }
    }
}

fn to_status(err: AuthorityError) -> Status {
    match err {
        AuthorityError::UnknownGame(id) => Status::not_found(format!("unknown game_id: {}", id)),
        AuthorityError::Protocol(msg) => Status::invalid_argument(msg),
        AuthorityError::Transport(msg) => Status::unavailable(msg),
    }
}

fn proto_to_attempt(req: &ValidateMoveRequest) -> Result<MoveAttempt, Status> {
    let origin = proto_to_cell(req.curr_position.as_ref(), "curr_position").map_err(to_status)?;
    let destination =
        proto_to_cell(req.next_position.as_ref(), "next_position").map_err(to_status)?;
    // both cells must lie on the board
    cell_to_proto(origin).map_err(to_status)?;
    cell_to_proto(destination).map_err(to_status)?;
    if req.caller.is_empty() {
        return Err(Status::invalid_argument("caller is required"));
    }
    Ok(MoveAttempt {
        origin,
        destination,
        player_id: req.caller.clone(),
        game_id: req.game_id,
    })
}

#[tonic::async_trait]
impl AuthorityService for AuthorityServer {
    // --- SpawnGame ---
    async fn spawn_game(
        &self,
        _request: Request<SpawnGameRequest>,
    ) -> Result<Response<SpawnGameResponse>, Status> {
        let game = self.authority.spawn_game().await.map_err(to_status)?;
        Ok(Response::new(SpawnGameResponse {
            game_id: game.game_id,
            white_address: game.white,
            black_address: game.black,
        }))
    }

    // --- ValidateMove ---
    async fn validate_move(
        &self,
        request: Request<ValidateMoveRequest>,
    ) -> Result<Response<ValidateMoveResponse>, Status> {
        let req = request.into_inner();
        let attempt = proto_to_attempt(&req)?;
        let accepted = self
            .authority
            .validate_move(&attempt)
            .await
            .map_err(to_status)?;
        tracing::debug!(
            game_id = attempt.game_id,
            origin = %attempt.origin,
            destination = %attempt.destination,
            accepted,
            "validated move"
        );
        Ok(Response::new(ValidateMoveResponse { accepted }))
    }

    // --- IsInCheckmate ---
    async fn is_in_checkmate(
        &self,
        request: Request<IsInCheckmateRequest>,
    ) -> Result<Response<IsInCheckmateResponse>, Status> {
        let req = request.into_inner();
        let checkmate = self
            .authority
            .is_in_checkmate(&req.caller, req.game_id)
            .await
            .map_err(to_status)?;
        Ok(Response::new(IsInCheckmateResponse { checkmate }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::DevAuthority;

    fn server() -> AuthorityServer {
        AuthorityServer::new(Arc::new(DevAuthority::new(11)))
    }

    #[tokio::test]
    async fn test_validate_requires_positions() {
        let server = server();
        let status = server
            .validate_move(Request::new(ValidateMoveRequest {
                curr_position: None,
                next_position: Some(Vec2 { x: 4, y: 3 }),
                caller: "0x1".into(),
                game_id: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_validate_rejects_off_board_vec() {
        let server = server();
        let status = server
            .validate_move(Request::new(ValidateMoveRequest {
                curr_position: Some(Vec2 { x: 4, y: 1 }),
                next_position: Some(Vec2 { x: 4, y: 8 }),
                caller: "0x1".into(),
                game_id: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_spawn_then_move() {
        let server = server();
        let game = server
            .spawn_game(Request::new(SpawnGameRequest {}))
            .await
            .unwrap()
            .into_inner();
        let resp = server
            .validate_move(Request::new(ValidateMoveRequest {
                curr_position: Some(Vec2 { x: 4, y: 1 }),
                next_position: Some(Vec2 { x: 4, y: 3 }),
                caller: game.white_address.clone(),
                game_id: game.game_id,
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(resp.accepted);

        let status = server
            .is_in_checkmate(Request::new(IsInCheckmateRequest {
                caller: game.black_address,
                game_id: 77,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }
}
