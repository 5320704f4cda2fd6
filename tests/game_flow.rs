//! End-to-end move flows through the client facade and session, with a
//! scripted authority standing in for the remote one.
//!
//! Run with:
//!     cargo test --test game_flow

use std::sync::Arc;

use chess_client::authority::{ScriptedAuthority, SpawnedGame};
use chess_client::board::{BoardGeometry, BoardState, Cell, Piece, PieceId, PieceKind, Pixel, Side};
use chess_client::client::GameClient;
use chess_client::error::AuthorityError;
use chess_client::interaction::{MoveOutcome, RejectReason, Verdict};
use chess_client::session::{GameSession, Phase};

const PLAYER_A: &str = "0xaaaa";
const PLAYER_B: &str = "0xbbbb";

fn game() -> SpawnedGame {
    SpawnedGame {
        game_id: 4,
        white: PLAYER_A.into(),
        black: PLAYER_B.into(),
    }
}

fn setup(fallback: bool) -> (GameClient, Arc<ScriptedAuthority>) {
    let authority = Arc::new(ScriptedAuthority::new(game(), fallback));
    let client = GameClient::new(authority.clone(), BoardGeometry::default(), &game());
    (client, authority)
}

fn center(client: &GameClient, file: i32, rank: i32) -> Pixel {
    client.geometry().cell_center(Cell::new(file, rank))
}

async fn drag(client: &mut GameClient, from: (i32, i32), to: (i32, i32)) -> Option<MoveOutcome> {
    let start = center(client, from.0, from.1);
    let end = center(client, to.0, to.1);
    assert!(client.on_grab(start), "nothing to grab at {:?}", from);
    client.on_drag_move(end);
    client.on_release(end).await.unwrap()
}

#[tokio::test]
async fn accepted_move_relocates_piece_and_passes_turn() {
    let (mut client, authority) = setup(true);
    let pawn = client.board().piece_at(Cell::new(3, 1)).unwrap().id;

    let outcome = drag(&mut client, (3, 1), (3, 3)).await.unwrap();

    let MoveOutcome::Accepted(accepted) = outcome else {
        panic!("expected acceptance, got {:?}", outcome);
    };
    assert_eq!(accepted.piece, pawn);
    assert_eq!(accepted.captured, None);
    assert_eq!(accepted.next_player, PLAYER_B);
    assert_eq!(client.current_player(), PLAYER_B);
    assert!(client.board().piece_at(Cell::new(3, 1)).is_none());
    assert_eq!(client.board().piece_at(Cell::new(3, 3)).unwrap().id, pawn);
    assert!(client.layer().is_docked(client.board(), client.geometry()));

    let attempts = authority.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].origin, Cell::new(3, 1));
    assert_eq!(attempts[0].destination, Cell::new(3, 3));
    assert_eq!(attempts[0].player_id, PLAYER_A);
    assert_eq!(attempts[0].game_id, 4);
}

#[tokio::test]
async fn illegal_move_keeps_board_and_turn() {
    let (mut client, authority) = setup(true);
    drag(&mut client, (3, 1), (3, 3)).await.unwrap();

    authority.push_verdict(Ok(false));
    let before = client.board().clone();
    let outcome = drag(&mut client, (4, 6), (4, 2)).await.unwrap();

    assert!(matches!(
        outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::Illegal,
            origin,
            ..
        } if origin == Cell::new(4, 6)
    ));
    assert_eq!(client.board(), &before);
    assert_eq!(client.current_player(), PLAYER_B);
    assert_eq!(authority.attempts()[1].player_id, PLAYER_B);
    assert!(client.layer().is_docked(client.board(), client.geometry()));
}

#[tokio::test]
async fn drop_outside_board_never_reaches_authority() {
    let (mut client, authority) = setup(true);
    let before = client.board().clone();

    assert!(client.on_grab(center(&client, 0, 1)));
    let outcome = client
        .on_release(Pixel::new(-40.0, 650.0))
        .await
        .unwrap()
        .unwrap();

    assert!(matches!(
        outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::OffBoard,
            ..
        }
    ));
    assert_eq!(client.board(), &before);
    assert_eq!(client.current_player(), PLAYER_A);
    assert!(authority.attempts().is_empty());
}

#[tokio::test]
async fn capture_removes_one_piece() {
    let pieces = [
        Piece::new(PieceId(0), PieceKind::Rook, Side::White, Cell::new(0, 0)),
        Piece::new(PieceId(1), PieceKind::King, Side::White, Cell::new(4, 0)),
        Piece::new(PieceId(2), PieceKind::Pawn, Side::Black, Cell::new(0, 4)),
        Piece::new(PieceId(3), PieceKind::King, Side::Black, Cell::new(4, 7)),
    ];
    let board = BoardState::new(pieces).unwrap();
    let authority = Arc::new(ScriptedAuthority::new(game(), true));
    let mut client =
        GameClient::with_board(authority.clone(), BoardGeometry::default(), &game(), board);

    let outcome = drag(&mut client, (0, 0), (0, 4)).await.unwrap();

    let MoveOutcome::Accepted(accepted) = outcome else {
        panic!("expected acceptance, got {:?}", outcome);
    };
    assert_eq!(accepted.captured.map(|p| p.id), Some(PieceId(2)));
    assert_eq!(client.board().len(), 3);
    assert_eq!(client.layer().len(), 3);
    assert!(client.layer().position(PieceId(2)).is_none());
    assert_eq!(client.board().piece_at(Cell::new(0, 4)).unwrap().id, PieceId(0));
}

#[tokio::test]
async fn transport_failure_snaps_back() {
    let (mut client, authority) = setup(true);
    authority.push_verdict(Err(AuthorityError::Transport("deadline exceeded".into())));
    let before = client.board().clone();

    let outcome = drag(&mut client, (6, 0), (5, 2)).await.unwrap();

    assert!(matches!(
        outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::Transport(_),
            ..
        }
    ));
    assert_eq!(client.board(), &before);
    assert_eq!(client.current_player(), PLAYER_A);
    assert!(client.layer().is_docked(client.board(), client.geometry()));
}

#[tokio::test]
async fn verdict_for_outdated_board_is_discarded() {
    let (mut client, _authority) = setup(true);

    assert!(client.on_grab(center(&client, 3, 1)));
    let first = client.release(center(&client, 3, 3)).unwrap();
    assert!(client.on_grab(center(&client, 4, 1)));
    let second = client.release(center(&client, 4, 3)).unwrap();

    let outcome = client.complete(second, Verdict::Accepted).unwrap();
    assert!(outcome.is_accepted());
    let after_second = client.board().clone();

    let outcome = client.complete(first, Verdict::Accepted).unwrap();
    assert!(matches!(
        outcome,
        MoveOutcome::Rejected {
            reason: RejectReason::Stale,
            ..
        }
    ));
    assert_eq!(client.board(), &after_second);
    assert_eq!(client.current_player(), PLAYER_B);
    assert!(client.layer().is_docked(client.board(), client.geometry()));
}

#[tokio::test]
async fn session_ends_on_checkmate() {
    let authority = Arc::new(ScriptedAuthority::new(game(), true));
    authority.push_checkmate(false);
    authority.push_checkmate(true);
    let geometry = BoardGeometry::default();
    let mut session = GameSession::new(authority.clone(), geometry);
    session.start().await.unwrap();

    for (from, to) in [((5, 1), (5, 2)), ((4, 6), (4, 4))] {
        assert!(session.grab(geometry.cell_center(Cell::new(from.0, from.1))).unwrap());
        let outcome = session
            .release(geometry.cell_center(Cell::new(to.0, to.1)))
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.is_accepted());
    }

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.winner(), Some(PLAYER_B));
    assert!(session.grab(geometry.cell_center(Cell::new(6, 1))).is_err());
}
