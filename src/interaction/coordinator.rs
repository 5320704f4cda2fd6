//! Move coordinator: submits a released drag to the authority and reconciles
//! the board with its verdict.
//!
//! An attempt runs in three steps so event loops can keep the authority call
//! off the critical path:
//!
//! 1. [`MoveCoordinator::begin`] builds a [`PendingMove`] stamped with the
//!    board revision the drag started from.
//! 2. [`MoveCoordinator::consult`] asks the authority. This is the only
//!    suspension point; it borrows nothing from the coordinator.
//! 3. [`MoveCoordinator::complete`] applies the verdict. Verdicts are applied
//!    in the order they complete. One whose revision no longer matches the
//!    board is stale and is discarded like a rejection.
//!
//! [`MoveCoordinator::attempt_move`] runs all three back to back.

use crate::authority::{GameId, MoveAttempt, MoveAuthority, SpawnedGame};
use crate::board::{BoardGeometry, BoardState, Cell, Piece, PieceId, PlayerId, TurnTracker};
use crate::error::{AuthorityError, BoardError};
use crate::interaction::drag::{snap_back, Release};
use crate::interaction::visuals::PieceLayer;

/// A move attempt waiting for its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    attempt: MoveAttempt,
    piece: PieceId,
    revision: u64,
}

impl PendingMove {
    pub fn attempt(&self) -> &MoveAttempt {
        &self.attempt
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_off_board(&self) -> bool {
        !self.attempt.origin.is_on_board() || !self.attempt.destination.is_on_board()
    }
}

/// The authority's answer, or why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected,
    /// Destination off the board; decided locally without a call.
    OffBoard,
    Failed(AuthorityError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedMove {
    pub piece: PieceId,
    pub origin: Cell,
    pub destination: Cell,
    pub captured: Option<Piece>,
    /// Identity to act next.
    pub next_player: PlayerId,
    /// Set when the authority reports the next player checkmated.
    pub checkmate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    Illegal,
    OffBoard,
    /// The board changed while the verdict was in flight.
    Stale,
    Transport(AuthorityError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Accepted(AcceptedMove),
    Rejected {
        piece: PieceId,
        origin: Cell,
        reason: RejectReason,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }
}

/// Sole writer of the board store and the turn tracker.
#[derive(Debug, Clone)]
pub struct MoveCoordinator {
    game_id: GameId,
    geometry: BoardGeometry,
    board: BoardState,
    turns: TurnTracker,
}

impl MoveCoordinator {
    pub fn new(game: &SpawnedGame, geometry: BoardGeometry, board: BoardState) -> Self {
        Self {
            game_id: game.game_id,
            geometry,
            board,
            turns: TurnTracker::new(game.white.clone(), game.black.clone()),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn turns(&self) -> &TurnTracker {
        &self.turns
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Build the attempt for a released drag. The destination is whatever
    /// cell the pointer maps to, on the board or not.
    pub fn begin(&self, release: Release) -> PendingMove {
        let destination = self.geometry.pixel_to_cell(release.pointer);
        PendingMove {
            attempt: MoveAttempt {
                origin: release.origin,
                destination,
                player_id: self.turns.current().to_string(),
                game_id: self.game_id,
            },
            piece: release.piece,
            revision: release.revision,
        }
    }

    /// Ask the authority. Off-board attempts never leave the client.
    pub async fn consult(authority: &dyn MoveAuthority, pending: &PendingMove) -> Verdict {
        if pending.is_off_board() {
            return Verdict::OffBoard;
        }
        match authority.validate_move(&pending.attempt).await {
            Ok(true) => Verdict::Accepted,
            Ok(false) => Verdict::Rejected,
            Err(e) => Verdict::Failed(e),
        }
    }

    /// Apply a verdict. Anything but a fresh acceptance leaves the board and
    /// turn untouched and snaps the sprite back.
    pub fn complete(
        &mut self,
        pending: PendingMove,
        verdict: Verdict,
        layer: &mut PieceLayer,
    ) -> Result<MoveOutcome, BoardError> {
        let PendingMove {
            attempt,
            piece,
            revision,
        } = pending;

        let reason = if revision != self.board.revision() {
            tracing::info!(
                piece = %piece,
                issued = revision,
                current = self.board.revision(),
                "discarding stale verdict"
            );
            RejectReason::Stale
        } else {
            match verdict {
                Verdict::Accepted => return self.commit(attempt, piece, layer),
                Verdict::Rejected => {
                    tracing::info!(
                        game_id = attempt.game_id,
                        player = %attempt.player_id,
                        origin = %attempt.origin,
                        destination = %attempt.destination,
                        "authority rejected move"
                    );
                    RejectReason::Illegal
                }
                Verdict::OffBoard => {
                    tracing::debug!(destination = %attempt.destination, "dropped off the board");
                    RejectReason::OffBoard
                }
                Verdict::Failed(e) => {
                    tracing::warn!(
                        game_id = attempt.game_id,
                        origin = %attempt.origin,
                        destination = %attempt.destination,
                        error = %e,
                        "authority call failed, reverting move"
                    );
                    RejectReason::Transport(e)
                }
            }
        };

        self.restore_sprite(layer, piece);
        Ok(MoveOutcome::Rejected {
            piece,
            origin: attempt.origin,
            reason,
        })
    }

    fn commit(
        &mut self,
        attempt: MoveAttempt,
        piece: PieceId,
        layer: &mut PieceLayer,
    ) -> Result<MoveOutcome, BoardError> {
        let captured = match self.board.apply_move(attempt.origin, attempt.destination) {
            Ok(captured) => captured,
            Err(e) => {
                tracing::error!(
                    piece = %piece,
                    origin = %attempt.origin,
                    destination = %attempt.destination,
                    error = %e,
                    "accepted move does not match board state"
                );
                self.restore_sprite(layer, piece);
                return Err(e);
            }
        };

        layer.dock(piece, attempt.destination, &self.geometry);
        if let Some(victim) = &captured {
            layer.remove(victim.id);
        }
        self.turns.advance();

        tracing::info!(
            game_id = attempt.game_id,
            player = %attempt.player_id,
            origin = %attempt.origin,
            destination = %attempt.destination,
            captured = captured.is_some(),
            "move accepted"
        );

        Ok(MoveOutcome::Accepted(AcceptedMove {
            piece,
            origin: attempt.origin,
            destination: attempt.destination,
            captured,
            next_player: self.turns.current().to_string(),
            checkmate: false,
        }))
    }

    /// Put a sprite back on the cell its piece occupies now, or drop it if
    /// the piece has been captured meanwhile.
    pub fn restore_sprite(&self, layer: &mut PieceLayer, piece: PieceId) {
        match self.board.cell_of(piece) {
            Some(cell) => snap_back(layer, piece, cell, &self.geometry),
            None => {
                layer.remove(piece);
            }
        }
    }

    /// Ask whether the identity now to move has been checkmated. A failed
    /// query counts as "no".
    pub async fn check_for_mate(&self, authority: &dyn MoveAuthority) -> bool {
        match authority
            .is_in_checkmate(self.turns.current(), self.game_id)
            .await
        {
            Ok(mate) => mate,
            Err(e) => {
                tracing::warn!(game_id = self.game_id, error = %e, "checkmate query failed");
                false
            }
        }
    }

    /// Begin, consult and complete in one go; on acceptance also check for mate.
    pub async fn attempt_move(
        &mut self,
        authority: &dyn MoveAuthority,
        layer: &mut PieceLayer,
        release: Release,
    ) -> Result<MoveOutcome, BoardError> {
        let pending = self.begin(release);
        let verdict = Self::consult(authority, &pending).await;
        let mut outcome = self.complete(pending, verdict, layer)?;
        if let MoveOutcome::Accepted(accepted) = &mut outcome {
            accepted.checkmate = self.check_for_mate(authority).await;
        }
        Ok(outcome)
    }
}
