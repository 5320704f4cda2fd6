//! Facade handed to the presentation layer: pointer handlers in, board,
//! sprite positions and acting identity out.
//!
//! Gesture mistakes and authority verdicts are absorbed here. The only error
//! that escapes is `BoardError`, which means the client's own bookkeeping is
//! broken.

use std::sync::Arc;

use crate::authority::{GameId, MoveAuthority, SpawnedGame};
use crate::board::{BoardGeometry, BoardState, Pixel, TurnTracker};
use crate::error::BoardError;
use crate::interaction::{
    DragController, DragSession, MoveCoordinator, MoveOutcome, PendingMove, PieceLayer, Verdict,
};

pub struct GameClient {
    authority: Arc<dyn MoveAuthority>,
    coordinator: MoveCoordinator,
    drag: DragController,
    layer: PieceLayer,
}

impl GameClient {
    /// Client for a freshly spawned game in the opening position.
    pub fn new(
        authority: Arc<dyn MoveAuthority>,
        geometry: BoardGeometry,
        game: &SpawnedGame,
    ) -> Self {
        Self::with_board(authority, geometry, game, BoardState::standard())
    }

    pub fn with_board(
        authority: Arc<dyn MoveAuthority>,
        geometry: BoardGeometry,
        game: &SpawnedGame,
        board: BoardState,
    ) -> Self {
        let layer = PieceLayer::from_board(&board, &geometry);
        Self {
            authority,
            coordinator: MoveCoordinator::new(game, geometry, board),
            drag: DragController::new(),
            layer,
        }
    }

    pub fn board(&self) -> &BoardState {
        self.coordinator.board()
    }

    pub fn turns(&self) -> &TurnTracker {
        self.coordinator.turns()
    }

    /// Identity whose move it is, for the turn indicator.
    pub fn current_player(&self) -> &str {
        self.coordinator.turns().current()
    }

    pub fn game_id(&self) -> GameId {
        self.coordinator.game_id()
    }

    pub fn geometry(&self) -> &BoardGeometry {
        self.coordinator.geometry()
    }

    pub fn layer(&self) -> &PieceLayer {
        &self.layer
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Pointer-down. Returns whether a drag started.
    pub fn on_grab(&mut self, pointer: Pixel) -> bool {
        let geometry = *self.coordinator.geometry();
        match self
            .drag
            .on_grab(pointer, &geometry, self.coordinator.board(), &mut self.layer)
        {
            Ok(session) => {
                tracing::debug!(piece = %session.piece, origin = %session.origin, "grabbed piece");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignored pointer-down");
                false
            }
        }
    }

    /// Pointer-move. Returns the sprite's new top-left if a drag is active.
    pub fn on_drag_move(&mut self, pointer: Pixel) -> Option<Pixel> {
        let geometry = *self.coordinator.geometry();
        self.drag.on_drag_move(pointer, &geometry, &mut self.layer).ok()
    }

    /// Pointer-up. Runs the full move attempt against the authority.
    /// `Ok(None)` means there was no drag to release.
    pub async fn on_release(&mut self, pointer: Pixel) -> Result<Option<MoveOutcome>, BoardError> {
        let Some(pending) = self.release(pointer) else {
            return Ok(None);
        };
        let authority = Arc::clone(&self.authority);
        let verdict = MoveCoordinator::consult(authority.as_ref(), &pending).await;
        let mut outcome = self.complete(pending, verdict)?;
        if let MoveOutcome::Accepted(accepted) = &mut outcome {
            accepted.checkmate = self.coordinator.check_for_mate(authority.as_ref()).await;
        }
        Ok(Some(outcome))
    }

    /// Pointer-up without awaiting the authority: ends the drag and returns
    /// the attempt for the caller to consult and later [`complete`](Self::complete).
    pub fn release(&mut self, pointer: Pixel) -> Option<PendingMove> {
        match self.drag.on_release(pointer) {
            Ok(release) => Some(self.coordinator.begin(release)),
            Err(e) => {
                tracing::debug!(error = %e, "ignored pointer-up");
                None
            }
        }
    }

    pub fn complete(
        &mut self,
        pending: PendingMove,
        verdict: Verdict,
    ) -> Result<MoveOutcome, BoardError> {
        self.coordinator.complete(pending, verdict, &mut self.layer)
    }

    /// Abort an active drag (pointer-cancel, focus loss).
    pub fn cancel(&mut self) {
        if let Some(session) = self.drag.cancel() {
            self.coordinator.restore_sprite(&mut self.layer, session.piece);
            tracing::debug!(piece = %session.piece, "drag cancelled");
        }
    }
}
