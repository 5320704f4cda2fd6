//! Drag controller: `Idle -> Dragging -> Idle`.
//!
//! The first grab wins; a second pointer-down during a drag is ignored. The
//! controller only moves sprites in the [`PieceLayer`] and never writes to the
//! board store.

use crate::board::{BoardGeometry, BoardState, Cell, PieceId, Pixel};
use crate::error::GestureError;
use crate::interaction::visuals::PieceLayer;

/// State of one grab-to-release gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub piece: PieceId,
    pub origin: Cell,
    /// Current sprite top-left.
    pub position: Pixel,
    /// Board revision when the piece was grabbed.
    pub revision: u64,
}

/// What a finished drag hands to the move coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub piece: PieceId,
    pub origin: Cell,
    pub pointer: Pixel,
    pub revision: u64,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer-down. Starts a session if the pointer is over a piece and no
    /// session is active; the piece then floats centered under the cursor.
    pub fn on_grab(
        &mut self,
        pointer: Pixel,
        geometry: &BoardGeometry,
        board: &BoardState,
        layer: &mut PieceLayer,
    ) -> Result<DragSession, GestureError> {
        if let Some(active) = &self.session {
            return Err(GestureError::AlreadyDragging {
                origin: active.origin,
            });
        }
        let origin = geometry.pixel_to_cell(pointer);
        let piece = board
            .piece_at(origin)
            .ok_or(GestureError::NotOnPiece(origin))?;

        let position = centered_under(pointer, geometry);
        layer.float(piece.id, position);
        let session = DragSession {
            piece: piece.id,
            origin,
            position,
            revision: board.revision(),
        };
        self.session = Some(session);
        Ok(session)
    }

    /// Pointer-move. Follows the cursor, clamped so the sprite stays on the board.
    pub fn on_drag_move(
        &mut self,
        pointer: Pixel,
        geometry: &BoardGeometry,
        layer: &mut PieceLayer,
    ) -> Result<Pixel, GestureError> {
        let session = self.session.as_mut().ok_or(GestureError::NoSession)?;
        let position = geometry.clamp_sprite(centered_under(pointer, geometry));
        session.position = position;
        layer.float(session.piece, position);
        Ok(position)
    }

    /// Pointer-up. Ends the session whatever happens next; the caller submits
    /// the returned release to the move coordinator even if the pointer is
    /// off the board.
    pub fn on_release(&mut self, pointer: Pixel) -> Result<Release, GestureError> {
        let session = self.session.take().ok_or(GestureError::NoSession)?;
        Ok(Release {
            piece: session.piece,
            origin: session.origin,
            pointer,
            revision: session.revision,
        })
    }

    /// Abort the gesture without a move attempt. The sprite stays where it
    /// floated; the caller puts it back on the piece's current cell.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

/// Restore a sprite to the top-left pixel of its origin cell.
pub fn snap_back(layer: &mut PieceLayer, piece: PieceId, origin: Cell, geometry: &BoardGeometry) {
    layer.dock(piece, origin, geometry);
}

fn centered_under(pointer: Pixel, geometry: &BoardGeometry) -> Pixel {
    let half = geometry.cell_size / 2.0;
    Pixel::new(pointer.x - half, pointer.y - half)
}
