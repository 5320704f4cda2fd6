//! Presentation-side sprite positions.
//!
//! The board store says which cell a piece logically occupies; the piece
//! layer says where its sprite is drawn. The two only diverge while a piece
//! is being dragged or is waiting for the authority's verdict.

use std::collections::BTreeMap;

use crate::board::{BoardGeometry, BoardState, Cell, PieceId, Pixel};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceLayer {
    positions: BTreeMap<PieceId, Pixel>,
}

impl PieceLayer {
    /// Dock every piece at the top-left pixel of its cell.
    pub fn from_board(board: &BoardState, geometry: &BoardGeometry) -> Self {
        Self {
            positions: board
                .pieces()
                .map(|p| (p.id, geometry.cell_to_pixel(p.cell)))
                .collect(),
        }
    }

    pub fn position(&self, piece: PieceId) -> Option<Pixel> {
        self.positions.get(&piece).copied()
    }

    /// Free-floating placement during a drag.
    pub fn float(&mut self, piece: PieceId, top_left: Pixel) {
        self.positions.insert(piece, top_left);
    }

    pub fn dock(&mut self, piece: PieceId, cell: Cell, geometry: &BoardGeometry) {
        self.positions.insert(piece, geometry.cell_to_pixel(cell));
    }

    pub fn remove(&mut self, piece: PieceId) -> Option<Pixel> {
        self.positions.remove(&piece)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True when every sprite sits exactly on its piece's cell.
    pub fn is_docked(&self, board: &BoardState, geometry: &BoardGeometry) -> bool {
        self.positions.len() == board.len()
            && board
                .pieces()
                .all(|p| self.position(p.id) == Some(geometry.cell_to_pixel(p.cell)))
    }
}
