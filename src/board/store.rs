//! Client-side board state: which piece sits on which cell.
//!
//! Only the move coordinator writes to a `BoardState`; everything else
//! reads it. Each applied move bumps `revision`, which lets the coordinator
//! recognize authority verdicts issued against an older board.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::board::geometry::{Cell, BOARD_SIZE};
use crate::board::layout::standard_pieces;
use crate::board::piece::{Piece, PieceId};
use crate::error::BoardError;

#[derive(Debug, Clone)]
pub struct BoardState {
    pieces: BTreeMap<PieceId, Piece>,
    occupancy: HashMap<Cell, PieceId>,
    revision: u64,
}

/// Serializable view for renderers and `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub revision: u64,
    pub pieces: Vec<PieceSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceSnapshot {
    #[serde(flatten)]
    pub piece: Piece,
    pub square: String,
    pub asset: String,
}

impl BoardState {
    /// Build a board from a piece list, rejecting off-board cells, shared
    /// cells and duplicate ids.
    pub fn new(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, BoardError> {
        let mut board = Self {
            pieces: BTreeMap::new(),
            occupancy: HashMap::new(),
            revision: 0,
        };
        for piece in pieces {
            if !piece.cell.is_on_board() {
                return Err(BoardError::OffBoard(piece.cell));
            }
            if let Some(&occupant) = board.occupancy.get(&piece.cell) {
                return Err(BoardError::Occupied {
                    cell: piece.cell,
                    occupant,
                });
            }
            if board.pieces.contains_key(&piece.id) {
                return Err(BoardError::DuplicatePiece(piece.id));
            }
            board.occupancy.insert(piece.cell, piece.id);
            board.pieces.insert(piece.id, piece);
        }
        Ok(board)
    }

    pub fn standard() -> Self {
        let pieces = standard_pieces();
        let mut board = Self {
            pieces: BTreeMap::new(),
            occupancy: HashMap::with_capacity(pieces.len()),
            revision: 0,
        };
        for piece in pieces {
            board.occupancy.insert(piece.cell, piece.id);
            board.pieces.insert(piece.id, piece);
        }
        board
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.occupancy.get(&cell).and_then(|id| self.pieces.get(id))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn cell_of(&self, id: PieceId) -> Option<Cell> {
        self.pieces.get(&id).map(|p| p.cell)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Relocate the piece at `origin` to `destination`, removing and
    /// returning whatever occupied `destination`.
    ///
    /// `origin == destination` leaves the piece in place but still counts as
    /// an applied move.
    pub fn apply_move(
        &mut self,
        origin: Cell,
        destination: Cell,
    ) -> Result<Option<Piece>, BoardError> {
        for cell in [origin, destination] {
            if !cell.is_on_board() {
                return Err(BoardError::OffBoard(cell));
            }
        }
        let moving = *self
            .occupancy
            .get(&origin)
            .ok_or(BoardError::NoPieceAtOrigin(origin))?;

        let captured = if origin == destination {
            None
        } else {
            let captured = self
                .occupancy
                .remove(&destination)
                .and_then(|id| self.pieces.remove(&id));
            self.occupancy.remove(&origin);
            self.occupancy.insert(destination, moving);
            if let Some(piece) = self.pieces.get_mut(&moving) {
                piece.cell = destination;
            }
            captured
        };
        self.revision += 1;
        Ok(captured)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            revision: self.revision,
            pieces: self
                .pieces
                .values()
                .map(|p| PieceSnapshot {
                    square: p.cell.to_string(),
                    asset: p.asset(),
                    piece: p.clone(),
                })
                .collect(),
        }
    }

    /// Text diagram with rank 8 on top, for terminals and logs.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for rank in (0..BOARD_SIZE).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..BOARD_SIZE {
                let c = self
                    .piece_at(Cell::new(file, rank))
                    .map(|p| p.symbol())
                    .unwrap_or('.');
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }
}

impl PartialEq for BoardState {
    /// Same pieces on the same cells. Revision is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
    }
}
