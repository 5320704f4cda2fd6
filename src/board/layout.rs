//! Opening position.

use crate::board::geometry::{Cell, BOARD_SIZE};
use crate::board::piece::{Piece, PieceId, PieceKind, Side};

/// Back rank from file 0 to file 7. King sits on file 3, queen on file 4.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// All 32 pieces in their starting cells. Ids are assigned white first,
/// back rank before pawns, file order within a rank.
pub fn standard_pieces() -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(32);
    let mut next_id = 0u16;
    for (side, back, pawns) in [(Side::White, 0, 1), (Side::Black, 7, 6)] {
        for (file, kind) in BACK_RANK.iter().enumerate() {
            pieces.push(Piece::new(
                PieceId(next_id),
                *kind,
                side,
                Cell::new(file as i32, back),
            ));
            next_id += 1;
        }
        for file in 0..BOARD_SIZE {
            pieces.push(Piece::new(
                PieceId(next_id),
                PieceKind::Pawn,
                side,
                Cell::new(file, pawns),
            ));
            next_id += 1;
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let pieces = standard_pieces();
        assert_eq!(pieces.len(), 32);

        let at = |file, rank| pieces.iter().find(|p| p.cell == Cell::new(file, rank));
        let white_king = at(3, 0).unwrap();
        assert_eq!((white_king.kind, white_king.side), (PieceKind::King, Side::White));
        let black_queen = at(4, 7).unwrap();
        assert_eq!((black_queen.kind, black_queen.side), (PieceKind::Queen, Side::Black));
        assert_eq!(at(0, 6).unwrap().kind, PieceKind::Pawn);
        assert_eq!(at(0, 6).unwrap().side, Side::Black);
        assert!(at(4, 3).is_none());
        assert_eq!(white_king.asset(), "/Assets/Images/white-king.png");
    }
}
