pub mod geometry;
pub mod layout;
pub mod piece;
pub mod store;
pub mod turn;

pub use geometry::{BoardGeometry, Cell, Pixel, BOARD_SIZE};
pub use piece::{Piece, PieceId, PieceKind, Side};
pub use store::{BoardSnapshot, BoardState};
pub use turn::{PlayerId, TurnTracker};
