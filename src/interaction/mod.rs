pub mod coordinator;
pub mod drag;
pub mod visuals;

pub use coordinator::{AcceptedMove, MoveCoordinator, MoveOutcome, PendingMove, RejectReason, Verdict};
pub use drag::{DragController, DragSession, Release};
pub use visuals::PieceLayer;
