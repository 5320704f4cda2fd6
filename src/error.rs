//! Error types for the client.
//!
//! Pointer gestures and authority verdicts are absorbed by the client and
//! never reach the presentation layer as errors. `BoardError` is the
//! exception: it signals that the drag and board state disagree and is
//! always propagated.

use std::path::PathBuf;

use thiserror::Error;

use crate::authority::GameId;
use crate::board::{Cell, PieceId};
use crate::session::Phase;

/// Board store contract breaches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no piece at origin {0}")]
    NoPieceAtOrigin(Cell),
    #[error("cell {0} is off the board")]
    OffBoard(Cell),
    #[error("cell {cell} already holds piece {occupant}")]
    Occupied { cell: Cell, occupant: PieceId },
    #[error("piece id {0} used twice")]
    DuplicatePiece(PieceId),
}

/// Pointer gestures that do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("no piece under pointer at {0}")]
    NotOnPiece(Cell),
    #[error("drag already active from {origin}")]
    AlreadyDragging { origin: Cell },
    #[error("no drag session active")]
    NoSession,
}

/// Failures talking to the move authority. A rejected move is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("authority transport failed: {0}")]
    Transport(String),
    #[error("malformed authority payload: {0}")]
    Protocol(String),
    #[error("unknown game {0}")]
    UnknownGame(GameId),
}

impl From<tonic::Status> for AuthorityError {
    fn from(status: tonic::Status) -> Self {
        AuthorityError::Transport(format!("{:?}: {}", status.code(), status.message()))
    }
}

impl From<tonic::transport::Error> for AuthorityError {
    fn from(err: tonic::transport::Error) -> Self {
        AuthorityError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game spawn failed: {0}")]
    Spawn(#[source] AuthorityError),
    #[error("no game in progress (phase {0:?})")]
    NotPlaying(Phase),
    #[error("game already in progress")]
    AlreadyPlaying,
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}
