//! In-process development authority.
//!
//! Stands in for the on-chain contract during local development. It checks
//! ownership and turn order only; it does not know how chess pieces move.
//! A game counts as checkmated once a king has been captured.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::authority::{GameId, MoveAttempt, MoveAuthority, SpawnedGame};
use crate::board::{BoardState, PieceKind, Side, TurnTracker};
use crate::error::AuthorityError;

struct DevGame {
    board: BoardState,
    turns: TurnTracker,
    king_lost: Option<Side>,
}

struct DevState {
    rng: StdRng,
    next_game_id: GameId,
    games: HashMap<GameId, DevGame>,
}

pub struct DevAuthority {
    state: Mutex<DevState>,
}

impl DevAuthority {
    pub fn new(seed: u64) -> Self {
        Self {
            state: Mutex::new(DevState {
                rng: StdRng::seed_from_u64(seed),
                next_game_id: 1,
                games: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DevState>, AuthorityError> {
        self.state
            .lock()
            .map_err(|_| AuthorityError::Transport("dev authority state poisoned".into()))
    }
}

fn random_address(rng: &mut StdRng) -> String {
    let hi: u128 = rng.gen();
    let lo: u128 = rng.gen();
    format!("0x{:032x}{:032x}", hi, lo)
}

impl DevGame {
    /// Why a move is illegal, or `None` if it is accepted.
    fn refusal(&self, attempt: &MoveAttempt) -> Option<&'static str> {
        if self.king_lost.is_some() {
            return Some("game is over");
        }
        if attempt.player_id != self.turns.current() {
            return Some("not this player's turn");
        }
        if !attempt.origin.is_on_board() || !attempt.destination.is_on_board() {
            return Some("cell off the board");
        }
        if attempt.origin == attempt.destination {
            return Some("piece did not move");
        }
        let side = self.turns.current_side();
        match self.board.piece_at(attempt.origin) {
            Some(piece) if piece.side == side => {}
            Some(_) => return Some("piece belongs to the opponent"),
            None => return Some("no piece at origin"),
        }
        if self
            .board
            .piece_at(attempt.destination)
            .is_some_and(|p| p.side == side)
        {
            return Some("destination holds own piece");
        }
        None
    }
}

#[tonic::async_trait]
impl MoveAuthority for DevAuthority {
    async fn spawn_game(&self) -> Result<SpawnedGame, AuthorityError> {
        let mut state = self.lock()?;
        let white = random_address(&mut state.rng);
        let black = random_address(&mut state.rng);
        let game_id = state.next_game_id;
        state.next_game_id += 1;
        state.games.insert(
            game_id,
            DevGame {
                board: BoardState::standard(),
                turns: TurnTracker::new(white.clone(), black.clone()),
                king_lost: None,
            },
        );
        tracing::info!(game_id, %white, %black, "dev authority spawned game");
        Ok(SpawnedGame {
            game_id,
            white,
            black,
        })
    }

    async fn validate_move(&self, attempt: &MoveAttempt) -> Result<bool, AuthorityError> {
        let mut state = self.lock()?;
        let game = state
            .games
            .get_mut(&attempt.game_id)
            .ok_or(AuthorityError::UnknownGame(attempt.game_id))?;

        if let Some(reason) = game.refusal(attempt) {
            tracing::debug!(
                game_id = attempt.game_id,
                origin = %attempt.origin,
                destination = %attempt.destination,
                reason,
                "dev authority refused move"
            );
            return Ok(false);
        }

        let captured = game
            .board
            .apply_move(attempt.origin, attempt.destination)
            .map_err(|e| AuthorityError::Protocol(e.to_string()))?;
        if let Some(piece) = captured {
            if piece.kind == PieceKind::King {
                game.king_lost = Some(piece.side);
            }
        }
        game.turns.advance();
        Ok(true)
    }

    async fn is_in_checkmate(
        &self,
        player_id: &str,
        game_id: GameId,
    ) -> Result<bool, AuthorityError> {
        let state = self.lock()?;
        let game = state
            .games
            .get(&game_id)
            .ok_or(AuthorityError::UnknownGame(game_id))?;
        let side = game.turns.side_of(player_id);
        Ok(side.is_some() && game.king_lost == side)
    }
}
