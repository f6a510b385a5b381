// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single puzzle game: the generated level plus the player's progress

use crate::board::{Board, Piece, PieceId};
use crate::level::{generate_level, Level, LevelOptions};
use crate::movegen::{legal_destinations, MoveMode};
use crate::random::Seed;
use crate::{Coord, GameError};
use serde::{Deserialize, Serialize};

/// State of the game after the last move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The player still has moves left
    InProgress,
    /// The current piece stands on the target field
    Solved,
    /// The current piece cannot move anywhere
    Stuck,
}

/// Result of applying a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: Coord,
    pub to: Coord,
    /// The piece that left the board, if any. With replace-after-capture
    /// this is the former player piece rather than the one captured.
    pub captured: Option<Piece>,
    pub status: GameStatus,
}

/// Per-game context owning the level and its options
#[derive(Debug, Clone)]
pub struct GameSession {
    options: LevelOptions,
    level: Level,
    moves_made: usize,
}

impl GameSession {
    /// Generate a new level and start playing it
    pub fn new(options: LevelOptions) -> Result<Self, GameError> {
        let level = generate_level(&options)?;
        Ok(Self {
            options,
            level,
            moves_made: 0,
        })
    }

    /// Start over with a freshly generated level
    pub fn new_game(&mut self, options: LevelOptions) -> Result<(), GameError> {
        *self = Self::new(options)?;
        Ok(())
    }

    /// Regenerate the current level from its seed
    pub fn restart(&mut self) -> Result<(), GameError> {
        let options = LevelOptions {
            seed: Some(Seed::Number(self.level.seed)),
            ..self.options.clone()
        };
        self.level = generate_level(&options)?;
        self.moves_made = 0;
        tracing::debug!("Restarted level with seed {}", self.level.seed);
        Ok(())
    }

    /// The level being played
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The options the level was generated from
    pub fn options(&self) -> &LevelOptions {
        &self.options
    }

    /// The board in its current state
    pub fn board(&self) -> &Board {
        &self.level.board
    }

    /// Id of the player's piece
    pub fn current_id(&self) -> PieceId {
        self.level.current
    }

    /// The player's piece
    pub fn current_piece(&self) -> Option<&Piece> {
        self.level.board.piece(self.level.current)
    }

    /// Moves applied since the level was generated
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Fields the current piece can move to or capture on, plain moves first
    pub fn legal_moves(&self) -> Vec<Coord> {
        let Some(piece) = self.current_piece() else {
            return Vec::new();
        };
        let board = &self.level.board;
        let mut moves: Vec<Coord> = legal_destinations(board, piece.coord, piece.kind, piece.color, MoveMode::Moving)
            .into_iter()
            .map(|d| d.coord)
            .collect();
        moves.extend(
            legal_destinations(board, piece.coord, piece.kind, piece.color, MoveMode::Capturing)
                .into_iter()
                .map(|d| d.coord),
        );
        moves
    }

    /// Mark the current legal moves on the board
    pub fn refresh_reachable(&mut self) {
        let moves = self.legal_moves();
        self.level.board.set_reachable(&moves);
    }

    /// Current game status
    pub fn status(&self) -> GameStatus {
        match self.current_piece() {
            Some(piece) if piece.coord == self.level.target => GameStatus::Solved,
            Some(_) if !self.legal_moves().is_empty() => GameStatus::InProgress,
            _ => GameStatus::Stuck,
        }
    }

    /// Move the current piece to `to`
    pub fn apply_move(&mut self, to: Coord) -> Result<MoveOutcome, GameError> {
        if self.status() != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }
        if !self.legal_moves().contains(&to) {
            return Err(GameError::IllegalMove(to));
        }
        let from = self
            .current_piece()
            .map(|p| p.coord)
            .ok_or(GameError::GameOver)?;

        let board = &mut self.level.board;
        let captured = if self.options.replace_after_capture && !board.is_vacant(to) {
            // the taken piece stays and becomes the player's piece
            let taken = board.piece_id_at(to).ok_or(GameError::EmptyField(to))?;
            let mover = board.remove(from)?;
            self.level.current = taken;
            Some(mover)
        } else {
            board.move_piece(from, to)?
        };
        self.moves_made += 1;

        let status = self.status();
        tracing::debug!("Move {} from {} to {}: {:?}", self.moves_made, from, to, status);
        Ok(MoveOutcome { from, to, captured, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    fn session_with(board: Board, current: PieceId, target: Coord, replace: bool) -> GameSession {
        let start = board.piece(current).unwrap().coord;
        GameSession {
            options: LevelOptions { replace_after_capture: replace, ..Default::default() },
            level: Level { board, start, target, current, seed: 1.0, steps: 1 },
            moves_made: 0,
        }
    }

    #[test]
    fn test_replace_after_capture_switches_piece() {
        let mut board = Board::new(8, 8);
        board.place(PieceKind::King, Color::Black, Coord::new(7, 7)).unwrap();
        board.place(PieceKind::Knight, Color::Black, Coord::new(2, 0)).unwrap();
        let rook = board.place(PieceKind::Rook, Color::White, Coord::new(0, 0)).unwrap();
        let mut session = session_with(board, rook, Coord::new(7, 7), true);

        let outcome = session.apply_move(Coord::new(2, 0)).unwrap();
        assert_eq!(outcome.captured.unwrap().kind, PieceKind::Rook);
        let piece = session.current_piece().unwrap();
        assert_eq!(piece.kind, PieceKind::Knight);
        assert_eq!(piece.color, Color::Black);
        assert!(session.board().is_vacant(Coord::new(0, 0)));
        assert!(session.board().is_consistent());
    }

    #[test]
    fn test_classic_capture_keeps_piece() {
        let mut board = Board::new(8, 8);
        board.place(PieceKind::King, Color::Black, Coord::new(7, 7)).unwrap();
        board.place(PieceKind::Knight, Color::Black, Coord::new(2, 0)).unwrap();
        let rook = board.place(PieceKind::Rook, Color::White, Coord::new(0, 0)).unwrap();
        let mut session = session_with(board, rook, Coord::new(7, 7), false);

        let outcome = session.apply_move(Coord::new(2, 0)).unwrap();
        assert_eq!(outcome.captured.unwrap().kind, PieceKind::Knight);
        assert_eq!(session.current_id(), rook);
        assert_eq!(session.current_piece().unwrap().coord, Coord::new(2, 0));
        assert_eq!(session.board().piece_count(), 2);
    }

    #[test]
    fn test_illegal_and_finished_moves_rejected() {
        let mut board = Board::new(8, 8);
        board.place(PieceKind::King, Color::Black, Coord::new(0, 3)).unwrap();
        let rook = board.place(PieceKind::Rook, Color::White, Coord::new(0, 0)).unwrap();
        let mut session = session_with(board, rook, Coord::new(0, 3), true);

        assert_eq!(session.apply_move(Coord::new(1, 1)), Err(GameError::IllegalMove(Coord::new(1, 1))));
        let outcome = session.apply_move(Coord::new(0, 3)).unwrap();
        assert_eq!(outcome.status, GameStatus::Solved);
        assert_eq!(session.moves_made(), 1);
        assert_eq!(session.apply_move(Coord::new(0, 4)), Err(GameError::GameOver));
    }

    #[test]
    fn test_stuck_without_moves() {
        let mut board = Board::new(4, 4);
        board.place(PieceKind::King, Color::Black, Coord::new(3, 3)).unwrap();
        board.place(PieceKind::Pawn, Color::White, Coord::new(1, 0)).unwrap();
        let pawn = board.place(PieceKind::Pawn, Color::White, Coord::new(1, 1)).unwrap();
        let session = session_with(board, pawn, Coord::new(3, 3), true);
        assert_eq!(session.status(), GameStatus::Stuck);
    }

    #[test]
    fn test_refresh_reachable_marks_moves() {
        let mut session = GameSession::new(LevelOptions::default().with_seed("reach")).unwrap();
        session.refresh_reachable();
        let mut marked: Vec<Coord> = session
            .board()
            .fields()
            .iter()
            .filter(|f| f.is_reachable)
            .map(|f| f.coord)
            .collect();
        let mut moves = session.legal_moves();
        marked.sort();
        moves.sort();
        assert_eq!(marked, moves);
    }

    #[test]
    fn test_restart_reproduces_level() {
        let mut session = GameSession::new(LevelOptions::default()).unwrap();
        let original = session.level().clone();
        if let Some(&to) = session.legal_moves().first() {
            if session.status() == GameStatus::InProgress {
                session.apply_move(to).unwrap();
            }
        }
        session.restart().unwrap();
        assert_eq!(session.level(), &original);
        assert_eq!(session.moves_made(), 0);
    }
}
