// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenchess Core - Level Generation and Move Rules
//!
//! This crate provides the core puzzle functionality including:
//! - A seedable, reproducible random sequence generator
//! - Per-piece move patterns and the legal-move enumerator
//! - The random-walk level generator
//! - A game session that applies player moves

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod random;
pub mod patterns;
pub mod board;
pub mod movegen;
pub mod level;
pub mod session;

use serde::{Serialize, Deserialize};
use thiserror::Error;

pub use board::{Board, Field, Piece, PieceId};
pub use level::{generate_level, generate_level_with, Level, LevelOptions};
pub use movegen::{capture_origins, legal_destinations, Destination, MoveMode};
pub use random::{Seed, SeededRng};
pub use session::{GameSession, GameStatus, MoveOutcome};

/// Piece color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White pieces advance toward row 0
    White,
    /// Black pieces advance toward the last row
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign applied to color-relative row deltas
    pub fn direction(&self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

/// Chess piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// All piece types in catalog order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter symbol, uppercase for white and lowercase for black
    pub fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// Board coordinate representing a field position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column, from the left)
    pub x: u8,
    /// Y coordinate (row, from the top)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of the given dimensions
    pub fn is_valid(&self, width: u8, height: u8) -> bool {
        self.x < width && self.y < height
    }

    /// Shift by a signed delta, returning `None` when the result leaves the
    /// `width` x `height` rectangle
    pub fn offset(&self, dx: i32, dy: i32, width: u8, height: u8) -> Option<Coord> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors that can occur while generating or playing a level
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The level options are inconsistent or out of range
    #[error("Invalid level options: {0}")]
    InvalidOptions(String),

    /// The coordinate is outside the board
    #[error("Coordinate {0} is outside the board")]
    OutOfBounds(Coord),

    /// The field is already occupied
    #[error("Field {0} is already occupied")]
    Occupied(Coord),

    /// The field holds no piece
    #[error("Field {0} is empty")]
    EmptyField(Coord),

    /// The destination is not a legal move for the current piece
    #[error("Illegal move to {0}")]
    IllegalMove(Coord),

    /// The game has already been solved or is stuck
    #[error("Game is over")]
    GameOver,
}
