// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random-walk level generation
//!
//! A level is built backwards from the target: a black king is dropped on a
//! random field, then each step places a piece of alternating color on a
//! field from which it could capture the previously placed piece. The
//! player starts on the last placed piece and captures their way back to
//! the king.

use crate::board::{Board, PieceId};
use crate::movegen::{capture_origins, Destination};
use crate::random::{Seed, SeededRng};
use crate::{Color, Coord, GameError, PieceKind};
use serde::{Deserialize, Serialize};

/// Smallest configurable number of rows or columns
pub const MIN_FIELDS: u8 = 4;
/// Largest configurable number of rows or columns
pub const MAX_FIELDS: u8 = 16;

/// Options controlling level generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelOptions {
    pub x_fields_min: u8,
    pub x_fields_max: u8,
    pub y_fields_min: u8,
    pub y_fields_max: u8,
    pub step_count_min: u16,
    pub step_count_max: u16,
    /// `None` draws a fresh seed
    pub seed: Option<Seed>,
    /// Whether a captured piece becomes the player's new piece
    pub replace_after_capture: bool,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            x_fields_min: 8,
            x_fields_max: 8,
            y_fields_min: 8,
            y_fields_max: 8,
            step_count_min: 8,
            step_count_max: 8,
            seed: None,
            replace_after_capture: true,
        }
    }
}

impl LevelOptions {
    /// Same options with a fixed seed
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Check ranges before any random draw is made
    pub fn validate(&self) -> Result<(), GameError> {
        let field_ranges = [
            ("xFields", self.x_fields_min, self.x_fields_max),
            ("yFields", self.y_fields_min, self.y_fields_max),
        ];
        for (name, min, max) in field_ranges {
            if min > max {
                return Err(GameError::InvalidOptions(format!("{name}Min {min} exceeds {name}Max {max}")));
            }
            if min < MIN_FIELDS || max > MAX_FIELDS {
                return Err(GameError::InvalidOptions(format!(
                    "{name} must lie within {MIN_FIELDS}..={MAX_FIELDS}, got {min}..={max}"
                )));
            }
        }
        if self.step_count_min > self.step_count_max {
            return Err(GameError::InvalidOptions(format!(
                "stepCountMin {} exceeds stepCountMax {}",
                self.step_count_min, self.step_count_max
            )));
        }
        Ok(())
    }
}

/// A generated puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub board: Board,
    /// Field of the player's piece
    pub start: Coord,
    /// Field of the king
    pub target: Coord,
    /// The player's piece
    pub current: PieceId,
    /// Numeric seed that reproduces this level
    pub seed: f64,
    /// Pieces placed besides the king
    pub steps: usize,
}

impl Level {
    /// Fields of the generated chain from start to target. Only meaningful
    /// before any move has been applied.
    pub fn chain(&self) -> Vec<Coord> {
        let mut chain: Vec<Coord> = self.board.pieces().map(|(_, p)| p.coord).collect();
        chain.reverse();
        chain
    }
}

/// Generate a level, seeding from `options.seed`
pub fn generate_level(options: &LevelOptions) -> Result<Level, GameError> {
    let mut rng = SeededRng::new(options.seed.clone());
    generate_level_with(options, &mut rng)
}

/// Generate a level drawing from an existing generator
pub fn generate_level_with(options: &LevelOptions, rng: &mut SeededRng) -> Result<Level, GameError> {
    options.validate()?;

    let width = rng.next_int(options.x_fields_min as i32, options.x_fields_max as i32 + 1) as u8;
    let height = rng.next_int(options.y_fields_min as i32, options.y_fields_max as i32 + 1) as u8;
    let mut board = Board::new(width, height);

    let target = Coord::new(
        rng.next_int(0, width as i32) as u8,
        rng.next_int(0, height as i32) as u8,
    );
    let king = board.place(PieceKind::King, Color::Black, target)?;
    board.set_target(target)?;

    let step_count = rng.next_int(options.step_count_min as i32, options.step_count_max as i32 + 1);

    let mut current = target;
    let mut current_piece = king;
    let mut steps = 0;
    for _ in 0..step_count {
        let attacker = board
            .piece_at(current)
            .map(|p| p.color.opposite())
            .ok_or(GameError::EmptyField(current))?;

        let pool: Vec<Destination> = PieceKind::ALL
            .iter()
            .flat_map(|&kind| capture_origins(&board, current, kind, attacker))
            .collect();
        if pool.is_empty() {
            tracing::debug!("No capture origins for {}, stopping after {} steps", current, steps);
            break;
        }

        let candidates = one_per_kind(&pool, rng);
        let Some(&choice) = rng.next_element(&candidates) else {
            break;
        };
        current_piece = board.place(choice.kind, attacker, choice.coord)?;
        current = choice.coord;
        steps += 1;
        tracing::debug!("Step {}: {:?} {:?} at {}", steps, attacker, choice.kind, current);
    }

    board.set_start(current)?;
    tracing::info!(
        "Generated {}x{} level with {} steps (seed {})",
        width,
        height,
        steps,
        rng.seed()
    );

    Ok(Level {
        board,
        start: current,
        target,
        current: current_piece,
        seed: rng.seed(),
        steps,
    })
}

/// Pick one random destination out of every run of equal kinds, so a kind
/// with many ray destinations is no likelier than one with a single step
fn one_per_kind(pool: &[Destination], rng: &mut SeededRng) -> Vec<Destination> {
    let mut picked = Vec::new();
    let mut start = 0;
    while start < pool.len() {
        let kind = pool[start].kind;
        let end = start + pool[start..].iter().take_while(|d| d.kind == kind).count();
        let idx = rng.next_int(start as i32, end as i32) as usize;
        picked.push(pool[idx]);
        start = end;
    }
    picked
}
