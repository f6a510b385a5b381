// SPDX-License-Identifier: MIT OR Apache-2.0

//! Legal move enumeration
//!
//! Destinations are produced in catalog pattern order; for rays the positive
//! sense comes first and squares closer to the source come first.

use crate::board::Board;
use crate::patterns::{capturing_patterns, moving_patterns, MovePattern};
use crate::{Color, Coord, PieceKind};
use serde::{Deserialize, Serialize};

/// Whether destinations must be empty or hold an opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveMode {
    /// Destination must be unoccupied
    Moving,
    /// Destination must hold an opposite-color piece
    Capturing,
}

/// A field a piece of `kind` could end up on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub coord: Coord,
    pub kind: PieceKind,
}

/// What a walk accepts on the squares it visits
#[derive(Clone, Copy)]
enum Filter {
    Empty,
    Opponent(Color),
}

/// All legal destinations for a `kind`/`color` piece standing on `from`.
///
/// The source field itself is never inspected, so this also answers
/// "where could such a piece go" for a field holding something else.
pub fn legal_destinations(
    board: &Board,
    from: Coord,
    kind: PieceKind,
    color: Color,
    mode: MoveMode,
) -> Vec<Destination> {
    let (patterns, filter) = match mode {
        MoveMode::Moving => (moving_patterns(kind), Filter::Empty),
        MoveMode::Capturing => (capturing_patterns(kind), Filter::Opponent(color.opposite())),
    };
    walk(board, from, kind, patterns, color.direction(), filter)
}

/// Empty fields from which a `kind` piece of color `attacker` could capture
/// whatever stands on `target`.
///
/// Capture patterns are walked backwards from `target`: color-relative steps
/// use the victim's sign, which is the attacker's reversed. Rays are
/// symmetric, so the walked segment is exactly the line the attacker would
/// need to be clear.
pub fn capture_origins(board: &Board, target: Coord, kind: PieceKind, attacker: Color) -> Vec<Destination> {
    let dir = attacker.opposite().direction();
    walk(board, target, kind, capturing_patterns(kind), dir, Filter::Empty)
}

fn walk(
    board: &Board,
    from: Coord,
    kind: PieceKind,
    patterns: &[MovePattern],
    dir: i32,
    filter: Filter,
) -> Vec<Destination> {
    let mut out = Vec::new();
    if !board.contains(from) {
        return out;
    }

    for pattern in patterns {
        match *pattern {
            MovePattern::Step { dx, dy } => {
                if let Some(to) = from.offset(dx, dy * dir, board.width(), board.height()) {
                    if accepts(board, to, filter) {
                        out.push(Destination { coord: to, kind });
                    }
                }
            }
            MovePattern::Ray { .. } => {
                for (dx, dy) in pattern.ray_directions(dir).into_iter().flatten() {
                    walk_ray(board, from, dx, dy, kind, filter, &mut out);
                }
            }
        }
    }
    out
}

fn walk_ray(
    board: &Board,
    from: Coord,
    dx: i32,
    dy: i32,
    kind: PieceKind,
    filter: Filter,
    out: &mut Vec<Destination>,
) {
    let mut cur = from;
    while let Some(to) = cur.offset(dx, dy, board.width(), board.height()) {
        match board.piece_at(to) {
            None => {
                if let Filter::Empty = filter {
                    out.push(Destination { coord: to, kind });
                }
            }
            Some(piece) => {
                if let Filter::Opponent(color) = filter {
                    if piece.color == color {
                        out.push(Destination { coord: to, kind });
                    }
                }
                return;
            }
        }
        cur = to;
    }
}

fn accepts(board: &Board, to: Coord, filter: Filter) -> bool {
    match (filter, board.piece_at(to)) {
        (Filter::Empty, None) => true,
        (Filter::Opponent(color), Some(piece)) => piece.color == color,
        _ => false,
    }
}
