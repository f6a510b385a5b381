// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move pattern catalog for the six piece types

use crate::PieceKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Axis of an unbounded ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RayAxis {
    Horizontal,
    Vertical,
    Diagonal,
}

/// A direction a piece can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovePattern {
    /// Single fixed step; `dy` is relative to the mover's color
    Step { dx: i32, dy: i32 },
    /// Unbounded travel along an axis in both senses. `mirrored` selects the
    /// anti-diagonal for [`RayAxis::Diagonal`].
    Ray { axis: RayAxis, mirrored: bool },
}

impl MovePattern {
    const fn step(dx: i32, dy: i32) -> Self {
        MovePattern::Step { dx, dy }
    }

    const fn ray(axis: RayAxis, mirrored: bool) -> Self {
        MovePattern::Ray { axis, mirrored }
    }

    /// Unit steps of a ray for a color with direction sign `dir`, positive
    /// sense first. `None` for fixed steps.
    pub fn ray_directions(&self, dir: i32) -> Option<[(i32, i32); 2]> {
        match *self {
            MovePattern::Ray { axis: RayAxis::Horizontal, .. } => Some([(1, 0), (-1, 0)]),
            MovePattern::Ray { axis: RayAxis::Vertical, .. } => Some([(0, dir), (0, -dir)]),
            MovePattern::Ray { axis: RayAxis::Diagonal, mirrored: false } => Some([(1, dir), (-1, -dir)]),
            MovePattern::Ray { axis: RayAxis::Diagonal, mirrored: true } => Some([(1, -dir), (-1, dir)]),
            MovePattern::Step { .. } => None,
        }
    }
}

const HORIZONTAL: MovePattern = MovePattern::ray(RayAxis::Horizontal, false);
const VERTICAL: MovePattern = MovePattern::ray(RayAxis::Vertical, false);
const DIAGONAL: MovePattern = MovePattern::ray(RayAxis::Diagonal, false);
const ANTI_DIAGONAL: MovePattern = MovePattern::ray(RayAxis::Diagonal, true);

const PAWN_MOVES: [MovePattern; 1] = [MovePattern::step(0, 1)];
const PAWN_CAPTURES: [MovePattern; 2] = [MovePattern::step(-1, 1), MovePattern::step(1, 1)];
const ROOK_MOVES: [MovePattern; 2] = [HORIZONTAL, VERTICAL];
const BISHOP_MOVES: [MovePattern; 2] = [DIAGONAL, ANTI_DIAGONAL];
const QUEEN_MOVES: [MovePattern; 4] = [HORIZONTAL, VERTICAL, DIAGONAL, ANTI_DIAGONAL];

const KNIGHT_MOVES: [MovePattern; 8] = [
    MovePattern::step(1, 2),
    MovePattern::step(2, 1),
    MovePattern::step(2, -1),
    MovePattern::step(1, -2),
    MovePattern::step(-1, -2),
    MovePattern::step(-2, -1),
    MovePattern::step(-2, 1),
    MovePattern::step(-1, 2),
];

const KING_MOVES: [MovePattern; 8] = [
    MovePattern::step(0, 1),
    MovePattern::step(1, 1),
    MovePattern::step(1, 0),
    MovePattern::step(1, -1),
    MovePattern::step(0, -1),
    MovePattern::step(-1, -1),
    MovePattern::step(-1, 0),
    MovePattern::step(-1, 1),
];

/// Plain movement patterns
pub fn moving_patterns(kind: PieceKind) -> &'static [MovePattern] {
    match kind {
        PieceKind::Pawn => &PAWN_MOVES,
        PieceKind::Rook => &ROOK_MOVES,
        PieceKind::Knight => &KNIGHT_MOVES,
        PieceKind::Bishop => &BISHOP_MOVES,
        PieceKind::Queen => &QUEEN_MOVES,
        PieceKind::King => &KING_MOVES,
    }
}

/// Capture patterns for kinds that capture differently than they move
fn capture_override(kind: PieceKind) -> Option<&'static [MovePattern]> {
    match kind {
        PieceKind::Pawn => Some(&PAWN_CAPTURES),
        _ => None,
    }
}

/// Capture-or-move table indexed by [`PieceKind::index`]
static CAPTURING: Lazy<[&'static [MovePattern]; 6]> = Lazy::new(|| {
    PieceKind::ALL.map(|kind| capture_override(kind).unwrap_or_else(|| moving_patterns(kind)))
});

/// Patterns used when capturing
pub fn capturing_patterns(kind: PieceKind) -> &'static [MovePattern] {
    CAPTURING[kind.index()]
}
