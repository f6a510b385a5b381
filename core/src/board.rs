// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation
//!
//! Fields hold an index into the board's piece arena and pieces hold their
//! own coordinates. Every mutation goes through [`Board`] so both sides are
//! updated together.

use crate::{Color, Coord, GameError, PieceKind};
use serde::{Deserialize, Serialize};

/// Index of a piece in the board's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// A chess figure on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Piece type
    pub kind: PieceKind,
    /// Piece color
    pub color: Color,
    /// Field the piece stands on
    pub coord: Coord,
}

/// One grid cell of the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Position of the field
    pub coord: Coord,
    /// Occupying piece, if any
    piece: Option<PieceId>,
    /// Field where the player's piece starts
    pub is_start: bool,
    /// Field the player has to reach
    pub is_target: bool,
    /// Field the current piece can move to right now
    pub is_reachable: bool,
}

impl Field {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            piece: None,
            is_start: false,
            is_target: false,
            is_reachable: false,
        }
    }

    /// The occupying piece's id
    pub fn piece(&self) -> Option<PieceId> {
        self.piece
    }
}

/// Rectangular board of fields plus the pieces standing on them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    /// Fields in row-major order
    fields: Vec<Field>,
    /// Piece arena in placement order; removed pieces leave a hole
    pieces: Vec<Option<Piece>>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        let mut fields = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                fields.push(Field::new(Coord::new(x, y)));
            }
        }
        Self {
            width,
            height,
            fields,
            pieces: Vec::new(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check whether the coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.is_valid(self.width, self.height)
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Get the field at the coordinate
    pub fn field(&self, coord: Coord) -> Option<&Field> {
        self.index(coord).map(|idx| &self.fields[idx])
    }

    fn field_mut(&mut self, coord: Coord) -> Result<&mut Field, GameError> {
        let idx = self.index(coord).ok_or(GameError::OutOfBounds(coord))?;
        Ok(&mut self.fields[idx])
    }

    /// All fields, row by row
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a piece by id
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0).and_then(|p| p.as_ref())
    }

    /// Id of the piece standing on the coordinate
    pub fn piece_id_at(&self, coord: Coord) -> Option<PieceId> {
        self.field(coord).and_then(|f| f.piece)
    }

    /// The piece standing on the coordinate
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.piece_id_at(coord).and_then(|id| self.piece(id))
    }

    /// True for an on-board field without a piece
    pub fn is_vacant(&self, coord: Coord) -> bool {
        matches!(self.field(coord), Some(f) if f.piece.is_none())
    }

    /// Pieces still on the board, in placement order
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (PieceId(i), p)))
    }

    /// Number of pieces still on the board
    pub fn piece_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_some()).count()
    }

    /// Place a new piece on an empty field
    pub fn place(&mut self, kind: PieceKind, color: Color, coord: Coord) -> Result<PieceId, GameError> {
        let id = PieceId(self.pieces.len());
        let field = self.field_mut(coord)?;
        if field.piece.is_some() {
            return Err(GameError::Occupied(coord));
        }
        field.piece = Some(id);
        self.pieces.push(Some(Piece { kind, color, coord }));
        Ok(id)
    }

    /// Take the piece off the coordinate
    pub fn remove(&mut self, coord: Coord) -> Result<Piece, GameError> {
        let field = self.field_mut(coord)?;
        let id = field.piece.take().ok_or(GameError::EmptyField(coord))?;
        self.pieces[id.0].take().ok_or(GameError::EmptyField(coord))
    }

    /// Move the piece on `from` to `to`. A piece already on `to` is removed
    /// and returned.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Result<Option<Piece>, GameError> {
        if !self.contains(to) {
            return Err(GameError::OutOfBounds(to));
        }
        let id = self.piece_id_at(from).ok_or(GameError::EmptyField(from))?;
        if from == to {
            return Ok(None);
        }
        let captured = if self.is_vacant(to) { None } else { Some(self.remove(to)?) };

        self.field_mut(from)?.piece = None;
        self.field_mut(to)?.piece = Some(id);
        if let Some(piece) = self.pieces[id.0].as_mut() {
            piece.coord = to;
        }
        Ok(captured)
    }

    /// Mark the start field, clearing any previous one
    pub fn set_start(&mut self, coord: Coord) -> Result<(), GameError> {
        self.fields.iter_mut().for_each(|f| f.is_start = false);
        self.field_mut(coord)?.is_start = true;
        Ok(())
    }

    /// Mark the target field, clearing any previous one
    pub fn set_target(&mut self, coord: Coord) -> Result<(), GameError> {
        self.fields.iter_mut().for_each(|f| f.is_target = false);
        self.field_mut(coord)?.is_target = true;
        Ok(())
    }

    /// Replace the reachable markers; off-board coordinates are skipped
    pub fn set_reachable(&mut self, coords: &[Coord]) {
        self.fields.iter_mut().for_each(|f| f.is_reachable = false);
        for &coord in coords {
            if let Some(idx) = self.index(coord) {
                self.fields[idx].is_reachable = true;
            }
        }
    }

    /// The marked start field
    pub fn start(&self) -> Option<Coord> {
        self.fields.iter().find(|f| f.is_start).map(|f| f.coord)
    }

    /// The marked target field
    pub fn target(&self) -> Option<Coord> {
        self.fields.iter().find(|f| f.is_target).map(|f| f.coord)
    }

    /// Check that every field's piece points back at that field and every
    /// live piece is referenced by exactly its own field
    pub fn is_consistent(&self) -> bool {
        let fields_ok = self.fields.iter().all(|f| match f.piece {
            None => true,
            Some(id) => matches!(self.piece(id), Some(p) if p.coord == f.coord),
        });
        let pieces_ok = self
            .pieces()
            .all(|(id, p)| self.piece_id_at(p.coord) == Some(id));
        fields_ok && pieces_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_dimensions() {
        let board = Board::new(5, 3);
        assert_eq!(board.fields().len(), 15);
        assert_eq!(board.field(Coord::new(4, 2)).unwrap().coord, Coord::new(4, 2));
        assert!(board.field(Coord::new(5, 0)).is_none());
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_zero_size_board() {
        let board = Board::new(0, 0);
        assert!(board.fields().is_empty());
        assert!(!board.contains(Coord::new(0, 0)));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new(4, 4);
        let c = Coord::new(1, 2);
        let id = board.place(PieceKind::Rook, Color::White, c).unwrap();
        assert_eq!(board.piece_id_at(c), Some(id));
        assert_eq!(board.piece_at(c).unwrap().kind, PieceKind::Rook);
        assert_eq!(board.place(PieceKind::Pawn, Color::Black, c), Err(GameError::Occupied(c)));
        assert_eq!(
            board.place(PieceKind::Pawn, Color::Black, Coord::new(4, 0)),
            Err(GameError::OutOfBounds(Coord::new(4, 0)))
        );

        let piece = board.remove(c).unwrap();
        assert_eq!(piece.coord, c);
        assert!(board.is_vacant(c));
        assert!(board.piece(id).is_none());
        assert_eq!(board.remove(c), Err(GameError::EmptyField(c)));
    }

    #[test]
    fn test_move_keeps_back_references() {
        let mut board = Board::new(8, 8);
        let id = board.place(PieceKind::Queen, Color::White, Coord::new(0, 0)).unwrap();
        board.place(PieceKind::Knight, Color::Black, Coord::new(3, 3)).unwrap();

        assert_eq!(board.move_piece(Coord::new(0, 0), Coord::new(1, 1)).unwrap(), None);
        let captured = board.move_piece(Coord::new(1, 1), Coord::new(3, 3)).unwrap();

        assert_eq!(captured.unwrap().kind, PieceKind::Knight);
        assert_eq!(board.piece(id).unwrap().coord, Coord::new(3, 3));
        assert_eq!(board.piece_count(), 1);
        assert!(board.is_vacant(Coord::new(0, 0)));
        assert!(board.is_vacant(Coord::new(1, 1)));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_markers() {
        let mut board = Board::new(3, 3);
        board.set_start(Coord::new(0, 0)).unwrap();
        board.set_start(Coord::new(1, 0)).unwrap();
        board.set_target(Coord::new(2, 2)).unwrap();
        assert_eq!(board.start(), Some(Coord::new(1, 0)));
        assert_eq!(board.target(), Some(Coord::new(2, 2)));

        board.set_reachable(&[Coord::new(0, 1), Coord::new(9, 9)]);
        assert!(board.field(Coord::new(0, 1)).unwrap().is_reachable);
        board.set_reachable(&[]);
        assert!(board.fields().iter().all(|f| !f.is_reachable));
    }

    #[test]
    fn test_pieces_in_placement_order() {
        let mut board = Board::new(4, 4);
        board.place(PieceKind::King, Color::Black, Coord::new(3, 3)).unwrap();
        board.place(PieceKind::Pawn, Color::White, Coord::new(0, 0)).unwrap();
        board.place(PieceKind::Bishop, Color::Black, Coord::new(1, 0)).unwrap();
        board.remove(Coord::new(0, 0)).unwrap();
        let kinds: Vec<PieceKind> = board.pieces().map(|(_, p)| p.kind).collect();
        assert_eq!(kinds, vec![PieceKind::King, PieceKind::Bishop]);
    }
}
