// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.
//!
//! Columns are lettered from `a` and rows numbered from the bottom, so
//! row 0 of the board is printed first with the highest number.

use challenchess_core::{Board, Coord, PieceId};

/// Render the board as ASCII art.
///
/// Every cell is a marker followed by a symbol. Markers: `@` the player's
/// piece, `*` a reachable field. Symbols: piece letters (uppercase for
/// white), `o` the vacated start field, `.` any other empty field.
pub fn render_board(board: &Board, current: Option<PieceId>) -> String {
    let width = board.width();
    let height = board.height();
    let mut output = String::new();

    push_column_labels(&mut output, width);
    for y in 0..height {
        let label = row_label(y, height);
        output.push_str(&format!("{:2} ", label));

        for x in 0..width {
            let coord = Coord::new(x, y);
            let Some(field) = board.field(coord) else {
                continue;
            };
            let marker = if current.is_some() && field.piece() == current {
                '@'
            } else if field.is_reachable {
                '*'
            } else {
                ' '
            };
            let symbol = match board.piece_at(coord) {
                Some(piece) => piece.kind.symbol(piece.color),
                None if field.is_start => 'o',
                None => '.',
            };
            output.push(' ');
            output.push(marker);
            output.push(symbol);
        }

        output.push_str(&format!(" {}", label));
        output.push('\n');
    }
    push_column_labels(&mut output, width);

    output
}

fn push_column_labels(output: &mut String, width: u8) {
    output.push_str("   ");
    for x in 0..width {
        output.push_str(&format!("  {}", coord_to_column_char(x)));
    }
    output.push('\n');
}

/// Convert a column index to its letter, `a` for column 0
fn coord_to_column_char(x: u8) -> char {
    (b'a' + x) as char
}

fn row_label(y: u8, height: u8) -> u8 {
    height - y
}

/// Human-readable field name such as `c5`
pub fn field_name(coord: Coord, height: u8) -> String {
    format!("{}{}", coord_to_column_char(coord.x), row_label(coord.y, height))
}

/// Parse a field name like `c5` back into a board coordinate
pub fn parse_field(input: &str, width: u8, height: u8) -> Option<Coord> {
    let input = input.trim().to_ascii_lowercase();
    let mut chars = input.chars();
    let column = chars.next()?;
    if !column.is_ascii_lowercase() {
        return None;
    }
    let x = column as u8 - b'a';
    let row: u8 = chars.as_str().parse().ok()?;
    if row == 0 || row > height || x >= width {
        return None;
    }
    Some(Coord::new(x, height - row))
}
