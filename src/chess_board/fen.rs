use super::error::ParseError;
use super::{ChessBoard, Color, Piece, PieceKind, Position, Square};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl ChessBoard {
    /// Parses a FEN string. Only placement, side to move and castling rights
    /// carry over to the board: a king or rook on its home square whose right
    /// is absent counts as moved. En passant and the clocks are checked for
    /// well-formedness and then dropped.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let mut board = ChessBoard::new();
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(ParseError::BadFen(format!("expected 6 parts, found {}", parts.len())));
        }

        // Parse board squares
        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != 8 {
            return Err(ParseError::BadFen(format!("expected 8 rows, found {}", rows.len())));
        }

        for (row_index, row) in rows.iter().enumerate() {
            let rank = 7 - row_index;
            let mut file = 0usize;

            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file > 7 {
                        return Err(ParseError::BadFen(format!("too many squares in row {}", row_index + 1)));
                    }
                    let piece = Piece::from_char(c).ok_or_else(|| ParseError::UnexpectedPieceCode(c.to_string()))?;
                    board.squares[rank][file] = Square::Occupied(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ParseError::BadFen(format!("row {} covers {} squares", row_index + 1, file)));
            }
        }

        // Parse active color
        board.active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ParseError::BadFen(format!("invalid active color `{}`", other))),
        };

        // Parse castling rights
        let castling = parts[2];
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(ParseError::BadFen(format!("invalid castling rights `{}`", castling)));
        }
        board.apply_castling_rights(Color::White, castling.contains('K'), castling.contains('Q'));
        board.apply_castling_rights(Color::Black, castling.contains('k'), castling.contains('q'));

        // En passant square
        if parts[3] != "-" {
            Position::from_algebraic(parts[3])?;
        }

        // Halfmove clock and fullmove number
        for clock in &parts[4..6] {
            clock
                .parse::<u32>()
                .map_err(|_| ParseError::BadFen(format!("`{}` is not a valid move counter", clock)))?;
        }

        Ok(board)
    }

    fn apply_castling_rights(&mut self, color: Color, kingside: bool, queenside: bool) {
        let rank = color.home_rank();
        let mut mark_moved = |file: u8, kind: PieceKind| {
            let pos = Position::new(file, rank);
            if let Some(piece) = self.get(pos).filter(|p| p.color == color && p.kind == kind) {
                self.place(pos, Piece { has_moved: true, ..piece });
            }
        };
        if !kingside {
            mark_moved(7, PieceKind::Rook);
        }
        if !queenside {
            mark_moved(0, PieceKind::Rook);
        }
        if !kingside && !queenside {
            mark_moved(4, PieceKind::King);
        }
    }

    /// The castling field as it follows from the unmoved kings and rooks.
    fn castling_rights(&self) -> String {
        let unmoved = |file: u8, rank: u8, kind: PieceKind, color: Color| {
            self.get(Position::new(file, rank))
                .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
        };
        let mut castling = String::new();
        for color in [Color::White, Color::Black] {
            let rank = color.home_rank();
            if !unmoved(4, rank, PieceKind::King, color) {
                continue;
            }
            for (file, letter) in [(7, 'K'), (0, 'Q')] {
                if unmoved(file, rank, PieceKind::Rook, color) {
                    castling.push(match color {
                        Color::White => letter,
                        Color::Black => letter.to_ascii_lowercase(),
                    });
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        castling
    }

    /// Writes placement, side to move and castling rights; the en passant
    /// field and the clocks are always `- 0 1`.
    pub fn to_fen(&self) -> String {
        let mut board_representation = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;

            for file in 0..8 {
                match self.squares[rank][file] {
                    Square::Occupied(piece) => {
                        if empty_count > 0 {
                            board_representation.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        board_representation.push(piece.to_char());
                    }
                    Square::Empty => {
                        empty_count += 1;
                    }
                }
            }

            if empty_count > 0 {
                board_representation.push_str(&empty_count.to_string());
            }

            if rank > 0 {
                board_representation.push('/');
            }
        }

        let active_color = if self.active_color == Color::White { "w" } else { "b" };

        format!("{} {} {} - 0 1", board_representation, active_color, self.castling_rights())
    }
}
