use super::error::BoardError;
use super::{Color, Piece, PieceKind, Position, Square};

/// Piece placement plus the side to move. The board is the only record of
/// where pieces stand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
    pub active_color: Color,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
            active_color: Color::White,
        }
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        match self.squares[pos.rank() as usize][pos.file() as usize] {
            Square::Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Puts `piece` on `pos`, replacing whatever stood there.
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.squares[pos.rank() as usize][pos.file() as usize] = Square::Occupied(piece);
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        let removed = self.get(pos);
        self.squares[pos.rank() as usize][pos.file() as usize] = Square::Empty;
        removed
    }

    /// Relocates the piece on `from` to `to` and returns what stood on `to`.
    /// Knows nothing about legality.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>, BoardError> {
        let piece = self.remove(from).ok_or(BoardError::EmptySquare(from))?;
        let captured = self.remove(to);
        self.place(to, piece);
        Ok(captured)
    }

    /// Returns an iterator over all pieces on the chessboard along with their coordinates.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..8u8).flat_map(move |rank| {
            (0..8u8).filter_map(move |file| {
                let pos = Position::new(file, rank);
                self.get(pos).map(|piece| (pos, piece))
            })
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king_position(&self, color: Color) -> Result<Position, BoardError> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
            .ok_or(BoardError::MissingKing(color))
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for rank in (0..8u8).rev() {
            board_representation.push_str(&format!("{} │", rank + 1));
            for file in 0..8u8 {
                let square = self.get(Position::new(file, rank)).map_or(' ', |piece| piece.to_char());
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", rank + 1));

            if rank > 0 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
