use super::error::BoardError;
use super::{ChessBoard, Move, Piece, PieceKind, Position};

/// What a completed move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The move with its castling and promotion flags filled in.
    pub mv: Move,
    /// The piece as it stood before moving.
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Rook relocation of a castling move.
    pub rook_move: Option<(Position, Position)>,
    /// The queen that replaced a promoting pawn.
    pub promoted: Option<Piece>,
}

impl ChessBoard {
    /// Plays a legal move of the side to move and hands the turn over.
    /// Nothing is changed when the move is rejected.
    pub fn execute(&mut self, mv: Move) -> Result<MoveResult, BoardError> {
        let piece = self.get(mv.from).ok_or(BoardError::EmptySquare(mv.from))?;
        if piece.color != self.active_color {
            return Err(BoardError::OutOfTurn(mv));
        }
        if !self.legal_moves(mv.from, piece.color)?.contains(&mv.to) {
            return Err(BoardError::IllegalMove(mv));
        }
        let mv = self.classify_move(mv.from, mv.to);

        let captured = self.remove(mv.to);
        self.move_piece(mv.from, mv.to)?;
        self.place(mv.to, Piece { has_moved: true, ..piece });

        let rook_move = if mv.is_castle() {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if mv.flags.castle_kingside {
                (Position::new(7, rank), Position::new(5, rank))
            } else {
                (Position::new(0, rank), Position::new(3, rank))
            };
            let rook = self.remove(rook_from).ok_or(BoardError::EmptySquare(rook_from))?;
            self.place(rook_to, Piece { has_moved: true, ..rook });
            Some((rook_from, rook_to))
        } else {
            None
        };

        let promoted = if mv.flags.promotion {
            self.remove(mv.to);
            let queen = Piece::new(piece.color, PieceKind::Queen);
            self.place(mv.to, queen);
            Some(queen)
        } else {
            None
        };

        self.active_color = self.active_color.opposite();

        Ok(MoveResult {
            mv,
            piece,
            captured,
            rook_move,
            promoted,
        })
    }
}
