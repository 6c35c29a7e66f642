use super::error::BoardError;
use super::move_generation::Castling;
use super::{ChessBoard, Color, PieceKind, Position};

impl ChessBoard {
    /// Whether any piece of `attacker` could capture on `target`. Castling is
    /// never considered and pawns attack their diagonals even when empty.
    pub fn is_square_attacked_by_color(&self, target: Position, attacker: Color) -> bool {
        self.pieces_of(attacker).any(|(pos, piece)| match piece.kind {
            PieceKind::Pawn => Self::pawn_attacks(pos, piece.color).any(|p| p == target),
            _ => self.pseudo_moves(pos, Castling::Exclude).contains(&target),
        })
    }

    /// Whether a king of `for_color` could stand on `pos` without being attacked.
    pub fn is_square_safe(&self, pos: Position, for_color: Color) -> bool {
        !self.is_square_attacked_by_color(pos, for_color.opposite())
    }

    pub fn is_in_check(&self, color: Color) -> Result<bool, BoardError> {
        let king_pos = self.find_king_position(color)?;
        Ok(self.is_square_attacked_by_color(king_pos, color.opposite()))
    }

    /// In check with no legal move for any piece of `color`.
    pub fn is_checkmate(&mut self, color: Color) -> Result<bool, BoardError> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }
        Ok(!self.has_legal_moves(color)?)
    }

    /// Pieces of `color` that an enemy piece could capture right now.
    pub fn threatened_pieces(&self, color: Color) -> Vec<Position> {
        self.pieces_of(color)
            .map(|(pos, _)| pos)
            .filter(|&pos| self.is_square_attacked_by_color(pos, color.opposite()))
            .collect()
    }
}
