use crate::chess_board::{Color, Piece};

/// Pieces taken off the board, kept per color of the piece in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPool {
    white: Vec<Piece>,
    black: Vec<Piece>,
}

impl CapturedPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.white.push(piece),
            Color::Black => self.black.push(piece),
        }
    }

    /// Pieces of `color` lost so far.
    pub fn lost_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Material value of the pieces `color` lost.
    pub fn material_lost(&self, color: Color) -> i32 {
        self.lost_by(color).iter().map(|p| p.kind.capture_value()).sum()
    }

    pub fn render(&self, color: Color) -> String {
        self.lost_by(color).iter().map(|p| p.to_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::PieceKind;

    #[test]
    fn test_pool_keeps_capture_order_per_color() {
        let mut pool = CapturedPool::new();
        pool.record(Piece::new(Color::Black, PieceKind::Knight));
        pool.record(Piece::new(Color::White, PieceKind::Pawn));
        pool.record(Piece::new(Color::Black, PieceKind::Queen));

        assert_eq!(pool.render(Color::Black), "nq");
        assert_eq!(pool.render(Color::White), "P");
        assert_eq!(pool.material_lost(Color::Black), 12);
        assert_eq!(pool.material_lost(Color::White), 1);
        assert!(CapturedPool::new().lost_by(Color::White).is_empty());
    }
}
