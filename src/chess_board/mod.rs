pub mod error;
pub mod fen;
pub mod layout;
pub mod model;
pub mod perft;
pub use error::{BoardError, ParseError};
pub use execution::MoveResult;
pub use layout::{layout_for_perspective, Layout, STANDARD_LAYOUT};
pub use legality::Simulation;
pub use model::{Color, Move, MoveFlags, Piece, PieceKind, Position, Square};
pub use move_generation::Castling;

mod check;
mod chess_board;
mod execution;
mod legality;
mod move_generation;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;

#[cfg(test)]
mod tests {
    use super::test_utils::sq;
    use super::*;

    #[test]
    fn test_scholars_mate() {
        let mut board = ChessBoard::standard();
        for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
            board.execute(Move::from_algebraic(mv).unwrap()).unwrap();
            assert_eq!(board.is_checkmate(board.active_color), Ok(false));
        }
        let result = board.execute(Move::from_algebraic("h5f7").unwrap()).unwrap();
        assert_eq!(result.captured.map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(board.is_checkmate(Color::Black), Ok(true));
        let threatened = board.threatened_pieces(Color::Black);
        assert!(threatened.contains(&sq("e8")));
        assert!(threatened.contains(&sq("f6")));
        assert!(!threatened.contains(&sq("a8")));
    }

    #[test]
    fn test_legal_moves_is_subset_of_pseudo_moves() {
        let mut board =
            ChessBoard::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        for color in [Color::White, Color::Black] {
            let origins: Vec<Position> = board.pieces_of(color).map(|(pos, _)| pos).collect();
            for from in origins {
                let pseudo = board.pseudo_moves(from, Castling::Include);
                for to in board.legal_moves(from, color).unwrap() {
                    assert!(pseudo.contains(&to));
                }
            }
        }
    }
}
