use super::error::ParseError;
use super::{ChessBoard, Color, Piece, PieceKind, Position};

/// An 8×8 diagram of piece codes. Row 0 is the top of the diagram, an empty
/// string is an empty square.
pub type Layout = [[&'static str; 8]; 8];

/// The starting position as seen by White: row 0 is rank 8.
pub const STANDARD_LAYOUT: Layout = [
    ["r", "n", "b", "q", "k", "b", "n", "r"],
    ["p", "p", "p", "p", "p", "p", "p", "p"],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["P", "P", "P", "P", "P", "P", "P", "P"],
    ["R", "N", "B", "Q", "K", "B", "N", "R"],
];

/// Returns `layout` (drawn from White's side) as `viewer` sees it.
pub fn layout_for_perspective<'a>(layout: &[[&'a str; 8]; 8], viewer: Color) -> [[&'a str; 8]; 8] {
    match viewer {
        Color::White => *layout,
        Color::Black => {
            let mut rotated = [[""; 8]; 8];
            for (row, cells) in layout.iter().enumerate() {
                for (column, code) in cells.iter().enumerate() {
                    rotated[7 - row][7 - column] = *code;
                }
            }
            rotated
        }
    }
}

impl ChessBoard {
    /// Builds a board from a diagram drawn from White's side. Every piece
    /// starts unmoved and White is to move.
    pub fn from_layout(layout: &[[&str; 8]; 8]) -> Result<Self, ParseError> {
        let mut board = ChessBoard::new();
        for (row, cells) in layout.iter().enumerate() {
            for (file, code) in cells.iter().enumerate() {
                if code.is_empty() {
                    continue;
                }
                let piece = parse_piece_code(code)?;
                board.place(Position::new(file as u8, 7 - row as u8), piece);
            }
        }
        Ok(board)
    }

    /// Builds a board from a diagram drawn from `viewer`'s side of the table.
    pub fn from_layout_for_perspective(layout: &[[&str; 8]; 8], viewer: Color) -> Result<Self, ParseError> {
        // rotating by 180° is its own inverse
        Self::from_layout(&layout_for_perspective(layout, viewer))
    }

    pub fn standard() -> Self {
        let mut board = ChessBoard::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (file, kind) in back_rank.into_iter().enumerate() {
                board.place(Position::new(file as u8, color.home_rank()), Piece::new(color, kind));
                board.place(
                    Position::new(file as u8, color.pawn_start_rank()),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        board
    }

    /// Queen on h7 backed by the king on g6 against a bare king on h8,
    /// Black to move and mated.
    pub fn checkmate_scenario() -> Self {
        let mut board = ChessBoard::new();
        board.place(Position::new(6, 5), Piece::new(Color::White, PieceKind::King));
        board.place(Position::new(7, 6), Piece::new(Color::White, PieceKind::Queen));
        board.place(Position::new(7, 7), Piece::new(Color::Black, PieceKind::King));
        board.active_color = Color::Black;
        board
    }
}

fn parse_piece_code(code: &str) -> Result<Piece, ParseError> {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Piece::from_char(c).ok_or_else(|| ParseError::UnexpectedPieceCode(code.to_string())),
        _ => Err(ParseError::UnexpectedPieceCode(code.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::sq;
    use super::*;

    #[test]
    fn test_standard_layout_matches_standard_board() {
        let board = ChessBoard::from_layout(&STANDARD_LAYOUT).unwrap();
        assert_eq!(board, ChessBoard::standard());
        assert_eq!(board.get(sq("d1")), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(board.get(sq("e8")), Some(Piece::new(Color::Black, PieceKind::King)));
        assert_eq!(board.active_color, Color::White);
    }

    #[test]
    fn test_black_perspective_layout() {
        let black_view = layout_for_perspective(&STANDARD_LAYOUT, Color::Black);
        // Black sees its own pieces at the bottom, king on the left of the queen
        assert_eq!(black_view[7], ["r", "n", "b", "k", "q", "b", "n", "r"]);
        assert_eq!(black_view[0][0], "R");

        let board = ChessBoard::from_layout_for_perspective(&black_view, Color::Black).unwrap();
        assert_eq!(board, ChessBoard::standard());
        assert_eq!(layout_for_perspective(&black_view, Color::Black), STANDARD_LAYOUT);
    }

    #[test]
    fn test_unknown_piece_code() {
        let mut layout = STANDARD_LAYOUT;
        layout[4][4] = "X";
        assert_eq!(
            ChessBoard::from_layout(&layout),
            Err(ParseError::UnexpectedPieceCode("X".to_string()))
        );
        layout[4][4] = "Kn";
        assert!(ChessBoard::from_layout(&layout).is_err());
    }

    #[test]
    fn test_checkmate_scenario_setup() {
        let board = ChessBoard::checkmate_scenario();
        assert_eq!(board.pieces().count(), 3);
        assert_eq!(board.active_color, Color::Black);
        assert_eq!(board.to_fen(), "7k/7Q/6K1/8/8/8/8/8 b - - 0 1");
    }
}
