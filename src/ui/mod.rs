use crate::chess_board::{ChessBoard, Color, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Move,
    Capture,
}

/// A destination of the selected piece as the view should mark it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub position: Position,
    pub kind: HighlightKind,
}

impl Highlight {
    /// Marks `position` as a capture when an enemy piece stands on it.
    pub fn for_destination(board: &ChessBoard, position: Position) -> Self {
        let kind = if board.is_empty(position) {
            HighlightKind::Move
        } else {
            HighlightKind::Capture
        };
        Highlight { position, kind }
    }
}

/// Maps view cells, counted in columns and rows from the top-left corner of
/// the viewer's screen, to board positions and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective {
    viewer: Color,
}

impl Perspective {
    pub fn new(viewer: Color) -> Self {
        Perspective { viewer }
    }

    pub fn viewer(&self) -> Color {
        self.viewer
    }

    pub fn to_position(&self, column: u8, row: u8) -> Option<Position> {
        if column > 7 || row > 7 {
            return None;
        }
        Some(match self.viewer {
            Color::White => Position::new(column, 7 - row),
            Color::Black => Position::new(7 - column, row),
        })
    }

    pub fn to_cell(&self, pos: Position) -> (u8, u8) {
        match self.viewer {
            Color::White => (pos.file(), 7 - pos.rank()),
            Color::Black => (7 - pos.file(), pos.rank()),
        }
    }
}

/// Draws the board from `viewer`'s side. Empty move destinations show a dot,
/// capture targets are bracketed.
pub fn render_board(board: &ChessBoard, viewer: Color, highlights: &[Highlight]) -> String {
    let perspective = Perspective::new(viewer);
    let files: String = (0..8u8)
        .map(|column| {
            let file = perspective.to_position(column, 0).map_or(0, |p| p.file());
            format!("   {}", (b'a' + file) as char)
        })
        .collect();

    let mut board_representation = String::new();
    board_representation.push_str(&format!(" {}  \n", files));
    board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

    for row in 0..8u8 {
        let rank_label = perspective.to_position(0, row).map_or(0, |p| p.rank()) + 1;
        board_representation.push_str(&format!("{} │", rank_label));
        for column in 0..8u8 {
            let Some(pos) = perspective.to_position(column, row) else {
                continue;
            };
            let piece = board.get(pos).map_or(' ', |p| p.to_char());
            let cell = match highlights.iter().find(|h| h.position == pos).map(|h| h.kind) {
                Some(HighlightKind::Move) => " · ".to_string(),
                Some(HighlightKind::Capture) => format!("[{}]", piece),
                None => format!(" {} ", piece),
            };
            board_representation.push_str(&cell);
            board_representation.push('│');
        }
        board_representation.push_str(&format!(" {}\n", rank_label));

        if row < 7 {
            board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
        }
    }

    board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
    board_representation.push_str(&format!(" {}  \n", files));

    board_representation
}
