use super::error::ParseError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pawns start on; the only rank a double step is allowed from.
    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank a pawn promotes on.
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank the king and rooks start on.
    pub fn home_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material gained by capturing a piece of this kind. The king's value only
    /// matters defensively, a king is never a legal capture target.
    pub fn capture_value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "P"),
            PieceKind::Knight => write!(f, "N"),
            PieceKind::Bishop => write!(f, "B"),
            PieceKind::Rook => write!(f, "R"),
            PieceKind::Queen => write!(f, "Q"),
            PieceKind::King => write!(f, "K"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Uppercase letters are White, lowercase Black.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self::new(color, kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

/// A square on the board, `file` and `rank` both in `0..8`. (0, 0) is a1.
/// Outside the crate a position can only be built through checked
/// constructors, so every `Position` indexes the board safely.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    pub(crate) fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "position ({file}, {rank}) is off the board");
        Self { file, rank }
    }

    pub fn try_new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then(|| Self::new(file, rank))
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Returns the square `(df, dr)` away, or `None` past the board edge.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, ParseError> {
        let bytes = algebraic.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::BadSquare(algebraic.to_string()));
        }
        match (bytes[0], bytes[1]) {
            (f @ b'a'..=b'h', r @ b'1'..=b'8') => Ok(Self::new(f - b'a', r - b'1')),
            _ => Err(ParseError::BadSquare(algebraic.to_string())),
        }
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.file, self.rank)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct MoveFlags {
    pub castle_kingside: bool,
    pub castle_queenside: bool,
    pub promotion: bool,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub flags: MoveFlags,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            flags: MoveFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_castle(&self) -> bool {
        self.flags.castle_kingside || self.flags.castle_queenside
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic());
        if self.flags.promotion {
            base_move + "q"
        } else {
            base_move
        }
    }

    /// Parses `e2e4`; a trailing `q` is accepted and ignored since pawns
    /// always promote to a queen. Flags are filled in by the board.
    pub fn from_algebraic(algebraic: &str) -> Result<Self, ParseError> {
        if algebraic.len() < 4 || algebraic.len() > 5 || !algebraic.is_ascii() {
            return Err(ParseError::BadMove(algebraic.to_string()));
        }
        if !matches!(algebraic.as_bytes().get(4), None | Some(b'q' | b'Q')) {
            return Err(ParseError::BadMove(algebraic.to_string()));
        }
        let from = Position::from_algebraic(&algebraic[0..2])?;
        let to = Position::from_algebraic(&algebraic[2..4])?;
        Ok(Self::new(from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

pub fn to_algebraic_square(file: u8, rank: u8) -> String {
    let file = (b'a' + file) as char;
    let rank = (b'1' + rank) as char;
    format!("{}{}", file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convertion_method() {
        assert_eq!(Position::from_algebraic("b2"), Ok(Position::new(1, 1)));
        assert_eq!(Position::from_algebraic("h8").unwrap().as_algebraic(), "h8");
        assert_eq!(Move::from_algebraic("e2e4").unwrap().as_algebraic(), "e2e4");
        assert!(Position::from_algebraic("i1").is_err());
        assert!(Position::from_algebraic("a9").is_err());
        assert!(Move::from_algebraic("e2").is_err());
    }

    #[test]
    fn test_move_promotion_suffix() {
        assert_eq!(Move::from_algebraic("e7e8q").unwrap().as_algebraic(), "e7e8");
        assert!(Move::from_algebraic("e7e8Q").is_ok());
        assert_eq!(
            Move::from_algebraic("e2e4x"),
            Err(ParseError::BadMove("e2e4x".to_string()))
        );
        assert!(Move::from_algebraic("e7e8n").is_err());
    }

    #[test]
    fn test_position_checked_construction() {
        assert_eq!(Position::try_new(4, 3), Some(Position::from_algebraic("e4").unwrap()));
        assert_eq!(Position::try_new(8, 0), None);
        assert_eq!(Position::try_new(0, 8), None);
        let h8 = Position::try_new(7, 7).unwrap();
        assert_eq!((h8.file(), h8.rank()), (7, 7));
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 2), Some(Position::new(1, 2)));
        assert_eq!(Position::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn test_piece_codes() {
        let queen = Piece::from_char('q').unwrap();
        assert_eq!(queen.color, Color::Black);
        assert_eq!(queen.kind, PieceKind::Queen);
        assert!(!queen.has_moved);
        assert_eq!(queen.to_char(), 'q');
        assert_eq!(Piece::from_char('N').unwrap().to_char(), 'N');
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_color_ranks() {
        assert_eq!(Color::White.pawn_start_rank(), 1);
        assert_eq!(Color::Black.pawn_start_rank(), 6);
        assert_eq!(Color::White.promotion_rank(), 7);
        assert_eq!(Color::Black.promotion_rank(), 0);
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
