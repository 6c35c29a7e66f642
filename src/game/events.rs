use crate::chess_board::{Color, Move, MoveResult, Piece, Position};
use std::fmt;

/// A completed move as reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub rook_move: Option<(Position, Position)>,
    pub promoted: Option<Piece>,
}

impl MoveRecord {
    pub fn color(&self) -> Color {
        self.piece.color
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.rook_move.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promoted.is_some()
    }
}

impl From<MoveResult> for MoveRecord {
    fn from(result: MoveResult) -> Self {
        MoveRecord {
            mv: result.mv,
            piece: result.piece,
            captured: result.captured,
            rook_move: result.rook_move,
            promoted: result.promoted,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece.kind, self.mv)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {}", captured.kind)?;
        }
        if self.is_castle() {
            write!(f, " (castles)")?;
        }
        if self.is_promotion() {
            write!(f, " (promotes)")?;
        }
        Ok(())
    }
}

/// Why a click was ignored. None of these change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptySquare(Position),
    NotYourPiece(Position),
    IllegalDestination { from: Position, to: Position },
    /// A capture is armed and the click was neither its target nor another own piece.
    CapturePending { target: Position, clicked: Position },
    EngineToMove(Position),
    GameOver(Position),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptySquare(pos) => write!(f, "nothing to select on {}", pos),
            Rejection::NotYourPiece(pos) => write!(f, "the piece on {} belongs to the opponent", pos),
            Rejection::IllegalDestination { from, to } => write!(f, "{} cannot move to {}", from, to),
            Rejection::CapturePending { target, clicked } => {
                write!(f, "click {} again to capture, {} ignored", target, clicked)
            }
            Rejection::EngineToMove(pos) => write!(f, "the engine is to move, {} ignored", pos),
            Rejection::GameOver(pos) => write!(f, "the game is over, {} ignored", pos),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SelectionChanged(Option<Position>),
    CaptureArmed { from: Position, to: Position },
    MoveCompleted(MoveRecord),
    TurnChanged(Color),
    CheckmateDetected(Color),
    /// The side to move is not in check but has no legal move.
    NoLegalMoves(Color),
    PiecesThreatened(Vec<Position>),
    SearchProgress { evaluated: usize, total: usize },
    Rejected(Rejection),
}

impl GameEvent {
    /// Diagnostics only interesting while debugging.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            GameEvent::Rejected(_) | GameEvent::SearchProgress { .. } | GameEvent::SelectionChanged(_)
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::SelectionChanged(Some(pos)) => write!(f, "selected {}", pos),
            GameEvent::SelectionChanged(None) => write!(f, "selection cleared"),
            GameEvent::CaptureArmed { from, to } => write!(f, "capture {}x{} armed, click {} again", from, to, to),
            GameEvent::MoveCompleted(record) => write!(f, "{} played {}", record.color(), record),
            GameEvent::TurnChanged(color) => write!(f, "{} to move", color),
            GameEvent::CheckmateDetected(color) => write!(f, "{} is checkmated", color),
            GameEvent::NoLegalMoves(color) => write!(f, "{} has no legal moves", color),
            GameEvent::PiecesThreatened(positions) => {
                let squares: Vec<String> = positions.iter().map(|p| p.as_algebraic()).collect();
                write!(f, "threatened: {}", squares.join(" "))
            }
            GameEvent::SearchProgress { evaluated, total } => write!(f, "searching {}/{}", evaluated, total),
            GameEvent::Rejected(rejection) => write!(f, "rejected: {}", rejection),
        }
    }
}
