use super::model::{Color, Move, Position};
use thiserror::Error;

/// Failures of board operations. Apart from the executor's rejections these
/// indicate a defect in earlier move generation or execution.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error("no {0} king on the board")]
    MissingKing(Color),
    #[error("illegal move {0}")]
    IllegalMove(Move),
    #[error("move {0} is not for the side to move")]
    OutOfTurn(Move),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square `{0}`")]
    BadSquare(String),
    #[error("invalid move `{0}`")]
    BadMove(String),
    #[error("unexpected piece code `{0}`")]
    UnexpectedPieceCode(String),
    #[error("invalid FEN string: {0}")]
    BadFen(String),
}
