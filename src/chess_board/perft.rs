use super::error::BoardError;
use super::{ChessBoard, Move};

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(board: &ChessBoard, depth: u8) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut node_count = 0u64;
    let mut scratch = board.clone();
    for mv in scratch.all_legal_moves(board.active_color)? {
        let mut new_board = board.clone();
        new_board.execute(mv)?;
        node_count += perft(&new_board, depth - 1)?;
    }
    Ok(node_count)
}

/// Node counts below each legal move of the side to move, in board order.
pub fn divide(board: &ChessBoard, depth: u8) -> Result<Vec<(Move, u64)>, BoardError> {
    let mut scratch = board.clone();
    let mut counts = Vec::new();
    for mv in scratch.all_legal_moves(board.active_color)? {
        let mut new_board = board.clone();
        new_board.execute(mv)?;
        counts.push((mv, perft(&new_board, depth.saturating_sub(1))?));
    }
    Ok(counts)
}
