use crate::chess_board::{BoardError, ChessBoard, Color, Move};
use crate::engines::ChessEngine;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Upper bound (exclusive) of the random amount added to every score.
pub const JITTER: f32 = 0.2;

/// Looks one move ahead: material won by a move minus the most valuable
/// piece the opponent can take back in reply.
pub struct GreedyEngine {
    rng: Pcg64,
}

impl GreedyEngine {
    /// Seeded engines break ties reproducibly, `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        GreedyEngine { rng }
    }

    /// Capture value of `mv` minus the best capture value among the replies.
    /// The move is simulated as a plain relocation and reverted afterwards.
    pub fn evaluate_move(board: &mut ChessBoard, mv: Move) -> Result<i32, BoardError> {
        let mover = board.get(mv.from).ok_or(BoardError::EmptySquare(mv.from))?.color;
        let simulation = board.simulate(mv.from, mv.to)?;
        let gain = simulation.captured().map_or(0, |piece| piece.kind.capture_value());
        let reply = Self::best_reply_capture(board, mover.opposite());
        board.revert(simulation);
        Ok(gain - reply?)
    }

    fn best_reply_capture(board: &mut ChessBoard, color: Color) -> Result<i32, BoardError> {
        let mut best = 0;
        for reply in board.all_legal_moves(color)? {
            if let Some(target) = board.get(reply.to) {
                best = best.max(target.kind.capture_value());
            }
        }
        Ok(best)
    }
}

impl ChessEngine for GreedyEngine {
    fn name(&self) -> &str {
        "Chic Greedy Engine"
    }

    fn score_move(&mut self, board: &mut ChessBoard, mv: Move) -> Result<f32, BoardError> {
        let score = Self::evaluate_move(board, mv)?;
        Ok(score as f32 + self.rng.gen_range(0.0..JITTER))
    }
}
