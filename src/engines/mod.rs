use crate::chess_board::{BoardError, ChessBoard, Color, Move};

pub mod engine_greedy;

pub type ProgressCallback = fn(evaluated: usize, total: usize);

pub trait ChessEngine {
    fn name(&self) -> &str;

    /// Scores `mv` for the side playing it, higher is better. The board must
    /// be back in its original state when this returns.
    fn score_move(&mut self, board: &mut ChessBoard, mv: Move) -> Result<f32, BoardError>;

    /// Runs a whole search for the side to move, reporting progress after
    /// every `batch` candidates.
    fn find_best_move(
        &mut self,
        board: &mut ChessBoard,
        batch: usize,
        progress_callback: ProgressCallback,
    ) -> Result<Option<Move>, BoardError> {
        let mut task = SearchTask::new(board)?;
        loop {
            match task.step(self, board, batch)? {
                SearchStatus::InProgress { evaluated, total } => progress_callback(evaluated, total),
                SearchStatus::Finished(best_move) => return Ok(best_move),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStatus {
    InProgress { evaluated: usize, total: usize },
    Finished(Option<Move>),
}

/// A search over the legal moves of one position that can be advanced a few
/// candidates at a time. Between steps the board is left exactly as found.
#[derive(Debug, Clone)]
pub struct SearchTask {
    color: Color,
    candidates: Vec<Move>,
    evaluated: usize,
    best: Option<(Move, f32)>,
}

impl SearchTask {
    pub fn new(board: &mut ChessBoard) -> Result<Self, BoardError> {
        let color = board.active_color;
        Ok(SearchTask {
            color,
            candidates: board.all_legal_moves(color)?,
            evaluated: 0,
            best: None,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    /// Scores up to `batch` further candidates. The first candidate reaching
    /// the highest score wins.
    pub fn step<E: ChessEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        board: &mut ChessBoard,
        batch: usize,
    ) -> Result<SearchStatus, BoardError> {
        let end = (self.evaluated + batch.max(1)).min(self.candidates.len());
        for &mv in &self.candidates[self.evaluated..end] {
            let score = engine.score_move(board, mv)?;
            if self.best.map_or(true, |(_, best_score)| score > best_score) {
                self.best = Some((mv, score));
            }
        }
        self.evaluated = end;

        if self.evaluated == self.candidates.len() {
            Ok(SearchStatus::Finished(self.best.map(|(mv, _)| mv)))
        } else {
            Ok(SearchStatus::InProgress {
                evaluated: self.evaluated,
                total: self.candidates.len(),
            })
        }
    }
}
