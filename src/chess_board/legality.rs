use super::error::BoardError;
use super::move_generation::Castling;
use super::{ChessBoard, Color, Move, MoveFlags, Piece, PieceKind, Position};

/// A relocation applied by [`ChessBoard::simulate`] that must be handed back
/// to [`ChessBoard::revert`] before anything else looks at the board.
#[must_use = "a simulated move must be reverted"]
#[derive(Debug)]
pub struct Simulation {
    from: Position,
    to: Position,
    moved: Piece,
    captured: Option<Piece>,
}

impl Simulation {
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl ChessBoard {
    /// Relocates the piece on `from` to `to` without touching any other state.
    pub fn simulate(&mut self, from: Position, to: Position) -> Result<Simulation, BoardError> {
        let moved = self.get(from).ok_or(BoardError::EmptySquare(from))?;
        let captured = self.move_piece(from, to)?;
        Ok(Simulation {
            from,
            to,
            moved,
            captured,
        })
    }

    /// Undoes a [`Simulation`]; the board is back to its exact prior state.
    pub fn revert(&mut self, simulation: Simulation) {
        self.place(simulation.from, simulation.moved);
        match simulation.captured {
            Some(captured) => self.place(simulation.to, captured),
            None => {
                self.remove(simulation.to);
            }
        }
    }

    /// Whether moving the piece on `from` to `to` keeps its own king out of
    /// check. Does not check that the piece can move that way.
    pub fn is_move_legal(&mut self, from: Position, to: Position) -> Result<bool, BoardError> {
        let simulation = self.simulate(from, to)?;
        let in_check = self.is_in_check(simulation.moved.color);
        self.revert(simulation);
        Ok(!in_check?)
    }

    /// Destinations of the `color` piece on `pos` that do not leave its king in check.
    pub fn legal_moves(&mut self, pos: Position, color: Color) -> Result<Vec<Position>, BoardError> {
        match self.get(pos) {
            Some(piece) if piece.color == color => {}
            _ => return Ok(Vec::new()),
        }
        let mut legal_moves = Vec::new();
        for target in self.pseudo_moves(pos, Castling::Include) {
            if self.is_move_legal(pos, target)? {
                legal_moves.push(target);
            }
        }
        Ok(legal_moves)
    }

    /// Every legal move of `color`, in board order.
    pub fn all_legal_moves(&mut self, color: Color) -> Result<Vec<Move>, BoardError> {
        let origins: Vec<Position> = self.pieces_of(color).map(|(pos, _)| pos).collect();
        let mut moves = Vec::new();
        for from in origins {
            for to in self.legal_moves(from, color)? {
                moves.push(self.classify_move(from, to));
            }
        }
        Ok(moves)
    }

    pub fn has_legal_moves(&mut self, color: Color) -> Result<bool, BoardError> {
        let origins: Vec<Position> = self.pieces_of(color).map(|(pos, _)| pos).collect();
        for from in origins {
            if !self.legal_moves(from, color)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Builds the [`Move`] for `from` to `to` with castling and promotion flags
    /// derived from the piece standing on `from`.
    pub fn classify_move(&self, from: Position, to: Position) -> Move {
        let mut flags = MoveFlags::default();
        if let Some(piece) = self.get(from) {
            match piece.kind {
                PieceKind::King if from.rank() == to.rank() => {
                    let displacement = to.file() as i8 - from.file() as i8;
                    flags.castle_kingside = displacement == 2;
                    flags.castle_queenside = displacement == -2;
                }
                PieceKind::Pawn => flags.promotion = to.rank() == piece.color.promotion_rank(),
                _ => {}
            }
        }
        Move::new(from, to).with_flags(flags)
    }
}
