use super::{ChessBoard, Color, Piece, PieceKind, Position};

const KNIGHT_MOVES: [(i8, i8); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
const KING_MOVES: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Whether king move generation may offer castling. Anything probing the
/// safety of a square must pass `Exclude`, castling generation itself probes
/// square safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Castling {
    Include,
    Exclude,
}

impl ChessBoard {
    /// Pseudo-legal destinations of the piece on `pos`: they respect movement
    /// shape and occupancy but may leave the mover's king in check.
    pub fn pseudo_moves(&self, pos: Position, castling: Castling) -> Vec<Position> {
        match self.get(pos) {
            Some(piece) => match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(pos, piece.color),
                PieceKind::Knight => self.generate_moves_from_directions(pos, piece.color, &KNIGHT_MOVES),
                PieceKind::Bishop => self.generate_sliding_moves(pos, piece.color, &BISHOP_DIRECTIONS),
                PieceKind::Rook => self.generate_sliding_moves(pos, piece.color, &ROOK_DIRECTIONS),
                PieceKind::Queen => {
                    let mut moves = self.generate_sliding_moves(pos, piece.color, &ROOK_DIRECTIONS);
                    moves.extend(self.generate_sliding_moves(pos, piece.color, &BISHOP_DIRECTIONS));
                    moves
                }
                PieceKind::King => self.generate_king_moves(pos, piece, castling),
            },
            None => Vec::new(),
        }
    }

    fn generate_pawn_moves(&self, pos: Position, color: Color) -> Vec<Position> {
        let mut moves = Vec::new();
        let forward = color.forward();

        if let Some(one_step) = pos.offset(0, forward) {
            if self.is_empty(one_step) {
                moves.push(one_step);

                // Double move from start position
                if pos.rank() == color.pawn_start_rank() {
                    if let Some(two_step) = pos.offset(0, 2 * forward) {
                        if self.is_empty(two_step) {
                            moves.push(two_step);
                        }
                    }
                }
            }
        }

        // Capture diagonally
        for target in Self::pawn_attacks(pos, color) {
            if self.holds_enemy_of(target, color) {
                moves.push(target);
            }
        }

        moves
    }

    /// The two diagonal squares a pawn of `color` on `pos` attacks, whether or
    /// not anything stands there.
    pub(crate) fn pawn_attacks(pos: Position, color: Color) -> impl Iterator<Item = Position> {
        let forward = color.forward();
        [-1, 1].into_iter().filter_map(move |df| pos.offset(df, forward))
    }

    fn generate_sliding_moves(&self, pos: Position, color: Color, directions: &[(i8, i8)]) -> Vec<Position> {
        let mut moves = Vec::new();

        for &(df, dr) in directions {
            let mut current = pos;
            while let Some(next) = current.offset(df, dr) {
                match self.get(next) {
                    None => moves.push(next),
                    Some(blocker) => {
                        if blocker.color != color {
                            moves.push(next);
                        }
                        break; // Block sliding
                    }
                }
                current = next;
            }
        }

        moves
    }

    fn generate_moves_from_directions(&self, pos: Position, color: Color, offsets: &[(i8, i8)]) -> Vec<Position> {
        offsets
            .iter()
            .filter_map(|&(df, dr)| pos.offset(df, dr))
            .filter(|&target| self.get(target).map_or(true, |p| p.color != color))
            .collect()
    }

    /// Generate king moves (including castling when asked for).
    fn generate_king_moves(&self, pos: Position, king: Piece, castling: Castling) -> Vec<Position> {
        let mut moves = self.generate_moves_from_directions(pos, king.color, &KING_MOVES);

        if castling == Castling::Exclude || king.has_moved {
            return moves;
        }
        let rank = king.color.home_rank();
        if pos != Position::new(4, rank) || !self.is_square_safe(pos, king.color) {
            return moves;
        }

        // Kingside: f and g empty, rook on h, king crosses f and lands on g.
        if self.has_unmoved_rook(Position::new(7, rank), king.color)
            && self.path_is_clear(rank, &[5, 6])
            && self.path_is_safe(rank, &[5, 6], king.color)
        {
            moves.push(Position::new(6, rank));
        }

        // Queenside: b, c and d empty, rook on a, king crosses d and lands on c.
        if self.has_unmoved_rook(Position::new(0, rank), king.color)
            && self.path_is_clear(rank, &[1, 2, 3])
            && self.path_is_safe(rank, &[3, 2], king.color)
        {
            moves.push(Position::new(2, rank));
        }

        moves
    }

    fn has_unmoved_rook(&self, pos: Position, color: Color) -> bool {
        matches!(
            self.get(pos),
            Some(Piece { kind: PieceKind::Rook, color: c, has_moved: false }) if c == color
        )
    }

    fn path_is_clear(&self, rank: u8, files: &[u8]) -> bool {
        files.iter().all(|&file| self.is_empty(Position::new(file, rank)))
    }

    fn path_is_safe(&self, rank: u8, files: &[u8], color: Color) -> bool {
        files.iter().all(|&file| self.is_square_safe(Position::new(file, rank), color))
    }

    fn holds_enemy_of(&self, pos: Position, color: Color) -> bool {
        self.get(pos).is_some_and(|p| p.color != color)
    }
}
