use crate::chess_board::{BoardError, ChessBoard, Color, Move, Position};
use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::{ChessEngine, SearchStatus, SearchTask};
use crate::ui::Highlight;
use circular_buffer::CircularBuffer;

pub mod captured;
pub mod events;
pub use captured::CapturedPool;
pub use events::{GameEvent, MoveRecord, Rejection};

/// Number of completed moves kept in [`Game::history`].
pub const HISTORY_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opponent {
    #[default]
    Engine,
    /// Both sides are played by clicks.
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub human_color: Color,
    pub opponent: Opponent,
    /// Candidates the engine scores per [`Game::poll_engine`] call.
    pub search_batch: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human_color: Color::White,
            opponent: Opponent::Engine,
            search_batch: 5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    Selected(Position),
    /// A capture waiting for a second click on its target.
    PendingCaptureConfirm { selected: Position, target: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate(Color),
    /// The named side is to move, not in check, and cannot move.
    NoLegalMoves(Color),
}

/// Drives a game from clicks: selection, capture confirmation, move
/// execution and the engine's replies. Observers learn about everything that
/// happens through [`Game::drain_events`].
pub struct Game {
    board: ChessBoard,
    config: GameConfig,
    state: SelectionState,
    engine: GreedyEngine,
    search: Option<SearchTask>,
    outcome: Option<Outcome>,
    events: Vec<GameEvent>,
    history: CircularBuffer<HISTORY_LEN, MoveRecord>,
    captured: CapturedPool,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut game = Game {
            board: ChessBoard::standard(),
            config,
            state: SelectionState::NoSelection,
            engine: GreedyEngine::new(config.seed),
            search: None,
            outcome: None,
            events: Vec::new(),
            history: CircularBuffer::new(),
            captured: CapturedPool::new(),
        };
        game.announce_human_turn();
        game
    }

    /// Starts from an arbitrary position. Both kings must be on the board.
    pub fn with_board(board: ChessBoard, config: GameConfig) -> Result<Self, BoardError> {
        board.find_king_position(Color::White)?;
        board.find_king_position(Color::Black)?;
        let mut game = Game::new(config);
        game.board = board;
        game.events.clear();
        game.evaluate_position()?;
        if game.outcome.is_none() {
            game.announce_human_turn();
        }
        Ok(game)
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn captured(&self) -> &CapturedPool {
        &self.captured
    }

    /// The most recent moves, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.history.iter()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    fn is_engine_color(&self, color: Color) -> bool {
        self.config.opponent == Opponent::Engine && color != self.config.human_color
    }

    /// Whether the engine has a move to make.
    pub fn is_engine_turn(&self) -> bool {
        self.outcome.is_none() && self.is_engine_color(self.board.active_color)
    }

    /// Legal destinations of the piece on `pos`, classified for highlighting.
    pub fn legal_destinations(&mut self, pos: Position) -> Result<Vec<Highlight>, BoardError> {
        let Some(piece) = self.board.get(pos) else {
            return Ok(Vec::new());
        };
        let destinations = self.board.legal_moves(pos, piece.color)?;
        Ok(destinations
            .into_iter()
            .map(|to| Highlight::for_destination(&self.board, to))
            .collect())
    }

    /// Highlights for whatever is currently selected.
    pub fn highlights(&mut self) -> Result<Vec<Highlight>, BoardError> {
        match self.state {
            SelectionState::NoSelection => Ok(Vec::new()),
            SelectionState::Selected(selected) | SelectionState::PendingCaptureConfirm { selected, .. } => {
                self.legal_destinations(selected)
            }
        }
    }

    /// Handles a click on `clicked`. Clicks that cannot be acted on leave the
    /// game untouched and are reported as [`GameEvent::Rejected`]; errors are
    /// reserved for a corrupted board.
    pub fn on_position_clicked(&mut self, clicked: Position) -> Result<(), BoardError> {
        if self.outcome.is_some() {
            self.reject(Rejection::GameOver(clicked));
            return Ok(());
        }
        if self.is_engine_turn() {
            self.reject(Rejection::EngineToMove(clicked));
            return Ok(());
        }

        let mover = self.board.active_color;
        let owns_clicked = self.board.get(clicked).is_some_and(|p| p.color == mover);

        match self.state {
            SelectionState::NoSelection => {
                if owns_clicked {
                    self.select(Some(clicked));
                } else if self.board.is_empty(clicked) {
                    self.reject(Rejection::EmptySquare(clicked));
                } else {
                    self.reject(Rejection::NotYourPiece(clicked));
                }
            }
            SelectionState::Selected(selected) => {
                if owns_clicked {
                    if clicked != selected {
                        self.select(Some(clicked));
                    }
                } else if self.board.legal_moves(selected, mover)?.contains(&clicked) {
                    if self.board.is_empty(clicked) {
                        self.select(None);
                        self.play(Move::new(selected, clicked))?;
                    } else {
                        self.state = SelectionState::PendingCaptureConfirm {
                            selected,
                            target: clicked,
                        };
                        self.events.push(GameEvent::CaptureArmed {
                            from: selected,
                            to: clicked,
                        });
                    }
                } else {
                    self.reject(Rejection::IllegalDestination {
                        from: selected,
                        to: clicked,
                    });
                }
            }
            SelectionState::PendingCaptureConfirm { selected, target } => {
                if clicked == target {
                    self.select(None);
                    self.play(Move::new(selected, target))?;
                } else if owns_clicked {
                    self.select(Some(clicked));
                } else {
                    self.reject(Rejection::CapturePending { target, clicked });
                }
            }
        }
        Ok(())
    }

    /// Scores the next batch of engine candidates and plays the engine's move
    /// once all are scored. Returns whether the engine still has work to do.
    pub fn poll_engine(&mut self) -> Result<bool, BoardError> {
        if !self.is_engine_turn() {
            self.search = None;
            return Ok(false);
        }
        let mut task = match self.search.take() {
            Some(task) => task,
            None => SearchTask::new(&mut self.board)?,
        };

        match task.step(&mut self.engine, &mut self.board, self.config.search_batch)? {
            SearchStatus::InProgress { evaluated, total } => {
                self.events.push(GameEvent::SearchProgress { evaluated, total });
                self.search = Some(task);
                Ok(true)
            }
            SearchStatus::Finished(Some(mv)) => {
                self.play(mv)?;
                Ok(false)
            }
            SearchStatus::Finished(None) => {
                // Only reachable on a board that was edited behind the game's back.
                self.evaluate_position()?;
                Ok(false)
            }
        }
    }

    /// Runs the engine's search to completion.
    pub fn run_engine(&mut self) -> Result<(), BoardError> {
        while self.poll_engine()? {}
        Ok(())
    }

    fn select(&mut self, selection: Option<Position>) {
        self.state = match selection {
            Some(pos) => SelectionState::Selected(pos),
            None => SelectionState::NoSelection,
        };
        self.events.push(GameEvent::SelectionChanged(selection));
    }

    fn reject(&mut self, rejection: Rejection) {
        self.events.push(GameEvent::Rejected(rejection));
    }

    fn play(&mut self, mv: Move) -> Result<(), BoardError> {
        let record = MoveRecord::from(self.board.execute(mv)?);
        if let Some(captured) = record.captured {
            self.captured.record(captured);
        }
        self.history.push_back(record);
        self.state = SelectionState::NoSelection;
        self.search = None;

        self.events.push(GameEvent::MoveCompleted(record));
        self.events.push(GameEvent::TurnChanged(self.board.active_color));
        self.evaluate_position()?;
        if self.outcome.is_none() {
            self.announce_human_turn();
        }
        Ok(())
    }

    /// Looks for checkmate on both sides and for a side to move that is stuck.
    fn evaluate_position(&mut self) -> Result<(), BoardError> {
        for color in [self.board.active_color, self.board.active_color.opposite()] {
            if self.board.is_checkmate(color)? {
                self.outcome = Some(Outcome::Checkmate(color));
                self.events.push(GameEvent::CheckmateDetected(color));
                return Ok(());
            }
        }
        let to_move = self.board.active_color;
        if !self.board.has_legal_moves(to_move)? {
            self.outcome = Some(Outcome::NoLegalMoves(to_move));
            self.events.push(GameEvent::NoLegalMoves(to_move));
        }
        Ok(())
    }

    fn announce_human_turn(&mut self) {
        let color = self.board.active_color;
        if self.is_engine_color(color) {
            return;
        }
        let threatened = self.board.threatened_pieces(color);
        if !threatened.is_empty() {
            self.events.push(GameEvent::PiecesThreatened(threatened));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::test_utils::sq;
    use crate::chess_board::{Piece, PieceKind};
    use crate::ui::HighlightKind;

    fn hotseat() -> GameConfig {
        GameConfig {
            opponent: Opponent::Human,
            ..GameConfig::default()
        }
    }

    fn game_from_fen(fen: &str, config: GameConfig) -> Game {
        let mut game = Game::with_board(ChessBoard::from_fen(fen).unwrap(), config).unwrap();
        game.drain_events();
        game
    }

    fn click(game: &mut Game, square: &str) {
        game.on_position_clicked(sq(square)).unwrap();
    }

    #[test]
    fn test_select_and_move() {
        let mut game = Game::new(hotseat());
        click(&mut game, "e2");
        assert_eq!(game.state(), SelectionState::Selected(sq("e2")));
        click(&mut game, "e4");
        assert_eq!(game.state(), SelectionState::NoSelection);
        assert_eq!(game.board().active_color, Color::Black);
        assert_eq!(game.board().get(sq("e4")).map(|p| p.kind), Some(PieceKind::Pawn));

        let events = game.drain_events();
        assert_eq!(events[0], GameEvent::SelectionChanged(Some(sq("e2"))));
        assert_eq!(events[1], GameEvent::SelectionChanged(None));
        assert!(matches!(events[2], GameEvent::MoveCompleted(record) if record.mv.as_algebraic() == "e2e4"));
        assert_eq!(events[3], GameEvent::TurnChanged(Color::Black));
        assert_eq!(game.history().count(), 1);
    }

    #[test]
    fn test_rejected_clicks_change_nothing() {
        let mut game = Game::new(hotseat());
        let board = game.board().clone();

        click(&mut game, "e4");
        click(&mut game, "e7");
        assert_eq!(game.state(), SelectionState::NoSelection);

        click(&mut game, "e2");
        click(&mut game, "e5");
        assert_eq!(game.state(), SelectionState::Selected(sq("e2")));
        assert_eq!(game.board(), &board);

        let events = game.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Rejected(Rejection::EmptySquare(sq("e4"))),
                GameEvent::Rejected(Rejection::NotYourPiece(sq("e7"))),
                GameEvent::SelectionChanged(Some(sq("e2"))),
                GameEvent::Rejected(Rejection::IllegalDestination { from: sq("e2"), to: sq("e5") }),
            ]
        );
    }

    #[test]
    fn test_reselect_own_piece() {
        let mut game = Game::new(hotseat());
        click(&mut game, "e2");
        click(&mut game, "g1");
        assert_eq!(game.state(), SelectionState::Selected(sq("g1")));
        click(&mut game, "f3");
        assert_eq!(game.board().get(sq("f3")).map(|p| p.kind), Some(PieceKind::Knight));
    }

    #[test]
    fn test_capture_needs_confirmation() {
        let mut game = game_from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", hotseat());
        click(&mut game, "e4");
        click(&mut game, "d5");
        assert_eq!(
            game.state(),
            SelectionState::PendingCaptureConfirm {
                selected: sq("e4"),
                target: sq("d5")
            }
        );
        // nothing moved yet
        assert_eq!(game.board().get(sq("e4")).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(game.board().active_color, Color::White);

        // a legal but different destination does not disarm or play
        click(&mut game, "e5");
        assert!(matches!(game.state(), SelectionState::PendingCaptureConfirm { .. }));
        assert!(game.board().is_empty(sq("e5")));

        click(&mut game, "d5");
        assert_eq!(game.state(), SelectionState::NoSelection);
        assert_eq!(game.board().get(sq("d5")).map(|p| p.color), Some(Color::White));
        assert_eq!(game.captured().lost_by(Color::Black), &[Piece::new(Color::Black, PieceKind::Pawn)]);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::CaptureArmed { from: sq("e4"), to: sq("d5") }));
        assert!(events.contains(&GameEvent::Rejected(Rejection::CapturePending {
            target: sq("d5"),
            clicked: sq("e5")
        })));
    }

    #[test]
    fn test_pending_capture_reselect() {
        let mut game = game_from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", hotseat());
        click(&mut game, "e4");
        click(&mut game, "d5");
        click(&mut game, "e1");
        assert_eq!(game.state(), SelectionState::Selected(sq("e1")));
    }

    #[test]
    fn test_legal_destinations() {
        let mut game = game_from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", hotseat());
        let mut highlights = game.legal_destinations(sq("e4")).unwrap();
        highlights.sort_by_key(|h| h.position);
        assert_eq!(
            highlights,
            vec![
                Highlight { position: sq("d5"), kind: HighlightKind::Capture },
                Highlight { position: sq("e5"), kind: HighlightKind::Move },
            ]
        );
        assert!(game.legal_destinations(sq("a1")).unwrap().is_empty());
        assert!(game.highlights().unwrap().is_empty());
        click(&mut game, "e4");
        assert_eq!(game.highlights().unwrap().len(), 2);
    }

    #[test]
    fn test_checkmate_ends_the_game() {
        let mut game = game_from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", hotseat());
        click(&mut game, "a1");
        click(&mut game, "a8");
        assert_eq!(game.outcome(), Some(Outcome::Checkmate(Color::Black)));
        assert!(game.drain_events().contains(&GameEvent::CheckmateDetected(Color::Black)));

        click(&mut game, "g8");
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Rejected(Rejection::GameOver(sq("g8")))]
        );
    }

    #[test]
    fn test_checkmate_scenario_is_over_from_the_start() {
        let mut game = Game::with_board(ChessBoard::checkmate_scenario(), GameConfig::default()).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Checkmate(Color::Black)));
        assert_eq!(game.drain_events(), vec![GameEvent::CheckmateDetected(Color::Black)]);
        assert!(!game.is_engine_turn());
        assert_eq!(game.poll_engine(), Ok(false));
    }

    #[test]
    fn test_missing_king_is_refused() {
        let board = ChessBoard::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            Game::with_board(board, GameConfig::default()).err(),
            Some(BoardError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn test_engine_replies() {
        let config = GameConfig {
            seed: Some(7),
            search_batch: 3,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        click(&mut game, "e2");
        click(&mut game, "e4");
        assert!(game.is_engine_turn());

        // clicks are refused while the engine is to move
        click(&mut game, "d2");
        assert_eq!(game.state(), SelectionState::NoSelection);

        let mut polls = 0;
        while game.poll_engine().unwrap() {
            polls += 1;
        }
        // 20 candidates in batches of 3
        assert_eq!(polls, 6);
        assert_eq!(game.board().active_color, Color::White);
        assert!(!game.is_engine_turn());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Rejected(Rejection::EngineToMove(sq("d2")))));
        assert!(events.contains(&GameEvent::SearchProgress { evaluated: 18, total: 20 }));
        let engine_move = events.iter().rev().find_map(|e| match e {
            GameEvent::MoveCompleted(record) => Some(*record),
            _ => None,
        });
        assert_eq!(engine_move.map(|r| r.color()), Some(Color::Black));
        assert_eq!(game.history().count(), 2);
    }

    #[test]
    fn test_engine_opens_when_human_plays_black() {
        let config = GameConfig {
            human_color: Color::Black,
            seed: Some(1),
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        assert!(game.is_engine_turn());
        game.run_engine().unwrap();
        assert_eq!(game.board().active_color, Color::Black);
        assert_eq!(game.board().pieces_of(Color::White).count(), 16);
    }

    #[test]
    fn test_engine_takes_hanging_rook() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        let mut game = game_from_fen("4k3/8/8/8/8/1q6/8/R3K3 w - - 0 1", config);
        click(&mut game, "a1");
        click(&mut game, "a2");
        game.run_engine().unwrap();
        // the black queen captures the rook that just moved next to it
        let queen = game.board().get(sq("a2")).unwrap();
        assert_eq!((queen.color, queen.kind), (Color::Black, PieceKind::Queen));
        assert_eq!(game.captured().material_lost(Color::White), 5);
    }

    #[test]
    fn test_no_legal_moves_ends_the_game() {
        let mut game = game_from_fen("k7/8/1QK5/8/8/8/8/8 w - - 0 1", hotseat());
        click(&mut game, "c6");
        click(&mut game, "c7");
        assert_eq!(game.outcome(), Some(Outcome::NoLegalMoves(Color::Black)));
        assert!(!game.board().is_in_check(Color::Black).unwrap());
        let events = game.drain_events();
        assert_eq!(
            &events[events.len() - 2..],
            &[GameEvent::TurnChanged(Color::Black), GameEvent::NoLegalMoves(Color::Black)]
        );

        let board = game.board().clone();
        click(&mut game, "a8");
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Rejected(Rejection::GameOver(sq("a8")))]
        );
        assert_eq!(game.board(), &board);
        assert_eq!(game.state(), SelectionState::NoSelection);
    }

    #[test]
    fn test_game_starting_without_legal_moves_is_over() {
        let board = ChessBoard::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut game = Game::with_board(board, GameConfig::default()).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::NoLegalMoves(Color::Black)));
        assert_eq!(game.drain_events(), vec![GameEvent::NoLegalMoves(Color::Black)]);
        // Black is the engine's side but the game is already decided
        assert!(!game.is_engine_turn());
        assert_eq!(game.poll_engine(), Ok(false));
        assert_eq!(game.board().active_color, Color::Black);
    }

    #[test]
    fn test_engine_without_moves_ends_the_game() {
        let mut game = Game::new(GameConfig::default());
        game.board = ChessBoard::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        game.drain_events();
        assert!(game.is_engine_turn());
        assert_eq!(game.poll_engine(), Ok(false));
        assert_eq!(game.outcome(), Some(Outcome::NoLegalMoves(Color::Black)));
        assert_eq!(game.drain_events(), vec![GameEvent::NoLegalMoves(Color::Black)]);
    }

    #[test]
    fn test_threatened_pieces_announced_on_human_turn() {
        let mut game = game_from_fen("4k3/8/8/3p4/4N3/8/8/4K3 b - - 0 1", hotseat());
        click(&mut game, "e8");
        click(&mut game, "e7");
        let events = game.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::PiecesThreatened(vec![sq("e4")])));
    }

    #[test]
    fn test_history_keeps_last_moves() {
        let mut game = Game::new(hotseat());
        for _ in 0..(HISTORY_LEN / 4 + 1) {
            for square in ["g1", "f3", "g8", "f6", "f3", "g1", "f6", "g8"] {
                click(&mut game, square);
            }
        }
        assert_eq!(game.history().count(), HISTORY_LEN);
        assert!(game.history().all(|r| r.piece.kind == PieceKind::Knight));
    }
}
