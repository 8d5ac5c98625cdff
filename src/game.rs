use std::fmt;

use crate::board::Board;
use crate::types::{Color, GameState, Move, Outcome, Position, WinReason};

pub const PLAYER: u8 = 1;
pub const BOT: u8 = 2;

/// Rejection for an action that cannot be taken in the current state. None
/// of these mutate anything; the caller keeps its state and reports or
/// recovers as it sees fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The selected cell does not hold one of the player's pieces.
    InvalidSelection,
    /// The destination is not among the legal moves for the selection.
    IllegalMove,
    /// It is not that side's turn, or the game is already over.
    OutOfTurn,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidSelection => "selected cell holds no piece of the player's color",
            Self::IllegalMove => "destination is not a legal move for the selection",
            Self::OutOfTurn => "it is not that side's turn",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ActionError {}

/// Picks the bot's reply from the current board, or `None` when the bot has
/// no legal move. Mutable because implementations may carry RNG state.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    cell: Position,
    moves: Vec<Move>,
}

/// One game of checkers as an immutable value: every transition borrows the
/// current state and returns the next one, so a rejected action can never
/// corrupt what the caller holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Option<Color>,
    outcome: Outcome,
    selection: Option<Selection>,
    last_move: Option<Move>,
}

impl Game {
    /// Starting position, player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Some(Color::Player),
            outcome: Outcome::Ongoing,
            selection: None,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Option<Color> {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn selected(&self) -> Option<Position> {
        self.selection.as_ref().map(|s| s.cell)
    }

    /// Legal moves for the current selection; empty when nothing is selected.
    pub fn pending_moves(&self) -> &[Move] {
        match &self.selection {
            Some(sel) => &sel.moves,
            None => &[],
        }
    }

    /// Selects one of the player's pieces and computes its legal moves.
    /// Valid only while the player is to move.
    pub fn select_cell(&self, cell: Position) -> Result<Game, ActionError> {
        self.require_turn(Color::Player)?;
        match self.board.get(cell) {
            Some(piece) if piece.color == Color::Player => {
                let mut next = self.clone();
                next.selection = Some(Selection {
                    cell,
                    moves: self.board.legal_moves(cell),
                });
                Ok(next)
            }
            _ => Err(ActionError::InvalidSelection),
        }
    }

    /// Drops the current selection. This is the documented recovery for
    /// `InvalidSelection`: clicking an empty or enemy cell deselects.
    pub fn clear_selection(&self) -> Game {
        let mut next = self.clone();
        next.selection = None;
        next
    }

    /// Plays the human move `from -> to`. Succeeds only when `from` is the
    /// current selection and `to` matches one of its pending moves, which is
    /// how a simple move gets refused while a capture is mandatory.
    pub fn attempt_move(&self, from: Position, to: Position) -> Result<Game, ActionError> {
        self.require_turn(Color::Player)?;
        let mv = self
            .selection
            .as_ref()
            .filter(|sel| sel.cell == from)
            .and_then(|sel| sel.moves.iter().find(|m| m.to == to))
            .ok_or(ActionError::IllegalMove)?;
        Ok(self.advance(mv.clone()))
    }

    /// Plays a fully specified move for `color`, re-validating it against the
    /// generator. Used for the bot's reply: a selector bug cannot smuggle an
    /// illegal move onto the board.
    pub fn play(&self, color: Color, mv: &Move) -> Result<Game, ActionError> {
        self.require_turn(color)?;
        match self.board.get(mv.from) {
            Some(piece) if piece.color == color => {}
            _ => return Err(ActionError::IllegalMove),
        }
        if !self.board.legal_moves(mv.from).contains(mv) {
            return Err(ActionError::IllegalMove);
        }
        Ok(self.advance(mv.clone()))
    }

    fn require_turn(&self, color: Color) -> Result<(), ActionError> {
        if self.turn == Some(color) {
            Ok(())
        } else {
            Err(ActionError::OutOfTurn)
        }
    }

    fn advance(&self, mv: Move) -> Game {
        let mut board = self.board;
        board.apply_move(&mv);
        let outcome = evaluate_outcome(&board);
        let turn = if outcome.is_over() {
            None
        } else {
            self.turn.map(Color::opponent)
        };
        Game {
            board,
            turn,
            outcome,
            selection: None,
            last_move: Some(mv),
        }
    }

    /// Snapshot for the presentation layer.
    pub fn to_game_state(&self) -> GameState {
        let (player_count, bot_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: match self.turn {
                Some(Color::Player) => PLAYER,
                Some(Color::Bot) => BOT,
                None => 0,
            },
            player_count,
            bot_count,
            is_game_over: self.outcome.is_over(),
            outcome: self.outcome,
            selected: self.selected(),
            moves: self.pending_moves().to_vec(),
            last_move: self.last_move.clone(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal evaluation, run after every applied move. A side with no pieces
/// loses outright; otherwise a side whose every piece is stuck loses by "no
/// moves". No-pieces is checked for both sides before no-moves.
pub fn evaluate_outcome(board: &Board) -> Outcome {
    for color in [Color::Player, Color::Bot] {
        if board.pieces(color).is_empty() {
            return Outcome::Won {
                winner: color.opponent(),
                reason: WinReason::NoPieces,
            };
        }
    }
    for color in [Color::Player, Color::Bot] {
        let stuck = board
            .pieces(color)
            .iter()
            .all(|&(cell, _)| board.legal_moves(cell).is_empty());
        if stuck {
            return Outcome::Won {
                winner: color.opponent(),
                reason: WinReason::NoMoves,
            };
        }
    }
    Outcome::Ongoing
}
