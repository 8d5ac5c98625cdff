use serde::Serialize;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Playable squares are the dark ones.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

/// Side to move. `Player` is the human side starting at the bottom
/// (rows 5-7) and moving up; `Bot` starts at the top and moves down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    Player,
    Bot,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Bot,
            Self::Bot => Self::Player,
        }
    }

    /// The far row where a man of this color is crowned.
    pub fn crowning_row(self) -> u8 {
        match self {
            Self::Player => 0,
            Self::Bot => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub fn king(color: Color) -> Self {
        Self { color, king: true }
    }
}

/// One legal move: origin, destination, and the enemy squares removed
/// along the way.
///
/// Contract:
/// - `captured` empty: a simple diagonal step.
/// - `captured` non-empty: a jump chain; cells are listed in jump order,
///   which is also the order the presentation layer fades them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Position>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    NoPieces,
    NoMoves,
}

/// Result of terminal evaluation after every applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Won { winner: Color, reason: WinReason },
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 row-major cell codes: 0=empty, 1=player man, 2=bot man,
    /// 3=player king, 4=bot king.
    pub board: Vec<u8>,
    /// 1 while the player is to move, 2 for the bot, 0 once the game is over.
    pub current_player: u8,
    pub player_count: u8,
    pub bot_count: u8,
    pub is_game_over: bool,
    pub outcome: Outcome,
    /// Contract:
    /// - `selected` is the player's currently selected cell, if any.
    /// - `moves` are the legal moves for that selection; empty when nothing
    ///   is selected.
    pub selected: Option<Position>,
    pub moves: Vec<Move>,
    /// The most recently applied move, for animation. `None` until the first
    /// move of a game.
    pub last_move: Option<Move>,
}
