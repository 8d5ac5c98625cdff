//! WASM surface for the JS presentation layer.
//!
//! One global session holds the game and the bot's selector. The mutex
//! serializes every exported call, so a new selection can never interleave
//! with a move that is still being resolved; the JS side only decides *when*
//! to ask for the bot's reply.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::HeuristicSelector;
use crate::board::BOARD_SIZE;
use crate::game::{ActionError, Game, MoveSelector};
use crate::types::{Color, Position};

struct Session {
    game: Game,
    selector: HeuristicSelector<SmallRng>,
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| {
    Mutex::new(Session {
        game: Game::new(),
        selector: HeuristicSelector::new(SmallRng::seed_from_u64(clock_seed())),
    })
});

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9_7f4a_7c15)
}

fn session() -> Result<MutexGuard<'static, Session>, JsValue> {
    SESSION
        .lock()
        .map_err(|_| JsValue::from_str("game session is poisoned"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_cell(row: u8, col: u8) -> Result<Position, JsValue> {
    if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
        return Err(JsValue::from_str("row/col out of range"));
    }
    Ok(Position::new(row, col))
}

fn reject(err: ActionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Resets the session to the starting position and returns its state.
#[wasm_bindgen]
pub fn new_game() -> Result<JsValue, JsValue> {
    let mut s = session()?;
    s.game = Game::new();
    to_js(&s.game.to_game_state())
}

/// Current state snapshot without changing anything.
#[wasm_bindgen]
pub fn game_state() -> Result<JsValue, JsValue> {
    let s = session()?;
    to_js(&s.game.to_game_state())
}

/// Legal moves for a single cell, for hover previews.
#[wasm_bindgen]
pub fn legal_moves(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let cell = parse_cell(row, col)?;
    let s = session()?;
    to_js(&s.game.board().legal_moves(cell))
}

/// Selects one of the player's pieces. Clicking an empty or enemy cell
/// clears the selection instead; acting out of turn is an error.
#[wasm_bindgen]
pub fn select_cell(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let cell = parse_cell(row, col)?;
    let mut s = session()?;
    match s.game.select_cell(cell) {
        Ok(next) => s.game = next,
        Err(ActionError::InvalidSelection) => s.game = s.game.clear_selection(),
        Err(err) => return Err(reject(err)),
    }
    to_js(&s.game.to_game_state())
}

/// Plays the human move `from -> to` against the current selection.
#[wasm_bindgen]
pub fn attempt_move(
    from_row: u8,
    from_col: u8,
    to_row: u8,
    to_col: u8,
) -> Result<JsValue, JsValue> {
    let from = parse_cell(from_row, from_col)?;
    let to = parse_cell(to_row, to_col)?;
    let mut s = session()?;
    s.game = s.game.attempt_move(from, to).map_err(reject)?;
    to_js(&s.game.to_game_state())
}

/// Runs the bot's selector and applies its reply. Once the game is over the
/// state already carries the terminal outcome, so this just returns it.
#[wasm_bindgen]
pub fn bot_move() -> Result<JsValue, JsValue> {
    let mut s = session()?;
    let Session { game, selector } = &mut *s;
    match game.turn() {
        Some(Color::Bot) => {
            // The selector can only come up empty in a terminal position,
            // which the last evaluation has already recorded.
            if let Some(mv) = selector.select_move(game.board(), Color::Bot) {
                *game = game.play(Color::Bot, &mv).map_err(reject)?;
            }
        }
        Some(Color::Player) => return Err(reject(ActionError::OutOfTurn)),
        None => {}
    }
    to_js(&game.to_game_state())
}

/// Terminal evaluation of the current state.
#[wasm_bindgen]
pub fn outcome() -> Result<JsValue, JsValue> {
    let s = session()?;
    to_js(&s.game.outcome())
}
