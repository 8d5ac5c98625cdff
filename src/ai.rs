use rand::Rng;
use rand::seq::IndexedRandom;

use crate::board::Board;
use crate::game::MoveSelector;
use crate::types::{Color, Move};

/// Probability of playing a random quiet move instead of an advancing one.
/// Keeps the bot from walking the same lane every game and occasionally
/// sacrifices a piece.
const NOISE_RATE: f64 = 0.2;

/// Greedy move policy: always jump, jump as much as possible, otherwise lean
/// toward the crowning row. Never looks past the immediately available moves.
pub struct HeuristicSelector<R> {
    rng: R,
}

impl<R: Rng> HeuristicSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send + Sync> MoveSelector for HeuristicSelector<R> {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let mut captures = Vec::new();
        let mut quiet = Vec::new();
        for (cell, _) in board.pieces(color) {
            for mv in board.legal_moves(cell) {
                if mv.is_capture() {
                    captures.push(mv);
                } else {
                    quiet.push(mv);
                }
            }
        }

        if !captures.is_empty() {
            let longest = captures.iter().map(|m| m.captured.len()).max()?;
            let best: Vec<Move> = captures
                .into_iter()
                .filter(|m| m.captured.len() == longest)
                .collect();
            return best.choose(&mut self.rng).cloned();
        }

        if quiet.is_empty() {
            return None;
        }
        if self.rng.random_bool(NOISE_RATE) {
            return quiet.choose(&mut self.rng).cloned();
        }

        quiet.sort_by_key(|m| std::cmp::Reverse(advancement(color, m)));
        let cutoff = (quiet.len() / 3).max(1);
        quiet[..cutoff].choose(&mut self.rng).cloned()
    }
}

/// Rows gained toward the crowning row; the bot advances by moving down.
fn advancement(color: Color, mv: &Move) -> u8 {
    match color {
        Color::Bot => mv.to.row,
        Color::Player => 7 - mv.to.row,
    }
}
