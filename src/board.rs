use crate::types::{Color, Move, Piece, Position};

pub const BOARD_SIZE: usize = 8;
const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Diagonal directions, upward pair first. Men use the half pointing at the
/// enemy back row; kings use all four.
const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn directions(piece: Piece) -> &'static [(i32, i32)] {
    if piece.king {
        &DIAGONALS
    } else {
        match piece.color {
            Color::Player => &DIAGONALS[..2],
            Color::Bot => &DIAGONALS[2..],
        }
    }
}

/// Checkers board state. Light cells stay empty for the whole game; only the
/// move generator and `apply_move` decide legality, the accessors do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_CELLS],
}

impl Board {
    /// Creates the classic starting layout: bot men on the dark cells of
    /// rows 0-2, player men on rows 5-7, rows 3-4 empty.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if row < 3 {
                    board.set(pos, Some(Piece::man(Color::Bot)));
                } else if row > 4 {
                    board.set(pos, Some(Piece::man(Color::Player)));
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_CELLS],
        }
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[index(pos)]
    }

    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.cells[index(pos)] = piece;
    }

    /// Every cell holding a piece of the given color, row-major order.
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        let mut out = Vec::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(piece) = cell
                && piece.color == color
            {
                out.push((position(i), *piece));
            }
        }
        out
    }

    /// Returns `(player_count, bot_count)`.
    pub fn count(&self) -> (u8, u8) {
        let mut player = 0;
        let mut bot = 0;
        for piece in self.cells.iter().flatten() {
            match piece.color {
                Color::Player => player += 1,
                Color::Bot => bot += 1,
            }
        }
        (player, bot)
    }

    /// Legal moves for the piece at `origin`, or empty if there is none.
    ///
    /// Capture chains are maximal (a jump must be extended while another jump
    /// is available from the landing cell) and mandatory: when any chain
    /// exists for this piece, simple moves are not returned at all. Ordering
    /// follows direction iteration order and carries no preference.
    pub fn legal_moves(&self, origin: Position) -> Vec<Move> {
        let Some(piece) = self.get(origin) else {
            return Vec::new();
        };

        let chains = self.capture_chains(origin, piece);
        if !chains.is_empty() {
            return chains
                .into_iter()
                .map(|(to, captured)| Move {
                    from: origin,
                    to,
                    captured,
                })
                .collect();
        }

        let mut moves = Vec::new();
        for &(dr, dc) in directions(piece) {
            if let Some(to) = offset(origin, dr, dc)
                && self.get(to).is_none()
            {
                moves.push(Move {
                    from: origin,
                    to,
                    captured: Vec::new(),
                });
            }
        }
        moves
    }

    /// All maximal jump chains for `piece` standing at `from`, as
    /// `(destination, captured cells in jump order)`.
    ///
    /// Each candidate jump is simulated on a copy of the board so sibling
    /// branches never observe each other's removals. The piece keeps its
    /// direction set for the whole chain; crowning happens only when the
    /// chosen move is applied, so a man's chain ends on reaching the back
    /// row.
    fn capture_chains(&self, from: Position, piece: Piece) -> Vec<(Position, Vec<Position>)> {
        let mut chains = Vec::new();
        for &(dr, dc) in directions(piece) {
            let Some(over) = offset(from, dr, dc) else {
                continue;
            };
            let Some(landing) = offset(over, dr, dc) else {
                continue;
            };
            let jumped = match self.get(over) {
                Some(p) if p.color == piece.color.opponent() => over,
                _ => continue,
            };
            if self.get(landing).is_some() {
                continue;
            }

            let mut next = *self;
            next.set(from, None);
            next.set(jumped, None);
            next.set(landing, Some(piece));

            let continuations = next.capture_chains(landing, piece);
            if continuations.is_empty() {
                chains.push((landing, vec![jumped]));
            } else {
                for (to, tail) in continuations {
                    let mut captured = Vec::with_capacity(tail.len() + 1);
                    captured.push(jumped);
                    captured.extend(tail);
                    chains.push((to, captured));
                }
            }
        }
        chains
    }

    /// Applies a move produced by `legal_moves`: relocates the piece, clears
    /// the captured cells, and crowns on landing at the far row.
    pub fn apply_move(&mut self, mv: &Move) {
        let Some(mut piece) = self.get(mv.from) else {
            return;
        };
        self.set(mv.from, None);
        for &cell in &mv.captured {
            self.set(cell, None);
        }
        if mv.to.row == piece.color.crowning_row() {
            piece.king = true;
        }
        self.set(mv.to, Some(piece));
    }

    /// Converts board to 64 row-major cell codes:
    /// 0=empty, 1=player man, 2=bot man, 3=player king, 4=bot king.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut out = [0u8; NUM_CELLS];
        for (i, cell) in self.cells.iter().enumerate() {
            out[i] = match cell {
                None => 0,
                Some(Piece { color: Color::Player, king: false }) => 1,
                Some(Piece { color: Color::Bot, king: false }) => 2,
                Some(Piece { color: Color::Player, king: true }) => 3,
                Some(Piece { color: Color::Bot, king: true }) => 4,
            };
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn index(pos: Position) -> usize {
    pos.row as usize * BOARD_SIZE + pos.col as usize
}

fn position(index: usize) -> Position {
    Position::new((index / BOARD_SIZE) as u8, (index % BOARD_SIZE) as u8)
}

fn offset(pos: Position, dr: i32, dc: i32) -> Option<Position> {
    let row = pos.row as i32 + dr;
    let col = pos.col as i32 + dc;
    let range = 0..BOARD_SIZE as i32;
    if range.contains(&row) && range.contains(&col) {
        Some(Position::new(row as u8, col as u8))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn board_with(pieces: &[(u8, u8, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.set(at(row, col), Some(piece));
        }
        board
    }

    #[test]
    fn t01_starting_layout_is_twelve_men_per_side_on_dark_cells() {
        let board = Board::new();

        assert_eq!(board.count(), (12, 12));
        for (pos, piece) in board
            .pieces(Color::Player)
            .into_iter()
            .chain(board.pieces(Color::Bot))
        {
            assert!(pos.is_dark(), "piece on light cell {pos:?}");
            assert!(!piece.king);
        }
        for col in 0..8 {
            assert_eq!(board.get(at(3, col)), None);
            assert_eq!(board.get(at(4, col)), None);
        }
    }

    #[test]
    fn t02_edge_man_has_single_opening_move() {
        let board = Board::new();

        let moves = board.legal_moves(at(5, 0));

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, at(4, 1));
        assert!(moves[0].captured.is_empty());
    }

    #[test]
    fn t03_interior_man_has_two_opening_moves() {
        let board = Board::new();

        let moves = board.legal_moves(at(5, 2));
        let targets: Vec<Position> = moves.iter().map(|m| m.to).collect();

        assert_eq!(targets, vec![at(4, 1), at(4, 3)]);
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn empty_cell_has_no_moves() {
        let board = Board::new();

        assert!(board.legal_moves(at(4, 1)).is_empty());
    }

    #[test]
    fn t04_capture_is_mandatory_for_the_piece() {
        // (5,2) could step to (4,3), but the jump over (4,1) must be taken.
        let board = board_with(&[
            (5, 2, Piece::man(Color::Player)),
            (4, 1, Piece::man(Color::Bot)),
        ]);

        let moves = board.legal_moves(at(5, 2));

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, at(3, 0));
        assert_eq!(moves[0].captured, vec![at(4, 1)]);
    }

    #[test]
    fn t05_double_jump_returns_full_chain_not_prefix() {
        let board = board_with(&[
            (5, 2, Piece::man(Color::Player)),
            (4, 3, Piece::man(Color::Bot)),
            (2, 3, Piece::man(Color::Bot)),
        ]);

        let moves = board.legal_moves(at(5, 2));

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, at(1, 2));
        assert_eq!(moves[0].captured, vec![at(4, 3), at(2, 3)]);
    }

    #[test]
    fn t06_forked_jumps_stay_isolated_branches() {
        // Lone piece with enemies on both forward diagonals; two one-jump
        // chains, neither branch seeing the other's removal.
        let board = board_with(&[
            (3, 3, Piece::man(Color::Player)),
            (2, 2, Piece::man(Color::Bot)),
            (2, 4, Piece::man(Color::Bot)),
        ]);

        let mut moves = board.legal_moves(at(3, 3));
        moves.sort_by_key(|m| m.to.col);

        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].to, at(1, 1));
        assert_eq!(moves[0].captured, vec![at(2, 2)]);
        assert_eq!(moves[1].to, at(1, 5));
        assert_eq!(moves[1].captured, vec![at(2, 4)]);
    }

    #[test]
    fn jump_blocked_by_occupied_landing_cell_falls_back_to_steps() {
        let board = board_with(&[
            (5, 2, Piece::man(Color::Player)),
            (4, 1, Piece::man(Color::Bot)),
            (3, 0, Piece::man(Color::Bot)),
        ]);

        let moves = board.legal_moves(at(5, 2));

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, at(4, 3));
        assert!(!moves[0].is_capture());
    }

    #[test]
    fn man_never_moves_backward() {
        let board = board_with(&[(4, 3, Piece::man(Color::Bot))]);

        let targets: Vec<Position> = board
            .legal_moves(at(4, 3))
            .into_iter()
            .map(|m| m.to)
            .collect();

        assert_eq!(targets, vec![at(5, 2), at(5, 4)]);
    }

    #[test]
    fn king_moves_in_all_four_directions() {
        let board = board_with(&[(4, 3, Piece::king(Color::Player))]);

        let targets: Vec<Position> = board
            .legal_moves(at(4, 3))
            .into_iter()
            .map(|m| m.to)
            .collect();

        assert_eq!(targets, vec![at(3, 2), at(3, 4), at(5, 2), at(5, 4)]);
    }

    #[test]
    fn king_chain_may_turn_back_through_its_own_wake() {
        // King jumps down-right then up-right; second leg only exists
        // because kings keep all four directions mid-chain.
        let board = board_with(&[
            (2, 1, Piece::king(Color::Player)),
            (3, 2, Piece::man(Color::Bot)),
            (3, 4, Piece::man(Color::Bot)),
        ]);

        let moves = board.legal_moves(at(2, 1));

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, at(2, 5));
        assert_eq!(moves[0].captured, vec![at(3, 2), at(3, 4)]);
    }

    #[test]
    fn t07_legal_moves_is_idempotent() {
        let board = Board::new();

        assert_eq!(board.legal_moves(at(5, 4)), board.legal_moves(at(5, 4)));
    }

    #[test]
    fn generation_leaves_board_unchanged() {
        let board = board_with(&[
            (5, 2, Piece::man(Color::Player)),
            (4, 3, Piece::man(Color::Bot)),
            (2, 3, Piece::man(Color::Bot)),
        ]);
        let before = board;

        let _ = board.legal_moves(at(5, 2));

        assert_eq!(board, before);
    }

    #[test]
    fn t08_apply_move_relocates_and_clears_captures() {
        let mut board = board_with(&[
            (5, 2, Piece::man(Color::Player)),
            (4, 3, Piece::man(Color::Bot)),
            (2, 3, Piece::man(Color::Bot)),
        ]);
        let mv = board.legal_moves(at(5, 2)).remove(0);

        board.apply_move(&mv);

        assert_eq!(board.get(at(5, 2)), None);
        assert_eq!(board.get(at(4, 3)), None);
        assert_eq!(board.get(at(2, 3)), None);
        assert_eq!(board.get(at(1, 2)), Some(Piece::man(Color::Player)));
        assert_eq!(board.count(), (1, 0));
    }

    #[test]
    fn t09_player_man_is_crowned_on_reaching_row_zero() {
        let mut board = board_with(&[(1, 2, Piece::man(Color::Player))]);
        let mv = board
            .legal_moves(at(1, 2))
            .into_iter()
            .find(|m| m.to == at(0, 1))
            .unwrap();

        board.apply_move(&mv);

        assert_eq!(board.get(at(0, 1)), Some(Piece::king(Color::Player)));
    }

    #[test]
    fn t10_bot_man_is_crowned_on_reaching_row_seven() {
        let mut board = board_with(&[(6, 3, Piece::man(Color::Bot))]);
        let mv = board
            .legal_moves(at(6, 3))
            .into_iter()
            .find(|m| m.to == at(7, 2))
            .unwrap();

        board.apply_move(&mv);

        assert_eq!(board.get(at(7, 2)), Some(Piece::king(Color::Bot)));
    }

    #[test]
    fn move_short_of_the_far_row_does_not_crown() {
        let mut board = board_with(&[(2, 1, Piece::man(Color::Player))]);
        let mv = board.legal_moves(at(2, 1)).remove(0);

        board.apply_move(&mv);

        assert_eq!(board.get(mv.to), Some(Piece::man(Color::Player)));
    }

    #[test]
    fn board_copies_mutate_independently() {
        let original = Board::new();
        let mut copy = original;

        copy.set(at(5, 0), None);

        assert_eq!(original.get(at(5, 0)), Some(Piece::man(Color::Player)));
        assert_ne!(original, copy);
    }

    #[test]
    fn to_array_codes_every_piece_kind() {
        let board = board_with(&[
            (0, 1, Piece::man(Color::Player)),
            (0, 3, Piece::man(Color::Bot)),
            (0, 5, Piece::king(Color::Player)),
            (0, 7, Piece::king(Color::Bot)),
        ]);

        let cells = board.to_array();

        assert_eq!(&cells[..8], &[0, 1, 0, 2, 0, 3, 0, 4]);
        assert!(cells[8..].iter().all(|&c| c == 0));
    }
}
