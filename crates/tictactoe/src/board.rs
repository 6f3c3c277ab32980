//! Tic-tac-toe board model.
//!
//! A cell, once marked, never reverts to empty within a game. The only
//! mutation path is [`Board::mark_square`] / [`Board::try_mark`].

use handplay_core::{HandplayError, Result};
use std::fmt;

/// A mark on the board. In a session the player draws `O` and the
/// computer draws `X`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark.
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A board square, indexed 0-8 row-major.
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// All squares in scan order.
    pub const ALL: [Square; 9] = [
        Square(0),
        Square(1),
        Square(2),
        Square(3),
        Square(4),
        Square(5),
        Square(6),
        Square(7),
        Square(8),
    ];

    /// `None` if either coordinate is outside 0..3.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < 3 && col < 3).then(|| Self((row * 3 + col) as u8))
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < 9).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the row (0-2).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> usize {
        self.index() % 3
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Derived game status.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    InProgress,
    Won(Mark),
    Tie,
}

/// 3x3 grid plus a terminal flag.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board {
    cells: [Option<Mark>; 9],
    game_over: bool,
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse three rows of `X`, `O` and blanks (`' '`, `'.'` or `'_'`).
    /// Intended for tests and fixtures. The terminal flag is latched the
    /// same way placement latches it: on a completed line only. A full
    /// board with no line still needs [`Board::check_end`].
    pub fn from_rows(rows: [&str; 3]) -> Result<Self> {
        let mut cells = [None; 9];
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != 3 {
                return Err(HandplayError::Parse {
                    kind: "board row",
                    input: row.to_string(),
                });
            }
            for (c, ch) in chars.into_iter().enumerate() {
                cells[r * 3 + c] = match ch {
                    'X' | 'x' => Some(Mark::X),
                    'O' | 'o' => Some(Mark::O),
                    ' ' | '.' | '_' => None,
                    _ => {
                        return Err(HandplayError::Parse {
                            kind: "board cell",
                            input: ch.to_string(),
                        })
                    }
                };
            }
        }
        let mut board = Self {
            cells,
            game_over: false,
        };
        board.game_over = board.winner().is_some();
        Ok(board)
    }

    /// Get the mark at a square, if any.
    pub fn get(&self, square: Square) -> Option<Mark> {
        self.cells[square.index()]
    }

    /// Get the mark at `(row, col)`; out-of-range reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        Square::new(row, col).and_then(|sq| self.get(sq))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Empty squares in scan order.
    pub fn empty_squares(&self) -> Vec<Square> {
        Square::ALL
            .iter()
            .copied()
            .filter(|&sq| self.is_empty(sq))
            .collect()
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Terminal flag. Set by a winning placement or by [`Board::check_end`].
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Place `mark` at `(row, col)`.
    ///
    /// Returns false, without touching the board, if the square is occupied,
    /// out of range, or the game is already over. On success a completed
    /// line sets the terminal flag; the return value is true either way.
    pub fn mark_square(&mut self, mark: Mark, row: usize, col: usize) -> bool {
        Square::new(row, col)
            .ok_or(HandplayError::OutOfBounds { row, col })
            .and_then(|sq| self.try_mark(mark, sq))
            .is_ok()
    }

    /// Like [`Board::mark_square`] but reports why a move was rejected.
    pub fn try_mark(&mut self, mark: Mark, square: Square) -> Result<()> {
        if self.game_over {
            return Err(HandplayError::GameOver);
        }
        if !self.is_empty(square) {
            return Err(HandplayError::Occupied {
                row: square.row(),
                col: square.col(),
            });
        }

        self.cells[square.index()] = Some(mark);
        if self.winner().is_some() {
            self.game_over = true;
        }
        Ok(())
    }

    /// The mark owning a completed line, if any. Pure function of the cells.
    pub fn winner(&self) -> Option<Mark> {
        self.winning_line()
            .and_then(|line| self.get(line[0]))
    }

    /// The first completed line in row, column, diagonal order.
    pub fn winning_line(&self) -> Option<[Square; 3]> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a]?;
            (self.cells[b] == Some(mark) && self.cells[c] == Some(mark))
                .then(|| [Square(a as u8), Square(b as u8), Square(c as u8)])
        })
    }

    /// Check if the board is full (draw if no winner).
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Win, tie or still in progress. A full board with no line is a tie,
    /// which the placement-time win check alone cannot see.
    pub fn status(&self) -> BoardStatus {
        match self.winner() {
            Some(mark) => BoardStatus::Won(mark),
            None if self.is_full() => BoardStatus::Tie,
            None => BoardStatus::InProgress,
        }
    }

    /// Recompute the status and latch the terminal flag on a win or tie.
    pub fn check_end(&mut self) -> BoardStatus {
        let status = self.status();
        if status != BoardStatus::InProgress {
            self.game_over = true;
        }
        status
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.cells[row * 3 + col] {
                    Some(mark) => write!(f, " {} ", mark)?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.empty_squares().len(), 9);
        assert_eq!(board.status(), BoardStatus::InProgress);
        assert!(!board.is_game_over());
    }

    #[test]
    fn test_mark_square() {
        let mut board = Board::new();
        assert!(board.mark_square(Mark::O, 1, 1));
        assert_eq!(board.cell(1, 1), Some(Mark::O));
        assert_eq!(board.empty_squares().len(), 8);
    }

    #[test]
    fn test_mark_occupied_fails_without_mutation() {
        let mut board = Board::new();
        board.mark_square(Mark::O, 0, 0);
        let before = board.clone();

        assert!(!board.mark_square(Mark::X, 0, 0));
        assert_eq!(board, before);
        assert_eq!(
            board.try_mark(Mark::X, Square::new(0, 0).unwrap()),
            Err(HandplayError::Occupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_mark_out_of_bounds_is_rejected() {
        let mut board = Board::new();
        assert!(!board.mark_square(Mark::O, 3, 0));
        assert!(!board.mark_square(Mark::O, 0, 7));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_winning_move_sets_terminal_flag() {
        let mut board = Board::from_rows(["XX ", "OO ", "   "]).unwrap();
        assert!(!board.is_game_over());
        assert!(board.mark_square(Mark::X, 0, 2));
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut board = Board::from_rows(["XXX", "OO ", "   "]).unwrap();
        assert!(board.is_game_over());
        assert!(!board.mark_square(Mark::O, 1, 2));
        assert_eq!(
            board.try_mark(Mark::O, Square::new(1, 2).unwrap()),
            Err(HandplayError::GameOver)
        );
    }

    #[test]
    fn test_all_lines_detected() {
        for line in LINES {
            let mut board = Board::new();
            for idx in line {
                board.cells[idx] = Some(Mark::O);
            }
            assert_eq!(board.winner(), Some(Mark::O), "line {:?}", line);
            let squares = board.winning_line().unwrap();
            assert_eq!(squares.map(Square::index), line);
        }
    }

    #[test]
    fn test_tie_needs_separate_check() {
        // X O X
        // X O O
        // O X X
        let mut board = Board::from_rows(["XO ", "XOO", "OXX"]).unwrap();
        assert!(board.mark_square(Mark::X, 0, 2));
        // No line completed: the placement check leaves the flag clear.
        assert!(!board.is_game_over());
        assert_eq!(board.check_end(), BoardStatus::Tie);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_from_rows_latches_like_placement() {
        let mut played = Board::new();
        for (mark, row, col) in [
            (Mark::X, 0, 0),
            (Mark::O, 0, 1),
            (Mark::X, 0, 2),
            (Mark::X, 1, 0),
            (Mark::O, 1, 1),
            (Mark::O, 1, 2),
            (Mark::O, 2, 0),
            (Mark::X, 2, 1),
            (Mark::X, 2, 2),
        ] {
            assert!(played.mark_square(mark, row, col));
        }
        let mut parsed = Board::from_rows(["XOX", "XOO", "OXX"]).unwrap();
        assert_eq!(parsed, played);
        assert!(!parsed.is_game_over());
        assert_eq!(parsed.check_end(), BoardStatus::Tie);
        assert!(parsed.is_game_over());

        assert!(Board::from_rows(["XXX", "OO ", "   "]).unwrap().is_game_over());
    }

    #[test]
    fn test_winner_is_idempotent() {
        let board = Board::from_rows(["OX ", "XO ", "  O"]).unwrap();
        let first = board.winner();
        for _ in 0..5 {
            assert_eq!(board.winner(), first);
        }
        assert_eq!(first, Some(Mark::O));
    }

    #[test]
    fn test_from_rows_rejects_garbage() {
        assert!(Board::from_rows(["XX", "   ", "   "]).is_err());
        assert!(Board::from_rows(["XQ ", "   ", "   "]).is_err());
    }

    #[test]
    fn test_square_coordinates() {
        let sq = Square::new(2, 1).unwrap();
        assert_eq!(sq.index(), 7);
        assert_eq!((sq.row(), sq.col()), (2, 1));
        assert!(Square::new(3, 0).is_none());
        assert!(Square::from_index(9).is_none());
        assert_eq!(sq.to_string(), "(2, 1)");
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(["X  ", " O ", "   "]).unwrap();
        let display = board.to_string();
        assert!(display.contains('X'));
        assert!(display.contains('O'));
    }
}
