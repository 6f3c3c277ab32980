//! Mapping pointer positions onto board squares.

use handplay_core::{HandplayError, Result};
use handplay_gesture::Point;
use handplay_tictactoe::Square;
use serde::{Deserialize, Serialize};

/// The square under a normalized camera position: `row = floor(y * 3)`,
/// `col = floor(x * 3)`. Positions outside `[0, 1)` map to nothing.
pub fn cell_at(point: Point) -> Option<Square> {
    grid_index(point.x)
        .zip(grid_index(point.y))
        .and_then(|(col, row)| Square::new(row, col))
}

fn grid_index(offset: f32) -> Option<usize> {
    if !offset.is_finite() || offset < 0.0 {
        return None;
    }
    let index = (offset * 3.0).floor();
    (index < 3.0).then_some(index as usize)
}

/// On-screen board rectangle for the mouse path, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenBoard {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
}

impl Default for ScreenBoard {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: 140.0,
        }
    }
}

impl ScreenBoard {
    pub fn new(origin_x: f32, origin_y: f32, cell_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size,
        }
    }

    pub fn width(&self) -> f32 {
        self.cell_size * 3.0
    }

    /// The square containing pixel `(x, y)`.
    pub fn locate(&self, x: f32, y: f32) -> Result<Square> {
        let rel_x = x - self.origin_x;
        let rel_y = y - self.origin_y;
        if self.cell_size <= 0.0 || rel_x < 0.0 || rel_y < 0.0 {
            return Err(HandplayError::OutOfBounds {
                row: usize::MAX,
                col: usize::MAX,
            });
        }
        let row = (rel_y / self.cell_size).floor() as usize;
        let col = (rel_x / self.cell_size).floor() as usize;
        Square::new(row, col).ok_or(HandplayError::OutOfBounds { row, col })
    }

    /// Pixel centre of a square.
    pub fn center(&self, square: Square) -> (f32, f32) {
        (
            self.origin_x + (square.col() as f32 + 0.5) * self.cell_size,
            self.origin_y + (square.row() as f32 + 0.5) * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_cell_at() {
        assert_eq!(cell_at(Point::new(0.0, 0.0)), Some(sq(0, 0)));
        assert_eq!(cell_at(Point::new(0.5, 0.5)), Some(sq(1, 1)));
        assert_eq!(cell_at(Point::new(0.9, 0.1)), Some(sq(0, 2)));
        assert_eq!(cell_at(Point::new(0.34, 0.99)), Some(sq(2, 1)));
    }

    #[test]
    fn test_cell_at_outside_frame() {
        assert_eq!(cell_at(Point::new(1.0, 0.5)), None);
        assert_eq!(cell_at(Point::new(0.5, -0.01)), None);
        assert_eq!(cell_at(Point::new(f32::NAN, 0.5)), None);
    }

    #[test]
    fn test_screen_board_locate() {
        let board = ScreenBoard::new(100.0, 50.0, 140.0);
        assert_eq!(board.locate(100.0, 50.0), Ok(sq(0, 0)));
        assert_eq!(board.locate(100.0 + 141.0, 50.0 + 281.0), Ok(sq(2, 1)));
        assert_eq!(
            board.locate(100.0 + 420.0, 60.0),
            Err(HandplayError::OutOfBounds { row: 0, col: 3 })
        );
        assert!(board.locate(99.0, 60.0).is_err());
    }

    #[test]
    fn test_center_round_trips() {
        let board = ScreenBoard::default();
        for square in Square::ALL {
            let (x, y) = board.center(square);
            assert_eq!(board.locate(x, y), Ok(square));
        }
    }
}
