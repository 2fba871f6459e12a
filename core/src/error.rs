use thiserror::Error;

use crate::Point;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {width}x{height}, both must be positive")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Bomb layout has {actual} cells but the board needs {expected}")]
    LayoutMismatch { expected: usize, actual: usize },
    #[error("Too many bombs, requested {bombs} but the board has {cells} cells")]
    TooManyBombs { bombs: usize, cells: usize },
    #[error("A board needs at least one bomb")]
    NoBombs,
    #[error("Point {0} is out of bounds")]
    OutOfBounds(Point),
}

pub type Result<T> = core::result::Result<T, GameError>;
