//! Board engine for Minesweeper: bomb placement, tile state, flood-fill opening, chording, and
//! win/loss detection, independent of any rendering or input layer.
//!
//! A driver builds a [`MinesweeperBoard`], subscribes to its change signals, and forwards
//! player input to [`MinesweeperBoard::click_tile`] and [`MinesweeperBoard::toggle_flag`].

use core::ops::BitOr;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use signal::*;
pub use tile::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod grid;
mod signal;
mod tile;
mod types;

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of clicking a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes of several clicks
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            // explode has priority
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Opened, _) => Opened,
            (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}
