use serde::{Deserialize, Serialize};

/// Per-tile truth, fixed when the board is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileData {
    Bomb,
    Empty { bomb_neighbor_count: u8 },
}

impl TileData {
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    /// Adjacent bomb count, `None` for bombs.
    pub const fn bomb_neighbor_count(self) -> Option<u8> {
        match self {
            Self::Bomb => None,
            Self::Empty {
                bomb_neighbor_count,
            } => Some(bomb_neighbor_count),
        }
    }
}

/// Player mark on a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Closed,
    Flagged,
}

impl Visibility {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Flagged,
            Self::Flagged => Self::Closed,
        }
    }
}

/// Player-visible state of a tile.
///
/// A tile that was flagged and then force-opened when the game was lost keeps
/// `Flagged` visibility, which is how a wrong flag is told apart from a revealed bomb.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub visibility: Visibility,
    pub is_open: bool,
    pub was_clicked_when_bomb: bool,
}

impl TileState {
    pub const fn is_closed(self) -> bool {
        matches!(self.visibility, Visibility::Closed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    /// Closed and not yet opened, the only state a regular open accepts.
    pub const fn can_open(self) -> bool {
        self.is_closed() && !self.is_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_closed_and_unopened() {
        let state = TileState::default();

        assert!(state.is_closed());
        assert!(!state.is_open);
        assert!(!state.was_clicked_when_bomb);
        assert!(state.can_open());
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        assert_eq!(Visibility::Closed.toggled(), Visibility::Flagged);
        assert_eq!(Visibility::Flagged.toggled(), Visibility::Closed);
    }

    #[test]
    fn bomb_has_no_neighbor_count() {
        assert_eq!(TileData::Bomb.bomb_neighbor_count(), None);
        assert_eq!(
            TileData::Empty {
                bomb_neighbor_count: 3
            }
            .bomb_neighbor_count(),
            Some(3)
        );
    }
}
