use serde::{Deserialize, Serialize};

use crate::*;

/// Board size and bomb count for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub bombs: usize,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, bombs: usize) -> Self {
        Self {
            width,
            height,
            bombs,
        }
    }

    /// Validates `width > 0`, `height > 0` and `0 < bombs < width * height`.
    pub fn new(width: Coord, height: Coord, bombs: usize) -> Result<Self> {
        Self::new_unchecked(width, height, bombs).validated()
    }

    pub fn validated(self) -> Result<Self> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.bombs == 0 {
            return Err(GameError::NoBombs);
        }
        let cells = self.total_cells();
        if self.bombs >= cells {
            return Err(GameError::TooManyBombs {
                bombs: self.bombs,
                cells,
            });
        }
        Ok(self)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn total_cells(&self) -> usize {
        cell_count(self.width, self.height)
    }

    pub const fn size(&self) -> Size {
        (self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validated(), Ok(config));
        }
        assert_eq!(GameConfig::expert().total_cells(), 480);
    }

    #[test]
    fn rejects_full_or_empty_boards() {
        assert_eq!(
            GameConfig::new(3, 3, 9),
            Err(GameError::TooManyBombs { bombs: 9, cells: 9 })
        );
        assert_eq!(GameConfig::new(3, 3, 0), Err(GameError::NoBombs));
        assert_eq!(
            GameConfig::new(0, 3, 1),
            Err(GameError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(GameConfig::new(3, 3, 8).is_ok());
    }

    #[test]
    fn serializes_as_plain_fields() {
        let json = serde_json::to_string(&GameConfig::beginner()).unwrap();

        assert_eq!(json, r#"{"width":9,"height":9,"bombs":10}"#);
    }
}
