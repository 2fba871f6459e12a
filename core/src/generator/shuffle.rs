use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement: every arrangement of the requested bombs is equally likely, and
/// nothing keeps the first click safe.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleGenerator {
    seed: u64,
}

impl ShuffleGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for ShuffleGenerator {
    fn generate(self, config: GameConfig) -> Result<MinesweeperBoard> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        MinesweeperBoard::generate_with_rng(config.width, config.height, config.bombs, &mut rng)
    }
}

/// Row-major bomb mask of `cells` entries with `bombs` of them set, uniformly shuffled.
pub fn shuffled_layout<R: Rng>(cells: usize, bombs: usize, rng: &mut R) -> Vec<bool> {
    if bombs > cells {
        log::warn!(
            "Board already full, generated anyway, requested {} bombs but only fits {}",
            bombs,
            cells
        );
    }

    let mut layout: Vec<bool> = (0..cells).map(|i| i < bombs).collect();
    // Fisher-Yates, from the back
    for i in (1..layout.len()).rev() {
        let j = rng.random_range(0..=i);
        layout.swap(i, j);
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_keeps_bomb_count() {
        let mut rng = SmallRng::seed_from_u64(7);

        for bombs in [0, 1, 10, 80, 81] {
            let layout = shuffled_layout(81, bombs, &mut rng);
            assert_eq!(layout.len(), 81);
            assert_eq!(layout.iter().filter(|&&bomb| bomb).count(), bombs);
        }
    }

    #[test]
    fn overfull_layout_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(7);

        let layout = shuffled_layout(4, 9, &mut rng);

        assert_eq!(layout, vec![true; 4]);
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::intermediate();

        let first = ShuffleGenerator::new(42).generate(config).unwrap();
        let second = ShuffleGenerator::new(42).generate(config).unwrap();

        assert_eq!(first.tile_data_grid(), second.tile_data_grid());
        assert_eq!(first.bomb_count(), 40);
    }
}
