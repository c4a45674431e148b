// Terrain map generation
use rand::Rng;

use crate::config::DifficultySettings;
use crate::model::{Element, END_POS, MAP_COLS, MAP_ROWS, Map, Position, START_POS, TerrainCell};

/// Draws a terrain level from the cumulative weighting `[p1, p2, p3]`.
pub fn draw_level(u: f64, probabilities: &[f64; 3]) -> u8 {
    if u < probabilities[0] {
        1
    } else if u < probabilities[0] + probabilities[1] {
        2
    } else {
        3
    }
}

/// Fills a fresh 5x6 map. Start and end keep their fixed corners; every other
/// cell gets a uniform element and a level drawn from `settings`.
pub fn generate<R: Rng>(settings: &DifficultySettings, rng: &mut R) -> Map {
    let mut cells = [[TerrainCell::Start; MAP_COLS]; MAP_ROWS];
    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let pos = Position { row, col };
            *cell = if pos == START_POS {
                TerrainCell::Start
            } else if pos == END_POS {
                TerrainCell::End
            } else {
                let element = Element::ALL[rng.gen_range(0..Element::ALL.len())];
                let level = draw_level(rng.r#gen::<f64>(), &settings.level_probabilities);
                TerrainCell::Normal { element, level }
            };
        }
    }
    Map { cells }
}

/// Owns the random source used for maps and counts how many it has produced.
#[derive(Debug, Clone)]
pub struct MapGenerator<R> {
    rng: R,
    generated: u64,
}

impl<R: Rng> MapGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, generated: 0 }
    }

    pub fn generate(&mut self, settings: &DifficultySettings) -> Map {
        self.generated += 1;
        tracing::debug!(count = self.generated, "map generated");
        generate(settings, &mut self.rng)
    }

    #[cfg(test)]
    pub fn generated(&self) -> u64 {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::model::Difficulty;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn level_thresholds_are_cumulative() {
        let p = [0.2, 0.4, 0.4];
        assert_eq!(draw_level(0.0, &p), 1);
        assert_eq!(draw_level(0.19, &p), 1);
        assert_eq!(draw_level(0.2, &p), 2);
        assert_eq!(draw_level(0.59, &p), 2);
        assert_eq!(draw_level(0.61, &p), 3);
        assert_eq!(draw_level(0.999, &p), 3);
    }

    #[test]
    fn endpoints_sit_at_fixed_corners() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for d in Difficulty::ALL {
            let map = generate(config.settings(d), &mut rng);
            assert_eq!(*map.cell(START_POS), TerrainCell::Start);
            assert_eq!(*map.cell(END_POS), TerrainCell::End);
            assert!(map.is_consistent());
        }
    }

    #[test]
    fn same_seed_same_map() {
        let settings = GameConfig::default().difficulty.normal;
        let a = generate(&settings, &mut ChaCha8Rng::seed_from_u64(42));
        let b = generate(&settings, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn certain_level_weighting() {
        let settings = DifficultySettings { exp_reward: 1, level_probabilities: [0.0, 0.0, 1.0] };
        let map = generate(&settings, &mut ChaCha8Rng::seed_from_u64(3));
        for cell in map.cells.iter().flatten() {
            if let TerrainCell::Normal { level, .. } = cell {
                assert_eq!(*level, 3);
            }
        }
    }

    #[test]
    fn generator_counts_maps() {
        let settings = GameConfig::default().difficulty.easy;
        let mut generator = MapGenerator::new(ChaCha8Rng::seed_from_u64(1));
        generator.generate(&settings);
        generator.generate(&settings);
        assert_eq!(generator.generated(), 2);
    }

    proptest! {
        #[test]
        fn generated_maps_are_always_consistent(seed in any::<u64>(), d in 0usize..4) {
            let config = GameConfig::default();
            let map = generate(config.settings(Difficulty::ALL[d]), &mut ChaCha8Rng::seed_from_u64(seed));
            prop_assert!(map.is_consistent());
            let endpoints = map.cells.iter().flatten().filter(|c| c.is_endpoint()).count();
            prop_assert_eq!(endpoints, 2);
        }
    }
}
