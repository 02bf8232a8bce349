use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform rejection sampling: draws coordinates until enough distinct mines land outside the
/// protected start area.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R> {
    rng: R,
    start: Option<(Coord2, StartCell)>,
}

impl RandomBoardGenerator<SmallRng> {
    /// Same seed, same board.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, start: None }
    }

    pub fn with_start(mut self, start: Coord2, start_cell: StartCell) -> Self {
        self.start = Some((start, start_cell));
        self
    }
}

/// Cells kept free of mines by `start_cell`, downgrading the policy when the board is too full.
fn protected_cells(config: &GameConfig, start: Coord2, start_cell: StartCell) -> Array2<bool> {
    use StartCell::*;

    let mut protected: Array2<bool> = Array2::default(config.size.to_nd_index());
    let zero_area = 1 + Neighbors::new(start, config.size).count() as CellCount;
    let free_cells = |area: CellCount| config.total_cells().saturating_sub(area);

    let actual = match start_cell {
        Random => Random,
        SimpleSafe | AlwaysZero if config.mines > free_cells(1) => {
            log::warn!("Cannot make start cell safe, fallback to random");
            Random
        }
        SimpleSafe => SimpleSafe,
        AlwaysZero if config.mines > free_cells(zero_area) => {
            log::warn!("Cannot make start cell zero, fallback to simple safe");
            SimpleSafe
        }
        AlwaysZero => AlwaysZero,
    };

    match actual {
        Random => {}
        SimpleSafe => protected[start.to_nd_index()] = true,
        AlwaysZero => {
            protected[start.to_nd_index()] = true;
            for coords in Neighbors::new(start, config.size) {
                protected[coords.to_nd_index()] = true;
            }
        }
    }
    protected
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Board> {
        config.validate()?;
        let size = config.size;

        let protected = match self.start {
            Some((start, _)) if !in_bounds(start, size) => {
                return Err(GameError::OutOfBounds(start));
            }
            Some((start, start_cell)) => protected_cells(&config, start, start_cell),
            None => Array2::default(size.to_nd_index()),
        };

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut placed: CellCount = 0;
        let mut draws: u64 = 0;
        while placed < config.mines {
            let coords: Coord2 = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            draws += 1;

            let index = coords.to_nd_index();
            if mines[index] || protected[index] {
                continue;
            }
            mines[index] = true;
            placed += 1;
        }

        log::debug!(
            "Generated {}x{} board with {} mines in {} draws",
            size.0,
            size.1,
            placed,
            draws
        );
        Board::from_mine_mask(size, &mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn mine_list(board: &Board) -> Vec<Coord2> {
        board.mines().collect()
    }

    #[test]
    fn places_exact_mine_count_with_consistent_adjacency() {
        for seed in 0..20 {
            let config = Difficulty::Intermediate.config();
            let board = RandomBoardGenerator::seeded(seed).generate(config).unwrap();

            assert_eq!(board.mines().count(), 40);
            assert_eq!(board.mine_count(), 40);
            for coords in board.coords() {
                if let Content::Clear(value) = board[coords].content {
                    let expected = board
                        .neighbors(coords)
                        .filter(|&pos| board[pos].is_mine())
                        .count();
                    assert_eq!(usize::from(value), expected, "seed {seed} at {coords:?}");
                }
            }
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        let first = RandomBoardGenerator::seeded(0x5eed).generate(config).unwrap();
        let second = RandomBoardGenerator::seeded(0x5eed).generate(config).unwrap();

        assert_eq!(first, second);
        assert_eq!(mine_list(&first).len(), 10);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let config = Difficulty::Expert.config();
        let a = RandomBoardGenerator::seeded(1).generate(config).unwrap();
        let b = RandomBoardGenerator::seeded(2).generate(config).unwrap();
        assert_ne!(mine_list(&a), mine_list(&b));
    }

    #[test]
    fn accepts_borrowed_rng() {
        let mut rng = SmallRng::seed_from_u64(7);
        let board = RandomBoardGenerator::new(&mut rng)
            .generate(GameConfig::default())
            .unwrap();
        assert_eq!(board.mine_count(), 10);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let full = GameConfig::new_unchecked((3, 3), 9);
        assert_eq!(
            RandomBoardGenerator::seeded(0).generate(full),
            Err(GameError::InvalidConfiguration {
                width: 3,
                height: 3,
                mines: 9,
            })
        );

        let empty = GameConfig::new_unchecked((3, 3), 0);
        assert!(RandomBoardGenerator::seeded(0).generate(empty).is_err());
    }

    #[test]
    fn nearly_full_board_leaves_one_safe_cell() {
        let config = GameConfig::new((4, 4), 15).unwrap();
        let board = RandomBoardGenerator::seeded(3).generate(config).unwrap();
        assert_eq!(board.safe_cell_count(), 1);
        assert_eq!(board.mines().count(), 15);
    }

    #[test]
    fn simple_safe_start_is_never_a_mine() {
        let config = GameConfig::new((5, 5), 24).unwrap();
        for seed in 0..10 {
            let board = RandomBoardGenerator::seeded(seed)
                .with_start((2, 2), StartCell::SimpleSafe)
                .generate(config)
                .unwrap();
            assert_eq!(board[(2, 2)].content, Content::Clear(8));
        }
    }

    #[test]
    fn always_zero_start_clears_neighborhood() {
        let config = Difficulty::Beginner.config();
        for seed in 0..10 {
            let board = RandomBoardGenerator::seeded(seed)
                .with_start((0, 8), StartCell::AlwaysZero)
                .generate(config)
                .unwrap();
            assert_eq!(board[(0, 8)].content, Content::Clear(0));
        }
    }

    #[test]
    fn always_zero_falls_back_when_crowded() {
        // 9 cells, 8 mines: only the start cell can stay clear
        let config = GameConfig::new((3, 3), 8).unwrap();
        let board = RandomBoardGenerator::seeded(11)
            .with_start((1, 1), StartCell::AlwaysZero)
            .generate(config)
            .unwrap();
        assert_eq!(board[(1, 1)].content, Content::Clear(8));
    }

    #[test]
    fn start_outside_board_is_rejected() {
        let result = RandomBoardGenerator::seeded(0)
            .with_start((9, 0), StartCell::SimpleSafe)
            .generate(GameConfig::default());
        assert_eq!(result, Err(GameError::OutOfBounds((9, 0))));
    }
}
