use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// How much protection the player's first move gets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCell {
    /// No protection, the start cell may be a mine.
    Random,
    /// The start cell is never a mine.
    SimpleSafe,
    /// Neither the start cell nor its neighbors are mines, so it opens a region.
    AlwaysZero,
}

impl Default for StartCell {
    fn default() -> Self {
        Self::Random
    }
}
