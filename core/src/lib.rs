//! Board model and reveal engine for Minesweeper.
//!
//! A [`Board`] is produced by a [`BoardGenerator`] and then driven through
//! [`Board::explore`], [`Board::toggle_flag`] and [`Board::chord`] until it is
//! won or lost. Front ends read it back through [`Board::snapshot`]; nothing in
//! this crate draws or reads input.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires both dimensions to be non-zero and `0 < mines < width * height`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::Beginner.config()
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// The classic board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked((9, 9), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

/// A safe cell opened by a move, with its adjacency value.
pub type RevealedCell = (Coord2, u8);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExploreOutcome {
    /// Target was already revealed or is protected by a flag.
    NoChange,
    /// Exactly one safe cell was opened.
    Revealed(u8),
    /// A zero cell opened its surroundings; every cell opened by the move.
    Cascade(Vec<RevealedCell>),
    HitMine,
    /// The move opened the last safe cells.
    Won(Vec<RevealedCell>),
}

impl ExploreOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::HitMine | Self::Won(_))
    }

    /// Safe cells opened by the move, empty for `NoChange` and `HitMine`.
    pub fn opened(&self) -> &[RevealedCell] {
        match self {
            Self::Cascade(cells) | Self::Won(cells) => cells.as_slice(),
            _ => &[],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
