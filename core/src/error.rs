use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines on a {width}x{height} board")]
    InvalidConfiguration {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Coordinates {0:?} are out of bounds")]
    OutOfBounds(Coord2),
    #[error("Board state is inconsistent")]
    InvalidBoardState,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
