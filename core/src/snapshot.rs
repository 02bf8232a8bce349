use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to draw the board, without the hidden layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub status: GameStatus,
    pub mine_count: CellCount,
    pub mines_remaining: i32,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            status: board.status(),
            mine_count: board.mine_count(),
            mines_remaining: board.mines_remaining(),
            triggered_mine: board.triggered_mine(),
            cells: Array2::from_shape_fn(board.size().to_nd_index(), |(x, y)| {
                board.shown((x as Coord, y as Coord))
            }),
        }
    }

    /// `None` when `coords` lies outside the board.
    pub fn at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        let (width, height) = self.size;
        (0..height).map(move |y| (0..width).map(move |x| self.cells[(x, y).to_nd_index()]))
    }
}

impl Board {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(self)
    }
}
