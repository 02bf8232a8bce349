use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game's minefield together with everything the player has done to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    pub(crate) size: Coord2,
    pub(crate) cells: Array2<Cell>,
    pub(crate) mine_count: CellCount,
    /// Safe cells revealed so far, mines shown after a loss are not counted.
    pub(crate) revealed_count: CellCount,
    pub(crate) flagged_count: CellCount,
    pub(crate) status: GameStatus,
    pub(crate) triggered_mine: Option<Coord2>,
}

impl Board {
    /// Builds a board with mines at exactly the given coordinates, repeats collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(size, &mine_mask)
    }

    /// `mine_mask` must have the shape of `size`.
    pub(crate) fn from_mine_mask(size: Coord2, mine_mask: &Array2<bool>) -> Result<Self> {
        debug_assert_eq!(mine_mask.dim(), (usize::from(size.0), usize::from(size.1)));

        let mines: Vec<Coord2> = mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect();
        let mine_count = CellCount::try_from(mines.len()).unwrap_or(CellCount::MAX);
        GameConfig::new(size, mine_count)?;

        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        for &coords in &mines {
            cells[coords.to_nd_index()].content = Content::Mine;
        }
        for &coords in &mines {
            for neighbor in Neighbors::new(coords, size) {
                if let Content::Clear(count) = &mut cells[neighbor.to_nd_index()].content {
                    *count += 1;
                }
            }
        }

        Ok(Self {
            size,
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Playing,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Display counter only: goes negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// What the player sees; after a loss every mine shows, flagged or not.
    pub fn view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.shown(coords))
    }

    pub fn contains_mine(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(Cell::is_mine)
    }

    /// All coordinates, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.coords().filter(|&coords| self[coords].is_mine())
    }

    pub(crate) fn shown(&self, coords: Coord2) -> CellView {
        let cell = self[coords];
        match self.status {
            GameStatus::Lost if cell.is_mine() => CellView::Revealed(Content::Mine),
            _ => cell.view(),
        }
    }

    pub(crate) fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Serialized form of [`Board`]; only becomes one after [`Board::try_from`] rebuilds the layout
/// and checks the counters and status against it.
#[derive(Deserialize)]
struct BoardData {
    size: Coord2,
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let size = data.size;
        if data.cells.dim() != (usize::from(size.0), usize::from(size.1)) {
            return Err(GameError::InvalidBoardState);
        }

        let mut board = Self::from_mine_mask(size, &data.cells.map(|cell| cell.is_mine()))?;
        if board.mine_count != data.mine_count
            || board
                .cells
                .iter()
                .zip(data.cells.iter())
                .any(|(built, stored)| built.content != stored.content)
        {
            return Err(GameError::InvalidBoardState);
        }

        for (built, stored) in board.cells.iter_mut().zip(data.cells.iter()) {
            built.visibility = stored.visibility;
        }
        let count = |pred: fn(&Cell) -> bool| board.cells.iter().filter(|&cell| pred(cell)).count();
        let revealed_safe = count(|cell| cell.is_revealed() && !cell.is_mine());
        let flagged = count(|cell| cell.is_flagged());
        let revealed_mines = count(|cell| cell.is_revealed() && cell.is_mine());
        if revealed_safe != usize::from(data.revealed_count)
            || flagged != usize::from(data.flagged_count)
        {
            return Err(GameError::InvalidBoardState);
        }

        let all_safe_open = data.revealed_count == board.safe_cell_count();
        let consistent = match data.status {
            GameStatus::Playing => {
                revealed_mines == 0 && !all_safe_open && data.triggered_mine.is_none()
            }
            GameStatus::Won => {
                revealed_mines == 0 && all_safe_open && data.triggered_mine.is_none()
            }
            GameStatus::Lost => data.triggered_mine.is_some_and(|coords| {
                in_bounds(coords, size) && board[coords].is_mine() && board[coords].is_revealed()
            }),
        };
        if !consistent {
            return Err(GameError::InvalidBoardState);
        }

        board.revealed_count = data.revealed_count;
        board.flagged_count = data.flagged_count;
        board.status = data.status;
        board.triggered_mine = data.triggered_mine;
        Ok(board)
    }
}
