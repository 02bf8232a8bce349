use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

impl Board {
    /// Opens the cell at `coords`, cascading through zero cells.
    pub fn explore(&mut self, coords: Coord2) -> Result<ExploreOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        if !self[coords].is_hidden() {
            return Ok(ExploreOutcome::NoChange);
        }

        let mut opened = Vec::new();
        if self.open(coords, &mut opened) {
            return Ok(ExploreOutcome::HitMine);
        }
        Ok(self.settle(opened))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use Visibility::*;

        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self.cell_mut(coords);
        Ok(match cell.visibility {
            Hidden => {
                cell.visibility = Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Flagged => {
                cell.visibility = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Revealed => FlagOutcome::NoChange,
        })
    }

    /// On a revealed number whose flags are all placed, opens every other hidden neighbor.
    pub fn chord(&mut self, coords: Coord2) -> Result<ExploreOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self[coords];
        let Content::Clear(count) = cell.content else {
            return Ok(ExploreOutcome::NoChange);
        };
        if !cell.is_revealed() || count == 0 || count != self.count_flagged_neighbors(coords) {
            return Ok(ExploreOutcome::NoChange);
        }

        let mut opened = Vec::new();
        for neighbor in self.neighbors(coords) {
            if self[neighbor].is_hidden() && self.open(neighbor, &mut opened) {
                return Ok(ExploreOutcome::HitMine);
            }
        }
        Ok(self.settle(opened))
    }

    /// Reveals a hidden cell and, for a zero, the region around it. Returns `true` when a mine
    /// went off.
    fn open(&mut self, coords: Coord2, opened: &mut Vec<RevealedCell>) -> bool {
        match self[coords].content {
            Content::Mine => {
                self.detonate(coords);
                true
            }
            Content::Clear(0) => {
                self.flood_fill(coords, opened);
                false
            }
            Content::Clear(value) => {
                self.reveal_safe(coords);
                opened.push((coords, value));
                false
            }
        }
    }

    fn flood_fill(&mut self, origin: Coord2, opened: &mut Vec<RevealedCell>) {
        let before = opened.len();
        let mut queued: Array2<bool> = Array2::default(self.size.to_nd_index());
        let mut to_visit = VecDeque::from(vec![origin]);
        queued[origin.to_nd_index()] = true;

        while let Some(coords) = to_visit.pop_front() {
            let Content::Clear(value) = self[coords].content else {
                continue;
            };
            self.reveal_safe(coords);
            opened.push((coords, value));

            if value > 0 {
                continue;
            }
            for neighbor in self.neighbors(coords) {
                let cell = self[neighbor];
                if cell.is_hidden() && !cell.is_mine() && !queued[neighbor.to_nd_index()] {
                    queued[neighbor.to_nd_index()] = true;
                    to_visit.push_back(neighbor);
                }
            }
        }

        log::trace!(
            "Flood fill from {:?} opened {} cells",
            origin,
            opened.len() - before
        );
    }

    fn reveal_safe(&mut self, coords: Coord2) {
        self.cell_mut(coords).visibility = Visibility::Revealed;
        self.revealed_count += 1;
    }

    /// Ends the game and uncovers the unflagged mines. Flags stay in place, so the remaining-mines
    /// counter does not move; [`Board::view`] shows flagged mines once the game is lost.
    fn detonate(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);
        self.status = GameStatus::Lost;

        for mine in self.mines().collect::<Vec<_>>() {
            let cell = self.cell_mut(mine);
            if cell.is_hidden() {
                cell.visibility = Visibility::Revealed;
            }
        }
        log::debug!("Game lost at {:?}", coords);
    }

    fn settle(&mut self, opened: Vec<RevealedCell>) -> ExploreOutcome {
        if opened.is_empty() {
            ExploreOutcome::NoChange
        } else if self.revealed_count == self.safe_cell_count() {
            self.status = GameStatus::Won;
            log::debug!("Game won with {} flags placed", self.flagged_count);
            ExploreOutcome::Won(opened)
        } else if let [(_, value)] = opened.as_slice() {
            ExploreOutcome::Revealed(*value)
        } else {
            ExploreOutcome::Cascade(opened)
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_flagged())
            .count() as u8
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
