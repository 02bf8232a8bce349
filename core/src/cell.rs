use serde::{Deserialize, Serialize};

/// What lies under a cell, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Mine,
    /// Safe cell with the number of mines among its neighbors, `0..=8`.
    Clear(u8),
}

impl Content {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Clear(0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: Content,
    pub visibility: Visibility,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.content.is_mine()
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    /// Player-visible state; content of a cell that is not revealed stays hidden.
    pub const fn view(self) -> CellView {
        match self.visibility {
            Visibility::Hidden => CellView::Hidden,
            Visibility::Flagged => CellView::Flagged,
            Visibility::Revealed => CellView::Revealed(self.content),
        }
    }
}

/// What presentation may know about a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(Content),
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_content_until_revealed() {
        let mut cell = Cell {
            content: Content::Mine,
            visibility: Visibility::Hidden,
        };
        assert_eq!(cell.view(), CellView::Hidden);

        cell.visibility = Visibility::Flagged;
        assert_eq!(cell.view(), CellView::Flagged);

        cell.visibility = Visibility::Revealed;
        assert_eq!(cell.view(), CellView::Revealed(Content::Mine));
    }

    #[test]
    fn default_cell_is_hidden_zero() {
        let cell = Cell::default();
        assert!(cell.is_hidden());
        assert_eq!(cell.content, Content::Clear(0));
    }
}
