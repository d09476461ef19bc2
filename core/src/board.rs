use minesweeper_common::models::{CellView, Pos};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent: u8,
}

impl From<&Cell> for CellView {
    fn from(value: &Cell) -> Self {
        if value.revealed {
            if value.is_mine {
                Self::Mine
            } else {
                Self::Revealed {
                    adjacent: value.adjacent,
                }
            }
        } else if value.flagged {
            Self::Flagged
        } else {
            Self::Hidden
        }
    }
}

/// Rectangular minefield stored row-major. Cells start hidden and mine-free;
/// placement and reveals go through the operations in [`crate::place`] and
/// [`crate::reveal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    mines: usize,
    revealed: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            mines: 0,
            revealed: 0,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of mines actually placed, which may be lower than requested on
    /// small boards.
    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    fn index(&self, pos: Pos) -> usize {
        pos.col + pos.row * self.cols
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    /// Marks the cell revealed, keeping the revealed counter in sync.
    /// Returns false if it already was.
    pub(crate) fn reveal_at(&mut self, pos: Pos) -> bool {
        let index = self.index(pos);
        if self.cells[index].revealed {
            return false;
        }
        self.cells[index].revealed = true;
        self.revealed += 1;
        true
    }

    pub(crate) fn set_mine_count(&mut self, mines: usize) {
        self.mines = mines;
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Pos { row, col }))
    }

    /// Player-facing view of the whole board, one row per inner vec. Hidden
    /// mines stay hidden.
    pub fn snapshot(&self) -> Vec<Vec<CellView>> {
        self.cells
            .chunks(self.cols)
            .map(|chunk| chunk.iter().map(|cell| cell.into()).collect())
            .collect()
    }
}
