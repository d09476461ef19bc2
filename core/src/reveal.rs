use std::collections::VecDeque;

use minesweeper_common::models::Pos;

use crate::board::Board;
use crate::grid::neighbors;

/// Outcome of a single reveal or chord. `changed` lists newly revealed cells
/// in the order they were uncovered, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealResult {
    pub changed: Vec<Pos>,
    pub hit_mine: bool,
}

impl RevealResult {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && !self.hit_mine
    }

    fn merge(&mut self, other: RevealResult) {
        self.changed.extend(other.changed);
        self.hit_mine |= other.hit_mine;
    }
}

/// Reveals the cell at `start`. Flagged and already revealed cells are left
/// alone. Revealing a mine reports it without touching anything else; a cell
/// with no adjacent mines opens the whole connected zero region plus its
/// numbered border, breadth-first from `start`.
pub fn reveal_from(board: &mut Board, start: Pos) -> RevealResult {
    let mut result = RevealResult::default();

    let cell = board.cell(start);
    if cell.revealed || cell.flagged {
        return result;
    }

    if cell.is_mine {
        board.reveal_at(start);
        result.changed.push(start);
        result.hit_mine = true;
        return result;
    }

    board.reveal_at(start);
    result.changed.push(start);

    let mut queue = VecDeque::new();
    if board.cell(start).adjacent == 0 {
        queue.push_back(start);
    }

    while let Some(pos) = queue.pop_front() {
        for neighbor in neighbors(pos.row, pos.col, board.rows(), board.cols()) {
            let cell = board.cell(neighbor);
            if cell.revealed || cell.flagged || cell.is_mine {
                continue;
            }

            let expand = cell.adjacent == 0;
            board.reveal_at(neighbor);
            result.changed.push(neighbor);
            if expand {
                queue.push_back(neighbor);
            }
        }
    }

    result
}

/// Reveals all hidden neighbors of a revealed numbered cell, but only when
/// exactly as many of its neighbors are flagged as it counts adjacent mines.
/// Wrong flags make this hit the uncovered mines.
pub fn chord_from(board: &mut Board, target: Pos) -> RevealResult {
    let mut result = RevealResult::default();

    let cell = board.cell(target);
    if !cell.revealed || cell.is_mine || cell.adjacent == 0 {
        return result;
    }
    let adjacent = cell.adjacent as usize;

    let around = neighbors(target.row, target.col, board.rows(), board.cols());
    let flagged = around
        .iter()
        .filter(|&&pos| board.cell(pos).flagged)
        .count();
    if flagged != adjacent {
        return result;
    }

    for pos in around {
        let cell = board.cell(pos);
        if cell.revealed || cell.flagged {
            continue;
        }

        if cell.is_mine {
            board.reveal_at(pos);
            result.changed.push(pos);
            result.hit_mine = true;
        } else {
            result.merge(reveal_from(board, pos));
        }
    }

    result
}

/// Toggles the flag on a hidden cell. Returns false without changing anything
/// when the cell is already revealed.
pub fn toggle_flag(board: &mut Board, pos: Pos) -> bool {
    let cell = board.cell_mut(pos);
    if cell.revealed {
        return false;
    }
    cell.flagged = !cell.flagged;
    true
}

/// Reveals every mine still hidden, row by row. Used when the game is lost.
/// Returns the positions that changed.
pub fn expose_mines(board: &mut Board) -> Vec<Pos> {
    let mut exposed = Vec::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Pos { row, col };
            if board.cell(pos).is_mine && board.reveal_at(pos) {
                exposed.push(pos);
            }
        }
    }
    exposed
}
