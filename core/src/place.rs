use rand::Rng;
use rand::seq::SliceRandom;

use minesweeper_common::models::Pos;

use crate::board::Board;
use crate::grid::neighbors;

/// Places mines uniformly at random, keeping `safe` and its eight neighbors
/// mine-free. The requested count is capped by the number of eligible cells
/// and raised to at least one when any cell is eligible. Returns the number
/// of mines placed and records it on the board.
pub fn place_mines_first_safe<R: Rng>(
    board: &mut Board,
    mine_count: usize,
    safe: Pos,
    rng: &mut R,
) -> usize {
    let rows = board.rows();
    let cols = board.cols();

    let mut forbidden = neighbors(safe.row, safe.col, rows, cols);
    forbidden.push(safe);

    let mut candidates: Vec<Pos> = board
        .positions()
        .filter(|pos| !forbidden.contains(pos))
        .collect();

    let count = mine_count.max(1).min(candidates.len());
    let (chosen, _) = candidates.partial_shuffle(rng, count);
    for &pos in chosen.iter() {
        board.cell_mut(pos).is_mine = true;
    }

    compute_adjacency(board);
    board.set_mine_count(count);
    count
}

/// Places mines at the given positions on a fresh board. Duplicates are
/// ignored. Returns the number of mines placed and records it on the board.
pub fn place_mines_at(board: &mut Board, mines: &[Pos]) -> usize {
    let mut placed = 0;
    for &pos in mines {
        let cell = board.cell_mut(pos);
        if !cell.is_mine {
            cell.is_mine = true;
            placed += 1;
        }
    }

    compute_adjacency(board);
    board.set_mine_count(placed);
    placed
}

fn compute_adjacency(board: &mut Board) {
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Pos { row, col };
            if board.cell(pos).is_mine {
                continue;
            }

            let mut count = 0;
            for neighbor in neighbors(row, col, board.rows(), board.cols()) {
                if board.cell(neighbor).is_mine {
                    count += 1;
                }
            }
            board.cell_mut(pos).adjacent = count;
        }
    }
}
