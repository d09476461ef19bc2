use minesweeper_common::models::Pos;

pub fn in_bounds(row: usize, col: usize, rows: usize, cols: usize) -> bool {
    row < rows && col < cols
}

/// All cells within the 3x3 block around `(row, col)`, minus the center and
/// anything outside the board, in row-major order.
pub fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<Pos> {
    let mut result = Vec::with_capacity(8);

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }

            let new_row = row as i32 + dr;
            let new_col = col as i32 + dc;

            if new_row >= 0 && new_row < rows as i32 && new_col >= 0 && new_col < cols as i32 {
                result.push(Pos {
                    row: new_row as usize,
                    col: new_col as usize,
                });
            }
        }
    }

    result
}

/// The up/down/left/right neighbors of `(row, col)` that are on the board.
pub fn orthogonal_neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<Pos> {
    let mut result = Vec::with_capacity(4);

    for (dr, dc) in [(-1, 0), (0, -1), (0, 1), (1, 0)] {
        let new_row = row as i32 + dr;
        let new_col = col as i32 + dc;

        if new_row >= 0 && new_row < rows as i32 && new_col >= 0 && new_col < cols as i32 {
            result.push(Pos {
                row: new_row as usize,
                col: new_col as usize,
            });
        }
    }

    result
}
