use crate::board::Board;

/// A board is won once everything except the mines is revealed. Callers check
/// this after any reveal that did not hit a mine.
pub fn is_won(board: &Board, mine_count: usize) -> bool {
    board.rows() * board.cols() == mine_count + board.revealed_count()
}
