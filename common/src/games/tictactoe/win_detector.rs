use super::board::Board;
use super::types::{GameStatus, Mark};

/// Rows, then columns, then the two diagonals.
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the mark owning a complete line. Boards with two winners cannot arise
/// in play; for those the first line in `WINNING_LINES` order is reported.
pub fn check_win(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    WINNING_LINES.iter().find_map(|line| {
        let (row, col) = line[0];
        let mark = cells[row][col];
        if mark == Mark::Empty {
            return None;
        }
        line.iter()
            .all(|&(r, c)| cells[r][c] == mark)
            .then_some(mark)
    })
}

pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(status) = check_win(board).and_then(GameStatus::won_by) {
        return status;
    }

    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
