use std::fmt;

use common::games::tictactoe::{BOARD_SIZE, Board, Mark, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInputError {
    Malformed,
    OutOfRange { row: i64, col: i64 },
    Occupied(Position),
}

impl fmt::Display for MoveInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveInputError::Malformed => write!(f, "Invalid input. Enter two numbers from 0 to 2."),
            MoveInputError::OutOfRange { row, col } => {
                write!(f, "Position ({}, {}) is off the board. Use numbers from 0 to 2.", row, col)
            }
            MoveInputError::Occupied(pos) => write!(f, "Position {} already taken. Try again.", pos),
        }
    }
}

impl std::error::Error for MoveInputError {}

pub fn parse_mark(line: &str) -> Option<Mark> {
    line.parse().ok()
}

/// Parses `"row col"` and checks the cell is free on `board`.
pub fn parse_move(line: &str, board: &Board) -> Result<Position, MoveInputError> {
    let numbers: Vec<i64> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| MoveInputError::Malformed)?;

    let &[row, col] = numbers.as_slice() else {
        return Err(MoveInputError::Malformed);
    };

    let size = BOARD_SIZE as i64;
    if !(0..size).contains(&row) || !(0..size).contains(&col) {
        return Err(MoveInputError::OutOfRange { row, col });
    }

    let pos = Position::new(row as usize, col as usize);
    if !board.is_empty_at(pos) {
        return Err(MoveInputError::Occupied(pos));
    }
    Ok(pos)
}
