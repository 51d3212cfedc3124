use std::fmt;
use std::str::FromStr;

use super::types::{BOARD_SIZE, Mark, Position};

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        if !pos.is_on_board() {
            return None;
        }
        Some(self.cells[pos.row][pos.col])
    }

    /// Panics if `pos` is off the board; callers validate user input first.
    pub fn set(&mut self, pos: Position, mark: Mark) {
        self.cells[pos.row][pos.col] = mark;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    /// Empty cells in row-major order. The search iterates in this order, so it
    /// also decides which move wins a tie.
    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(CELL_COUNT);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|mark| mark.to_string()).collect();
            writeln!(f, "{}", line.join(" | "))?;
            writeln!(f, "{}", "-".repeat(10))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    WrongCellCount { found: usize },
    InvalidCell { character: char, index: usize },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::WrongCellCount { found } => {
                write!(f, "Expected {} cells, found {}", CELL_COUNT, found)
            }
            BoardParseError::InvalidCell { character, index } => {
                write!(f, "Invalid cell '{}' at index {}", character, index)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

/// Reads nine cells (`X`, `O` or `.`) in row-major order. Whitespace, `/` and `|`
/// are separators and ignored, so `"X.O/.X./..O"` and `"X.O .X. ..O"` are the same board.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();

        if symbols.len() != CELL_COUNT {
            return Err(BoardParseError::WrongCellCount {
                found: symbols.len(),
            });
        }

        let mut board = Board::new();
        for (index, &character) in symbols.iter().enumerate() {
            let mark = match character {
                '.' => Mark::Empty,
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                _ => return Err(BoardParseError::InvalidCell { character, index }),
            };
            board.set(Position::new(index / BOARD_SIZE, index % BOARD_SIZE), mark);
        }
        Ok(board)
    }
}
