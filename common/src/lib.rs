pub mod config;
pub mod games;
pub mod logger;

pub use games::tictactoe::{Board, GameStatus, Mark, Position, best_move, evaluate};
