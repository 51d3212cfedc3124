mod board;
mod bot_controller;
mod game_state;
mod minimax;
mod types;
mod win_detector;

pub use board::{Board, BoardParseError};
pub use bot_controller::{BotInput, BotType, calculate_minimax_move, calculate_move};
pub use game_state::TicTacToeGameState;
pub use minimax::{
    Minimax, SCORE_INFINITY, SearchStats, best_move, best_move_with_stats, exhaustive_score,
};
pub use types::{BOARD_SIZE, GameStatus, Mark, Position};
pub use win_detector::{WINNING_LINES, check_win, evaluate};
