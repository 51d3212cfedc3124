//! Full-depth minimax with alpha-beta pruning for the 3x3 board.
//!
//! Scores are from the bot's point of view: a bot win is worth `10 - depth` so a
//! quicker win ranks higher, any opponent win is a flat `-1`, a draw is `0`.
//! Losses are deliberately not depth-adjusted, so the bot does not prefer a
//! slower loss over a faster one.

use super::board::Board;
use super::types::{Mark, Position};
use super::win_detector::evaluate;

/// Alpha-beta bound, outside the reachable score range of `-1..=10`.
pub const SCORE_INFINITY: i32 = 1_000;

const WIN_SCORE: i32 = 10;
const LOSS_SCORE: i32 = -1;
const DRAW_SCORE: i32 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions passed to `score`, terminal ones included.
    pub nodes: u64,
    /// Sibling loops cut short because `beta <= alpha`.
    pub cutoffs: u64,
}

pub struct Minimax {
    bot_mark: Mark,
    opponent_mark: Mark,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(bot_mark: Mark, opponent_mark: Mark) -> Self {
        Self {
            bot_mark,
            opponent_mark,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn terminal_score(&self, board: &Board, depth: usize) -> Option<i32> {
        let status = evaluate(board);
        if !status.is_over() {
            return None;
        }
        Some(terminal_value(status.winner(), self.bot_mark, self.opponent_mark, depth))
    }

    /// Scores `board` with the side given by `maximizing` to move.
    ///
    /// Moves are simulated on `board` and undone before the next sibling is
    /// tried, including on the pruning path, so `board` is unchanged on return.
    pub fn score(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        if let Some(score) = self.terminal_score(board, depth) {
            return score;
        }

        let moves = board.available_moves();

        if maximizing {
            let mut max_eval = -SCORE_INFINITY;
            for pos in moves {
                board.set(pos, self.bot_mark);
                let eval = self.score(board, depth + 1, alpha, beta, false);
                board.set(pos, Mark::Empty);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = SCORE_INFINITY;
            for pos in moves {
                board.set(pos, self.opponent_mark);
                let eval = self.score(board, depth + 1, alpha, beta, true);
                board.set(pos, Mark::Empty);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            min_eval
        }
    }

    /// Picks the move with the highest score for the bot. Each root child gets a
    /// fresh full window. Ties keep the earliest move in row-major order.
    ///
    /// Returns `None` once the game is decided or the board is full.
    pub fn best_move(&mut self, board: &Board) -> Option<Position> {
        if evaluate(board).is_over() {
            return None;
        }

        let mut scratch = *board;
        let mut best_move = None;
        let mut best_score = -SCORE_INFINITY;

        for pos in board.available_moves() {
            scratch.set(pos, self.bot_mark);
            let score = self.score(&mut scratch, 1, -SCORE_INFINITY, SCORE_INFINITY, false);
            scratch.set(pos, Mark::Empty);

            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        best_move
    }
}

fn terminal_value(winner: Option<Mark>, bot_mark: Mark, opponent_mark: Mark, depth: usize) -> i32 {
    match winner {
        Some(mark) if mark == bot_mark => WIN_SCORE - depth as i32,
        Some(mark) if mark == opponent_mark => LOSS_SCORE,
        _ => DRAW_SCORE,
    }
}

pub fn best_move(board: &Board, bot_mark: Mark, opponent_mark: Mark) -> Option<Position> {
    Minimax::new(bot_mark, opponent_mark).best_move(board)
}

pub fn best_move_with_stats(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> (Option<Position>, SearchStats) {
    let mut search = Minimax::new(bot_mark, opponent_mark);
    let best = search.best_move(board);
    (best, search.stats())
}

/// Same scoring as [`Minimax::score`] without pruning. Every child is searched on
/// its own copy of the board.
pub fn exhaustive_score(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    depth: usize,
    maximizing: bool,
) -> i32 {
    let status = evaluate(board);
    if status.is_over() {
        return terminal_value(status.winner(), bot_mark, opponent_mark, depth);
    }

    let mover = if maximizing { bot_mark } else { opponent_mark };
    let scores = board.available_moves().into_iter().map(|pos| {
        let mut child = *board;
        child.set(pos, mover);
        exhaustive_score(&child, bot_mark, opponent_mark, depth + 1, !maximizing)
    });

    if maximizing {
        scores.max().unwrap_or(DRAW_SCORE)
    } else {
        scores.min().unwrap_or(DRAW_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::tictactoe::GameStatus;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn side_to_move(board: &Board) -> Mark {
        if board.count(Mark::X) > board.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    fn exhaustive_best_move(board: &Board, bot_mark: Mark, opponent_mark: Mark) -> Option<Position> {
        let mut best = None;
        let mut best_score = -SCORE_INFINITY;
        for pos in board.available_moves() {
            let mut child = *board;
            child.set(pos, bot_mark);
            let score = exhaustive_score(&child, bot_mark, opponent_mark, 1, false);
            if score > best_score {
                best_score = score;
                best = Some(pos);
            }
        }
        best
    }

    fn random_board(rng: &mut SessionRng) -> Board {
        let mut b = Board::new();
        let mut mark = Mark::X;
        let plies = rng.random_range(0..9);
        for _ in 0..plies {
            if evaluate(&b).is_over() {
                break;
            }
            let moves = b.available_moves();
            let pos = moves[rng.random_range(0..moves.len())];
            b.set(pos, mark);
            mark = mark.opponent().unwrap();
        }
        b
    }

    #[test]
    fn test_terminal_scores() {
        let mut search = Minimax::new(Mark::X, Mark::O);

        let mut won = board("XXX/OO./...");
        assert_eq!(search.score(&mut won, 3, -SCORE_INFINITY, SCORE_INFINITY, false), 7);

        let mut lost = board("XX./OOO/X..");
        assert_eq!(search.score(&mut lost, 0, -SCORE_INFINITY, SCORE_INFINITY, true), -1);
        assert_eq!(search.score(&mut lost, 6, -SCORE_INFINITY, SCORE_INFINITY, true), -1);

        let mut drawn = board("XOX/XOO/OXX");
        assert_eq!(search.score(&mut drawn, 9, -SCORE_INFINITY, SCORE_INFINITY, true), 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X also has a fork at the centre, but the immediate win scores higher.
        let b = board("OOX/..X/...");
        assert_eq!(best_move(&b, Mark::X, Mark::O), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_prefers_win_over_block() {
        let b = board("OO./XX./...");
        assert_eq!(best_move(&b, Mark::X, Mark::O), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_blocks_opponent_threat() {
        let b = board("X../XO./...");
        assert_eq!(best_move(&b, Mark::O, Mark::X), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_tie_keeps_first_row_major_move() {
        // X threatens row 0 and column 0 at once, so every reply by O scores -1.
        let b = board("X.X/.O./X.O");
        let mut search = Minimax::new(Mark::O, Mark::X);
        for pos in b.available_moves() {
            let mut child = b;
            child.set(pos, Mark::O);
            assert_eq!(search.score(&mut child, 1, -SCORE_INFINITY, SCORE_INFINITY, false), -1);
        }
        assert_eq!(best_move(&b, Mark::O, Mark::X), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_no_move_on_finished_board() {
        assert_eq!(best_move(&board("XOX/XOO/OXX"), Mark::X, Mark::O), None);
        assert_eq!(best_move(&board("XXX/OO./..."), Mark::O, Mark::X), None);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let mut rng = SessionRng::new(7);
        for _ in 0..50 {
            let b = random_board(&mut rng);
            let before = b;
            let bot = side_to_move(&b);
            let _ = best_move(&b, bot, bot.opponent().unwrap());
            assert_eq!(b, before);

            let mut scratch = b;
            let mut search = Minimax::new(bot, bot.opponent().unwrap());
            search.score(&mut scratch, 0, -SCORE_INFINITY, SCORE_INFINITY, true);
            assert_eq!(scratch, before);
        }
    }

    #[test]
    fn test_returned_move_is_legal() {
        let mut rng = SessionRng::new(11);
        for _ in 0..100 {
            let b = random_board(&mut rng);
            if evaluate(&b).is_over() {
                continue;
            }
            let bot = side_to_move(&b);
            let pos = best_move(&b, bot, bot.opponent().unwrap()).unwrap();
            assert!(pos.is_on_board());
            assert!(b.is_empty_at(pos));
        }
    }

    #[test]
    fn test_pruned_and_exhaustive_agree() {
        let mut rng = SessionRng::new(42);
        for _ in 0..40 {
            let b = random_board(&mut rng);
            if evaluate(&b).is_over() {
                continue;
            }
            let bot = side_to_move(&b);
            let opponent = bot.opponent().unwrap();

            let mut search = Minimax::new(bot, opponent);
            for pos in b.available_moves() {
                let mut child = b;
                child.set(pos, bot);
                let expected = exhaustive_score(&child, bot, opponent, 1, false);
                let pruned = search.score(&mut child, 1, -SCORE_INFINITY, SCORE_INFINITY, false);
                assert_eq!(pruned, expected, "board\n{}move {}", b, pos);
            }

            assert_eq!(best_move(&b, bot, opponent), exhaustive_best_move(&b, bot, opponent));
        }
    }

    #[test]
    fn test_pruning_cuts_the_empty_board_search() {
        // The full game tree has 549,945 positions below the root.
        let (pos, stats) = best_move_with_stats(&Board::new(), Mark::X, Mark::O);
        assert!(pos.is_some());
        assert!(stats.cutoffs > 0);
        assert!(stats.nodes < 549_945);
    }

    #[test]
    fn test_self_play_is_a_draw() {
        let mut b = Board::new();
        let mut mark = Mark::X;
        while !evaluate(&b).is_over() {
            let pos = best_move(&b, mark, mark.opponent().unwrap()).unwrap();
            b.set(pos, mark);
            mark = mark.opponent().unwrap();
        }
        assert_eq!(evaluate(&b), GameStatus::Draw);
    }

    fn assert_bot_never_loses(b: &mut Board, to_move: Mark, bot: Mark) {
        let status = evaluate(b);
        if status.is_over() {
            assert_ne!(status.winner(), bot.opponent(), "bot lost:\n{}", b);
            return;
        }

        if to_move == bot {
            let pos = best_move(b, bot, bot.opponent().unwrap()).unwrap();
            b.set(pos, bot);
            assert_bot_never_loses(b, bot.opponent().unwrap(), bot);
            b.set(pos, Mark::Empty);
        } else {
            for pos in b.available_moves() {
                b.set(pos, to_move);
                assert_bot_never_loses(b, bot, bot);
                b.set(pos, Mark::Empty);
            }
        }
    }

    #[test]
    fn test_bot_never_loses_as_x() {
        assert_bot_never_loses(&mut Board::new(), Mark::X, Mark::X);
    }

    #[test]
    fn test_bot_never_loses_as_o() {
        assert_bot_never_loses(&mut Board::new(), Mark::X, Mark::O);
    }
}
