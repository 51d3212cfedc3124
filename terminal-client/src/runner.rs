use std::io::{self, BufRead, Write};

use common::games::SessionRng;
use common::games::tictactoe::{
    BotInput, BotType, GameStatus, Mark, TicTacToeGameState, calculate_move,
};
use common::log;

use crate::input::{parse_mark, parse_move};

pub struct TerminalGame<R, W> {
    input: R,
    output: W,
    bot_type: BotType,
    rng: SessionRng,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    pub fn new(input: R, output: W, bot_type: BotType, rng: SessionRng) -> Self {
        Self {
            input,
            output,
            bot_type,
            rng,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the game ended",
            ));
        }
        Ok(line)
    }

    pub fn prompt_mark(&mut self) -> io::Result<Mark> {
        let mut line = self.prompt("Do you want to be X or O? ")?;
        loop {
            if let Some(mark) = parse_mark(&line) {
                return Ok(mark);
            }
            line = self.prompt("Choose X or O: ")?;
        }
    }

    /// Runs one game to the end. X always moves first, whichever side holds it.
    pub fn play(&mut self, human_mark: Mark) -> io::Result<GameStatus> {
        let Some(bot_mark) = human_mark.opponent() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "human mark must be X or O",
            ));
        };

        log!(
            "Starting game: human {} vs {} bot {} (seed {})",
            human_mark,
            self.bot_type,
            bot_mark,
            self.rng.seed()
        );

        let mut state = TicTacToeGameState::new();

        loop {
            write!(self.output, "{}", state.board)?;

            if state.status.is_over() {
                writeln!(self.output, "{}", state.status)?;
                log!("Game over: {}", state.status);
                return Ok(state.status);
            }

            if state.current_mark == human_mark {
                let line = self.prompt("Your move (row and column, from 0 to 2): ")?;
                let placed = parse_move(&line, &state.board)
                    .map_err(|e| e.to_string())
                    .and_then(|pos| state.place_mark(pos));
                if let Err(message) = placed {
                    writeln!(self.output, "{}", message)?;
                }
            } else {
                writeln!(self.output, "Bot is thinking...")?;
                let input = BotInput::from_game_state(&state);
                let pos = calculate_move(self.bot_type, input, &mut self.rng)
                    .ok_or_else(|| io::Error::other("bot found no move on an unfinished board"))?;
                state.place_mark(pos).map_err(io::Error::other)?;
                writeln!(self.output, "Bot plays {}", pos)?;
            }
        }
    }
}
