mod config;
mod input;
mod runner;

use std::io;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{BotType, Mark};
use common::logger;

use config::get_config_manager;
use runner::TerminalGame;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against a minimax bot")]
struct Args {
    /// Your mark; X always moves first
    #[arg(long)]
    mark: Option<Mark>,

    /// Bot strategy: minimax or random
    #[arg(long)]
    bot: Option<BotType>,

    /// YAML config file, defaults to tictactoe_config.yaml next to the binary
    #[arg(long)]
    config: Option<String>,

    /// Seed for the random bot
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Log search statistics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config = get_config_manager(args.config.as_deref()).get_config()?;

    let bot_type = args.bot.unwrap_or(config.bot);
    let rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let mut game = TerminalGame::new(io::stdin().lock(), io::stdout().lock(), bot_type, rng);

    let human_mark = match args.mark.or(config.player_mark) {
        Some(mark) => mark,
        None => game.prompt_mark()?,
    };

    game.play(human_mark)?;

    Ok(())
}
