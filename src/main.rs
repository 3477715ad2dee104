use std::io;
use std::path::PathBuf;
use std::time::Instant;

use arcade_snake::config::{Config, ConfigError};
use arcade_snake::game::Game;
use arcade_snake::input::{self, GameInput};
use arcade_snake::logging;
use arcade_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use log::info;

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a fixed grid, in your terminal")]
struct Cli {
    /// JSON config file; defaults to the per-user config when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Simulation steps per second.
    #[arg(long = "tick-rate")]
    tick_rate: Option<u32>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli).map_err(io::Error::other)?;

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, cli.verbose)?;

    let game = match cli.seed {
        Some(seed) => Game::with_seed(config.game, seed),
        None => Game::new(config.game),
    }
    .map_err(io::Error::other)?;
    info!("starting session: {:?}", config);

    let mut session = TerminalSession::enter()?;
    run(&mut session, game, &config)
}

fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(width) = cli.width {
        config.game.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.game.grid.height = height;
    }
    if let Some(tick_rate) = cli.tick_rate {
        config.display.tick_rate_hz = tick_rate;
    }

    config.validate()?;
    Ok(config)
}

fn run(session: &mut TerminalSession, mut game: Game, config: &Config) -> io::Result<()> {
    let tick_interval = config.display.tick_interval();
    let mut last_tick = Instant::now();

    loop {
        session.draw(&game, &config.display)?;

        if game.is_over() {
            let pressed = input::wait_for_key_press(config.display.game_over_hold())?;
            info!(
                "session ended with score {} ({})",
                game.score,
                if pressed { "key pressed" } else { "hold elapsed" }
            );
            return Ok(());
        }

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        for event in input::poll_inputs(timeout)? {
            match event {
                GameInput::Quit => {
                    info!("quit at score {}", game.score);
                    return Ok(());
                }
                GameInput::Direction(direction) => game.snake.set_direction(direction),
            }
        }

        if last_tick.elapsed() >= tick_interval {
            game.update();
            last_tick = Instant::now();
        }
    }
}
