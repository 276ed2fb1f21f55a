use std::{
    fs::File,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::{debug, info, warn, LevelFilter};
use simplelog::WriteLogger;

use blockfall::{
    config::{DEFAULT_HEIGHT, DEFAULT_LEVEL, DEFAULT_SPEED_MS, DEFAULT_WIDTH},
    input::command_for,
    terminal::TerminalSession,
    ui, Command, GameConfig, GameLoop,
};

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,

    /// Base tick period in milliseconds.
    #[arg(short, long, default_value_t = DEFAULT_SPEED_MS)]
    speed: u64,

    /// Level divisor applied to the tick period.
    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    level: u32,

    /// Seed for a reproducible piece order.
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            speed_ms: self.speed,
            level: self.level,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The screen belongs to the game, so logs only go to a file.
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)
            .context("installing logger")?;
    }

    let config = args.config().validate()?;
    info!(
        "starting {}x{} grid, tick {:?}",
        config.width,
        config.height,
        config.tick_period()
    );

    let mut session = TerminalSession::enter().context("entering raw mode")?;
    let result = run(&mut session, &config);
    let restored = session.restore().context("restoring terminal");
    finish(result, restored)
}

/// The game's own error takes precedence; a restore failure behind it is only logged.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let (Err(_), Err(err)) = (&result, &restored) {
        warn!("{err:#}");
    }
    result.and(restored)
}

fn run(session: &mut TerminalSession, config: &GameConfig) -> Result<()> {
    let mut game = GameLoop::new(config);
    let tick_period = config.tick_period();
    let mut last_tick = Instant::now();

    loop {
        session.draw(|frame| ui::render(frame, &game))?;

        let timeout = tick_period
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        // Input and ticks are handled on this one thread, so they never interleave.
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        game.apply(command);
                    }
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_period {
            game.step();
            last_tick = Instant::now();
        }

        for event in game.take_events() {
            debug!("{event:?}");
        }
    }

    info!("quit with {} settled cells", game.board.total_filled_cells());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn game_error_wins_over_restore_error() {
        let err = finish(Err(anyhow!("draw failed")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn restore_error_surfaces_after_clean_run() {
        let err = finish(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
