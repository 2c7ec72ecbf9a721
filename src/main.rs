mod app;
mod command;
mod config;
mod consts;
mod game;
mod scheduler;
mod store;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use log::{info, warn, LevelFilter};
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("gridsnake: logging disabled: {e:?}");
    }
    info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    let app = App::new(&config);
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableFocusChange).and_then(|()| app.run(terminal));
    if let Err(e) = crossterm::execute!(io::stdout(), DisableFocusChange) {
        warn!("Failed to disable focus change events: {e}");
    }
    ratatui::restore();
    info!("Exiting");
    io_exit(r)
}

/// Load the configuration file, if there is one
fn load_config() -> anyhow::Result<Config> {
    let Ok(path) = Config::default_path() else {
        return Ok(Config::default());
    };
    Config::load(&path, true)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Send log messages to the configured log file.  The terminal itself is
/// occupied by the game, so nothing is logged there.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let level = config.logging.level;
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = config
        .files
        .log_file()
        .context("failed to determine path to local data directory")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&*path)?;
    simplelog::WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
