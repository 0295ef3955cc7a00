mod audio;
mod config;
mod game;
mod input;
mod states;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use log::info;
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tui::{backend::CrosstermBackend, Terminal};

use audio::LogAudio;
use config::Config;
use states::StateManager;
use ui::Scene;

/// Tilesnake - a snake game on tile levels with walls, food and teleporters
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[clap(long)]
    config: Option<PathBuf>,

    /// Skip the menus and start this level (0, 1 or 2)
    #[clap(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    level: Option<u8>,

    /// Seed for food placement
    #[clap(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[clap(long)]
    log_file: Option<PathBuf>,
}

/// The terminal belongs to the game, so the log goes to a file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => config::get_config_dir()?.join("tilesnake.log"),
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    mut manager: StateManager,
) -> Result<()> {
    let mut scene = Scene::new();
    let mut last_frame = Instant::now();

    while manager.is_running() {
        let mut events = Vec::new();
        let mut timeout = config.frame_duration();
        while event::poll(timeout)? {
            if let Some(event) = input::translate(&event::read()?, &config.key_bindings) {
                events.push(event);
            }
            timeout = Duration::ZERO;
        }

        manager.process_events(&events);
        manager.process_input();

        let now = Instant::now();
        manager.update(now - last_frame);
        last_frame = now;

        manager.render(&mut scene);
        terminal.draw(|f| ui::render(f, &scene))?;
    }

    info!("exiting after {} frames", scene.frames_presented());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    // Load config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut manager = StateManager::new(&config, Box::new(LogAudio::new()), cli.seed);
    if let Some(level) = cli.level {
        manager.start_level(level as usize);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let res = run_app(&mut terminal, &config, manager);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}
