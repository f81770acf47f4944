use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_table::config::{BlindConfig, HandRules, PotRule, TableConfig};
use holdem_table::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::error::Error;
use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "holdem-table", version, about = "Hot-seat No-Limit Hold'em in the terminal")]
struct Cli {
    /// Players at the table (2-9)
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Starting stack for every player
    #[arg(short, long, default_value_t = holdem_table::config::DEFAULT_CHIPS)]
    stack: u64,

    #[arg(long, default_value_t = holdem_table::config::DEFAULT_SMALL_BLIND)]
    small_blind: u64,

    #[arg(long, default_value_t = holdem_table::config::DEFAULT_BIG_BLIND)]
    big_blind: u64,

    /// Shuffle seed for reproducible deals
    #[arg(long)]
    seed: Option<u64>,

    /// Split all-in pots into layered side pots instead of one shared pot
    #[arg(long, default_value_t = false)]
    side_pots: bool,

    /// Write debug logs to this file (the terminal is busy drawing the table)
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Cli {
    fn table_config(&self) -> TableConfig {
        let pot = if self.side_pots { PotRule::Layered } else { PotRule::Single };
        TableConfig {
            players: self.players,
            starting_stack: self.stack,
            blinds: BlindConfig { small_blind: self.small_blind, big_blind: self.big_blind },
            rules: HandRules { pot, ..HandRules::default() },
            seed: self.seed,
        }
    }
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = std::fs::File::create(path)?;
    simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file)?;
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }
    let mut app = AppState::new(&cli.table_config())?;
    log::info!("table open: {} players, seed {:?}", cli.players, cli.seed);

    if !io::stdout().is_terminal() {
        println!(
            "holdem-table requires a real terminal (TTY).\nRun it in a terminal, q quits. Version: {}",
            holdem_table::VERSION
        );
        return Ok(());
    }
    let mut terminal = setup_terminal()?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(250));

    // Restore even when the loop failed.
    restore_terminal(terminal)?;
    Ok(res?)
}
