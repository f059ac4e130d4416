use std::sync::Arc;
use std::{env, fs, io};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use projectboard::board::Board;
use projectboard::storage::{JsonFileStorage, DEFAULT_BOARD_FILE};
use projectboard::ui;

const LOG_FILE: &str = "projectboard.log";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to a file; stderr belongs to the TUI.
    let log = fs::File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(log))
        .with_ansi(false)
        .init();

    // Board file path from the first argument, else the default next to cwd.
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_BOARD_FILE.to_string());
    let mut board = Board::open(JsonFileStorage::new(path));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut board);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
