//! realtydesk - terminal admin dashboard for real-estate listings.

use std::io::{self, Stdout};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use realtydesk::app::{export_dir, App};
use realtydesk::cli::{self, Cli, Command};
use realtydesk::config::{Config, Settings};
use realtydesk::events::{Event, EventHandler};
use realtydesk::store::Stores;
use realtydesk::tasks::TaskSpawner;
use realtydesk::{logging, ui};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    let settings = config.settings;
    let data_dir = cli::resolve_data_dir(args.data_dir.as_deref(), &settings)?;

    let result = match args.command {
        None | Some(Command::Tui) => run_tui(settings, &data_dir).await,
        Some(command) => cli::run(command, &settings, &data_dir).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "Exiting with error");
    }
    logging::shutdown();
    result
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_tui(settings: Settings, data_dir: &Path) -> anyhow::Result<()> {
    ui::init_theme(&settings.theme);
    info!(data_dir = %data_dir.display(), "Starting dashboard");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let exports = export_dir(&settings, data_dir);
    let mut app = App::new(settings, Stores::local(data_dir), exports, TaskSpawner::new(tx));
    app.start();

    let mut terminal = setup_terminal()?;
    let size = terminal.size()?;
    app.update(Event::Resize(size.width, size.height));

    let events = EventHandler::new();
    let result = run_loop(&mut terminal, &mut app, &events, &mut rx);

    restore_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    rx: &mut mpsc::UnboundedReceiver<realtydesk::tasks::DataMessage>,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }
    }
    Ok(())
}
