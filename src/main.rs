//! Quote TUI - Terminal User Interface for insurance quote intake
//!
//! A Ratatui-based form that collects an applicant's details, vehicles and
//! dependents, saves partial applications and submits them for a quote.

mod api;
mod app;
mod config;
mod platform;
mod state;
mod storage;
mod ui;

use anyhow::{Context, Result};
use api::QuoteApiClient;
use app::App;
use config::{project_dirs, TuiConfig};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{ApplicationContext, LoadingState};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::ResumeStore;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redraw interval while the saved application loads
const LOADING_TICK: Duration = Duration::from_millis(80);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = TuiConfig::load_or_create().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {e}");
        TuiConfig::default()
    });
    let client = QuoteApiClient::new(&config.api_host())?;
    let store = ResumeStore::default_location()?;
    tracing::info!(
        host = client.host(),
        resume = %store.path().display(),
        "Starting quote-tui"
    );
    let context = ApplicationContext::new(Arc::new(client), store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, context).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("Exiting after error: {err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; stderr would draw over the UI
fn init_logging() {
    let writer = log_file_writer().unwrap_or_else(|| BoxMakeWriter::new(io::stderr));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
}

fn log_file_writer() -> Option<BoxMakeWriter> {
    let dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("quote-tui.log"))
        .ok()?;
    Some(BoxMakeWriter::new(Mutex::new(file)))
}

async fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut context: ApplicationContext,
) -> Result<()> {
    hydrate_with_spinner(terminal, &mut context).await?;
    let mut app = App::new(context);
    run_app(terminal, &mut app)
}

/// Draw the loading screen until the saved application has been fetched
async fn hydrate_with_spinner<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    context: &mut ApplicationContext,
) -> Result<()> {
    let mut loading = LoadingState::new();
    let mut ticker = tokio::time::interval(LOADING_TICK);
    let hydrate = context.hydrate();
    tokio::pin!(hydrate);

    loop {
        tokio::select! {
            _ = &mut hydrate => return Ok(()),
            _ = ticker.tick() => {
                loading.update();
                terminal
                    .draw(|frame| ui::draw_loading(frame, &loading))
                    .context("Failed to draw loading screen")?;
            }
        }
    }
}

/// Event loop; finished save and submit requests are applied before each draw
fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_requests();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    app.request_quit();
                } else {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit() {
            tracing::info!("Quit requested");
            return Ok(());
        }
    }
}
