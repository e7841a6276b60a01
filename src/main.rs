//! BHP TUI - Actor-based client for the home price prediction backend
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use bhp_tui::constants::BACKEND_URL_ENV;
use bhp_tui::messages::ui_events::key_to_ui_event;
use bhp_tui::{
    ui, AppActor, Config, EstimatorClient, FormInput, NetworkActor, NetworkCommand,
    NetworkResponse, RenderState, RoomCount, UiEvent,
};

#[derive(Parser)]
#[command(
    name = "bhp",
    version,
    about = "Terminal client for the Bengaluru home price prediction service",
    long_about = None
)]
struct Cli {
    /// Backend address (overrides the config file)
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,

    /// Config file (default: ~/.bhp/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Probe the backend and print the known locations
    Locations,
    /// Request a single price estimate
    Estimate {
        /// Total area in square feet
        #[arg(long)]
        sqft: String,
        /// Bedroom count (1-5)
        #[arg(long, value_parser = parse_room_count)]
        bhk: RoomCount,
        /// Bathroom count (1-5)
        #[arg(long, value_parser = parse_room_count)]
        bath: RoomCount,
        /// Location name, as listed by `bhp locations`
        #[arg(long)]
        location: String,
    },
}

fn parse_room_count(s: &str) -> Result<RoomCount, String> {
    let value: u8 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    RoomCount::try_from(value)
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_backend_url(cli.backend_url);
    config.validate()?;

    match cli.command {
        None => run_interactive(config).await,
        Some(Command::Locations) => {
            init_stderr_logging(&config);
            run_locations(&config).await
        }
        Some(Command::Estimate { sqft, bhk, bath, location }) => {
            init_stderr_logging(&config);
            let input = FormInput {
                area_sqft: sqft,
                bedrooms: bhk,
                bathrooms: bath,
                locality: location,
            };
            run_estimate(&config, input).await
        }
    }
}

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

fn init_stderr_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .init();
}

async fn run_locations(config: &Config) -> anyhow::Result<()> {
    let client = EstimatorClient::new(config);
    let locations = client.fetch_locations().await?;
    for location in locations {
        println!("{}", location);
    }
    Ok(())
}

async fn run_estimate(config: &Config, input: FormInput) -> anyhow::Result<()> {
    input.validate()?;
    let client = EstimatorClient::new(config);

    let locations = client.fetch_locations().await?;
    if !locations.contains(&input.locality) {
        anyhow::bail!(
            "unknown location '{}'; run `bhp locations` to list valid names",
            input.locality
        );
    }

    let estimate = client.estimate(&input).await?;
    println!("{}", estimate.display());
    Ok(())
}

async fn run_interactive(config: Config) -> anyhow::Result<()> {
    // Initialize logging to file; stdout belongs to the terminal
    let (dir, file) = split_log_path(&config.log_file);
    let file_appender = tracing_appender::rolling::never(dir, file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(backend = %config.base_url(), "Starting interactive client");

    // Terminal setup
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(EstimatorClient::new(&config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Interactive client stopped");
    Ok(())
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(bhp_tui::constants::DEFAULT_LOG_FILE));
    (dir, file)
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| ui::draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.focus, current_state.show_help) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}
