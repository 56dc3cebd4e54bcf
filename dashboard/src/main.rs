use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use staff_monitor_common::HttpMonitorApi;
use std::{env, fs::File, io, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

mod app;
mod fetch;
mod state;
mod ui;
mod view;

#[derive(Parser, Debug)]
#[command(
    name = "staff-monitor-dashboard",
    version,
    about = "Terminal dashboard for the staff activity monitor"
)]
struct Args {
    /// Base URL of the monitoring server (falls back to MONITOR_SERVER)
    #[arg(long)]
    server: Option<String>,

    /// Refresh interval in seconds (falls back to MONITOR_REFRESH_SECS)
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Initial time range for the per-employee panels, in hours
    #[arg(long, default_value_t = 24)]
    range_hours: i64,

    /// Diagnostics log file; the terminal itself belongs to the UI
    #[arg(long, default_value = "dashboard.log")]
    log_file: String,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let server = args
        .server
        .or_else(|| env::var("MONITOR_SERVER").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let interval_secs = args
        .interval_secs
        .or_else(|| env::var("MONITOR_REFRESH_SECS").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(5);

    tracing::info!(server = %server, interval_secs, "starting dashboard");

    let api = Arc::new(HttpMonitorApi::new(&server)?);

    // Fetches run on the tokio runtime; the UI loop keeps this thread
    let runtime = tokio::runtime::Runtime::new()?;
    let (fetcher, rx) = fetch::Fetcher::new(api, runtime.handle().clone());

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(
        &mut terminal,
        fetcher,
        rx,
        Duration::from_secs(interval_secs),
        args.range_hours,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {:?}", err);
    }
    result
}
