//! Latch - Terminal Login Client
//!
//! Signs the user in against a remote authentication endpoint, or with the
//! machine's fingerprint reader, then shows the main screen.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use latch_core::{ClientConfig, ConfigError};
use latch_tui::cli::Cli;
use latch_tui::App;

/// Application entry point with panic handling for terminal restoration
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    if cli.save_config {
        let path = cli.config_path().ok_or(ConfigError::NoConfigDir)?;
        config
            .save_to(&path)
            .with_context(|| format!("Failed to save configuration to {:?}", path))?;
    }

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    init_logging(cli.log_path(&config).as_deref())?;
    tracing::info!(endpoint = %config.endpoint, locale = %config.locale, "Starting latch");

    let result = run_app(&config);

    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Route diagnostics to a file; the terminal belongs to the UI
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("latch_tui=info".parse()?)
        .add_directive("latch_core=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;

            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry.init(),
    }

    Ok(())
}

/// Main application runner
fn run_app(config: &ClientConfig) -> Result<()> {
    // Network and biometric calls run on the runtime; the UI loop stays on this thread
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut app = App::new(config, runtime.handle().clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

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
