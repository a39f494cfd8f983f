// ABOUTME: Main entry point for quoteflow with TUI and CLI support
//
// Binary: quoteflow
// Usage: quoteflow [COMMAND]
// - No command: launches the interactive wizard
// - parse: run AI assist parsing from the command line
// - draft: show saved-draft status
// - reset: discard the saved draft

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use quoteflow::app::{App, EventHandler};
use quoteflow::cli::{self, Cli, Commands};
use quoteflow::components::LayoutComponent;
use quoteflow::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = Cli::parse();
    let config = AppConfig::load()?;

    let result = match args.command {
        Some(Commands::Parse { text }) => cli::parse(&config, &text).await,
        Some(Commands::Draft) => cli::draft_status(&config),
        Some(Commands::Reset) => cli::reset(&config),
        Some(Commands::Tui) | None => run_tui(&config).await,
    };

    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(config: &AppConfig) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    let mut app = App::new(config)?;
    let mut layout = LayoutComponent::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut app, &mut layout, &mut terminal).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &mut app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Release/repeat events double keystrokes on some terminals
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                        EventHandler::process_event(app_event, &mut app.state);

                        // Parse/submit were queued by the handler; run them
                        // right away so the UI reflects progress immediately
                        if app.state.pending_async_action.is_some() {
                            terminal.draw(|frame| {
                                layout.render(frame, &mut app.state);
                            })?;
                            if let Err(e) = app.tick().await {
                                tracing::error!("Error during immediate tick: {}", e);
                            }
                            last_tick = Instant::now();
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if let Err(e) = app.tick().await {
                // Keep running instead of crashing
                tracing::error!("Error during app tick: {}", e);
            }
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = AppConfig::logs_dir().unwrap_or_else(|_| std::path::PathBuf::from(".quoteflow/logs"));
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "quoteflow-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        // No log file, no logging - the TUI owns stdout
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoteflow=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before logging so the message is readable
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
