//! A terminal renderer for server-driven UI documents.
//!
//! Run the binary to show the built-in sample, or pass a JSON document path.
//! Run with `--print-document` to dump the normalised document and exit.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_document_load, spawn_event_reader, AppEvent, ChannelNotifier},
    handler,
    state::{AppState, LoadState},
};
use crate::config::{Action, AppConfig};
use crate::core::source::{DocumentSource, FileSource, SampleSource};
use crate::ui::{
    layout::AppLayout,
    renderer::render_document,
    stack::{ErrorScreen, LoadingScreen, StackWidget},
    theme::Theme,
    toast::ToastWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Server-driven UI renderer for the terminal")]
struct Cli {
    /// JSON document to render (defaults to the built-in sample).
    document: Option<PathBuf>,

    /// Print the resolved document as JSON and exit.
    #[arg(long = "print-document")]
    print_document: bool,

    /// Logical pixels per terminal row (overrides the config file).
    #[arg(long = "px-per-row")]
    px_per_row: Option<f32>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let source: Arc<dyn DocumentSource> = match &cli.document {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(SampleSource),
    };

    // ── print mode ────────────────────────────────────────────
    if cli.print_document {
        let document = source.fetch()?;
        println!("{}", document.to_json_pretty()?);
        return Ok(());
    }

    let mut config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!("{err}; using default settings");
        AppConfig::default()
    });
    if let Some(px) = cli.px_per_row {
        config.px_per_row = px.clamp(1.0, 200.0);
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, source, config).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Logs go to `log_file` when given, otherwise to stderr.  The level comes
/// from `RUST_LOG`.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // the TUI owns stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── event loop ───────

async fn run(terminal: &mut Tui, source: Arc<dyn DocumentSource>, config: AppConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone(), config.tick_rate());
    let notifier = ChannelNotifier::new(tx.clone());

    let mut state = AppState::new(config, source.describe());

    loop {
        if state.needs_reload {
            let generation = state.begin_load();
            spawn_document_load(Arc::clone(&source), generation, tx.clone());
        }

        terminal.draw(|frame| draw(frame, &mut state))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k, &notifier),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, &notifier),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
            AppEvent::Notify(message) => state.toasts.push(message, Instant::now()),
            AppEvent::DocumentLoaded { generation, result } => {
                state.finish_load(generation, result);
            }
        }
        state.toasts.tick(Instant::now());

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame<'_>, state: &mut AppState) {
    state.terminal_area = frame.area();
    let layout = AppLayout::from_area(frame.area());

    match &state.load {
        LoadState::Ready(doc) => {
            let nodes = render_document(doc);
            let stack = StackWidget::new(&nodes, state.config.tile_metrics())
                .focused_node(state.focused_grid);
            frame.render_stateful_widget(stack, layout.content_area, &mut state.grids);
        }
        LoadState::Loading => {
            frame.render_widget(
                LoadingScreen {
                    origin: &state.origin,
                },
                layout.content_area,
            );
        }
        LoadState::Unavailable(message) => {
            let retry_hint = format!(
                "press {} to retry, {} to quit",
                state.config.short_binding(Action::Reload),
                state.config.short_binding(Action::Quit)
            );
            frame.render_widget(
                ErrorScreen {
                    message,
                    retry_hint: &retry_hint,
                },
                layout.content_area,
            );
        }
    }

    if let Some(message) = state.toasts.current() {
        frame.render_widget(ToastWidget { message }, layout.content_area);
    }

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}
