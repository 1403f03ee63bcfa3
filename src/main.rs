//! tinypost - terminal HTTP request composer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tinypost::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use tinypost::messages::ui_events::{key_to_ui_event, Panel, ResponseTab};
use tinypost::messages::{NetworkCommand, NetworkResponse, RenderState, Status, UiEvent};
use tinypost::ui::{self, environment_label, highlight_json, history_label, method_color, status_color, status_line};
use tinypost::{AppActor, AppState, Config, HttpExecutor, NetworkActor};

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
    let config = Config::from_env();
    config.ensure_dirs()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.data_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        version = APP_VERSION,
        data_dir = %config.data_dir.display(),
        log_file = %config.log_file().display(),
        timeout_secs = config.request_timeout.as_secs(),
        "Starting {}",
        APP_NAME
    );
    for (name, value) in &config.rejected_overrides {
        tracing::warn!(variable = %name, value = %value, "Ignoring invalid override");
    }

    let state = AppState::from_config(&config);

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
    let network_actor = NetworkActor::new(HttpExecutor::new(config.request_timeout), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(event) = key_to_ui_event(key, current_state.active_panel) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        // Let the actors run between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + environment
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(main_chunks[1]);

    draw_history(f, state, content[0]);
    draw_request_and_response(f, state, content[1]);
    draw_status_bar(f, state, main_chunks[2]);
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(environment_label(&state.environment), Style::default().fg(Color::Green)),
        Span::styled(
            "   ^S send  ^N method  ^E env  ^W save  ^R view  Tab focus  ^Q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::History;

    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|entry| {
            ListItem::new(history_label(entry)).style(Style::default().fg(method_color(entry.method)))
        })
        .collect();

    let list = List::new(items)
        .block(ui::panel_block(" History (Enter replays) ", is_focused))
        .highlight_style(Style::default().bg(Color::DarkGray).bold());

    let mut list_state = ListState::default();
    if is_focused && !state.history.is_empty() {
        list_state.select(Some(state.selected_history));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_request_and_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Method + URL
            Constraint::Length(6), // Headers
            Constraint::Length(8), // Body
            Constraint::Min(5),    // Response
        ])
        .split(area);

    draw_url_bar(f, state, chunks[0]);
    draw_text_panel(f, state, Panel::Headers, " Headers (Key: Value per line) ", &state.headers, chunks[1]);

    let body_title = if state.method.has_body() {
        " Body (JSON) "
    } else {
        " Body (ignored for GET/DELETE) "
    };
    draw_text_panel(f, state, Panel::Body, body_title, &state.body, chunks[2]);
    draw_response(f, state, chunks[3]);
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Url;
    let loading = if state.is_loading { " [...]" } else { "" };

    let title = format!(" {}{} ", state.method.as_str(), loading);
    let block = ui::panel_block(&title, is_focused)
        .title_style(Style::default().fg(method_color(state.method)).bold());

    f.render_widget(Paragraph::new(state.url.as_str()).block(block), area);

    if is_focused {
        place_cursor(f, area, &state.url);
    }
}

fn draw_text_panel(f: &mut Frame, state: &RenderState, panel: Panel, title: &str, text: &str, area: Rect) {
    let is_focused = state.active_panel == panel;
    let widget = Paragraph::new(text).block(ui::panel_block(title, is_focused));
    f.render_widget(widget, area);

    if is_focused {
        place_cursor(f, area, text);
    }
}

fn place_cursor(f: &mut Frame, area: Rect, text: &str) {
    let (x, y) = ui::cursor_position(area, text);
    f.set_cursor_position(Position::new(x, y));
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;
    let block = ui::panel_block(" Response (1/2/3 or ←/→, ↑/↓ scroll) ", is_focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<&str> = ResponseTab::ALL.iter().map(|t| t.title()).collect();
    f.render_widget(ui::render_tabs(&titles, state.response_tab.index()), chunks[0]);

    let paragraph = if let Some(message) = &state.failure {
        if state.response_tab == ResponseTab::Raw {
            Paragraph::new(format!("Error: {}", message)).style(Style::default().fg(Color::Red))
        } else {
            Paragraph::new("")
        }
    } else if state.response_tab == ResponseTab::Json && state.views.is_some() {
        Paragraph::new(highlight_json(state.response_text()))
    } else {
        Paragraph::new(state.response_text())
    };

    f.render_widget(
        paragraph
            .wrap(Wrap { trim: false })
            .scroll((state.response_scroll, 0)),
        chunks[1],
    );
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let style = match &state.status {
        Status::Completed { status, .. } => Style::default().fg(status_color(*status)),
        Status::Failed | Status::Rejected(_) | Status::Error(_) => Style::default().fg(Color::Red),
        Status::Sending => Style::default().fg(Color::Yellow),
        Status::Idle | Status::Saved(_) => Style::default().fg(Color::Gray),
    };
    f.render_widget(Paragraph::new(format!(" {}", status_line(&state.status))).style(style), area);
}
