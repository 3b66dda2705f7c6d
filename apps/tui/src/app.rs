//! Panel application state and event loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use tokio::sync::{Mutex, mpsc};
use url::Url;

use suggestpanel_client::SuggestionClient;
use suggestpanel_core::{Pipeline, RequestOptions};
use suggestpanel_extractor::HttpTabHost;
use suggestpanel_shared::{AppConfig, Suggestion};

use crate::surface::{ChannelPanel, SurfaceUpdate};
use crate::widgets::status_bar;

/// What the rendered surface currently shows.
enum Surface {
    Idle,
    Loading,
    Rendered {
        suggestions: Vec<Suggestion>,
        selected: usize,
    },
    Failed(String),
}

/// Application state.
struct App {
    /// Page shown in the header.
    page_url: Url,
    /// Current surface contents.
    surface: Surface,
    /// Whether a pipeline run is in flight (single-in-flight guard).
    in_flight: bool,
    /// Whether the app should quit.
    should_quit: bool,
    /// Status message shown in bottom bar.
    status: String,
}

impl App {
    fn new(page_url: Url) -> Self {
        Self {
            page_url,
            surface: Surface::Idle,
            in_flight: false,
            should_quit: false,
            status: "r: refresh · q: quit".to_string(),
        }
    }

    fn apply(&mut self, update: SurfaceUpdate) {
        match update {
            SurfaceUpdate::Loading => {
                self.surface = Surface::Loading;
            }
            SurfaceUpdate::Suggestions(suggestions) => {
                self.in_flight = false;
                self.status = format!("{} suggestion(s) · r: refresh · q: quit", suggestions.len());
                self.surface = Surface::Rendered {
                    suggestions,
                    selected: 0,
                };
            }
            SurfaceUpdate::Error(message) => {
                self.in_flight = false;
                self.status = "Run failed · r: retry · q: quit".to_string();
                self.surface = Surface::Failed(message);
            }
        }
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) async fn run(page_url: Url, config: &AppConfig) -> Result<()> {
    let host = HttpTabHost::new(page_url.clone())?;
    let client = SuggestionClient::new(config.backend.resolve_base_url())?;
    let options = RequestOptions::from(config);
    let pipeline = Arc::new(Mutex::new(Pipeline::new(host, client, options)));

    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, page_url, pipeline).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    page_url: Url,
    pipeline: Arc<Mutex<Pipeline<HttpTabHost>>>,
) -> Result<()> {
    let mut app = App::new(page_url);
    let (tx, mut rx) = mpsc::unbounded_channel::<SurfaceUpdate>();

    // First presentation triggers a run automatically.
    trigger_run(&mut app, &pipeline, &tx);

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Apply any surface transitions delivered by the pipeline task.
        while let Ok(update) = rx.try_recv() {
            app.apply(update);
        }

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, &pipeline, &tx, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Spawn one pipeline run, unless one is already in flight.
fn trigger_run(
    app: &mut App,
    pipeline: &Arc<Mutex<Pipeline<HttpTabHost>>>,
    tx: &mpsc::UnboundedSender<SurfaceUpdate>,
) {
    if app.in_flight {
        tracing::debug!("run trigger ignored, pipeline already in flight");
        return;
    }

    app.in_flight = true;
    let pipeline = pipeline.clone();
    let mut panel = ChannelPanel::new(tx.clone());

    tokio::spawn(async move {
        let mut pipeline = pipeline.lock().await;
        pipeline.run(&mut panel).await;
    });
}

fn handle_key(
    app: &mut App,
    pipeline: &Arc<Mutex<Pipeline<HttpTabHost>>>,
    tx: &mpsc::UnboundedSender<SurfaceUpdate>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('r') => {
            trigger_run(app, pipeline, tx);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Surface::Rendered { selected, .. } = &mut app.surface {
                if *selected > 0 {
                    *selected -= 1;
                }
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Surface::Rendered {
                suggestions,
                selected,
            } = &mut app.surface
            {
                if *selected + 1 < suggestions.len() {
                    *selected += 1;
                }
            }
        }
        _ => {}
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Suggestion surface
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Header
    let state_label = match &app.surface {
        Surface::Idle => Span::styled("● Idle", Style::default().fg(Color::DarkGray)),
        Surface::Loading => Span::styled("● Loading", Style::default().fg(Color::Yellow)),
        Surface::Rendered { .. } => Span::styled("● Ready", Style::default().fg(Color::Green)),
        Surface::Failed(_) => Span::styled("● Failed", Style::default().fg(Color::Red)),
    };

    let header = Paragraph::new(Line::from(vec![
        state_label,
        Span::raw("  "),
        Span::styled(app.page_url.as_str(), Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" SuggestPanel "),
    );
    f.render_widget(header, chunks[0]);

    // Suggestion surface
    draw_surface(f, app, chunks[1]);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);
}

fn draw_surface(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Suggestions ");

    match &app.surface {
        Surface::Idle => {
            let idle = Paragraph::new("Press 'r' to fetch suggestions.")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(idle, area);
        }
        Surface::Loading => {
            let loading = Paragraph::new("Loading…")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            f.render_widget(loading, area);
        }
        Surface::Rendered {
            suggestions,
            selected,
        } => {
            if suggestions.is_empty() {
                let empty = Paragraph::new("No suggestions returned for this page.")
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(empty, area);
                return;
            }

            let items: Vec<ListItem> = suggestions
                .iter()
                .enumerate()
                .map(|(i, suggestion)| {
                    let style = if i == *selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let prefix = if i == *selected { "▸ " } else { "  " };
                    ListItem::new(format!("{prefix}{}", suggestion.display_row())).style(style)
                })
                .collect();

            let list =
                List::new(items).block(block.title(format!(" Suggestions ({}) ", suggestions.len())));
            f.render_widget(list, area);
        }
        Surface::Failed(message) => {
            let error = Paragraph::new(format!("Error: {message}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(block);
            f.render_widget(error, area);
        }
    }
}
