//! Terminal UI for Strictly Trivia

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use strictly_trivia::{ContentProvider, GameController, GameEvent};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use app::App;

type TriviaTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Sends logs to a file so they do not interfere with the TUI.
pub fn initialize_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create("strictly_trivia.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,strictly_trivia=debug")
            }),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the TUI until the player quits.
pub async fn run_tui(controller: GameController<dyn ContentProvider>) -> Result<()> {
    info!("Starting Strictly Trivia TUI");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let controller = Arc::new(controller.with_events(event_tx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, controller, event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Draw/input loop. Acquisitions run on spawned tasks and report back through events.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut TriviaTerminal,
    controller: Arc<GameController<dyn ContentProvider>>,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();
    spawn_restart(&controller);

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Check for keyboard input (non-blocking)
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            // A restart while loading supersedes the running acquisition.
            KeyCode::Char('r') => spawn_restart(&controller),
            KeyCode::Enter | KeyCode::Char(' ') => app.reveal(&*controller),
            code => app.move_cursor(code),
        }
    }
}

/// Starts a new acquisition in the background.
fn spawn_restart(controller: &Arc<GameController<dyn ContentProvider>>) {
    let controller = Arc::clone(controller);
    tokio::spawn(async move {
        if let Err(e) = controller.on_restart_requested().await {
            debug!(error = %e, "Restart did not produce a board");
        }
    });
}
