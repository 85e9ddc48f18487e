//! Application state and logic.

use crossterm::event::KeyCode;
use strictly_trivia::{
    Board, BoardGeneration, ContentProvider, Coordinate, GameController, GameEvent, RevealError,
    RevealOutcome,
};
use tracing::{debug, warn};

use super::input::move_cursor;

/// Main application state.
pub struct App {
    board: Option<(BoardGeneration, Board)>,
    cursor: Coordinate,
    loading: bool,
    failure: Option<String>,
    status_message: String,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            board: None,
            cursor: Coordinate::new(0, 0),
            loading: false,
            failure: None,
            status_message: "Waiting for categories...".to_string(),
        }
    }

    /// Gets the board on display, if any.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref().map(|(_, board)| board)
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    /// Whether an acquisition is running.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reason the last acquisition failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Handles an event from the controller.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::Loading => {
                self.loading = true;
                self.failure = None;
                self.status_message = "Loading categories...".to_string();
            }
            GameEvent::BoardReady { generation, board } => {
                if let Some((current, _)) = &self.board
                    && *current > generation
                {
                    debug!(%generation, %current, "Ignoring older board");
                    return;
                }
                self.loading = false;
                self.failure = None;
                self.board = Some((generation, board));
                self.cursor = Coordinate::new(0, 0);
                self.status_message = "New board ready. Pick a clue!".to_string();
            }
            GameEvent::AcquisitionFailed { reason } => {
                self.loading = false;
                self.status_message = "Could not load a board. Press 'r' to try again.".to_string();
                self.failure = Some(reason);
            }
        }
    }

    /// Moves the cursor.
    pub fn move_cursor(&mut self, key: KeyCode) {
        self.cursor = move_cursor(self.cursor, key);
    }

    /// Reveals the clue under the cursor through the controller.
    pub fn reveal<P: ContentProvider + ?Sized>(&mut self, controller: &GameController<P>) {
        let Some((generation, _)) = self.board else {
            return;
        };

        match controller.on_reveal(generation, self.cursor) {
            Ok(RevealOutcome::NoChange) => {
                self.status_message = "That answer is already showing.".to_string();
            }
            Ok(RevealOutcome::Question(_)) => {
                self.status_message = "Question revealed. Press Enter for the answer.".to_string();
                self.refresh(controller);
            }
            Ok(RevealOutcome::Answer(_)) => {
                self.refresh(controller);
                self.status_message = if self.board().is_some_and(Board::is_complete) {
                    "Board cleared! Press 'r' for a new game.".to_string()
                } else {
                    "Answer revealed.".to_string()
                };
            }
            Err(RevealError::StaleBoard { .. }) => {
                debug!("Board replaced under the cursor, refreshing");
                self.refresh(controller);
            }
            Err(e) => {
                warn!(error = %e, "Reveal rejected");
                self.status_message = format!("Reveal failed: {}", e);
            }
        }
    }

    fn refresh<P: ContentProvider + ?Sized>(&mut self, controller: &GameController<P>) {
        self.board = controller.snapshot();
    }
}
