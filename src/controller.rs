//! Game controller: owns the current board and serialises acquisitions.
//!
//! Only one acquisition may swap its result in. Starting a restart bumps
//! the acquisition epoch, which cancels any run already in flight at its
//! next iteration boundary; a cancelled run that finishes anyway is
//! discarded instead of swapped. Reveals address a board generation so a
//! click aimed at a replaced board is rejected.

use crate::acquisition::{AcquisitionError, BoardAcquisition, CancelToken};
use crate::board::{Board, BoardGeneration, Coordinate, RevealError, RevealOutcome};
use crate::provider::ContentProvider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Load state shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoardStatus {
    /// Nothing acquired yet.
    #[default]
    Empty,
    /// An acquisition is running.
    Loading,
    /// A board is ready to play.
    Ready,
    /// The last acquisition failed.
    Failed(String),
}

/// Notifications sent to the UI layer.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// An acquisition started.
    Loading,
    /// A new board was swapped in.
    BoardReady {
        /// Generation of the new board.
        generation: BoardGeneration,
        /// The board as swapped in.
        board: Board,
    },
    /// An acquisition failed for good.
    AcquisitionFailed {
        /// Human-readable reason.
        reason: String,
    },
}

#[derive(Debug, Default)]
struct ControllerState {
    board: Option<Board>,
    generation: BoardGeneration,
    status: BoardStatus,
}

/// Owns the board and wires UI commands to acquisition and reveals.
#[derive(Debug)]
pub struct GameController<P: ?Sized> {
    acquisition: BoardAcquisition<P>,
    state: Mutex<ControllerState>,
    epoch: Arc<AtomicU64>,
    events: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl<P: ContentProvider + ?Sized> GameController<P> {
    /// Creates a controller with no board.
    pub fn new(acquisition: BoardAcquisition<P>) -> Self {
        Self {
            acquisition,
            state: Mutex::new(ControllerState::default()),
            epoch: Arc::new(AtomicU64::new(0)),
            events: None,
        }
    }

    /// Sends [`GameEvent`]s to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns the current load state.
    pub fn status(&self) -> BoardStatus {
        self.lock().status.clone()
    }

    /// Returns the generation of the board on display.
    pub fn generation(&self) -> BoardGeneration {
        self.lock().generation
    }

    /// Returns a copy of the current board with its generation.
    pub fn snapshot(&self) -> Option<(BoardGeneration, Board)> {
        let state = self.lock();
        state.board.clone().map(|board| (state.generation, board))
    }

    /// Acquires a new board and swaps it in.
    ///
    /// Any acquisition already running is cancelled first. The previous
    /// board stays playable until the new one is complete.
    #[instrument(skip(self))]
    pub async fn on_restart_requested(&self) -> Result<BoardGeneration, AcquisitionError> {
        // Events go out while the lock is held so receivers see them in generation order.
        let token = {
            let mut state = self.lock();
            let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = BoardStatus::Loading;
            info!(epoch, "Starting acquisition");
            self.emit(GameEvent::Loading);
            CancelToken::new(epoch, Arc::clone(&self.epoch))
        };

        let result = self.acquisition.acquire_with(&token).await;

        let mut state = self.lock();
        if token.is_cancelled() {
            debug!("Discarding superseded acquisition");
            return Err(AcquisitionError::Cancelled);
        }

        match result {
            Ok(board) => {
                state.generation = state.generation.next();
                state.board = Some(board.clone());
                state.status = BoardStatus::Ready;
                let generation = state.generation;

                info!(%generation, "Board swapped in");
                self.emit(GameEvent::BoardReady { generation, board });
                Ok(generation)
            }
            Err(e) => {
                error!(error = %e, "Acquisition failed");
                state.status = BoardStatus::Failed(e.to_string());

                self.emit(GameEvent::AcquisitionFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Reveals the clue at `coord` on board `generation`.
    #[instrument(skip(self), fields(generation = %generation, coord = %coord))]
    pub fn on_reveal(
        &self,
        generation: BoardGeneration,
        coord: Coordinate,
    ) -> Result<RevealOutcome, RevealError> {
        let mut state = self.lock();
        let current = state.generation;
        let board = state.board.as_mut().ok_or(RevealError::NoBoard)?;

        if generation != current {
            warn!(%current, "Reveal addressed a replaced board");
            return Err(RevealError::StaleBoard {
                requested: generation,
                current,
            });
        }

        board.reveal(coord)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }
}
