//! Clue reveal state machine.
//!
//! Each clue walks `Hidden -> ShowingQuestion -> ShowingAnswer` and then
//! stays put. Every state has a defined transition, so a reveal at a valid
//! coordinate never fails.

use super::types::{Board, BoardGeneration, Coordinate, RevealState};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Result of revealing a clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The clue moved to `ShowingQuestion`; carries the question text.
    Question(String),
    /// The clue moved to `ShowingAnswer`; carries the answer text.
    Answer(String),
    /// The clue already showed its answer. Nothing changed.
    NoChange,
}

impl RevealOutcome {
    /// Whether the reveal changed the board.
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Text the UI should now show for the clue, if it changed.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Question(text) | Self::Answer(text) => Some(text),
            Self::NoChange => None,
        }
    }
}

/// Error raised by a reveal request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RevealError {
    /// No clue exists at the coordinate.
    #[display("No clue at {}", _0)]
    InvalidCoordinate(Coordinate),

    /// The request was addressed to a board that has since been replaced.
    #[display("Board {} was replaced by {}", requested, current)]
    StaleBoard {
        /// Generation the caller addressed.
        requested: BoardGeneration,
        /// Generation currently on display.
        current: BoardGeneration,
    },

    /// No board has been acquired yet.
    #[display("No board is loaded")]
    NoBoard,
}

impl std::error::Error for RevealError {}

/// Next state for a clue in `state`, or `None` when the state is terminal.
pub const fn next_state(state: RevealState) -> Option<RevealState> {
    match state {
        RevealState::Hidden => Some(RevealState::ShowingQuestion),
        RevealState::ShowingQuestion => Some(RevealState::ShowingAnswer),
        RevealState::ShowingAnswer => None,
    }
}

impl Board {
    /// Advances the clue at `coord` one step and returns what became visible.
    ///
    /// Only the addressed clue is touched.
    #[instrument(skip(self), fields(coord = %coord))]
    pub fn reveal(&mut self, coord: Coordinate) -> Result<RevealOutcome, RevealError> {
        let clue = self.clue_mut(coord).ok_or_else(|| {
            warn!("Reveal addressed outside the board");
            RevealError::InvalidCoordinate(coord)
        })?;

        let Some(next) = next_state(clue.state()) else {
            debug!("Answer already showing");
            return Ok(RevealOutcome::NoChange);
        };

        clue.set_state(next);
        debug!(state = %next, "Clue advanced");

        Ok(match next {
            RevealState::ShowingQuestion => RevealOutcome::Question(clue.question().to_string()),
            RevealState::ShowingAnswer => RevealOutcome::Answer(clue.answer().to_string()),
            RevealState::Hidden => RevealOutcome::NoChange,
        })
    }
}
