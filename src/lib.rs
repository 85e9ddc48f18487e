//! Strictly Trivia library - provider-backed trivia boards
//!
//! Builds a six-by-five board of categories and clues from a content
//! provider and tracks the reveal state of every clue.
//!
//! # Architecture
//!
//! - **Provider**: source of category listings and clue sets (HTTP or fixture)
//! - **Sampler**: random selection of eligible categories and clues
//! - **Acquisition**: retry loop that assembles a complete board
//! - **Board**: data model and the per-clue reveal state machine
//! - **Controller**: single-flight restarts and atomic board swaps
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_trivia::{
//!     AcquisitionPolicy, BoardAcquisition, Coordinate, GameController, JServiceProvider,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let timeout = std::time::Duration::from_secs(10);
//! let provider = JServiceProvider::new("https://jservice.io", timeout)?;
//! let acquisition = BoardAcquisition::new(Arc::new(provider), AcquisitionPolicy::default());
//! let controller = GameController::new(acquisition);
//!
//! let generation = controller.on_restart_requested().await?;
//! let outcome = controller.on_reveal(generation, Coordinate::new(0, 0))?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod acquisition;
mod board;
mod config;
mod controller;
mod provider;
mod sampler;

// Crate-level exports - Board model and reveal state machine
pub use board::{
    Board, BoardGeneration, BoardShapeError, CATEGORY_COUNT, CLUES_PER_CATEGORY, Category, Clue,
    Coordinate, MIN_CLUES_PER_CATEGORY, RevealError, RevealOutcome, RevealState, next_state,
};

// Crate-level exports - Content providers
pub use provider::{
    CategoryDetail, CategoryId, CategorySummary, ContentProvider, FixtureCategory, FixtureFile,
    FixtureProvider, JServiceProvider, ProviderClue, ProviderError,
};

// Crate-level exports - Sampling
pub use sampler::{select_categories, select_clues};

// Crate-level exports - Acquisition
pub use acquisition::{
    AcquisitionError, AcquisitionPolicy, BoardAcquisition, CancelToken, DEFAULT_PAGE_SIZE,
};

// Crate-level exports - Controller
pub use controller::{BoardStatus, GameController, GameEvent};

// Crate-level exports - Configuration
pub use config::{BASE_URL_ENV, ConfigError, MAX_ATTEMPTS_ENV, TriviaConfig};
