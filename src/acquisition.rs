//! Board acquisition: sample, fetch and retry until a full board exists.
//!
//! Each iteration lists a fresh page of categories, samples candidates
//! that are not already accepted, and fetches their clue sets
//! concurrently. Failed or undersized categories are skipped; the loop
//! runs again until [`CATEGORY_COUNT`] categories have been accepted.

use crate::board::{Board, BoardShapeError, CATEGORY_COUNT, CLUES_PER_CATEGORY, Category};
use crate::provider::{CategoryId, ContentProvider};
use crate::sampler;
use derive_more::Display;
use futures::future::join_all;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Default number of summaries requested per listing.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// How acquisition pages and retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionPolicy {
    /// Summaries requested per listing.
    pub page_size: usize,
    /// Iteration cap. `None` retries until the board is full.
    pub max_attempts: Option<u32>,
    /// Pause before every iteration after the first.
    pub retry_delay: Duration,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: None,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Fatal acquisition failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AcquisitionError {
    /// The iteration cap was reached before the board filled up.
    #[display(
        "Gave up after {} attempts with {} of {} categories",
        attempts,
        accepted,
        CATEGORY_COUNT
    )]
    Exhausted {
        /// Iterations run.
        attempts: u32,
        /// Categories accepted when giving up.
        accepted: usize,
    },

    /// A newer acquisition superseded this one.
    #[display("Acquisition cancelled")]
    Cancelled,

    /// The accepted categories did not form a valid board.
    #[display("Assembled board was malformed: {}", _0)]
    Malformed(BoardShapeError),
}

impl std::error::Error for AcquisitionError {}

/// Cancellation handle checked at every iteration boundary.
///
/// A token is live while the shared epoch still equals the epoch it was
/// issued for; bumping the epoch cancels every outstanding token.
#[derive(Debug, Clone)]
pub struct CancelToken {
    epoch: u64,
    current: Option<Arc<AtomicU64>>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self {
            epoch: 0,
            current: None,
        }
    }

    /// A token tied to `current` at `epoch`.
    pub fn new(epoch: u64, current: Arc<AtomicU64>) -> Self {
        Self {
            epoch,
            current: Some(current),
        }
    }

    /// Whether a newer epoch has been issued.
    pub fn is_cancelled(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.load(Ordering::SeqCst) != self.epoch)
    }
}

/// Assembles complete boards from a [`ContentProvider`].
#[derive(Debug)]
pub struct BoardAcquisition<P: ?Sized> {
    provider: Arc<P>,
    policy: AcquisitionPolicy,
    seed: Option<u64>,
}

impl<P: ContentProvider + ?Sized> BoardAcquisition<P> {
    /// Creates an acquisition pipeline over `provider`.
    pub fn new(provider: Arc<P>, policy: AcquisitionPolicy) -> Self {
        Self {
            provider,
            policy,
            seed: None,
        }
    }

    /// Makes sampling deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &AcquisitionPolicy {
        &self.policy
    }

    /// Returns the provider.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Acquires a full board with no cancellation.
    pub async fn acquire(&self) -> Result<Board, AcquisitionError> {
        self.acquire_with(&CancelToken::never()).await
    }

    /// Acquires a full board, stopping early if `cancel` fires.
    #[instrument(
        skip_all,
        fields(page_size = self.policy.page_size, max_attempts = ?self.policy.max_attempts)
    )]
    pub async fn acquire_with(&self, cancel: &CancelToken) -> Result<Board, AcquisitionError> {
        info!("Starting board acquisition");

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut accepted: Vec<(CategoryId, Category)> = Vec::with_capacity(CATEGORY_COUNT);
        let mut attempts = 0u32;

        while accepted.len() < CATEGORY_COUNT {
            if cancel.is_cancelled() {
                info!(attempts, "Acquisition cancelled");
                return Err(AcquisitionError::Cancelled);
            }
            if let Some(max) = self.policy.max_attempts
                && attempts >= max
            {
                error!(attempts, accepted = accepted.len(), "Acquisition exhausted");
                return Err(AcquisitionError::Exhausted {
                    attempts,
                    accepted: accepted.len(),
                });
            }
            if attempts > 0 && !self.policy.retry_delay.is_zero() {
                tokio::time::sleep(self.policy.retry_delay).await;
                if cancel.is_cancelled() {
                    info!(attempts, "Acquisition cancelled during retry delay");
                    return Err(AcquisitionError::Cancelled);
                }
            }
            attempts += 1;

            let pool = match self.provider.list_categories(self.policy.page_size).await {
                Ok(pool) => pool,
                Err(e) => {
                    warn!(attempt = attempts, error = %e, "Category listing failed, retrying");
                    continue;
                }
            };
            let pool: Vec<_> = pool
                .into_iter()
                .filter(|summary| !accepted.iter().any(|(id, _)| *id == summary.id))
                .collect();

            let need = CATEGORY_COUNT - accepted.len();
            let candidates = sampler::select_categories(&pool, need, &mut rng);
            debug!(
                attempt = attempts,
                need,
                candidates = candidates.len(),
                "Fetching candidates"
            );

            let provider = &self.provider;
            let fetched = join_all(
                candidates
                    .iter()
                    .map(|&id| async move { (id, provider.get_category(id).await) }),
            )
            .await;

            for (id, result) in fetched {
                let detail = match result {
                    Ok(detail) => detail,
                    Err(e) => {
                        warn!(id = %id, error = %e, "Skipping category");
                        continue;
                    }
                };
                if accepted.len() == CATEGORY_COUNT
                    || accepted.iter().any(|(seen, _)| *seen == id)
                {
                    continue;
                }
                let Some(clues) = sampler::select_clues(&detail.clues, &mut rng) else {
                    debug!(
                        id = %id,
                        clues = detail.clues.len(),
                        needed = CLUES_PER_CATEGORY,
                        "Skipping undersized category"
                    );
                    continue;
                };

                debug!(id = %id, title = %detail.title, "Accepted category");
                accepted.push((id, Category::new(detail.title, clues)));
            }
        }

        info!(attempts, "Board acquired");
        let categories = accepted.into_iter().map(|(_, category)| category).collect();
        Board::from_categories(categories).map_err(AcquisitionError::Malformed)
    }
}
