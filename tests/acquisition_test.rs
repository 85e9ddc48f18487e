//! Scenario tests for board acquisition.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use strictly_trivia::{
    AcquisitionError, AcquisitionPolicy, Board, BoardAcquisition, CATEGORY_COUNT,
    CLUES_PER_CATEGORY, CancelToken, CategoryId, CategorySummary, FixtureProvider, ProviderClue,
};

fn clues(id: u64, count: usize) -> Vec<ProviderClue> {
    (0..count)
        .map(|n| ProviderClue::new(format!("Q{}-{}", id, n), format!("A{}-{}", id, n)))
        .collect()
}

fn title(id: u64) -> String {
    format!("Category {}", id)
}

fn with_categories(
    provider: FixtureProvider,
    ids: impl IntoIterator<Item = u64>,
    count: usize,
) -> FixtureProvider {
    ids.into_iter().fold(provider, |provider, id| {
        provider.with_category(CategoryId(id), title(id), clues(id, count))
    })
}

fn summaries(ids: impl IntoIterator<Item = u64>, count: usize) -> Vec<CategorySummary> {
    ids.into_iter()
        .map(|id| CategorySummary::new(CategoryId(id), count))
        .collect()
}

fn titles(board: &Board) -> HashSet<String> {
    board
        .categories()
        .iter()
        .map(|category| category.title().to_string())
        .collect()
}

fn assert_complete(board: &Board) {
    assert_eq!(board.categories().len(), CATEGORY_COUNT);
    for category in board.categories() {
        assert_eq!(category.clues().len(), CLUES_PER_CATEGORY);
    }
    assert_eq!(titles(board).len(), CATEGORY_COUNT, "duplicate categories");
}

fn acquisition(provider: Arc<FixtureProvider>) -> BoardAcquisition<FixtureProvider> {
    let policy = AcquisitionPolicy::default();
    BoardAcquisition::new(provider, policy).with_seed(42)
}

async fn acquire(provider: &Arc<FixtureProvider>) -> Board {
    let acquisition = acquisition(Arc::clone(provider));
    acquisition.acquire().await.expect("board")
}

#[tokio::test]
async fn test_six_eligible_categories_fill_board_in_one_pass() {
    let provider = Arc::new(with_categories(FixtureProvider::new(), 1..=6, 5));

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert_eq!(titles(&board), (1..=6).map(title).collect());
    assert_eq!(provider.list_calls(), 1);
    assert_eq!(provider.detail_calls().len(), 6);
}

#[tokio::test]
async fn test_short_first_page_loops_for_the_rest() {
    let provider = with_categories(FixtureProvider::new(), 1..=6, 5)
        .with_page([summaries(1..=4, 5), summaries(20..=30, 2)].concat())
        .with_page(summaries(1..=6, 5));
    let provider = Arc::new(provider);

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert_eq!(titles(&board), (1..=6).map(title).collect());
    assert_eq!(provider.list_calls(), 2);

    let requested = provider.detail_calls();
    let unique: HashSet<_> = requested.iter().collect();
    assert_eq!(requested.len(), unique.len(), "id fetched twice");
}

#[tokio::test]
async fn test_failed_category_is_skipped() {
    let provider = with_categories(FixtureProvider::new(), 1..=7, 5)
        .with_failing_category(CategoryId(3))
        .with_page(summaries([1, 2, 3, 4, 5, 6], 5))
        .with_page(summaries([7], 5));
    let provider = Arc::new(provider);

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert!(!titles(&board).contains(&title(3)));
    assert!(titles(&board).contains(&title(7)));
    assert_eq!(provider.list_calls(), 2);
}

#[tokio::test]
async fn test_stale_clue_counts_are_rechecked() {
    // Category 9 claims ten clues but only serves three.
    let provider = with_categories(FixtureProvider::new(), 1..=6, 5)
        .with_category(CategoryId(9), title(9), clues(9, 3))
        .with_page(summaries([1, 2, 3, 4, 5, 9], 10))
        .with_page(summaries([6], 5));
    let provider = Arc::new(provider);

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert!(!titles(&board).contains(&title(9)));
}

#[tokio::test]
async fn test_unknown_category_is_skipped() {
    let provider = with_categories(FixtureProvider::new(), 1..=6, 5)
        .with_page(summaries([1, 2, 3, 4, 5, 404], 5))
        .with_page(summaries([6], 5));
    let provider = Arc::new(provider);

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert!(provider.detail_calls().contains(&CategoryId(404)));
}

#[tokio::test]
async fn test_listing_failures_are_retried() {
    let provider = with_categories(FixtureProvider::new(), 1..=6, 5).with_failing_listings(2);
    let provider = Arc::new(provider);

    let board = acquire(&provider).await;

    assert_complete(&board);
    assert_eq!(provider.list_calls(), 3);
}

#[tokio::test]
async fn test_attempt_cap_reports_exhaustion() {
    let provider = Arc::new(with_categories(FixtureProvider::new(), 1..=4, 5));
    let policy = AcquisitionPolicy {
        max_attempts: Some(3),
        retry_delay: Duration::from_millis(1),
        ..AcquisitionPolicy::default()
    };

    let result = BoardAcquisition::new(Arc::clone(&provider), policy).acquire().await;

    assert_eq!(
        result,
        Err(AcquisitionError::Exhausted {
            attempts: 3,
            accepted: 4
        })
    );
    assert_eq!(provider.list_calls(), 3);
}

#[tokio::test]
async fn test_cancelled_token_stops_before_fetching() {
    let provider = Arc::new(with_categories(FixtureProvider::new(), 1..=6, 5));
    let epoch = Arc::new(AtomicU64::new(1));
    let token = CancelToken::new(1, Arc::clone(&epoch));
    epoch.store(2, Ordering::SeqCst);

    let result = acquisition(Arc::clone(&provider)).acquire_with(&token).await;

    assert_eq!(result, Err(AcquisitionError::Cancelled));
    assert_eq!(provider.list_calls(), 0);
}

#[tokio::test]
async fn test_page_size_is_forwarded() {
    let provider = with_categories(FixtureProvider::new(), 1..=20, 5);
    let provider = Arc::new(provider);
    let policy = AcquisitionPolicy {
        page_size: 6,
        ..AcquisitionPolicy::default()
    };

    let board = BoardAcquisition::new(Arc::clone(&provider), policy)
        .with_seed(5)
        .acquire()
        .await
        .expect("board");

    // Only the first six listed categories are ever visible.
    assert_eq!(titles(&board), (1..=6).map(title).collect());
}

#[tokio::test]
async fn test_seeded_acquisition_is_repeatable() {
    let provider = Arc::new(with_categories(FixtureProvider::new(), 1..=30, 8));

    let first = acquire(&provider).await;
    let second = acquire(&provider).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cancel_during_retry_delay_skips_next_listing() {
    // Three categories never fill a board, so the loop sleeps before relisting.
    let provider = Arc::new(with_categories(FixtureProvider::new(), 1..=3, 5));
    let policy = AcquisitionPolicy {
        retry_delay: Duration::from_millis(300),
        ..AcquisitionPolicy::default()
    };
    let acquisition = BoardAcquisition::new(Arc::clone(&provider), policy);
    let epoch = Arc::new(AtomicU64::new(1));
    let token = CancelToken::new(1, Arc::clone(&epoch));

    let run = tokio::spawn(async move { acquisition.acquire_with(&token).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(provider.list_calls(), 1);
    epoch.store(2, Ordering::SeqCst);

    let result = run.await.expect("acquisition task");

    assert_eq!(result, Err(AcquisitionError::Cancelled));
    assert_eq!(provider.list_calls(), 1);
    assert_eq!(provider.detail_calls().len(), 3);
}
