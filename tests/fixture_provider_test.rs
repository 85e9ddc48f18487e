//! Tests for the fixture provider and the bundled sample board.

use std::path::PathBuf;
use std::sync::Arc;
use strictly_trivia::{
    AcquisitionPolicy, BoardAcquisition, CategoryId, ContentProvider, FixtureProvider,
    ProviderError,
};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample_board.json")
}

#[tokio::test]
async fn test_sample_fixture_lists_true_clue_counts() {
    let provider = FixtureProvider::from_file(sample_path()).expect("fixture");

    let listing = provider.list_categories(100).await.expect("listing");

    assert_eq!(listing.len(), 8);
    let short = listing
        .iter()
        .find(|summary| summary.id == CategoryId(18))
        .expect("short category listed");
    assert_eq!(short.clue_count, 3);
}

#[tokio::test]
async fn test_sample_board_skips_short_category() {
    let provider = FixtureProvider::from_file(sample_path()).expect("fixture");
    let acquisition =
        BoardAcquisition::new(Arc::new(provider), AcquisitionPolicy::default()).with_seed(1);

    for _ in 0..5 {
        let board = acquisition.acquire().await.expect("board");
        let titles: Vec<&str> = board.categories().iter().map(|c| c.title()).collect();
        assert!(!titles.contains(&"Short Category"));
    }
}

#[tokio::test]
async fn test_unknown_category_not_found() {
    let provider = FixtureProvider::new();

    assert_eq!(
        provider.get_category(CategoryId(5)).await,
        Err(ProviderError::NotFound(CategoryId(5)))
    );
    assert_eq!(provider.detail_calls(), vec![CategoryId(5)]);
}

#[test]
fn test_bad_fixture_file_is_malformed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write fixture");

    assert!(matches!(
        FixtureProvider::from_file(&path),
        Err(ProviderError::Malformed(_))
    ));
    assert!(matches!(
        FixtureProvider::from_file(dir.path().join("absent.json")),
        Err(ProviderError::Unavailable(_))
    ));
}
