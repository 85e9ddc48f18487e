//! Tests for category and clue sampling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use strictly_trivia::{
    CLUES_PER_CATEGORY, CategoryId, CategorySummary, MIN_CLUES_PER_CATEGORY, ProviderClue,
    RevealState, select_categories, select_clues,
};

fn pool() -> Vec<CategorySummary> {
    (1..=40)
        .map(|id| CategorySummary::new(CategoryId(id), (id % 9) as usize))
        .collect()
}

fn clues(count: usize) -> Vec<ProviderClue> {
    (0..count)
        .map(|n| ProviderClue::new(format!("q{}", n), format!("a{}", n)))
        .collect()
}

#[test]
fn test_categories_unique_and_eligible() {
    let pool = pool();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = select_categories(&pool, 6, &mut rng);

        assert_eq!(picked.len(), 6);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), picked.len(), "duplicates, seed {}", seed);
        for id in &picked {
            let summary = pool.iter().find(|s| s.id == *id).expect("picked from pool");
            assert!(summary.clue_count >= MIN_CLUES_PER_CATEGORY);
        }
    }
}

#[test]
fn test_categories_capped_by_eligible_count() {
    let pool = vec![
        CategorySummary::new(CategoryId(1), 5),
        CategorySummary::new(CategoryId(2), 4),
        CategorySummary::new(CategoryId(3), 12),
    ];
    let mut rng = StdRng::seed_from_u64(1);

    let picked: HashSet<_> = select_categories(&pool, 6, &mut rng).into_iter().collect();
    assert_eq!(picked, HashSet::from([CategoryId(1), CategoryId(3)]));
}

#[test]
fn test_duplicate_pool_entries_collapse() {
    let pool = vec![
        CategorySummary::new(CategoryId(7), 5),
        CategorySummary::new(CategoryId(7), 5),
        CategorySummary::new(CategoryId(7), 9),
    ];
    let mut rng = StdRng::seed_from_u64(3);

    assert_eq!(select_categories(&pool, 6, &mut rng), vec![CategoryId(7)]);
}

#[test]
fn test_empty_pool_yields_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(select_categories(&[], 6, &mut rng).is_empty());
}

#[test]
fn test_clues_unique_and_hidden() {
    let all = clues(12);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = select_clues(&all, &mut rng).expect("enough clues");

        let questions: HashSet<_> = picked.iter().map(|clue| clue.question()).collect();
        assert_eq!(questions.len(), CLUES_PER_CATEGORY);
        assert!(picked.iter().all(|c| c.state() == RevealState::Hidden));
        for clue in &picked {
            let source = all
                .iter()
                .find(|c| c.question == clue.question())
                .expect("drawn from input");
            assert_eq!(source.answer, clue.answer());
        }
    }
}

#[test]
fn test_clues_exact_count_uses_all() {
    let all = clues(CLUES_PER_CATEGORY);
    let mut rng = StdRng::seed_from_u64(9);

    let picked = select_clues(&all, &mut rng).expect("enough clues");
    let questions: HashSet<_> = picked.iter().map(|c| c.question().to_string()).collect();
    let expected: HashSet<_> = all.iter().map(|clue| clue.question.clone()).collect();
    assert_eq!(questions, expected);
}

#[test]
fn test_too_few_clues_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let few = clues(CLUES_PER_CATEGORY - 1);
    assert!(select_clues(&few, &mut rng).is_none());
}
