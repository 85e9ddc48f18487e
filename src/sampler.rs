//! Random selection of categories and clues.

use crate::board::{CLUES_PER_CATEGORY, Clue, MIN_CLUES_PER_CATEGORY};
use crate::provider::{CategoryId, CategorySummary, ProviderClue};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Picks up to `need` distinct eligible category ids from `pool`.
///
/// Entries reporting fewer than [`MIN_CLUES_PER_CATEGORY`] clues are
/// dropped, as are repeated ids. The draw is uniform and without
/// replacement; the order of the result carries no meaning.
#[instrument(skip(pool, rng), fields(pool = pool.len()))]
pub fn select_categories<R: Rng + ?Sized>(
    pool: &[CategorySummary],
    need: usize,
    rng: &mut R,
) -> Vec<CategoryId> {
    let mut seen = HashSet::new();
    let eligible: Vec<CategoryId> = pool
        .iter()
        .filter(|summary| summary.clue_count >= MIN_CLUES_PER_CATEGORY)
        .map(|summary| summary.id)
        .filter(|id| seen.insert(*id))
        .collect();

    let picked: Vec<CategoryId> = eligible.choose_multiple(rng, need).copied().collect();
    debug!(
        eligible = eligible.len(),
        picked = picked.len(),
        "Sampled categories"
    );
    picked
}

/// Draws [`CLUES_PER_CATEGORY`] distinct clues from `all`, each starting hidden.
///
/// Returns `None` when `all` holds too few clues.
#[instrument(skip(all, rng), fields(available = all.len()))]
pub fn select_clues<R: Rng + ?Sized>(
    all: &[ProviderClue],
    rng: &mut R,
) -> Option<[Clue; CLUES_PER_CATEGORY]> {
    if all.len() < CLUES_PER_CATEGORY {
        debug!("Too few clues to sample");
        return None;
    }

    let picked: Vec<Clue> = rand::seq::index::sample(rng, all.len(), CLUES_PER_CATEGORY)
        .into_iter()
        .map(|index| Clue::new(all[index].question.clone(), all[index].answer.clone()))
        .collect();

    picked.try_into().ok()
}
