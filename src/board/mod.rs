mod reveal;
mod types;

pub use reveal::{RevealError, RevealOutcome, next_state};
pub use types::{
    Board, BoardGeneration, BoardShapeError, CATEGORY_COUNT, CLUES_PER_CATEGORY, Category, Clue,
    Coordinate, MIN_CLUES_PER_CATEGORY, RevealState,
};
