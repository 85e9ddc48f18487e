//! Core domain types for the trivia board.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of categories on a board.
pub const CATEGORY_COUNT: usize = 6;

/// Number of clues in every category.
pub const CLUES_PER_CATEGORY: usize = 5;

/// A category is only eligible when the provider reports at least this many clues.
pub const MIN_CLUES_PER_CATEGORY: usize = CLUES_PER_CATEGORY;

/// Reveal state of a single clue.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum RevealState {
    /// Neither question nor answer is visible.
    #[default]
    Hidden,
    /// The question is visible.
    ShowingQuestion,
    /// The answer is visible. Terminal.
    ShowingAnswer,
}

/// A question/answer pair with its reveal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    state: RevealState,
}

impl Clue {
    /// Creates a hidden clue.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    /// Returns the question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the answer text.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the current reveal state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Text currently visible for this clue, if any.
    pub fn visible_text(&self) -> Option<&str> {
        match self.state {
            RevealState::Hidden => None,
            RevealState::ShowingQuestion => Some(&self.question),
            RevealState::ShowingAnswer => Some(&self.answer),
        }
    }

    pub(super) fn set_state(&mut self, state: RevealState) {
        self.state = state;
    }
}

/// A titled group of exactly [`CLUES_PER_CATEGORY`] clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    title: String,
    clues: [Clue; CLUES_PER_CATEGORY],
}

impl Category {
    /// Creates a category from a fixed-size clue array.
    pub fn new(title: impl Into<String>, clues: [Clue; CLUES_PER_CATEGORY]) -> Self {
        Self {
            title: title.into(),
            clues,
        }
    }

    /// Creates a category from a vector, checking the clue count.
    pub fn from_vec(title: impl Into<String>, clues: Vec<Clue>) -> Result<Self, BoardShapeError> {
        let found = clues.len();
        let clues = <[Clue; CLUES_PER_CATEGORY]>::try_from(clues)
            .map_err(|_| BoardShapeError::ClueCount { found })?;
        Ok(Self::new(title, clues))
    }

    /// Returns the category title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the clues in board order.
    pub fn clues(&self) -> &[Clue; CLUES_PER_CATEGORY] {
        &self.clues
    }

    pub(super) fn clue_mut(&mut self, index: usize) -> Option<&mut Clue> {
        self.clues.get_mut(index)
    }
}

/// Position of a clue on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, derive_new::new,
)]
#[display("{}-{}", category, clue)]
pub struct Coordinate {
    /// Category (column) index.
    pub category: usize,
    /// Clue (row) index within the category.
    pub clue: usize,
}

/// Identifies one swapped-in board; increases on every new game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display,
)]
#[display("#{}", _0)]
pub struct BoardGeneration(pub u64);

impl BoardGeneration {
    /// Returns the generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// The full grid of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    categories: [Category; CATEGORY_COUNT],
}

impl Board {
    /// Creates a board from a fixed-size category array.
    pub fn new(categories: [Category; CATEGORY_COUNT]) -> Self {
        Self { categories }
    }

    /// Creates a board from a vector, checking the category count.
    #[instrument(skip(categories), fields(count = categories.len()))]
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, BoardShapeError> {
        let found = categories.len();
        let categories = <[Category; CATEGORY_COUNT]>::try_from(categories)
            .map_err(|_| BoardShapeError::CategoryCount { found })?;
        Ok(Self::new(categories))
    }

    /// Returns the categories in board order.
    pub fn categories(&self) -> &[Category; CATEGORY_COUNT] {
        &self.categories
    }

    /// Returns the clue at the given coordinate.
    pub fn clue(&self, coord: Coordinate) -> Option<&Clue> {
        self.categories
            .get(coord.category)
            .and_then(|category| category.clues.get(coord.clue))
    }

    /// True once every clue on the board shows its answer.
    pub fn is_complete(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|category| category.clues.iter())
            .all(|clue| clue.state == RevealState::ShowingAnswer)
    }

    pub(super) fn clue_mut(&mut self, coord: Coordinate) -> Option<&mut Clue> {
        self.categories
            .get_mut(coord.category)
            .and_then(|category| category.clue_mut(coord.clue))
    }

    /// Formats the board as a plain-text listing.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (index, category) in self.categories.iter().enumerate() {
            result.push_str(&format!("[{}] {}\n", index, category.title));
            for (row, clue) in category.clues.iter().enumerate() {
                result.push_str(&format!(
                    "  {}. {}\n     -> {}\n",
                    row + 1,
                    clue.question,
                    clue.answer
                ));
            }
        }
        result
    }
}

/// A board or category was built with the wrong number of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardShapeError {
    /// Wrong number of categories.
    #[display("Board needs {} categories, found {}", CATEGORY_COUNT, found)]
    CategoryCount {
        /// Number supplied.
        found: usize,
    },
    /// Wrong number of clues in a category.
    #[display("Category needs {} clues, found {}", CLUES_PER_CATEGORY, found)]
    ClueCount {
        /// Number supplied.
        found: usize,
    },
}

impl std::error::Error for BoardShapeError {}
