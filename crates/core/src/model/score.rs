use std::collections::BTreeMap;

use crate::model::{ExerciseItem, ExerciseResponse};

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Outcome for one item position after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemScore {
    pub index: usize,
    pub answered: bool,
    pub correct: bool,
}

/// Score for a finished session, derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    outcomes: Vec<ItemScore>,
    correct: usize,
}

impl ScoreResult {
    /// Compares each stored response against its item's ground truth.
    ///
    /// Quiz and matching items use exact string equality; typing and voice
    /// items use the server verdict stored with the response. Unanswered
    /// positions count as incorrect.
    #[must_use]
    pub fn tally(
        items: &[ExerciseItem],
        responses: &BTreeMap<usize, ExerciseResponse>,
    ) -> Self {
        let mut outcomes = Vec::with_capacity(items.len());
        let mut correct = 0;

        for (index, item) in items.iter().enumerate() {
            let response = responses.get(&index);
            let is_correct = response.is_some_and(|response| answers_item(item, response));
            if is_correct {
                correct += 1;
            }
            outcomes.push(ItemScore {
                index,
                answered: response.is_some(),
                correct: is_correct,
            });
        }

        Self { outcomes, correct }
    }

    /// Number of correctly answered items.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Total number of items scored.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of items that had any response at all.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.answered).count()
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.outcomes.len()
    }

    #[must_use]
    pub fn outcomes(&self) -> &[ItemScore] {
        &self.outcomes
    }
}

/// Equality rule at the scoring boundary, exhaustive over item kinds.
fn answers_item(item: &ExerciseItem, response: &ExerciseResponse) -> bool {
    match (item, response) {
        (ExerciseItem::Quiz(question), ExerciseResponse::Choice(choice)) => {
            choice == question.answer()
        }
        (ExerciseItem::Match(pair), ExerciseResponse::Match(value)) => value == pair.right(),
        (ExerciseItem::Sentence(_), ExerciseResponse::Typing(verdict)) => verdict.accepted,
        (ExerciseItem::Voice(_), ExerciseResponse::Voice(verdict)) => verdict.accepted,
        // A response of the wrong shape can never be correct.
        _ => false,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
