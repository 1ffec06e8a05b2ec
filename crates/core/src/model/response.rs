use std::collections::BTreeMap;

use crate::model::ExerciseItem;

//
// ─── SERVER VERDICTS ───────────────────────────────────────────────────────────
//

/// Per-word feedback from the voice check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMark {
    Correct,
    Incorrect,
}

impl WordMark {
    /// Maps the service's color coding onto a mark. `green` is correct;
    /// every other color counts as incorrect.
    #[must_use]
    pub fn from_color(color: &str) -> Self {
        if color.eq_ignore_ascii_case("green") {
            WordMark::Correct
        } else {
            WordMark::Incorrect
        }
    }
}

/// Server judgment for one typed translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingVerdict {
    pub typed: String,
    pub correct_sentence: String,
    pub accepted: bool,
}

/// Server judgment for one recorded reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceVerdict {
    pub words: BTreeMap<String, WordMark>,
    pub correct_text: Option<String>,
    pub accepted: bool,
}

//
// ─── EXERCISE RESPONSE ─────────────────────────────────────────────────────────
//

/// A submitted answer for one exercise item.
///
/// Quiz and matching responses carry the raw selection and are compared
/// locally; typing and voice responses carry the server verdict because the
/// fuzzy equality rule lives on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseResponse {
    /// Selected quiz option, spelled exactly as shown.
    Choice(String),
    /// Right-column value assigned to this pair's left entry.
    Match(String),
    Typing(TypingVerdict),
    Voice(VoiceVerdict),
}

impl ExerciseResponse {
    /// True when this response shape belongs to the item's activity kind.
    #[must_use]
    pub fn fits(&self, item: &ExerciseItem) -> bool {
        matches!(
            (item, self),
            (ExerciseItem::Quiz(_), ExerciseResponse::Choice(_))
                | (ExerciseItem::Match(_), ExerciseResponse::Match(_))
                | (ExerciseItem::Sentence(_), ExerciseResponse::Typing(_))
                | (ExerciseItem::Voice(_), ExerciseResponse::Voice(_))
        )
    }
}
