use thiserror::Error;

use crate::model::ActivityKind;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Number of answer options every quiz question carries.
pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("a quiz question needs exactly four options, got {got}")]
    WrongOptionCount { got: usize },

    #[error("the answer must be one of the options")]
    AnswerNotInOptions,

    #[error("match pair columns cannot be empty")]
    EmptyMatchColumn,

    #[error("sentence text cannot be empty")]
    EmptySentence,

    #[error("voice prompt text cannot be empty")]
    EmptyPrompt,
}

//
// ─── ITEM VARIANTS ─────────────────────────────────────────────────────────────
//

/// A multiple-choice question with one correct answer among four options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    number: u32,
    question: String,
    options: Vec<String>,
    answer: String,
}

impl QuizQuestion {
    /// Validates and builds a quiz question.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` when the question is blank, the option count is
    /// wrong, or the answer is not among the options.
    pub fn new(
        number: u32,
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(ItemError::EmptyQuestion);
        }
        if options.len() != QUIZ_OPTION_COUNT {
            return Err(ItemError::WrongOptionCount { got: options.len() });
        }
        if !options.iter().any(|option| option == &answer) {
            return Err(ItemError::AnswerNotInOptions);
        }

        Ok(Self {
            number,
            question,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The ground-truth answer, spelled exactly as one of the options.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// One left/right pair of a text-matching board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    left: String,
    right: String,
}

impl MatchPair {
    /// Validates and builds a matching pair.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::EmptyMatchColumn` when either column is blank.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Result<Self, ItemError> {
        let left = left.into();
        let right = right.into();
        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(ItemError::EmptyMatchColumn);
        }
        Ok(Self { left, right })
    }

    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The ground-truth right-column value for this left entry.
    #[must_use]
    pub fn right(&self) -> &str {
        &self.right
    }
}

/// A Telugu sentence to translate by typing.
///
/// The expected English translation is held server-side; correctness comes
/// back with the check verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    key: String,
    telugu: String,
}

impl SentencePair {
    /// # Errors
    ///
    /// Returns `ItemError::EmptySentence` when either field is blank.
    pub fn new(key: impl Into<String>, telugu: impl Into<String>) -> Result<Self, ItemError> {
        let key = key.into();
        let telugu = telugu.into();
        if key.trim().is_empty() || telugu.trim().is_empty() {
            return Err(ItemError::EmptySentence);
        }
        Ok(Self { key, telugu })
    }

    /// Server-assigned sentence id.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn telugu(&self) -> &str {
        &self.telugu
    }
}

/// A sentence to read aloud, with its reference translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePrompt {
    english: String,
    telugu: String,
}

impl VoicePrompt {
    /// # Errors
    ///
    /// Returns `ItemError::EmptyPrompt` when either text is blank.
    pub fn new(english: impl Into<String>, telugu: impl Into<String>) -> Result<Self, ItemError> {
        let english = english.into();
        let telugu = telugu.into();
        if english.trim().is_empty() || telugu.trim().is_empty() {
            return Err(ItemError::EmptyPrompt);
        }
        Ok(Self { english, telugu })
    }

    #[must_use]
    pub fn english(&self) -> &str {
        &self.english
    }

    #[must_use]
    pub fn telugu(&self) -> &str {
        &self.telugu
    }
}

//
// ─── EXERCISE ITEM ─────────────────────────────────────────────────────────────
//

/// One unit of fetched content, immutable for the life of its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseItem {
    Quiz(QuizQuestion),
    Match(MatchPair),
    Sentence(SentencePair),
    Voice(VoicePrompt),
}

impl ExerciseItem {
    /// The activity family this item belongs to.
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        match self {
            ExerciseItem::Quiz(_) => ActivityKind::Quiz,
            ExerciseItem::Match(_) => ActivityKind::TextMatching,
            ExerciseItem::Sentence(_) => ActivityKind::TypingPractice,
            ExerciseItem::Voice(_) => ActivityKind::VoicePractice,
        }
    }

    /// The text shown to the learner for this item.
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            ExerciseItem::Quiz(question) => question.question(),
            ExerciseItem::Match(pair) => pair.left(),
            ExerciseItem::Sentence(sentence) => sentence.telugu(),
            ExerciseItem::Voice(prompt) => prompt.telugu(),
        }
    }
}

//
// ─── SPEAKING PRACTICE ─────────────────────────────────────────────────────────
//

/// A guided conversation scenario with its dialogue lines.
///
/// Not an answerable batch, so it never enters a session; the client hands
/// it straight to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakingPractice {
    pub title: String,
    pub description: String,
    pub avg_time: String,
    pub scenario: String,
    pub dialogue: Vec<VoicePrompt>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec![
            "A) చెట్టు".to_string(),
            "B) పూలు".to_string(),
            "C) నీరు".to_string(),
            "D) ఇల్లు".to_string(),
        ]
    }

    #[test]
    fn quiz_question_accepts_answer_from_options() {
        let question =
            QuizQuestion::new(1, "Translate the word 'tree'.", options(), "A) చెట్టు").unwrap();
        assert_eq!(question.answer(), "A) చెట్టు");
        assert_eq!(question.options().len(), QUIZ_OPTION_COUNT);
    }

    #[test]
    fn quiz_question_rejects_foreign_answer() {
        let err = QuizQuestion::new(1, "Translate the word 'tree'.", options(), "E) వేరు")
            .unwrap_err();
        assert_eq!(err, ItemError::AnswerNotInOptions);
    }

    #[test]
    fn quiz_question_rejects_wrong_option_count() {
        let err = QuizQuestion::new(1, "Q", vec!["A".into(), "B".into()], "A").unwrap_err();
        assert!(matches!(err, ItemError::WrongOptionCount { got: 2 }));
    }

    #[test]
    fn blank_question_is_rejected() {
        let err = QuizQuestion::new(1, "   ", options(), "A) చెట్టు").unwrap_err();
        assert_eq!(err, ItemError::EmptyQuestion);
    }

    #[test]
    fn match_pair_rejects_blank_columns() {
        assert!(MatchPair::new("1) Apple", " ").is_err());
        assert!(MatchPair::new("", "A) పండు").is_err());
        assert!(MatchPair::new("1) Apple", "A) పండు").is_ok());
    }

    #[test]
    fn item_kind_follows_variant() {
        let item = ExerciseItem::Sentence(SentencePair::new("sen1", "నేను").unwrap());
        assert_eq!(item.kind(), ActivityKind::TypingPractice);
        assert_eq!(item.prompt(), "నేను");
    }
}
