mod activity;
mod difficulty;
mod ids;
mod item;
mod response;
mod score;

pub use activity::ActivityKind;
pub use difficulty::{Difficulty, ParseDifficultyError, TypingDifficulty};
pub use ids::SessionId;
pub use item::{
    ExerciseItem, ItemError, MatchPair, QUIZ_OPTION_COUNT, QuizQuestion, SentencePair,
    SpeakingPractice, VoicePrompt,
};
pub use response::{ExerciseResponse, TypingVerdict, VoiceVerdict, WordMark};
pub use score::{ItemScore, ScoreResult};
