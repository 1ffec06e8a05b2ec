use serde::{Deserialize, Serialize};
use std::fmt;

/// The four activity families a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Multiple-choice questions, scored locally by exact match.
    Quiz,
    /// Column A / Column B pairing, scored locally by exact match.
    TextMatching,
    /// Translate a Telugu sentence; correctness is a server judgment.
    TypingPractice,
    /// Read a Telugu sentence aloud; correctness is a server judgment.
    VoicePractice,
}

impl ActivityKind {
    /// Human-readable label used in error and log messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Quiz => "quiz",
            ActivityKind::TextMatching => "text matching",
            ActivityKind::TypingPractice => "typing practice",
            ActivityKind::VoicePractice => "voice practice",
        }
    }

    /// True when item correctness is decided by a follow-up server call
    /// rather than local string equality.
    #[must_use]
    pub fn is_server_checked(&self) -> bool {
        matches!(
            self,
            ActivityKind::TypingPractice | ActivityKind::VoicePractice
        )
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
