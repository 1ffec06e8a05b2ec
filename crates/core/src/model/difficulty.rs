use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for parsing a difficulty level from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty level: {value}")]
pub struct ParseDifficultyError {
    pub value: String,
}

//
// ─── GENERATION DIFFICULTY ─────────────────────────────────────────────────────
//

/// Difficulty for generated activities (quiz, matching, voice).
///
/// The content service expects the capitalized spelling on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Self::Beginner),
            "Intermediate" => Ok(Self::Intermediate),
            "Advanced" => Ok(Self::Advanced),
            other => Err(ParseDifficultyError {
                value: other.to_string(),
            }),
        }
    }
}

//
// ─── TYPING DIFFICULTY ─────────────────────────────────────────────────────────
//

/// Difficulty for the typing activity; the service uses lowercase values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl TypingDifficulty {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TypingDifficulty::Easy => "easy",
            TypingDifficulty::Medium => "medium",
            TypingDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for TypingDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypingDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(ParseDifficultyError {
                value: other.to_string(),
            }),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_str() {
        for level in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ] {
            assert_eq!(level.as_str().parse::<Difficulty>().unwrap(), level);
        }
    }

    #[test]
    fn typing_difficulty_is_lowercase_on_the_wire() {
        assert_eq!(TypingDifficulty::Medium.as_str(), "medium");
        assert_eq!("hard".parse::<TypingDifficulty>().unwrap(), TypingDifficulty::Hard);
    }

    #[test]
    fn unknown_level_fails_to_parse() {
        let err = "Expert".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.value, "Expert");
    }
}
