//! Wire shapes for the content service.
//!
//! Field names follow the service payloads verbatim, including the spaced
//! and capitalized keys; conversion into domain types happens in the client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use telugu_core::model::{
    ItemError, MatchPair, QuizQuestion, SentencePair, SpeakingPractice, TypingVerdict,
    VoicePrompt, VoiceVerdict, WordMark,
};

pub(crate) const STATUS_SUCCESS: &str = "success";

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct QuizRequest<'a> {
    pub topic: &'a str,
    pub num_questions: u32,
    pub difficulty: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextMatchingRequest<'a> {
    pub main_topic: &'a str,
    pub difficulty: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VoicePracticeRequest<'a> {
    pub topic: &'a str,
    pub difficulty: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpeakingPracticeRequest<'a> {
    pub main_topic: &'a str,
    pub difficulty: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TypingSentencesRequest<'a> {
    pub user: &'a str,
    pub difficulty_level: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TypingCheckRequest<'a> {
    pub telugu: &'a str,
    pub english: &'a str,
}

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct QuizQuestionWire {
    pub question_number: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestionWire {
    pub(crate) fn into_domain(self) -> Result<QuizQuestion, ItemError> {
        QuizQuestion::new(self.question_number, self.question, self.options, self.answer)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchPairWire {
    #[serde(rename = "Column A")]
    pub column_a: String,
    #[serde(rename = "Column B")]
    pub column_b: String,
}

impl MatchPairWire {
    pub(crate) fn into_domain(self) -> Result<MatchPair, ItemError> {
        MatchPair::new(self.column_a, self.column_b)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoicePromptWire {
    #[serde(rename = "English")]
    pub english: String,
    #[serde(rename = "Telugu")]
    pub telugu: String,
}

impl VoicePromptWire {
    pub(crate) fn into_domain(self) -> Result<VoicePrompt, ItemError> {
        VoicePrompt::new(self.english, self.telugu)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoicePracticeWire {
    pub status: String,
    #[serde(default)]
    pub data: Vec<VoicePromptWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoiceCheckWire {
    pub status: String,
    #[serde(default)]
    pub words: BTreeMap<String, String>,
    #[serde(rename = "correct-english-text")]
    pub correct_english_text: Option<String>,
}

impl VoiceCheckWire {
    pub(crate) fn into_verdict(self) -> VoiceVerdict {
        VoiceVerdict {
            accepted: self.status == STATUS_SUCCESS,
            words: self
                .words
                .into_iter()
                .map(|(word, color)| (word, WordMark::from_color(&color)))
                .collect(),
            correct_text: self.correct_english_text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypingSentencesWire {
    // The map has no defined order on the wire; BTreeMap gives a stable
    // traversal by sentence id.
    #[serde(default)]
    pub sentences: BTreeMap<String, String>,
    pub status: String,
}

impl TypingSentencesWire {
    pub(crate) fn into_domain(self) -> Result<Vec<SentencePair>, ItemError> {
        self.sentences
            .into_iter()
            .map(|(key, telugu)| SentencePair::new(key, telugu))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypingCheckWire {
    #[serde(rename = "correct sentence")]
    pub correct_sentence: String,
    #[serde(rename = "your sentence")]
    pub your_sentence: String,
    pub status: String,
}

impl TypingCheckWire {
    pub(crate) fn into_verdict(self) -> TypingVerdict {
        TypingVerdict {
            accepted: self.status == STATUS_SUCCESS,
            typed: self.your_sentence,
            correct_sentence: self.correct_sentence,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpeakingPracticeWire {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Avg Time")]
    pub avg_time: String,
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Dialogue")]
    pub dialogue: Vec<VoicePromptWire>,
}

impl SpeakingPracticeWire {
    pub(crate) fn into_domain(self) -> Result<SpeakingPractice, ItemError> {
        Ok(SpeakingPractice {
            title: self.title,
            description: self.description,
            avg_time: self.avg_time,
            scenario: self.scenario,
            dialogue: self
                .dialogue
                .into_iter()
                .map(VoicePromptWire::into_domain)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatWire {
    #[serde(rename = "type")]
    pub kind: String,
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptionWire {
    pub data: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_pair_uses_the_spaced_column_keys() {
        let wire: MatchPairWire =
            serde_json::from_str(r#"{"Column A": "1) Apple", "Column B": "A) పండు"}"#).unwrap();
        let pair = wire.into_domain().unwrap();
        assert_eq!(pair.left(), "1) Apple");
        assert_eq!(pair.right(), "A) పండు");
    }

    #[test]
    fn typing_check_maps_spaced_keys_into_a_verdict() {
        let wire: TypingCheckWire = serde_json::from_str(
            r#"{"correct sentence": "I am learning Telugu.", "your sentence": "I learn Telugu.", "status": "failed"}"#,
        )
        .unwrap();
        let verdict = wire.into_verdict();
        assert!(!verdict.accepted);
        assert_eq!(verdict.typed, "I learn Telugu.");
        assert_eq!(verdict.correct_sentence, "I am learning Telugu.");
    }

    #[test]
    fn voice_check_translates_colors_into_marks() {
        let wire: VoiceCheckWire = serde_json::from_str(
            r#"{"status": "success", "words": {"hi": "green", "you": "red"}, "correct-english-text": "Hello."}"#,
        )
        .unwrap();
        let verdict = wire.into_verdict();
        assert!(verdict.accepted);
        assert_eq!(verdict.words["hi"], WordMark::Correct);
        assert_eq!(verdict.words["you"], WordMark::Incorrect);
        assert_eq!(verdict.correct_text.as_deref(), Some("Hello."));
    }

    #[test]
    fn typing_sentences_are_ordered_by_id() {
        let wire: TypingSentencesWire = serde_json::from_str(
            r#"{"sentences": {"sen2": "రెండు", "sen1": "ఒకటి"}, "status": "success"}"#,
        )
        .unwrap();
        let sentences = wire.into_domain().unwrap();
        assert_eq!(sentences[0].key(), "sen1");
        assert_eq!(sentences[1].key(), "sen2");
    }

    #[test]
    fn speaking_practice_parses_the_titled_shape() {
        let wire: SpeakingPracticeWire = serde_json::from_str(
            r#"{
                "Title": "At the market",
                "Description": "Buying vegetables",
                "Avg Time": "5 min",
                "Scenario": "You are at a market stall.",
                "Dialogue": [{"English": "How much?", "Telugu": "ఎంత?"}]
            }"#,
        )
        .unwrap();
        let practice = wire.into_domain().unwrap();
        assert_eq!(practice.title, "At the market");
        assert_eq!(practice.dialogue.len(), 1);
        assert_eq!(practice.dialogue[0].telugu(), "ఎంత?");
    }
}
