use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use capture::{EncodedAudioClip, FakeRecorder, Recorder};
use services::{ActivityLoopService, ClientError, Clock, ContentApi, SessionError, SessionPhase};
use telugu_core::model::{
    Difficulty, ExerciseItem, ExerciseResponse, MatchPair, QuizQuestion, SentencePair,
    TypingDifficulty, TypingVerdict, VoicePrompt, VoiceVerdict, WordMark,
};
use telugu_core::time::fixed_now;

//
// ─── SCRIPTED CONTENT API ──────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
struct ScriptedContent {
    quiz: Vec<QuizQuestion>,
    matching: Vec<MatchPair>,
    voice: Vec<VoicePrompt>,
    sentences: Vec<SentencePair>,
    typing_verdict: Option<TypingVerdict>,
    voice_verdict: Option<VoiceVerdict>,
    fail_generation: bool,
}

impl ScriptedContent {
    fn failing() -> Self {
        Self {
            fail_generation: true,
            ..Self::default()
        }
    }

    fn generation_error(&self) -> ClientError {
        ClientError::Rejected("failed".into())
    }
}

#[async_trait]
impl ContentApi for ScriptedContent {
    async fn generate_quiz(
        &self,
        _topic: &str,
        num_questions: u32,
        _difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ClientError> {
        if self.fail_generation {
            return Err(self.generation_error());
        }
        let mut questions = self.quiz.clone();
        questions.truncate(num_questions as usize);
        Ok(questions)
    }

    async fn generate_text_matching(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<MatchPair>, ClientError> {
        if self.fail_generation {
            return Err(self.generation_error());
        }
        Ok(self.matching.clone())
    }

    async fn generate_voice_practice(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<VoicePrompt>, ClientError> {
        if self.fail_generation {
            return Err(self.generation_error());
        }
        Ok(self.voice.clone())
    }

    async fn check_voice_input(
        &self,
        _prompt: &VoicePrompt,
        _clip: &EncodedAudioClip,
    ) -> Result<VoiceVerdict, ClientError> {
        self.voice_verdict
            .clone()
            .ok_or_else(|| self.generation_error())
    }

    async fn typing_sentences(
        &self,
        _user: &str,
        _difficulty: TypingDifficulty,
    ) -> Result<Vec<SentencePair>, ClientError> {
        if self.fail_generation {
            return Err(self.generation_error());
        }
        Ok(self.sentences.clone())
    }

    async fn check_typing(
        &self,
        _telugu: &str,
        english: &str,
    ) -> Result<TypingVerdict, ClientError> {
        let mut verdict = self
            .typing_verdict
            .clone()
            .ok_or_else(|| self.generation_error())?;
        verdict.typed = english.to_owned();
        Ok(verdict)
    }
}

//
// ─── FIXTURES ──────────────────────────────────────────────────────────────────
//

fn quiz_question(number: u32, answer: &str) -> QuizQuestion {
    QuizQuestion::new(
        number,
        format!("Question {number}"),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        answer,
    )
    .unwrap()
}

fn loop_service(content: ScriptedContent) -> ActivityLoopService {
    ActivityLoopService::new(Clock::fixed(fixed_now()), Arc::new(content))
}

//
// ─── FLOWS ─────────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn quiz_flow_runs_from_start_to_score() {
    let content = ScriptedContent {
        quiz: vec![
            quiz_question(1, "B"),
            quiz_question(2, "A"),
            quiz_question(3, "C"),
        ],
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_quiz("food", 5, Difficulty::Beginner)
        .await
        .unwrap();
    // The server returned fewer items than requested; the session uses
    // exactly what came back.
    assert_eq!(session.total_items(), 3);
    assert_eq!(session.position(), 0);

    for choice in ["B", "A", "D"] {
        session
            .submit_answer(ExerciseResponse::Choice(choice.into()))
            .unwrap();
        loop_svc.advance(&mut session).unwrap();
    }

    assert_eq!(session.phase(), SessionPhase::Reviewing);
    let score = session.score().unwrap();
    assert_eq!(score.correct(), 2);
    assert_eq!(score.total(), 3);
}

#[tokio::test]
async fn requested_count_caps_the_quiz_length() {
    let content = ScriptedContent {
        quiz: vec![
            quiz_question(1, "A"),
            quiz_question(2, "B"),
            quiz_question(3, "C"),
        ],
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let session = loop_svc
        .start_quiz("food", 2, Difficulty::Beginner)
        .await
        .unwrap();
    assert_eq!(session.total_items(), 2);
}

#[tokio::test]
async fn fetch_failure_surfaces_as_a_request_error() {
    let loop_svc = loop_service(ScriptedContent::failing());

    let err = loop_svc
        .start_quiz("food", 5, Difficulty::Beginner)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Request {
            activity: telugu_core::model::ActivityKind::Quiz,
            ..
        }
    ));
}

#[tokio::test]
async fn zero_items_is_an_empty_result() {
    let loop_svc = loop_service(ScriptedContent::default());

    let err = loop_svc
        .start_quiz("food", 5, Difficulty::Beginner)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::EmptyResult));
}

#[tokio::test]
async fn matching_flow_builds_a_permuted_board_and_scores() {
    let pairs = vec![
        MatchPair::new("1) Apple", "A) పండు").unwrap(),
        MatchPair::new("2) Book", "B) పుస్తకం").unwrap(),
    ];
    let content = ScriptedContent {
        matching: pairs.clone(),
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_matching("vocabulary", Difficulty::Beginner)
        .await
        .unwrap();

    let board = session.board().unwrap();
    let mut options = board.options().to_vec();
    options.sort();
    let mut rights: Vec<String> = pairs.iter().map(|p| p.right().to_owned()).collect();
    rights.sort();
    assert_eq!(options, rights);

    session
        .submit_answer(ExerciseResponse::Match("A) పండు".into()))
        .unwrap();
    loop_svc.advance(&mut session).unwrap();
    session
        .submit_answer(ExerciseResponse::Match("B) పుస్తకం".into()))
        .unwrap();
    loop_svc.advance(&mut session).unwrap();

    assert!(session.score().unwrap().is_perfect());
}

#[tokio::test]
async fn typing_flow_stores_server_verdicts() {
    let content = ScriptedContent {
        sentences: vec![
            SentencePair::new("sen1", "నేను తెలుగు నేర్చుకుంటున్నాను.").unwrap(),
            SentencePair::new("sen2", "నాకు పుస్తకాలు ఇష్టం.").unwrap(),
        ],
        typing_verdict: Some(TypingVerdict {
            typed: String::new(),
            correct_sentence: "I am learning Telugu.".into(),
            accepted: true,
        }),
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_typing("ravi", TypingDifficulty::Easy)
        .await
        .unwrap();
    assert_eq!(session.total_items(), 2);

    let verdict = loop_svc
        .check_typing_current(&mut session, "I am learning Telugu.")
        .await
        .unwrap();
    assert!(verdict.accepted);
    assert_eq!(verdict.typed, "I am learning Telugu.");
    assert!(session.response_at(0).is_some());

    loop_svc.advance(&mut session).unwrap();
    loop_svc
        .check_typing_current(&mut session, "I like books.")
        .await
        .unwrap();
    loop_svc.advance(&mut session).unwrap();

    assert_eq!(session.phase(), SessionPhase::Reviewing);
    assert_eq!(session.score().unwrap().correct(), 2);
}

#[tokio::test]
async fn voice_flow_hands_the_clip_from_recorder_to_check() {
    let mut words = BTreeMap::new();
    words.insert("hello".to_string(), WordMark::Correct);
    words.insert("john".to_string(), WordMark::Incorrect);

    let content = ScriptedContent {
        voice: vec![VoicePrompt::new("Hello, my name is John.", "హలో, నా పేరు జాన్.").unwrap()],
        voice_verdict: Some(VoiceVerdict {
            words,
            correct_text: Some("Hello, my name is John.".into()),
            accepted: true,
        }),
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_voice("introductions", Difficulty::Beginner)
        .await
        .unwrap();

    let mut recorder = FakeRecorder::with_clip(EncodedAudioClip::new(vec![0; 64], 16_000));
    let handle = recorder.start().unwrap();
    assert!(recorder.is_recording());

    let verdict = loop_svc
        .check_voice_current(&mut session, &mut recorder, handle)
        .await
        .unwrap();
    assert!(verdict.accepted);
    assert_eq!(verdict.words["hello"], WordMark::Correct);

    // The capture was finished before upload and the device released.
    assert!(!recorder.is_recording());
    assert_eq!(recorder.stops(), 1);

    loop_svc.advance(&mut session).unwrap();
    assert!(session.score().unwrap().is_perfect());
}

#[tokio::test]
async fn voice_check_without_audio_is_a_capture_error() {
    let content = ScriptedContent {
        voice: vec![VoicePrompt::new("Hello.", "హలో.").unwrap()],
        voice_verdict: Some(VoiceVerdict {
            words: BTreeMap::new(),
            correct_text: None,
            accepted: true,
        }),
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_voice("greetings", Difficulty::Beginner)
        .await
        .unwrap();

    let mut recorder = FakeRecorder::silent();
    let handle = recorder.start().unwrap();
    let err = loop_svc
        .check_voice_current(&mut session, &mut recorder, handle)
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Capture(_)));
    // The failed submission leaves the session active and unanswered.
    assert_eq!(session.phase(), SessionPhase::Active);
    assert!(session.response_at(0).is_none());
}

#[tokio::test]
async fn restart_allows_a_fresh_run_on_the_same_items() {
    let content = ScriptedContent {
        quiz: vec![quiz_question(1, "A")],
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_quiz("food", 1, Difficulty::Beginner)
        .await
        .unwrap();
    session
        .submit_answer(ExerciseResponse::Choice("A".into()))
        .unwrap();
    loop_svc.advance(&mut session).unwrap();
    assert_eq!(session.phase(), SessionPhase::Reviewing);

    session.restart();
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert_eq!(session.total_items(), 0);
    assert_eq!(session.answered_count(), 0);
    assert_eq!(session.position(), 0);

    let session = loop_svc
        .start_quiz("food", 1, Difficulty::Beginner)
        .await
        .unwrap();
    assert_eq!(session.total_items(), 1);
}

#[tokio::test]
async fn checking_typing_on_a_quiz_item_is_a_mismatch() {
    let content = ScriptedContent {
        quiz: vec![quiz_question(1, "A")],
        typing_verdict: Some(TypingVerdict {
            typed: String::new(),
            correct_sentence: String::new(),
            accepted: true,
        }),
        ..ScriptedContent::default()
    };
    let loop_svc = loop_service(content);

    let mut session = loop_svc
        .start_quiz("food", 1, Difficulty::Beginner)
        .await
        .unwrap();
    let err = loop_svc
        .check_typing_current(&mut session, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::ResponseMismatch));
}
