use std::sync::Arc;

use capture::{CaptureError, Recorder, RecordingHandle};
use telugu_core::Clock;
use telugu_core::model::{
    ActivityKind, Difficulty, ExerciseItem, ExerciseResponse, TypingDifficulty, TypingVerdict,
    VoiceVerdict,
};

use super::service::{ActivitySession, LoadToken, SessionPhase};
use crate::client::ContentApi;
use crate::error::{ClientError, SessionError};

/// Orchestrates whole activity flows: fetch items into a fresh session,
/// delegate typing/voice checks to the server, and hand recorded clips from
/// a capture device into a submission.
#[derive(Clone)]
pub struct ActivityLoopService {
    clock: Clock,
    content: Arc<dyn ContentApi>,
}

impl ActivityLoopService {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<dyn ContentApi>) -> Self {
        Self { clock, content }
    }

    //
    // ─── STARTING SESSIONS ─────────────────────────────────────────────────
    //

    /// Start a quiz session for the given topic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Request` when the fetch fails and
    /// `SessionError::EmptyResult` when it returns no questions.
    pub async fn start_quiz(
        &self,
        topic: &str,
        num_questions: u32,
        difficulty: Difficulty,
    ) -> Result<ActivitySession, SessionError> {
        let mut session = ActivitySession::new(ActivityKind::Quiz);
        let token = session.begin_load();
        let fetched = self
            .content
            .generate_quiz(topic, num_questions, difficulty)
            .await
            .map(|questions| questions.into_iter().map(ExerciseItem::Quiz).collect());
        self.apply_load(&mut session, token, fetched)?;
        Ok(session)
    }

    /// Start a text-matching session for the given topic.
    ///
    /// # Errors
    ///
    /// Same conditions as `start_quiz`.
    pub async fn start_matching(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<ActivitySession, SessionError> {
        let mut session = ActivitySession::new(ActivityKind::TextMatching);
        let token = session.begin_load();
        let fetched = self
            .content
            .generate_text_matching(topic, difficulty)
            .await
            .map(|pairs| pairs.into_iter().map(ExerciseItem::Match).collect());
        self.apply_load(&mut session, token, fetched)?;
        Ok(session)
    }

    /// Start a voice-practice session for the given topic.
    ///
    /// # Errors
    ///
    /// Same conditions as `start_quiz`.
    pub async fn start_voice(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<ActivitySession, SessionError> {
        let mut session = ActivitySession::new(ActivityKind::VoicePractice);
        let token = session.begin_load();
        let fetched = self
            .content
            .generate_voice_practice(topic, difficulty)
            .await
            .map(|prompts| prompts.into_iter().map(ExerciseItem::Voice).collect());
        self.apply_load(&mut session, token, fetched)?;
        Ok(session)
    }

    /// Start a typing-practice session for the given user.
    ///
    /// # Errors
    ///
    /// Same conditions as `start_quiz`.
    pub async fn start_typing(
        &self,
        user: &str,
        difficulty: TypingDifficulty,
    ) -> Result<ActivitySession, SessionError> {
        let mut session = ActivitySession::new(ActivityKind::TypingPractice);
        let token = session.begin_load();
        let fetched = self
            .content
            .typing_sentences(user, difficulty)
            .await
            .map(|sentences| sentences.into_iter().map(ExerciseItem::Sentence).collect());
        self.apply_load(&mut session, token, fetched)?;
        Ok(session)
    }

    //
    // ─── SERVER-CHECKED ANSWERS ────────────────────────────────────────────
    //

    /// Check a typed translation of the current sentence against the server
    /// and store the verdict as this position's response.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` when no item is current,
    /// `SessionError::ResponseMismatch` when the current item is not a
    /// sentence, and `SessionError::Request` when the check call fails.
    pub async fn check_typing_current(
        &self,
        session: &mut ActivitySession,
        typed: &str,
    ) -> Result<TypingVerdict, SessionError> {
        let telugu = match session.current_item() {
            Some(ExerciseItem::Sentence(sentence)) => sentence.telugu().to_owned(),
            Some(_) => return Err(SessionError::ResponseMismatch),
            None => return Err(SessionError::NotActive),
        };

        let verdict = self
            .content
            .check_typing(&telugu, typed)
            .await
            .map_err(|source| self.request_error(ActivityKind::TypingPractice, source))?;
        session.submit_answer(ExerciseResponse::Typing(verdict.clone()))?;
        Ok(verdict)
    }

    /// Finish the given capture, upload the clip against the current voice
    /// prompt, and store the verdict as this position's response.
    ///
    /// # Errors
    ///
    /// In addition to the `check_typing_current` conditions, returns
    /// `SessionError::Capture` when the capture produced no audio.
    pub async fn check_voice_current(
        &self,
        session: &mut ActivitySession,
        recorder: &mut dyn Recorder,
        handle: RecordingHandle,
    ) -> Result<VoiceVerdict, SessionError> {
        let prompt = match session.current_item() {
            Some(ExerciseItem::Voice(prompt)) => prompt.clone(),
            Some(_) => return Err(SessionError::ResponseMismatch),
            None => return Err(SessionError::NotActive),
        };

        recorder.stop(handle);
        let clip = recorder
            .clip(handle)
            .ok_or(SessionError::Capture(CaptureError::EmptyCapture))?;

        let verdict = self
            .content
            .check_voice_input(&prompt, &clip)
            .await
            .map_err(|source| self.request_error(ActivityKind::VoicePractice, source))?;
        session.submit_answer(ExerciseResponse::Voice(verdict.clone()))?;
        Ok(verdict)
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────
    //

    /// Advance the session, stamping completion time from this service's
    /// clock when the last item is passed.
    ///
    /// # Errors
    ///
    /// Propagates `ActivitySession::advance` errors.
    pub fn advance(&self, session: &mut ActivitySession) -> Result<SessionPhase, SessionError> {
        session.advance(self.clock.now())
    }

    fn apply_load(
        &self,
        session: &mut ActivitySession,
        token: LoadToken,
        fetched: Result<Vec<ExerciseItem>, ClientError>,
    ) -> Result<(), SessionError> {
        match fetched {
            Ok(items) => session.complete_load(token, items, self.clock.now()),
            Err(source) => {
                let activity = session.kind();
                session.fail_load(token);
                Err(self.request_error(activity, source))
            }
        }
    }

    fn request_error(&self, activity: ActivityKind, source: ClientError) -> SessionError {
        SessionError::Request { activity, source }
    }
}
