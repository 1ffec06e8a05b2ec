use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use tracing::{debug, info, warn};

use telugu_core::model::{
    ActivityKind, ExerciseItem, ExerciseResponse, MatchPair, ScoreResult, SessionId,
};

use super::board::MatchBoard;
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── PHASE & LOAD TOKEN ────────────────────────────────────────────────────────
//

/// Lifecycle phase of an activity session.
///
/// `Empty → Loading → Active → Reviewing → Empty`, with `restart` looping
/// back from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Empty,
    Loading,
    Active,
    Reviewing,
}

/// Ticket tying an in-flight fetch to the load that started it.
///
/// A token from a superseded load no longer matches the session's current
/// generation, so its late result is discarded instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one quiz/matching/typing/voice run.
///
/// Owns an item sequence that is fixed once loaded, a sparse response map,
/// and a cursor over the items. Exclusively owned by the presentation layer
/// that created it; nothing here is shared or persisted.
pub struct ActivitySession {
    id: SessionId,
    kind: ActivityKind,
    phase: SessionPhase,
    items: Vec<ExerciseItem>,
    board: Option<MatchBoard>,
    responses: BTreeMap<usize, ExerciseResponse>,
    position: usize,
    generation: u64,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ActivitySession {
    /// Creates an empty session for the given activity.
    #[must_use]
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            id: SessionId::new(),
            kind,
            phase: SessionPhase::Empty,
            items: Vec::new(),
            board: None,
            responses: BTreeMap::new(),
            position: 0,
            generation: 0,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn items(&self) -> &[ExerciseItem] {
        &self.items
    }

    /// Total number of items in this session.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&ExerciseItem> {
        if self.phase == SessionPhase::Active {
            self.items.get(self.position)
        } else {
            None
        }
    }

    #[must_use]
    pub fn response_at(&self, index: usize) -> Option<&ExerciseResponse> {
        self.responses.get(&index)
    }

    /// Number of items that have a stored response.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    /// The shuffled right column, present only for matching sessions.
    #[must_use]
    pub fn board(&self) -> Option<&MatchBoard> {
        self.board.as_ref()
    }

    /// Right-column values not yet assigned to any left entry.
    #[must_use]
    pub fn available_options(&self) -> Vec<&str> {
        let Some(board) = self.board.as_ref() else {
            return Vec::new();
        };
        board
            .options()
            .iter()
            .map(String::as_str)
            .filter(|option| !self.is_assigned(option))
            .collect()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.items.len(),
            answered: self.responses.len(),
            remaining: self.items.len().saturating_sub(self.responses.len()),
            position: self.position,
            is_reviewing: self.phase == SessionPhase::Reviewing,
        }
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────
    //

    /// Begin a fetch: clears any previous state and moves to `Loading`.
    ///
    /// The returned token must be handed back to `complete_load` or
    /// `fail_load`. Beginning a new load invalidates all earlier tokens, so
    /// a previous fetch that resolves late is discarded, never applied.
    pub fn begin_load(&mut self) -> LoadToken {
        self.reset_content();
        self.generation += 1;
        self.phase = SessionPhase::Loading;
        debug!(session = %self.id, activity = %self.kind, "load started");
        LoadToken {
            generation: self.generation,
        }
    }

    /// Apply a fetch result, shuffling the matching board with `rand::rng()`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleResponse` if the token was superseded and
    /// `SessionError::EmptyResult` if the fetch produced zero items.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        items: Vec<ExerciseItem>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.complete_load_with_rng(token, items, now, &mut rand::rng())
    }

    /// `complete_load` with an injected randomness source.
    ///
    /// # Errors
    ///
    /// Same conditions as `complete_load`.
    pub fn complete_load_with_rng(
        &mut self,
        token: LoadToken,
        items: Vec<ExerciseItem>,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<(), SessionError> {
        if !self.token_is_current(token) {
            debug!(session = %self.id, "discarding stale load result");
            return Err(SessionError::StaleResponse);
        }

        if items.is_empty() {
            warn!(session = %self.id, activity = %self.kind, "fetch returned no items");
            self.phase = SessionPhase::Empty;
            return Err(SessionError::EmptyResult);
        }

        if self.kind == ActivityKind::TextMatching {
            let pairs: Vec<&MatchPair> = items
                .iter()
                .filter_map(|item| match item {
                    ExerciseItem::Match(pair) => Some(pair),
                    _ => None,
                })
                .collect();
            self.board = Some(MatchBoard::shuffled(&pairs, rng));
        }

        info!(
            session = %self.id,
            activity = %self.kind,
            items = items.len(),
            "session active"
        );
        self.items = items;
        self.position = 0;
        self.started_at = Some(now);
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Record a fetch failure: the session returns to `Empty` so the user
    /// can retry. A stale token is ignored.
    pub fn fail_load(&mut self, token: LoadToken) {
        if !self.token_is_current(token) {
            debug!(session = %self.id, "discarding stale load failure");
            return;
        }
        self.phase = SessionPhase::Empty;
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────
    //

    /// Store a response for the current item without advancing.
    ///
    /// For matching responses the assignment is kept bijective: giving this
    /// position a right-column value removes that value from any other
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside of `Active` and
    /// `SessionError::ResponseMismatch` when the response shape does not fit
    /// the current item (or names an unknown right-column value).
    pub fn submit_answer(&mut self, response: ExerciseResponse) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        let Some(item) = self.items.get(self.position) else {
            return Err(SessionError::NotActive);
        };
        if !response.fits(item) {
            return Err(SessionError::ResponseMismatch);
        }

        if let ExerciseResponse::Match(value) = &response {
            let board = self.board.as_ref().ok_or(SessionError::ResponseMismatch)?;
            if !board.contains(value) {
                return Err(SessionError::ResponseMismatch);
            }
            let position = self.position;
            let value = value.clone();
            self.responses.retain(|&index, stored| {
                index == position || !matches!(stored, ExerciseResponse::Match(v) if *v == value)
            });
        }

        self.responses.insert(self.position, response);
        Ok(())
    }

    /// Move to the next item; from the last item the session completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside of `Active` and
    /// `SessionError::IncompleteSubmission` when a matching session tries to
    /// complete with unpaired left entries (no state change).
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionPhase, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }

        if self.position + 1 < self.items.len() {
            self.position += 1;
            return Ok(self.phase);
        }

        // Matching boards may not be scored until every left item is paired.
        if self.kind == ActivityKind::TextMatching && self.responses.len() < self.items.len() {
            return Err(SessionError::IncompleteSubmission);
        }

        self.completed_at = Some(now);
        self.phase = SessionPhase::Reviewing;
        info!(
            session = %self.id,
            activity = %self.kind,
            answered = self.responses.len(),
            "session complete"
        );
        Ok(self.phase)
    }

    /// Move back one item, stopping at the first. A no-op at position 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside of `Active`.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    /// Drop all stored responses while staying `Active` (the matching
    /// board's "reset" control). Items and board order are untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside of `Active`.
    pub fn clear_responses(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        self.responses.clear();
        Ok(())
    }

    //
    // ─── REVIEW & RESTART ──────────────────────────────────────────────────
    //

    /// Compute the score for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewing` before the session completes.
    pub fn score(&self) -> Result<ScoreResult, SessionError> {
        if self.phase != SessionPhase::Reviewing {
            return Err(SessionError::NotReviewing);
        }
        Ok(ScoreResult::tally(&self.items, &self.responses))
    }

    /// Return to `Empty` from any phase: no items, no responses, position 0.
    ///
    /// Also invalidates outstanding load tokens, so an in-flight fetch that
    /// resolves after a restart is discarded.
    pub fn restart(&mut self) {
        self.reset_content();
        self.generation += 1;
        self.phase = SessionPhase::Empty;
        info!(session = %self.id, activity = %self.kind, "session restarted");
    }

    fn reset_content(&mut self) {
        self.items.clear();
        self.board = None;
        self.responses.clear();
        self.position = 0;
        self.started_at = None;
        self.completed_at = None;
    }

    fn token_is_current(&self, token: LoadToken) -> bool {
        self.phase == SessionPhase::Loading && token.generation == self.generation
    }

    fn is_assigned(&self, option: &str) -> bool {
        self.responses
            .values()
            .any(|response| matches!(response, ExerciseResponse::Match(v) if v == option))
    }
}

impl fmt::Debug for ActivitySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivitySession")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .field("items_len", &self.items.len())
            .field("position", &self.position)
            .field("answered", &self.responses.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
