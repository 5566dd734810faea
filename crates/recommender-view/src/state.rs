//! The recommender view's state machine.
//!
//! All view state lives in [`UiState`] and only changes through its
//! transition methods:
//!
//! ```text
//!            submit                ok
//!   Idle ───────────▶ Submitting ───────▶ Success ─┐
//!                       ▲    │ err                 │
//!                       │    ▼                     │ submit
//!                       │  Failure ────────────────┤
//!                       └──────────────────────────┘
//! ```
//!
//! Every submission is issued a [`RequestTicket`]. Only the outcome carrying
//! the latest ticket may settle the view; anything older is dropped, so two
//! overlapping requests can never overwrite each other's result.

use std::fmt;

use mood_types::{ContractError, RecommendationResult, RequestPayload};
use tracing::{debug, info, warn};

/// The only failure text users ever see.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get recommendations. Please try again.";

/// Identifies one submission. Tickets increase monotonically per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the four states the view is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Failure,
}

/// A submission that passed the validation gate and is ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: RequestTicket,
    pub payload: RequestPayload,
}

/// Whether a settle call changed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// The outcome belonged to a superseded or already settled submission.
    Stale,
}

/// Form fields plus request lifecycle state.
#[derive(Debug, Clone)]
pub struct UiState {
    user_text: String,
    use_clustering: bool,
    loading: bool,
    result: Option<RecommendationResult>,
    error: Option<String>,
    last_ticket: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            user_text: String::new(),
            use_clustering: true,
            loading: false,
            result: None,
            error: None,
            last_ticket: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn use_clustering(&self) -> bool {
        self.use_clustering
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.result.is_some() {
            Phase::Success
        } else if self.error.is_some() {
            Phase::Failure
        } else {
            Phase::Idle
        }
    }

    /// The submit control is disabled while a request is outstanding.
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }

    /// Ticket of the most recent submission, if there has been one.
    pub fn latest_ticket(&self) -> Option<RequestTicket> {
        (self.last_ticket > 0).then_some(RequestTicket(self.last_ticket))
    }

    // =========================================================================
    // Form edits
    // =========================================================================
    // The form stays editable in every phase, including while loading.

    pub fn set_user_text(&mut self, text: impl Into<String>) {
        self.user_text = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.user_text.push(c);
    }

    pub fn pop_char(&mut self) {
        self.user_text.pop();
    }

    pub fn clear_text(&mut self) {
        self.user_text.clear();
    }

    pub fn set_use_clustering(&mut self, enabled: bool) {
        self.use_clustering = enabled;
    }

    pub fn toggle_clustering(&mut self) {
        self.use_clustering = !self.use_clustering;
    }

    // =========================================================================
    // Lifecycle transitions
    // =========================================================================

    /// `Idle | Success | Failure | Submitting -> Submitting`.
    ///
    /// Rejects empty mood text without touching any state. On success the
    /// previous result and error are cleared before the caller has a chance
    /// to send anything, and a fresh ticket supersedes any request still in
    /// flight.
    pub fn begin_submission(&mut self) -> Result<Submission, ContractError> {
        let payload = RequestPayload::new(self.user_text.clone(), self.use_clustering)?;

        self.last_ticket += 1;
        let ticket = RequestTicket(self.last_ticket);

        self.result = None;
        self.error = None;
        self.loading = true;

        info!(
            "Submission {} started (clustering: {})",
            ticket, payload.use_clustering
        );
        self.check_invariant();

        Ok(Submission { ticket, payload })
    }

    /// `Submitting -> Success | Failure`.
    ///
    /// Errors of any kind collapse into [`GENERIC_FAILURE_MESSAGE`]; the
    /// underlying cause is only logged.
    pub fn settle<E: fmt::Display>(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RecommendationResult, E>,
    ) -> Settled {
        if !self.loading || ticket.0 != self.last_ticket {
            debug!(
                "Dropping outcome of submission {} (latest is #{}, loading: {})",
                ticket, self.last_ticket, self.loading
            );
            return Settled::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                info!(
                    "Submission {} succeeded: emotion '{}', {} songs",
                    ticket,
                    result.emotion,
                    result.recommendations.len()
                );
                self.error = None;
                self.result = Some(result);
            }
            Err(err) => {
                warn!("Submission {} failed: {}", ticket, err);
                self.result = None;
                self.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
            }
        }

        self.check_invariant();
        Settled::Applied
    }

    fn check_invariant(&self) {
        debug_assert!(
            !(self.result.is_some() && self.error.is_some()),
            "result and error must never both be set"
        );
        debug_assert!(
            !(self.loading && (self.result.is_some() || self.error.is_some())),
            "nothing may be shown while loading"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_types::Song;

    fn sample_result() -> RecommendationResult {
        RecommendationResult {
            emotion: "sad".to_string(),
            recommendations: vec![Song::new("Someone Like You", "Adele")],
            message: None,
        }
    }

    fn typed(text: &str) -> UiState {
        let mut state = UiState::new();
        state.set_user_text(text);
        state
    }

    /// Exactly one of loading/result/error once settled, never result and error.
    fn assert_exclusive(state: &UiState) {
        let shown = [state.loading(), state.result().is_some(), state.error().is_some()]
            .iter()
            .filter(|b| **b)
            .count();
        assert_eq!(shown, 1, "state: {:?}", state);
    }

    #[test]
    fn test_initial_state() {
        let state = UiState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.use_clustering(), "Clustering defaults to on");
        assert!(state.submit_enabled());
        assert!(state.latest_ticket().is_none());
    }

    #[test]
    fn test_empty_text_is_rejected_without_state_change() {
        let mut state = UiState::new();
        let err = state.begin_submission().unwrap_err();
        assert!(matches!(err, ContractError::EmptyUserText));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.latest_ticket().is_none());

        state.set_user_text("   ");
        assert!(state.begin_submission().is_err());
        assert!(!state.loading());
    }

    #[test]
    fn test_submission_carries_form_values() {
        let mut state = typed("rainy sunday");
        state.toggle_clustering();

        let submission = state.begin_submission().unwrap();
        assert_eq!(submission.payload.user_text, "rainy sunday");
        assert!(!submission.payload.use_clustering);
        assert_eq!(state.phase(), Phase::Submitting);
        assert!(!state.submit_enabled());
    }

    #[test]
    fn test_success_transition() {
        let mut state = typed("down");
        let submission = state.begin_submission().unwrap();

        let settled = state.settle::<String>(submission.ticket, Ok(sample_result()));
        assert_eq!(settled, Settled::Applied);
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.result().unwrap().emotion, "sad");
        assert_exclusive(&state);
    }

    #[test]
    fn test_failure_transition_uses_generic_message() {
        let mut state = typed("down");
        let submission = state.begin_submission().unwrap();

        state.settle(submission.ticket, Err::<RecommendationResult, _>("HTTP 500"));
        assert_eq!(state.phase(), Phase::Failure);
        assert_eq!(state.error(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!state.loading());
        assert_exclusive(&state);
    }

    #[test]
    fn test_resubmit_clears_previous_output() {
        let mut state = typed("down");
        let first = state.begin_submission().unwrap();
        state.settle::<String>(first.ticket, Ok(sample_result()));

        let second = state.begin_submission().unwrap();
        assert!(state.result().is_none(), "No stale result while loading");
        assert!(state.error().is_none());
        assert_exclusive(&state);

        state.settle(second.ticket, Err::<RecommendationResult, _>("boom"));
        let third = state.begin_submission().unwrap();
        assert!(state.error().is_none(), "No stale error while loading");
        assert!(third.ticket > second.ticket);
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut state = typed("down");
        let first = state.begin_submission().unwrap();
        let second = state.begin_submission().unwrap();

        // Newer request finishes first
        assert_eq!(
            state.settle::<String>(second.ticket, Ok(sample_result())),
            Settled::Applied
        );
        // Older one trails in with an error and must not clobber the result
        assert_eq!(
            state.settle(first.ticket, Err::<RecommendationResult, _>("late failure")),
            Settled::Stale
        );

        assert_eq!(state.phase(), Phase::Success);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_outcome_after_settle_is_dropped() {
        let mut state = typed("down");
        let submission = state.begin_submission().unwrap();
        state.settle::<String>(submission.ticket, Ok(sample_result()));

        let again = state.settle(submission.ticket, Err::<RecommendationResult, _>("dup"));
        assert_eq!(again, Settled::Stale);
        assert_eq!(state.phase(), Phase::Success);
    }

    #[test]
    fn test_form_edits() {
        let mut state = UiState::new();
        for c in "hey".chars() {
            state.push_char(c);
        }
        state.pop_char();
        assert_eq!(state.user_text(), "he");

        state.set_use_clustering(false);
        state.toggle_clustering();
        assert!(state.use_clustering());

        state.clear_text();
        assert_eq!(state.user_text(), "");
    }
}
