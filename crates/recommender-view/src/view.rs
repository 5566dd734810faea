//! The recommender view: state machine, controller and event inbox in one
//! place.
//!
//! ## Usage
//! ```ignore
//! let mut view = RecommenderView::new(Arc::new(client));
//! view.set_user_text("long day, need something calm");
//! view.submit()?;
//!
//! // In a UI loop: drain events every tick
//! view.poll_events();
//! draw(view.render());
//!
//! // Or, without a UI loop:
//! view.wait_until_settled().await;
//! ```

use std::sync::Arc;

use mood_client::RecommendationService;
use mood_types::{ContractError, HealthStatus};
use tokio::sync::mpsc::{self, UnboundedReceiver, error::TryRecvError};
use tracing::warn;

use crate::controller::{SubmissionController, ViewEvent};
use crate::render::{ViewModel, render};
use crate::state::{Phase, RequestTicket, Settled, UiState};

pub struct RecommenderView {
    state: UiState,
    controller: SubmissionController,
    events: UnboundedReceiver<ViewEvent>,
    service_status: Option<String>,
}

impl RecommenderView {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: UiState::new(),
            controller: SubmissionController::new(service, tx),
            events: rx,
            service_status: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Last known health of the service, as a one-line description.
    pub fn service_status(&self) -> Option<&str> {
        self.service_status.as_deref()
    }

    pub fn render(&self) -> ViewModel {
        render(&self.state)
    }

    // Form edits pass straight through to the state.

    pub fn set_user_text(&mut self, text: impl Into<String>) {
        self.state.set_user_text(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.state.push_char(c);
    }

    pub fn pop_char(&mut self) {
        self.state.pop_char();
    }

    pub fn set_use_clustering(&mut self, enabled: bool) {
        self.state.set_use_clustering(enabled);
    }

    pub fn toggle_clustering(&mut self) {
        self.state.toggle_clustering();
    }

    /// Validate the form, move to `Submitting` and send the request.
    ///
    /// Empty mood text is rejected here, before anything touches the
    /// network. Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Result<RequestTicket, ContractError> {
        let submission = self.state.begin_submission()?;
        let ticket = submission.ticket;
        self.controller.dispatch(submission);
        Ok(ticket)
    }

    /// Start a background health probe; the answer arrives as an event.
    pub fn check_health(&self) {
        self.controller.probe_health();
    }

    /// Apply one event to the view.
    pub fn apply(&mut self, event: ViewEvent) -> Settled {
        match event {
            ViewEvent::Settled { ticket, outcome } => self.state.settle(ticket, outcome),
            ViewEvent::Health(health) => {
                self.service_status = Some(describe_health(&health));
                Settled::Applied
            }
        }
    }

    /// Apply every event that has already arrived, without waiting.
    ///
    /// Returns how many events were applied.
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Event channel disconnected");
                    break;
                }
            }
        }
        applied
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) -> Option<Settled> {
        let event = self.events.recv().await?;
        Some(self.apply(event))
    }

    /// Apply events until the current submission has settled.
    pub async fn wait_until_settled(&mut self) -> Phase {
        while self.state.loading() {
            if self.next_event().await.is_none() {
                break;
            }
        }
        self.state.phase()
    }
}

fn describe_health(health: &Result<HealthStatus, mood_client::ClientError>) -> String {
    match health {
        Ok(status) => match status.message.as_deref() {
            Some(message) => format!("Service {}: {}", status.status, message),
            None => format!("Service {}", status.status),
        },
        Err(err) => format!("Service unreachable ({})", err.kind()),
    }
}
