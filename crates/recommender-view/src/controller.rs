//! Runs service calls off the UI loop.
//!
//! The UI loop never awaits the network itself. It hands each
//! [`Submission`] to the [`SubmissionController`], which spawns a tokio task
//! for the request and reports the outcome back as a [`ViewEvent`] over an
//! unbounded channel. The loop applies events whenever it gets to them.

use std::sync::Arc;
use std::time::Instant;

use mood_client::{ClientError, RecommendationService};
use mood_types::{HealthStatus, RecommendationResult};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::state::{RequestTicket, Submission};

/// Something that happened off the UI loop and needs applying to the view.
#[derive(Debug)]
pub enum ViewEvent {
    Settled {
        ticket: RequestTicket,
        outcome: Result<RecommendationResult, ClientError>,
    },
    Health(Result<HealthStatus, ClientError>),
}

#[derive(Clone)]
pub struct SubmissionController {
    service: Arc<dyn RecommendationService>,
    events: UnboundedSender<ViewEvent>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn RecommendationService>, events: UnboundedSender<ViewEvent>) -> Self {
        Self { service, events }
    }

    /// Send the submission and report its outcome. Must be called from
    /// within a tokio runtime.
    ///
    /// There is no cancellation: a superseded request still runs to the end
    /// and its outcome is dropped by the view when it arrives.
    pub fn dispatch(&self, submission: Submission) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        tokio::spawn(async move {
            let Submission { ticket, payload } = submission;
            let start = Instant::now();

            let outcome = service.recommend(payload).await;
            info!(
                "Submission {} returned in {:.2?} ({})",
                ticket,
                start.elapsed(),
                if outcome.is_ok() { "ok" } else { "error" }
            );

            if events.send(ViewEvent::Settled { ticket, outcome }).is_err() {
                debug!("View closed before submission {} settled", ticket);
            }
        })
    }

    /// Probe `GET /health` in the background.
    pub fn probe_health(&self) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        tokio::spawn(async move {
            let health = service.health().await;
            if events.send(ViewEvent::Health(health)).is_err() {
                debug!("View closed before health probe finished");
            }
        })
    }
}
