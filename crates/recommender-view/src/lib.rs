//! Recommender view crate.
//!
//! Everything a front end needs to show the mood recommender, minus the
//! drawing itself.
//!
//! ## Main Components
//!
//! - **state**: UiState and its transitions (Idle, Submitting, Success, Failure)
//! - **theme**: Mood to image/accent lookup with an explicit fallback
//! - **render**: Turn UiState into a framework-neutral ViewModel
//! - **controller**: Run service calls on tokio tasks and report back
//! - **view**: RecommenderView, tying the above together

pub mod controller;
pub mod render;
pub mod state;
pub mod theme;
pub mod view;

pub use controller::{SubmissionController, ViewEvent};
pub use render::{
    render, BodyView, FormView, HeaderView, MoodBadge, ResultContent, ResultView, SongRow,
    ViewModel,
};
pub use state::{Phase, RequestTicket, Settled, Submission, UiState, GENERIC_FAILURE_MESSAGE};
pub use theme::{theme_for, theme_for_label, MoodTheme, Rgb};
pub use view::RecommenderView;
