//! Wire types for the recommendation service.
//!
//! The request and response bodies of `POST /recommend` and `GET /health`,
//! plus the small [`Mood`] vocabulary the client knows how to style.

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, Result};

/// Text shown when the service returns no songs and no message of its own.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No recommendations found for your mood.";

// =============================================================================
// Request
// =============================================================================

/// Body of `POST /recommend`.
///
/// Built fresh for every submission from whatever the form holds at that
/// moment; never reused between submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub user_text: String,
    pub use_clustering: bool,
}

impl RequestPayload {
    /// Build a payload, rejecting empty or whitespace-only mood text.
    ///
    /// The text itself is sent as typed; only the emptiness check trims.
    pub fn new(user_text: impl Into<String>, use_clustering: bool) -> Result<Self> {
        let user_text = user_text.into();
        if user_text.trim().is_empty() {
            return Err(ContractError::EmptyUserText);
        }
        Ok(Self {
            user_text,
            use_clustering,
        })
    }
}

// =============================================================================
// Response
// =============================================================================

/// A single recommended song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// Some backends tag each song with the language it was picked for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            language: None,
        }
    }
}

/// Successful body of `POST /recommend`.
///
/// `recommendations` is kept in the order the service returned it; that order
/// is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub emotion: String,
    pub recommendations: Vec<Song>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResult {
    /// The emotion as shown to the user: first character upper-cased.
    pub fn mood_label(&self) -> String {
        capitalize_label(&self.emotion)
    }

    /// Styling bucket for the detected emotion.
    pub fn mood(&self) -> Mood {
        Mood::from_label(&self.emotion)
    }

    /// Text to show when there are no songs.
    ///
    /// Prefers the server's own message and falls back to
    /// [`DEFAULT_EMPTY_MESSAGE`]. An empty server message counts as absent.
    pub fn empty_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_EMPTY_MESSAGE)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

// =============================================================================
// Mood vocabulary
// =============================================================================

/// The emotion labels the client has styling for.
///
/// Anything else the service might say lands in [`Mood::Unrecognized`]; the
/// label itself is still displayed, only the styling falls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Sad,
    Happy,
    Angry,
    Fearful,
    Neutral,
    Unrecognized,
}

impl Mood {
    pub const KNOWN: [Mood; 5] = [Mood::Sad, Mood::Happy, Mood::Angry, Mood::Fearful, Mood::Neutral];

    /// Classify a service label. Matching ignores ASCII case and surrounding
    /// whitespace.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Mood::KNOWN
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(label))
            .unwrap_or(Mood::Unrecognized)
    }

    /// Canonical wire label; `Unrecognized` has none of its own.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Happy => "happy",
            Mood::Angry => "angry",
            Mood::Fearful => "fearful",
            Mood::Neutral => "neutral",
            Mood::Unrecognized => "unrecognized",
        }
    }
}

/// Upper-case the first character and keep the rest as is.
///
/// Works on chars rather than bytes so labels that start with a multi-byte
/// character are handled.
pub fn capitalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
