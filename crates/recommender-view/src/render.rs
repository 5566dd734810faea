//! Framework-neutral render model.
//!
//! [`render`] turns a [`UiState`] into a [`ViewModel`]: plain data that says
//! what is on screen without saying how to draw it. Front ends (the terminal
//! UI, the one-shot printer) only ever draw a `ViewModel`, so every
//! rendering rule is decided here, once.

use mood_types::{RecommendationResult, Song};

use crate::state::UiState;
use crate::theme::{HEADER_IMAGE_URL, MoodTheme, Rgb, theme_for};

pub const TITLE: &str = "Mood-Based Music Recommender";
pub const SUBTITLE: &str =
    "Enter how you're feeling and get song recommendations to intensify your mood!";
pub const PLACEHOLDER: &str = "Describe your current mood...";
pub const CLUSTERING_LABEL: &str = "Use advanced clustering for better matches";
pub const SUBMIT_LABEL: &str = "Get Recommendations";
pub const LOADING_CAPTION: &str = "Analyzing your mood and finding matching songs...";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub header: HeaderView,
    pub form: FormView,
    pub body: BodyView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub user_text: String,
    pub placeholder: &'static str,
    pub use_clustering: bool,
    pub clustering_label: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

/// Everything below the form. At most one of these is ever visible.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    /// Nothing submitted yet.
    Blank,
    Loading { caption: &'static str },
    Error { message: String },
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub badge: MoodBadge,
    pub content: ResultContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodBadge {
    /// Raw emotion string, usable as image alt text.
    pub emotion: String,
    /// Emotion with its first character upper-cased.
    pub label: String,
    pub image_url: &'static str,
    pub accent: Rgb,
}

impl MoodBadge {
    pub fn heading(&self) -> String {
        format!("Detected Mood: {}", self.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultContent {
    NoRecommendations { message: String },
    Songs(Vec<SongRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    /// 1-based position in the server's order.
    pub number: usize,
    pub title: String,
    pub artist: String,
    pub language: Option<String>,
}

impl SongRow {
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

pub fn render(state: &UiState) -> ViewModel {
    ViewModel {
        header: HeaderView {
            title: TITLE,
            subtitle: SUBTITLE,
            image_url: HEADER_IMAGE_URL,
        },
        form: FormView {
            user_text: state.user_text().to_string(),
            placeholder: PLACEHOLDER,
            use_clustering: state.use_clustering(),
            clustering_label: CLUSTERING_LABEL,
            submit_label: SUBMIT_LABEL,
            submit_enabled: state.submit_enabled(),
        },
        body: render_body(state),
    }
}

fn render_body(state: &UiState) -> BodyView {
    if state.loading() {
        return BodyView::Loading {
            caption: LOADING_CAPTION,
        };
    }
    if let Some(message) = state.error() {
        return BodyView::Error {
            message: message.to_string(),
        };
    }
    match state.result() {
        Some(result) => BodyView::Result(render_result(result)),
        None => BodyView::Blank,
    }
}

pub fn render_result(result: &RecommendationResult) -> ResultView {
    let MoodTheme { image_url, accent } = theme_for(result.mood());
    let badge = MoodBadge {
        emotion: result.emotion.clone(),
        label: result.mood_label(),
        image_url,
        accent,
    };

    let content = if result.recommendations.is_empty() {
        ResultContent::NoRecommendations {
            message: result.empty_message().to_string(),
        }
    } else {
        ResultContent::Songs(song_rows(&result.recommendations))
    };

    ResultView { badge, content }
}

fn song_rows(songs: &[Song]) -> Vec<SongRow> {
    songs
        .iter()
        .enumerate()
        .map(|(idx, song)| SongRow {
            number: idx + 1,
            title: song.title.clone(),
            artist: song.artist.clone(),
            language: song.language.clone(),
        })
        .collect()
}
