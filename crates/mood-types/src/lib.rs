//! # Mood Types Crate
//!
//! Wire types shared by everything that talks to the mood recommendation
//! service.
//!
//! ## Main Components
//!
//! - **types**: Request/response bodies (RequestPayload, RecommendationResult, Song)
//!   and the Mood vocabulary
//! - **response**: Decode and validate response bodies
//! - **error**: Error types for contract violations
//!
//! ## Example Usage
//!
//! ```ignore
//! use mood_types::{RequestPayload, decode_recommendation};
//!
//! let payload = RequestPayload::new("rainy day, missing home", true)?;
//! let body = serde_json::to_vec(&payload)?;
//!
//! // ...send it, then:
//! let result = decode_recommendation(&response_bytes)?;
//! println!("Detected Mood: {}", result.mood_label());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod response;

// Re-export commonly used types for convenience
pub use error::{ContractError, Result};
pub use response::{decode_health, decode_recommendation};
pub use types::{
    capitalize_label,
    HealthStatus,
    Mood,
    RecommendationResult,
    RequestPayload,
    Song,
    DEFAULT_EMPTY_MESSAGE,
};
