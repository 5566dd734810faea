//! Decoding of service response bodies.
//!
//! Bodies are decoded with serde first, then checked for values that decode
//! fine but can't be displayed (an empty emotion label, a song with no
//! title). Both kinds of failure come back as [`ContractError`] so callers
//! can treat them uniformly.

use crate::error::{ContractError, Result};
use crate::types::{HealthStatus, RecommendationResult, Song};

/// Decode and validate a `POST /recommend` success body.
///
/// A body without an `emotion` string, or without a `recommendations`
/// array, is rejected rather than guessed at.
pub fn decode_recommendation(body: &[u8]) -> Result<RecommendationResult> {
    let result: RecommendationResult = serde_json::from_slice(body)?;
    validate_recommendation(&result)?;
    Ok(result)
}

/// Decode a `GET /health` body.
pub fn decode_health(body: &[u8]) -> Result<HealthStatus> {
    let health: HealthStatus = serde_json::from_slice(body)?;
    if health.status.trim().is_empty() {
        return Err(ContractError::InvalidField {
            field: "status",
            reason: "empty".to_string(),
        });
    }
    Ok(health)
}

fn validate_recommendation(result: &RecommendationResult) -> Result<()> {
    if result.emotion.trim().is_empty() {
        return Err(ContractError::InvalidField {
            field: "emotion",
            reason: "empty label".to_string(),
        });
    }

    for (idx, song) in result.recommendations.iter().enumerate() {
        validate_song(idx, song)?;
    }

    Ok(())
}

fn validate_song(idx: usize, song: &Song) -> Result<()> {
    if song.title.trim().is_empty() {
        return Err(ContractError::InvalidField {
            field: "recommendations.title",
            reason: format!("song {} has an empty title", idx + 1),
        });
    }
    Ok(())
}
