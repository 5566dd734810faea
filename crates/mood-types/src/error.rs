//! Error types for the mood-types crate.
//!
//! Everything that can go wrong while building a request or reading a
//! response of the `/recommend` contract ends up in [`ContractError`].

use thiserror::Error;

/// Violations of the recommendation service contract
///
/// The request side has a single rule (the mood text must not be empty);
/// the response side covers bodies that are not JSON, JSON of the wrong
/// shape, and JSON that has the right shape but unusable values.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Submission attempted without any mood text
    #[error("Mood text must not be empty")]
    EmptyUserText,

    /// Body could not be decoded into the expected shape
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Body decoded, but a field carries a value the client can't use
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ContractError {
    /// True for errors raised while reading a service response.
    pub fn is_response_error(&self) -> bool {
        !matches!(self, ContractError::EmptyUserText)
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ContractError>;
