// src/error.rs

//! Error taxonomy for payload normalization and transport.
//!
//! Validation failures (`Shape`, `Length`, `Range`, `Configuration`) are raised
//! before any request is issued. `Transport` carries whatever detail the
//! visualization server (or the HTTP stack) handed back.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Error, Debug)]
pub enum VizError {
    /// A value's dimensionality violates a converter's contract.
    #[error("shape error: {0}")]
    Shape(String),
    /// Two co-required sequences have mismatched lengths.
    #[error("length error: {what} ({left} vs {right})")]
    Length {
        what: String,
        left: usize,
        right: usize,
    },
    /// A value lies outside its permitted range.
    #[error("range error: {0}")]
    Range(String),
    /// Unknown colormap, unknown plot type or option, mixed region codes, etc.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The server answered with a non-success status or could not be reached.
    #[error("transport error{}: {detail}", status_suffix(.status))]
    Transport { status: Option<u16>, detail: String },
    #[error("failed to encode image: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VizError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        VizError::Shape(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        VizError::Range(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        VizError::Configuration(msg.into())
    }

    pub(crate) fn length(what: impl Into<String>, left: usize, right: usize) -> Self {
        VizError::Length {
            what: what.into(),
            left,
            right,
        }
    }

    /// True for errors raised by the HTTP collaborator rather than by validation.
    pub fn is_transport(&self) -> bool {
        matches!(self, VizError::Transport { .. })
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl From<reqwest::Error> for VizError {
    fn from(err: reqwest::Error) -> Self {
        VizError::Transport {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}
