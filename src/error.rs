// src/error.rs
// =============================================================================
// This module defines the failure taxonomy for the audit engine.
//
// Every way an audit can fail is a variant here:
// - InvalidFormat: the input could not be turned into a usable URL
// - Unreachable: the validator's network probe failed or timed out
// - Fetch: the content fetch failed (see FetchError for the exact reason)
// - Analysis: something unexpected broke during extraction or scoring
//
// None of these ever escape to the caller of the orchestrator - they are
// always converted into a structured zero-score AuditResult.
//
// Rust concepts:
// - thiserror: Derives std::error::Error and Display from attributes
// - #[from]: Automatic conversion between error types with the ? operator
// =============================================================================

use thiserror::Error;

/// Top-level audit failure, one variant per pipeline stage
#[derive(Debug, Error)]
pub enum AuditError {
    /// The input string is not a well-formed http(s) URL
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    /// The accessibility probe got no 2xx answer within its timeout
    #[error("Website unreachable: {0}")]
    Unreachable(String),

    /// The content fetch failed after validation succeeded
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Unexpected failure during feature extraction or scoring
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

// The fetcher's own failure modes
//
// These are deliberately fine-grained so the orchestrator can report a
// human-readable reason ("HTTP 404" vs "the body was not HTML").
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the fetch timeout
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered with a non-2xx status code
    #[error("HTTP {0}")]
    BadStatus(u16),

    /// The response was not served as HTML
    #[error("unexpected content type: {0}")]
    BadContentType(String),

    /// Status and content type looked fine but the body is not an HTML
    /// document (error pages sometimes lie about their content type)
    #[error("response body is not an HTML document")]
    NotHtml,

    /// Connection-level failure (DNS, TLS, refused, ...)
    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Converts a reqwest error into our taxonomy
    ///
    /// We match on what reqwest tells us about the failure, the same way
    /// we categorize probe errors in the validator.
    pub fn from_reqwest(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else {
            FetchError::Request(error.to_string())
        }
    }
}
