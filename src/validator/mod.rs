// src/validator/mod.rs
// =============================================================================
// This module validates a user-supplied URL before we spend time auditing it.
//
// Validation runs in three steps:
// 1. Normalization + format check: trim, prepend https:// if needed, parse,
//    and verify the hostname against a conservative DNS-label grammar
// 2. Accessibility check: a lightweight HEAD probe (GET fallback) with a
//    10-second timeout to see if the site actually answers
// 3. Legitimacy heuristic: a best-effort secondary signal (HTTPS, a real
//    domain) that can lower confidence but never fails validation by itself
//
// The final confidence is min(accessibility, legitimacy).
//
// Rust concepts:
// - async/await: The probe is network I/O
// - Url: Parsing and normalizing URLs (same crate the HTML checker uses)
// - Struct update syntax: ..Default::default() to fill remaining fields
// =============================================================================

use crate::error::AuditError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use url::Url;

// Probe timeout - deliberately shorter than the fetcher's 15 seconds,
// a site that can't answer a HEAD request in 10s is not worth auditing
const PROBE_TIMEOUT_SECS: u64 = 10;

// Confidence granted when the probe gets a 2xx answer
const ACCESSIBLE_CONFIDENCE: f64 = 0.9;

/// The outcome of validating one URL - produced once per audit,
/// immutable after creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub normalized_url: Option<String>,
    /// How trustworthy this validation is, in [0, 1]
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_time_ms: Option<u64>,
}

/// Validates an input string into a well-formed, reachable URL
///
/// This is the first stage of every audit. It never panics and never
/// returns an Err - every failure mode is folded into the result struct.
pub async fn validate(input: &str) -> ValidationResult {
    // Step 1: normalize and check the format
    let url = match normalize_url(input) {
        Ok(url) => url,
        Err(e) => {
            return ValidationResult {
                is_valid: false,
                confidence: 0.0,
                error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };

    // Step 2: probe the site
    let probe = check_accessibility(&url).await;

    // Step 3: legitimacy heuristic (never fails, only modulates confidence)
    let legitimacy = legitimacy_confidence(&url);

    if !probe.accessible {
        // Status code and elapsed time are still reported on failure so the
        // caller can explain what happened
        return ValidationResult {
            is_valid: false,
            normalized_url: Some(url.to_string()),
            confidence: 0.0,
            error: Some(AuditError::Unreachable(probe.error).to_string()),
            status_code: probe.status_code,
            response_time_ms: Some(probe.response_time_ms),
            ..Default::default()
        };
    }

    ValidationResult {
        is_valid: true,
        normalized_url: Some(url.to_string()),
        confidence: probe.confidence.min(legitimacy),
        details: Some(format!(
            "accessibility confidence {:.2}, legitimacy confidence {:.2}",
            probe.confidence, legitimacy
        )),
        error: None,
        status_code: probe.status_code,
        response_time_ms: Some(probe.response_time_ms),
    }
}

/// Normalizes an input string into a parsed URL
///
/// Rules:
/// - Leading/trailing whitespace is trimmed
/// - A missing scheme gets https:// prepended ("example.com" works)
/// - Only http/https schemes are accepted
/// - The hostname must be dot-separated alphanumeric labels (hyphens
///   allowed mid-label, each label at most 63 characters)
///
/// Normalization is idempotent: feeding the output back in returns the
/// same URL.
pub fn normalize_url(input: &str) -> Result<Url, AuditError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(AuditError::InvalidFormat("empty URL".to_string()));
    }

    // Prepend https:// only when the input carries no scheme at all.
    // Testing for "://" instead of http prefixes keeps inputs like
    // "ftp://example.com" intact, so the scheme guard below rejects them
    // instead of rewriting them into https URLs with a bogus host.
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| AuditError::InvalidFormat(format!("'{}': {}", trimmed, e)))?;

    // Only web schemes make sense for a website audit
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AuditError::InvalidFormat(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    // The URL must actually point at a host
    let host = url
        .host_str()
        .ok_or_else(|| AuditError::InvalidFormat(format!("'{}' has no hostname", trimmed)))?;

    if !is_valid_hostname(host) {
        return Err(AuditError::InvalidFormat(format!(
            "'{}' is not a valid hostname",
            host
        )));
    }

    Ok(url)
}

/// Checks a hostname against a conservative DNS-label grammar
///
/// Each dot-separated label must be non-empty, at most 63 characters,
/// alphanumeric with hyphens allowed only in the middle.
fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

// What the network probe found out
struct AccessibilityCheck {
    accessible: bool,
    confidence: f64,
    status_code: Option<u16>,
    response_time_ms: u64,
    error: String,
}

/// Probes the URL to see if the site answers
///
/// We try a HEAD request first (no body download), and fall back to a full
/// GET when HEAD fails or is rejected - some servers answer 405 to HEAD.
/// The fallback is part of one logical accessibility check, not a retry
/// policy. The client timeout aborts any request still in flight after
/// 10 seconds.
async fn check_accessibility(url: &Url) -> AccessibilityCheck {
    let client = Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .user_agent(crate::fetcher::USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");

    let started = Instant::now();

    // HEAD first, GET on any failure (error or non-2xx)
    let response = match client.head(url.as_str()).send().await {
        Ok(resp) if resp.status().is_success() => Ok(resp),
        _ => client.get(url.as_str()).send().await,
    };

    let response_time_ms = started.elapsed().as_millis() as u64;

    match response {
        Ok(resp) => {
            let status = resp.status();
            if status.is_success() {
                AccessibilityCheck {
                    accessible: true,
                    confidence: ACCESSIBLE_CONFIDENCE,
                    status_code: Some(status.as_u16()),
                    response_time_ms,
                    error: String::new(),
                }
            } else {
                AccessibilityCheck {
                    accessible: false,
                    confidence: 0.0,
                    status_code: Some(status.as_u16()),
                    response_time_ms,
                    error: format!("HTTP {}", status.as_u16()),
                }
            }
        }
        Err(e) => {
            let message = if e.is_timeout() {
                format!("probe timed out after {} seconds", PROBE_TIMEOUT_SECS)
            } else {
                format!("connection failed: {}", e)
            };
            AccessibilityCheck {
                accessible: false,
                confidence: 0.0,
                status_code: None,
                response_time_ms,
                error: message,
            }
        }
    }
}

/// Best-effort legitimacy signal in [0.6, 0.85]
///
/// HTTPS to a real (non-localhost, non-IP) domain is the strongest signal
/// we can get without external services. This never fails validation on
/// its own - it only lowers the combined confidence.
fn legitimacy_confidence(url: &Url) -> f64 {
    let https = url.scheme() == "https";
    let host = url.host_str().unwrap_or("");
    let local = host.eq_ignore_ascii_case("localhost")
        || host.parse::<std::net::IpAddr>().is_ok()
        || !host.contains('.');

    match (https, local) {
        (true, false) => 0.85,
        (true, true) => 0.75,
        (false, _) => 0.6,
    }
}
