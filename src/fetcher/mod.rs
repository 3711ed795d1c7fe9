// src/fetcher/mod.rs
// =============================================================================
// This module downloads the page we are going to audit.
//
// The fetch is guarded by three sanity gates, checked in order:
// 1. Status must be 2xx (no point scoring an error page)
// 2. Content-Type must be text/html-compatible
// 3. The decoded body must actually start with a doctype or <html> tag -
//    some servers label error pages or API payloads as HTML
//
// We also record everything the extractor will need from the response:
// final URL after redirects (for the SSL flag), security header presence,
// body size, and the wall-clock load time.
//
// The gates and the metadata assembly are plain functions over (status,
// headers, body) so they can be tested without a server; fetch() itself
// only does the network I/O and hands the pieces over.
//
// Rust concepts:
// - Reading headers before .text(): text() consumes the response, so any
//   header we need must be copied out first
// - Instant: Monotonic clock for measuring elapsed time
// =============================================================================

use crate::error::FetchError;
use reqwest::header;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

/// Fixed identifying user agent sent with every outbound request
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SiteAuditorBot/1.0)";

// Fetch timeout - longer than the validator's probe because we download
// the whole body here
const FETCH_TIMEOUT_SECS: u64 = 15;

// Browser-like Accept header so servers give us their normal HTML response
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Response facts the feature extractor needs besides the body
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// The final URL after redirects - the SSL flag derives from this,
    /// not from the URL we asked for
    pub final_url: String,
    pub status_code: u16,
    /// Decoded body size in bytes
    pub content_length: usize,
    /// Wall-clock time from request start to fully downloaded body
    pub load_time_seconds: f64,
    // Security headers are checked for presence only, not content
    pub has_csp_header: bool,
    pub has_x_frame_options: bool,
    pub has_hsts_header: bool,
}

/// A successfully fetched and sanity-checked HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub raw_content: String,
    pub metadata: ResponseMetadata,
}

/// Fetches the page at `url`, enforcing the three sanity gates
///
/// Fails fast with a typed FetchError - there is no fallback chain here,
/// a page that doesn't pass the gates is simply not auditable. Redirects
/// are followed per the client's default policy. The client timeout
/// aborts the request if the server stalls past 15 seconds.
pub async fn fetch(url: &str) -> Result<FetchedPage, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");

    let started = Instant::now();

    let response = client
        .get(url)
        .header(header::ACCEPT, ACCEPT_HTML)
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(e, FETCH_TIMEOUT_SECS))?;

    // Gates 1 and 2 run before the body download, so a 404 page or a JSON
    // endpoint fails without transferring the payload
    check_response(response.status(), response.headers())?;

    // Copy out everything we need before text() consumes the response
    let status = response.status();
    let final_url = response.url().to_string();
    let headers = response.headers().clone();

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(e, FETCH_TIMEOUT_SECS))?;

    let load_time_seconds = started.elapsed().as_secs_f64();

    assemble_page(status, &headers, final_url, body, load_time_seconds)
}

/// Gates 1 and 2: the status must be 2xx and the declared content type
/// must be HTML-compatible
fn check_response(status: StatusCode, headers: &header::HeaderMap) -> Result<(), FetchError> {
    if !status.is_success() {
        return Err(FetchError::BadStatus(status.as_u16()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !is_html_content_type(content_type) {
        return Err(FetchError::BadContentType(if content_type.is_empty() {
            "(missing)".to_string()
        } else {
            content_type.to_string()
        }));
    }

    Ok(())
}

/// Gate 3 plus metadata assembly, once the body is in hand
fn assemble_page(
    status: StatusCode,
    headers: &header::HeaderMap,
    final_url: String,
    body: String,
    load_time_seconds: f64,
) -> Result<FetchedPage, FetchError> {
    // The body itself must look like an HTML document
    if !looks_like_html(&body) {
        return Err(FetchError::NotHtml);
    }

    Ok(FetchedPage {
        metadata: ResponseMetadata {
            final_url,
            status_code: status.as_u16(),
            content_length: body.len(),
            load_time_seconds,
            has_csp_header: headers.contains_key("content-security-policy"),
            has_x_frame_options: headers.contains_key("x-frame-options"),
            has_hsts_header: headers.contains_key("strict-transport-security"),
        },
        raw_content: body,
    })
}

/// Accepts text/html and xhtml variants, with or without charset parameters
fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.contains("text/html") || lower.contains("application/xhtml")
}

/// Checks that the body starts with an HTML doctype or <html tag
///
/// Case-insensitive, leading whitespace ignored. This catches HTML-labeled
/// responses that are actually JSON, plain text, or binary garbage.
fn looks_like_html(body: &str) -> bool {
    let head: String = body
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            "text/html; charset=utf-8".parse().unwrap(),
        );
        headers
    }

    #[test]
    fn test_gate_rejects_non_success_status() {
        let err = check_response(StatusCode::NOT_FOUND, &html_headers()).unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(404)));

        let err = check_response(StatusCode::INTERNAL_SERVER_ERROR, &html_headers()).unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(500)));
    }

    #[test]
    fn test_gate_rejects_wrong_content_type() {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());

        let err = check_response(StatusCode::OK, &headers).unwrap_err();
        assert!(matches!(err, FetchError::BadContentType(t) if t == "application/json"));
    }

    #[test]
    fn test_gate_reports_missing_content_type() {
        let err = check_response(StatusCode::OK, &header::HeaderMap::new()).unwrap_err();
        assert!(matches!(err, FetchError::BadContentType(t) if t == "(missing)"));
    }

    #[test]
    fn test_gate_accepts_html_response() {
        assert!(check_response(StatusCode::OK, &html_headers()).is_ok());
    }

    #[test]
    fn test_assemble_rejects_mislabeled_html_body() {
        // Content-Type said HTML, but the body is a JSON payload
        let err = assemble_page(
            StatusCode::OK,
            &html_headers(),
            "https://example.com/".to_string(),
            "{\"error\": \"not found\"}".to_string(),
            0.5,
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::NotHtml));
    }

    #[test]
    fn test_assemble_captures_metadata() {
        let mut headers = html_headers();
        headers.insert(
            "content-security-policy",
            "default-src 'self'".parse().unwrap(),
        );
        headers.insert(
            "strict-transport-security",
            "max-age=31536000".parse().unwrap(),
        );

        let body = "<!DOCTYPE html><html><body>hi</body></html>".to_string();
        let expected_len = body.len();

        let page = assemble_page(
            StatusCode::OK,
            &headers,
            "https://example.com/landing".to_string(),
            body,
            1.25,
        )
        .unwrap();

        assert_eq!(page.metadata.status_code, 200);
        assert_eq!(page.metadata.final_url, "https://example.com/landing");
        assert_eq!(page.metadata.content_length, expected_len);
        assert!((page.metadata.load_time_seconds - 1.25).abs() < f64::EPSILON);
        assert!(page.metadata.has_csp_header);
        assert!(!page.metadata.has_x_frame_options);
        assert!(page.metadata.has_hsts_header);
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(is_html_content_type("application/xhtml+xml"));

        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type("text/plain"));
        assert!(!is_html_content_type(""));
    }

    #[test]
    fn test_looks_like_html_accepts_doctype_and_html_tag() {
        assert!(looks_like_html("<!DOCTYPE html><html></html>"));
        assert!(looks_like_html("<!doctype html>"));
        assert!(looks_like_html("<html lang=\"en\"><head></head></html>"));
        assert!(looks_like_html("   \n\t <HTML>"));
    }

    #[test]
    fn test_looks_like_html_rejects_non_html_bodies() {
        assert!(!looks_like_html("{\"error\": \"not found\"}"));
        assert!(!looks_like_html("Just some plain text"));
        assert!(!looks_like_html(""));
        // A stray tag is not a document
        assert!(!looks_like_html("<div>fragment</div>"));
    }
}
