// src/features/mod.rs
// =============================================================================
// This module turns a fetched page into a flat set of scoring signals.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Extraction is a pure function and never fails: if there is nothing useful
// to parse, it degrades to the baseline FeatureSet (all booleans false, all
// counts zero) - status, size, SSL and headers are always derivable from the
// response metadata alone.
//
// Every signal is a named, typed field on FeatureSet. No dynamic maps:
// a typo in a feature name is a compile error, not a silent false.
//
// Rust concepts:
// - Tree traversal: Walking the DOM node-by-node for the word count
// - Iterators + filters: Counting elements matching a condition
// - Struct update syntax: baseline() + ..Default::default()
// =============================================================================

use crate::fetcher::ResponseMetadata;
use scraper::{Html, Selector};

/// Every signal the scoring modules consume, extracted from one page
///
/// Invariant: numeric fields are finite and non-negative, booleans are
/// strictly true/false - nothing nullable leaks through to the scorers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    // Always derivable from response metadata
    pub status_code: u16,
    pub html_size: usize,
    pub page_load_time: f64,
    /// True when the final (post-redirect) URL uses https
    pub ssl_certificate_valid: bool,
    pub has_csp_header: bool,
    pub has_x_frame_options: bool,
    pub has_hsts_header: bool,

    // Markup presence signals (case-insensitive detection)
    pub has_title: bool,
    pub title_length: usize,
    pub has_meta_description: bool,
    pub has_h1: bool,
    pub has_viewport_meta: bool,
    /// Viewport content mentions width=device-width
    pub responsive_design: bool,
    pub has_canonical: bool,
    pub has_robots_meta: bool,
    pub has_keywords_meta: bool,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_favicon: bool,
    /// JSON-LD block or any schema.org reference
    pub has_schema_markup: bool,

    // Counts
    pub word_count: usize,
    pub images_count: usize,
    /// All anchor tags carrying an href
    pub internal_links_count: usize,
    /// Anchors whose href is an absolute http(s) URL
    pub external_links_count: usize,
    /// Inline <style> blocks
    pub inline_css_count: usize,
    /// <script> blocks without a src attribute
    pub inline_js_count: usize,
}

impl FeatureSet {
    /// The minimal safe FeatureSet: only what the response metadata gives us
    ///
    /// This is both the degraded-extraction fallback and the starting point
    /// for a full extraction.
    pub fn baseline(metadata: &ResponseMetadata) -> Self {
        FeatureSet {
            status_code: metadata.status_code,
            html_size: metadata.content_length,
            page_load_time: sanitize_seconds(metadata.load_time_seconds),
            ssl_certificate_valid: metadata
                .final_url
                .to_ascii_lowercase()
                .starts_with("https://"),
            has_csp_header: metadata.has_csp_header,
            has_x_frame_options: metadata.has_x_frame_options,
            has_hsts_header: metadata.has_hsts_header,
            ..Default::default()
        }
    }

    /// Checks the numeric invariant (finite, non-negative)
    ///
    /// The unsigned counts can't go wrong by construction, so only the
    /// float needs checking. The orchestrator calls this before scoring.
    pub fn validate(&self) -> Result<(), String> {
        if !self.page_load_time.is_finite() || self.page_load_time < 0.0 {
            return Err(format!(
                "page_load_time must be finite and non-negative, got {}",
                self.page_load_time
            ));
        }
        Ok(())
    }
}

// Clamps a measured duration into the invariant range
fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// Extracts all scoring signals from the page content and response metadata
///
/// Pure and infallible: empty or junk content just leaves the markup
/// signals at their baseline values.
pub fn extract(content: &str, metadata: &ResponseMetadata) -> FeatureSet {
    let mut features = FeatureSet::baseline(metadata);

    if content.trim().is_empty() {
        return features;
    }

    let document = Html::parse_document(content);

    // Title tag: presence plus trimmed text length (the SEO scorer wants
    // to know whether it falls in the 30-60 character sweet spot)
    let title_selector = Selector::parse("title").unwrap();
    if let Some(title) = document.select(&title_selector).next() {
        features.has_title = true;
        features.title_length = title.text().collect::<String>().trim().chars().count();
    }

    // Meta tags: one pass over all <meta> elements
    // html5ever lowercases tag and attribute NAMES for us, but attribute
    // VALUES keep their case - so we lowercase those ourselves to stay
    // case-insensitive ("Description" counts as "description")
    let meta_selector = Selector::parse("meta").unwrap();
    for element in document.select(&meta_selector) {
        let name = element.value().attr("name").unwrap_or("").to_ascii_lowercase();
        let property = element
            .value()
            .attr("property")
            .unwrap_or("")
            .to_ascii_lowercase();
        let content_attr = element.value().attr("content").unwrap_or("");

        match name.as_str() {
            "description" => {
                if !content_attr.trim().is_empty() {
                    features.has_meta_description = true;
                }
            }
            "viewport" => {
                features.has_viewport_meta = true;
                if content_attr
                    .to_ascii_lowercase()
                    .contains("width=device-width")
                {
                    features.responsive_design = true;
                }
            }
            "robots" => features.has_robots_meta = true,
            "keywords" => features.has_keywords_meta = true,
            _ => {}
        }

        if name.starts_with("twitter:") {
            features.has_twitter_card = true;
        }
        if property.starts_with("og:") {
            features.has_open_graph = true;
        }
    }

    // Link tags: canonical URL and favicon
    let link_selector = Selector::parse("link").unwrap();
    for element in document.select(&link_selector) {
        let rel = element.value().attr("rel").unwrap_or("").to_ascii_lowercase();
        let href = element.value().attr("href").unwrap_or("");

        if rel.split_whitespace().any(|r| r == "canonical") && !href.trim().is_empty() {
            features.has_canonical = true;
        }
        // Matches "icon", "shortcut icon", "apple-touch-icon", ...
        if rel.contains("icon") {
            features.has_favicon = true;
        }
    }

    // Headings
    let h1_selector = Selector::parse("h1").unwrap();
    features.has_h1 = document.select(&h1_selector).next().is_some();

    // Images
    let img_selector = Selector::parse("img").unwrap();
    features.images_count = document.select(&img_selector).count();

    // Anchors: every href'd anchor counts as an internal link signal,
    // absolute http(s) hrefs additionally count as external
    let anchor_selector = Selector::parse("a[href]").unwrap();
    for element in document.select(&anchor_selector) {
        features.internal_links_count += 1;

        let href = element.value().attr("href").unwrap_or("").trim().to_ascii_lowercase();
        if href.starts_with("http://") || href.starts_with("https://") {
            features.external_links_count += 1;
        }
    }

    // Inline style blocks and inline (src-less) script blocks
    let style_selector = Selector::parse("style").unwrap();
    features.inline_css_count = document.select(&style_selector).count();

    let script_selector = Selector::parse("script").unwrap();
    features.inline_js_count = document
        .select(&script_selector)
        .filter(|s| s.value().attr("src").is_none())
        .count();

    // Structured data: a JSON-LD script block, or any schema.org reference
    // anywhere in the raw markup
    let has_json_ld = document
        .select(&script_selector)
        .any(|s| {
            s.value()
                .attr("type")
                .map_or(false, |t| t.eq_ignore_ascii_case("application/ld+json"))
        });
    features.has_schema_markup = has_json_ld || content.to_ascii_lowercase().contains("schema.org");

    // Word count: visible prose only
    features.word_count = visible_word_count(&document);

    features
}

/// Counts whitespace-delimited tokens in the page's visible text
///
/// Script and style contents are skipped so code is never counted as
/// prose. We walk the parsed tree instead of regex-stripping the raw
/// markup - the parser already did the hard work of finding tag
/// boundaries.
fn visible_word_count(document: &Html) -> usize {
    let mut words = 0;

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        // Skip text that lives inside a <script> or <style> block
        let inside_code = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |e| e.name() == "script" || e.name() == "style")
        });

        if !inside_code {
            words += text.split_whitespace().count();
        }
    }

    words
}
