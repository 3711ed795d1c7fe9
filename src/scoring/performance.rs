// src/scoring/performance.rs
// =============================================================================
// Performance scoring.
//
// Weight table (sums to exactly 100):
//   Load time ....... 40 (<=2s), 30 (<=4s), 20 (<=6s), else 10
//   Content size .... 20 (<=1MB), 15 (<=2MB), else 10
//   Inline CSS ...... 20 (<=2 blocks), else 10
//   Inline JS ....... 20 (<=2 blocks), else 10
//
// Note this is a heuristic over one HTML response - no browser rendering,
// no subresource waterfall. Load time is the wall clock of a single fetch.
// =============================================================================

use crate::features::FeatureSet;
use crate::report::{ModuleResult, Priority, Recommendation};

const ONE_MB: usize = 1024 * 1024;

/// Scores the page's raw speed and weight signals
pub fn analyze(features: &FeatureSet) -> ModuleResult {
    let mut score: u32 = 0;
    let mut recommendations = Vec::new();

    // Load time: 40 / 30 / 20 / 10
    let load_time = features.page_load_time;
    if load_time <= 2.0 {
        score += 40;
    } else if load_time <= 4.0 {
        score += 30;
    } else if load_time <= 6.0 {
        score += 20;
    } else {
        score += 10;
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Improve Page Load Time",
                format!(
                    "The page took {:.1} seconds to load; aim for under 2 seconds. \
                     Consider optimizing images, enabling compression and caching.",
                    load_time
                ),
            )
            .with_doc_link("https://web.dev/fast/"),
        );
    }

    // Content size: 20 / 15 / 10
    let size = features.html_size;
    if size <= ONE_MB {
        score += 20;
    } else if size <= 2 * ONE_MB {
        score += 15;
    } else {
        score += 10;
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Reduce Page Size",
                format!(
                    "The HTML payload is {:.1} MB; keep it under 1 MB by trimming \
                     markup and moving large assets out of the document.",
                    size as f64 / ONE_MB as f64
                ),
            )
            .with_doc_link("https://web.dev/fast/"),
        );
    }

    // Inline CSS blocks: 20 / 10
    if features.inline_css_count <= 2 {
        score += 20;
    } else {
        score += 10;
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Reduce Inline CSS",
                format!(
                    "Found {} inline <style> blocks; move styles into external \
                     stylesheets so browsers can cache them.",
                    features.inline_css_count
                ),
            )
            .with_snippet("<link rel=\"stylesheet\" href=\"/styles/main.css\">")
            .with_doc_link("https://web.dev/extract-critical-css/"),
        );
    }

    // Inline JS blocks: 20 / 10
    if features.inline_js_count <= 2 {
        score += 20;
    } else {
        score += 10;
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Reduce Inline JavaScript",
                format!(
                    "Found {} inline <script> blocks; move scripts into external \
                     files and defer them.",
                    features.inline_js_count
                ),
            )
            .with_snippet("<script src=\"/js/app.js\" defer></script>")
            .with_doc_link("https://web.dev/efficiently-load-third-party-javascript/"),
        );
    }

    ModuleResult {
        name: "Performance".to_string(),
        score: score.min(100) as u8,
        description: "Website speed and performance metrics".to_string(),
        explanation: explanation(score.min(100) as u8, features),
        recommendations,
    }
}

fn explanation(score: u8, features: &FeatureSet) -> String {
    let tier = if score >= 90 {
        "Excellent performance with a fast response and a lean document."
    } else if score >= 70 {
        "Good performance with room for improvement in loading speed or page weight."
    } else {
        "Performance needs significant improvement in loading speed and optimization."
    };

    format!(
        "{} Load time: {:.2}s, HTML size: {} KB.",
        tier,
        features.page_load_time,
        features.html_size / 1024
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_features() -> FeatureSet {
        FeatureSet {
            page_load_time: 0.8,
            html_size: 200 * 1024,
            inline_css_count: 1,
            inline_js_count: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fast_lean_page_scores_100() {
        let result = analyze(&fast_features());
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_load_time_tiers() {
        let mut features = fast_features();

        features.page_load_time = 2.0;
        assert_eq!(analyze(&features).score, 100);

        features.page_load_time = 3.5;
        assert_eq!(analyze(&features).score, 90);

        features.page_load_time = 6.0;
        assert_eq!(analyze(&features).score, 80);

        features.page_load_time = 9.0;
        let result = analyze(&features);
        assert_eq!(result.score, 70);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.title == "Improve Page Load Time" && r.message.contains("9.0 seconds")));
    }

    #[test]
    fn test_size_tiers() {
        let mut features = fast_features();

        features.html_size = ONE_MB;
        assert_eq!(analyze(&features).score, 100);

        features.html_size = ONE_MB + 1;
        assert_eq!(analyze(&features).score, 95);

        features.html_size = 3 * ONE_MB;
        let result = analyze(&features);
        assert_eq!(result.score, 90);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.title == "Reduce Page Size" && r.message.contains("3.0 MB")));
    }

    #[test]
    fn test_inline_block_penalties() {
        let mut features = fast_features();
        features.inline_css_count = 3;
        features.inline_js_count = 7;

        let result = analyze(&features);
        assert_eq!(result.score, 80);

        let titles: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert!(titles.contains(&"Reduce Inline CSS"));
        assert!(titles.contains(&"Reduce Inline JavaScript"));
    }

    #[test]
    fn test_worst_case_still_scores_40() {
        let features = FeatureSet {
            page_load_time: 20.0,
            html_size: 5 * ONE_MB,
            inline_css_count: 10,
            inline_js_count: 10,
            ..Default::default()
        };
        assert_eq!(analyze(&features).score, 40);
    }
}
