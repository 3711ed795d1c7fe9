// src/scoring/mod.rs
// =============================================================================
// This module contains the five scoring categories.
//
// Submodules:
// - seo: Meta tags, headings, HTTPS, content length
// - performance: Load time, page weight, inline resource blocks
// - security: HTTPS and security response headers
// - mobile: Viewport configuration and responsive design
// - crawlability: Robots directives, internal linking, structured data
//
// Every scorer is a pure function FeatureSet -> ModuleResult: no I/O, no
// shared state, no ordering dependencies between them. They are registered
// in a fixed-order list so the report always presents the categories the
// same way.
//
// Rust concepts:
// - Function pointers: `fn(&FeatureSet) -> ModuleResult` as a value
// - Arrays of function pointers: The scorer registry
// =============================================================================

pub mod crawlability;
pub mod mobile;
pub mod performance;
pub mod security;
pub mod seo;

use crate::features::FeatureSet;
use crate::report::ModuleResult;

// The signature every scoring module implements
type Scorer = fn(&FeatureSet) -> ModuleResult;

// Fixed evaluation and display order for the five categories
const SCORERS: [Scorer; 5] = [
    seo::analyze,
    performance::analyze,
    security::analyze,
    mobile::analyze,
    crawlability::analyze,
];

/// Runs every scoring module against the extracted features, in fixed order
///
/// The scorers are independent pure functions, so this could fan out
/// concurrently - but with five in-memory computations there is nothing
/// to win, and sequential keeps the order trivially deterministic.
pub fn run_all(features: &FeatureSet) -> Vec<ModuleResult> {
    SCORERS.iter().map(|scorer| scorer(features)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_returns_five_modules_in_fixed_order() {
        let modules = run_all(&FeatureSet::default());
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SEO & Metadata",
                "Performance",
                "Security",
                "Mobile Friendliness",
                "Crawlability"
            ]
        );
    }

    #[test]
    fn test_all_scores_stay_in_range() {
        // An empty FeatureSet and a maxed-out one both stay within 0..=100
        let empty = FeatureSet::default();
        let rich = FeatureSet {
            ssl_certificate_valid: true,
            has_csp_header: true,
            has_x_frame_options: true,
            has_hsts_header: true,
            has_title: true,
            title_length: 45,
            has_meta_description: true,
            has_h1: true,
            has_viewport_meta: true,
            responsive_design: true,
            has_canonical: true,
            has_robots_meta: true,
            has_schema_markup: true,
            word_count: 2000,
            internal_links_count: 12,
            page_load_time: 0.5,
            html_size: 100_000,
            ..Default::default()
        };

        for features in [&empty, &rich] {
            for module in run_all(features) {
                assert!(module.score <= 100, "{} exceeded 100", module.name);
            }
        }
    }

    #[test]
    fn test_rich_page_scores_perfect_everywhere() {
        let rich = FeatureSet {
            ssl_certificate_valid: true,
            has_csp_header: true,
            has_x_frame_options: true,
            has_hsts_header: true,
            has_title: true,
            title_length: 45,
            has_meta_description: true,
            has_h1: true,
            has_viewport_meta: true,
            responsive_design: true,
            has_canonical: true,
            has_robots_meta: true,
            has_schema_markup: true,
            word_count: 2000,
            internal_links_count: 12,
            page_load_time: 0.5,
            html_size: 100_000,
            ..Default::default()
        };

        for module in run_all(&rich) {
            assert_eq!(module.score, 100, "{} should be perfect", module.name);
            assert!(module.recommendations.is_empty());
        }
    }
}
