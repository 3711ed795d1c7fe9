// src/scoring/crawlability.rs
// =============================================================================
// Crawlability scoring.
//
// Weight table (sums to exactly 100):
//   Robots meta tag ............. 20
//   Internal links .............. 30 (>=5 links), 20 (>=2), else 0
//   Heading structure ........... 30 (H1 AND title present), else 15
//   Structured data (JSON-LD) ... 20
//
// This judges the single fetched page only. A real crawl audit would also
// read robots.txt and the sitemap, which are separate requests.
// =============================================================================

use crate::features::FeatureSet;
use crate::report::{ModuleResult, Priority, Recommendation};

/// Scores how easily search engine crawlers can discover and index the page
pub fn analyze(features: &FeatureSet) -> ModuleResult {
    let mut score: u32 = 0;
    let mut recommendations = Vec::new();

    // Robots meta tag: 20 points
    if features.has_robots_meta {
        score += 20;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Add Robots Meta Tag",
                "Declare crawler directives explicitly instead of relying on \
                 defaults."
                    .to_string(),
            )
            .with_snippet("<meta name=\"robots\" content=\"index, follow\">")
            .with_doc_link(
                "https://developers.google.com/search/docs/crawling-indexing/robots-meta-tag",
            ),
        );
    }

    // Internal links: 30 / 20 / 0
    if features.internal_links_count >= 5 {
        score += 30;
    } else if features.internal_links_count >= 2 {
        score += 20;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Add Internal Links",
                format!(
                    "Only {} internal links were found; link related pages together \
                     so crawlers can discover the rest of the site.",
                    features.internal_links_count
                ),
            )
            .with_doc_link(
                "https://developers.google.com/search/docs/crawling-indexing/links-crawlable",
            ),
        );
    }

    // Heading structure: 30 points only when both the H1 and the title exist
    if features.has_h1 && features.has_title {
        score += 30;
    } else {
        score += 15;
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Improve Heading Structure",
                "Give the page both a title tag and an H1 heading so crawlers can \
                 identify its topic."
                    .to_string(),
            )
            .with_snippet("<h1>Main Page Topic</h1>")
            .with_doc_link(
                "https://developer.mozilla.org/en-US/docs/Web/HTML/Element/Heading_Elements",
            ),
        );
    }

    // Structured data: 20 points
    if features.has_schema_markup {
        score += 20;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Low,
                "Add Structured Data",
                "Add JSON-LD structured data so search engines can show rich \
                 results for the page."
                    .to_string(),
            )
            .with_snippet(
                "<script type=\"application/ld+json\">{\"@context\": \"https://schema.org\", \"@type\": \"WebPage\", \"name\": \"Page Name\"}</script>",
            )
            .with_doc_link(
                "https://developers.google.com/search/docs/appearance/structured-data/intro-structured-data",
            ),
        );
    }

    ModuleResult {
        name: "Crawlability".to_string(),
        score: score.min(100) as u8,
        description: "Search engine crawling accessibility".to_string(),
        explanation: explanation(score.min(100) as u8, features),
        recommendations,
    }
}

fn explanation(score: u8, features: &FeatureSet) -> String {
    let tier = if score >= 90 {
        "Excellent crawlability with clear directives, internal linking and structured data."
    } else if score >= 70 {
        "Good crawlability with some room to strengthen linking or markup."
    } else {
        "Crawlability needs improvement; crawlers may struggle to discover or classify this page."
    };

    format!(
        "{} The page answered with HTTP {} and links out to {} internal and {} external targets.",
        tier, features.status_code, features.internal_links_count, features.external_links_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_linked_page_scores_100() {
        // Robots directive, six internal links, H1 + title, and JSON-LD
        // structured data: every check passes
        let features = FeatureSet {
            has_robots_meta: true,
            internal_links_count: 6,
            has_h1: true,
            has_title: true,
            has_schema_markup: true,
            ..Default::default()
        };

        let result = analyze(&features);
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_empty_page_keeps_partial_heading_credit() {
        let result = analyze(&FeatureSet::default());
        assert_eq!(result.score, 15);
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_internal_link_tiers() {
        let base = FeatureSet {
            has_robots_meta: true,
            has_h1: true,
            has_title: true,
            has_schema_markup: true,
            ..Default::default()
        };

        let mut features = base.clone();
        features.internal_links_count = 5;
        assert_eq!(analyze(&features).score, 100);

        features.internal_links_count = 2;
        assert_eq!(analyze(&features).score, 90);

        features.internal_links_count = 1;
        let result = analyze(&features);
        assert_eq!(result.score, 70);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.title == "Add Internal Links" && r.message.contains("Only 1 internal")));
    }

    #[test]
    fn test_heading_credit_requires_both_title_and_h1() {
        let mut features = FeatureSet {
            has_robots_meta: true,
            internal_links_count: 6,
            has_schema_markup: true,
            has_h1: true,
            ..Default::default()
        };

        // H1 without a title still only earns the partial 15
        let result = analyze(&features);
        assert_eq!(result.score, 85);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.title == "Improve Heading Structure"));

        features.has_title = true;
        assert_eq!(analyze(&features).score, 100);
    }

    #[test]
    fn test_missing_schema_is_low_priority() {
        let features = FeatureSet {
            has_robots_meta: true,
            internal_links_count: 6,
            has_h1: true,
            has_title: true,
            ..Default::default()
        };

        let result = analyze(&features);
        assert_eq!(result.score, 80);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].priority, Priority::Low);
        assert_eq!(result.recommendations[0].title, "Add Structured Data");
    }
}
