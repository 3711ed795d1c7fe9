// src/scoring/seo.rs
// =============================================================================
// SEO & Metadata scoring.
//
// Weight table (sums to exactly 100):
//   Title present & non-empty ... 20 (full credit only at 30-60 chars, else 15)
//   Meta description ............ 15
//   H1 heading .................. 15
//   HTTPS ....................... 20
//   Canonical URL ............... 10
//   Word count .................. 20 (>=1000), 15 (>=300), else 0
//
// Every missing criterion appends exactly one recommendation with a fixed
// priority and, where the fix is structural, a literal markup snippet.
// =============================================================================

use crate::features::FeatureSet;
use crate::report::{ModuleResult, Priority, Recommendation};

// Optimal title length window for search result display
const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;

/// Scores the page's search engine optimization signals
pub fn analyze(features: &FeatureSet) -> ModuleResult {
    let mut score: u32 = 0;
    let mut recommendations = Vec::new();

    // Title: 20 points, full credit only inside the 30-60 character window
    if features.has_title && features.title_length > 0 {
        if (TITLE_MIN..=TITLE_MAX).contains(&features.title_length) {
            score += 20;
        } else {
            score += 15;
            recommendations.push(
                Recommendation::new(
                    Priority::Medium,
                    "Optimize Title Length",
                    format!(
                        "The title is {} characters long; keep it between 30 and 60 \
                         characters for optimal display in search results.",
                        features.title_length
                    ),
                )
                .with_snippet("<title>Optimized Title (30-60 chars)</title>")
                .with_doc_link("https://developers.google.com/search/docs/appearance/title-link"),
            );
        }
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Add Page Title",
                "Add a descriptive title tag to improve search engine visibility.".to_string(),
            )
            .with_snippet("<title>Your Page Title Here</title>")
            .with_doc_link("https://developers.google.com/search/docs/appearance/title-link"),
        );
    }

    // Meta description: 15 points
    if features.has_meta_description {
        score += 15;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Add Meta Description",
                "Add a compelling meta description to improve click-through rates \
                 from search results."
                    .to_string(),
            )
            .with_snippet(
                "<meta name=\"description\" content=\"Your compelling page description here (120-160 chars)\">",
            )
            .with_doc_link("https://developers.google.com/search/docs/appearance/snippet"),
        );
    }

    // H1 heading: 15 points
    if features.has_h1 {
        score += 15;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Add an H1 Heading",
                "Add a single H1 tag to clearly define the main topic of the page.".to_string(),
            )
            .with_snippet("<h1>Main Page Heading</h1>")
            .with_doc_link(
                "https://developer.mozilla.org/en-US/docs/Web/HTML/Element/Heading_Elements",
            ),
        );
    }

    // HTTPS: 20 points
    if features.ssl_certificate_valid {
        score += 20;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Enable HTTPS",
                "Serve the site over HTTPS; search engines favor encrypted sites.".to_string(),
            )
            .with_doc_link(
                "https://developers.google.com/web/fundamentals/security/encrypt-in-transit/why-https",
            ),
        );
    }

    // Canonical URL: 10 points
    if features.has_canonical {
        score += 10;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Add Canonical URL",
                "Declare a canonical URL to prevent duplicate content issues.".to_string(),
            )
            .with_snippet("<link rel=\"canonical\" href=\"https://example.com/preferred-url\">")
            .with_doc_link(
                "https://developers.google.com/search/docs/crawling-indexing/consolidate-duplicate-urls",
            ),
        );
    }

    // Word count: 20 points at 1000+, 15 at 300+, otherwise a recommendation
    if features.word_count >= 1000 {
        score += 20;
    } else if features.word_count >= 300 {
        score += 15;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Increase Content Length",
                format!(
                    "The page has only {} words of visible text; pages with at least \
                     300 words give search engines more to index.",
                    features.word_count
                ),
            )
            .with_doc_link(
                "https://developers.google.com/search/docs/fundamentals/creating-helpful-content",
            ),
        );
    }

    ModuleResult {
        name: "SEO & Metadata".to_string(),
        score: score.min(100) as u8,
        description: "Search engine optimization and meta tags analysis".to_string(),
        explanation: explanation(score.min(100) as u8, features),
        recommendations,
    }
}

fn explanation(score: u8, features: &FeatureSet) -> String {
    let tier = if score >= 90 {
        "Excellent SEO optimization with comprehensive meta tags and a solid content structure."
    } else if score >= 70 {
        "Good SEO foundation with room for improvement in meta tags or content depth."
    } else {
        "SEO needs significant improvement; critical elements like the title, meta \
         description or headings are missing."
    };

    let social = if features.has_open_graph || features.has_twitter_card {
        "Social sharing tags are present."
    } else {
        "Social sharing tags (Open Graph / Twitter Card) are missing."
    };

    let mut text = format!(
        "{} The page has {} words of visible text and {} images. {}",
        tier, features.word_count, features.images_count, social
    );
    if !features.has_favicon {
        text.push_str(" No favicon link was found.");
    }
    if features.has_keywords_meta {
        text.push_str(" A keywords meta tag is present (largely ignored by modern engines).");
    }
    text
}
