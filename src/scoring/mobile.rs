// src/scoring/mobile.rs
// =============================================================================
// Mobile Friendliness scoring.
//
// Weight table (sums to exactly 100):
//   Viewport meta tag ........... 40
//   Responsive viewport ......... 40 (content mentions width=device-width)
//   Touch-friendliness .......... 20 (flat baseline credit, see below)
//
// The touch-friendliness credit is an acknowledged simplification: without
// rendering the page we cannot measure real tap-target sizes, so every page
// gets the baseline 20 points. The explanation says so. Changing this into
// a real heuristic would mean updating the weight table, not just the code.
// =============================================================================

use crate::features::FeatureSet;
use crate::report::{ModuleResult, Priority, Recommendation};

const VIEWPORT_SNIPPET: &str =
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">";
const RESPONSIVE_DOC: &str =
    "https://developers.google.com/web/fundamentals/design-and-ux/responsive";

/// Scores the page's mobile compatibility signals
pub fn analyze(features: &FeatureSet) -> ModuleResult {
    let mut score: u32 = 0;
    let mut recommendations = Vec::new();

    // Viewport meta tag: 40 points
    if features.has_viewport_meta {
        score += 40;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Add Viewport Meta Tag",
                "Add a viewport meta tag to ensure proper mobile rendering.".to_string(),
            )
            .with_snippet(VIEWPORT_SNIPPET)
            .with_doc_link(RESPONSIVE_DOC),
        );
    }

    // Responsive configuration: 40 points
    if features.responsive_design {
        score += 40;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Use a Responsive Viewport",
                "Configure the viewport with width=device-width so the layout \
                 adapts to the device screen."
                    .to_string(),
            )
            .with_snippet(VIEWPORT_SNIPPET)
            .with_doc_link(RESPONSIVE_DOC),
        );
    }

    // Touch-friendliness: flat baseline credit (no real signal available
    // without rendering)
    score += 20;

    ModuleResult {
        name: "Mobile Friendliness".to_string(),
        score: score.min(100) as u8,
        description: "Mobile device compatibility and usability".to_string(),
        explanation: explanation(score.min(100) as u8),
        recommendations,
    }
}

fn explanation(score: u8) -> String {
    let tier = if score >= 90 {
        "Excellent mobile experience with a responsive viewport configuration."
    } else if score >= 60 {
        "Good mobile compatibility with minor viewport improvements needed."
    } else {
        "Mobile experience needs significant improvement; the viewport is missing \
         or not responsive."
    };

    format!(
        "{} Touch-target sizing receives a baseline credit; it is not measured \
         without rendering the page.",
        tier
    )
}
