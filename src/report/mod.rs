// src/report/mod.rs
// =============================================================================
// This module defines the report types the engine produces.
//
// Key types:
// - Priority / Recommendation: one actionable suggestion with a fixed priority
// - ModuleResult: the outcome of one scoring category (0-100 + suggestions)
// - AuditResult: the terminal artifact returned to the caller
//
// Everything here serializes losslessly to JSON. The canonical field names
// use camelCase (codeSnippet, docLink, overallScore, ...) - any other naming
// convention is an adapter concern outside this crate.
//
// Rust concepts:
// - #[serde(rename_all = "camelCase")]: Controls the JSON field names
// - #[serde(skip_serializing_if)]: Leaves optional fields out of the JSON
// - Stable sorting: Vec::sort_by_key preserves the order of equal elements
// =============================================================================

use serde::{Deserialize, Serialize};

/// How urgent a recommendation is
///
/// The derive order matters: it gives us the merge rank for free
/// (High sorts before Medium sorts before Low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Merge rank: High=0, Medium=1, Low=2
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// One actionable suggestion attached to a scoring module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub message: String,
    /// Literal markup showing the expected fix, for structural issues
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code_snippet: Option<String>,
    /// Where to read more about the issue
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc_link: Option<String>,
}

impl Recommendation {
    /// Builder-style constructor so the scorers stay readable
    pub fn new(priority: Priority, title: &str, message: String) -> Self {
        Recommendation {
            priority,
            title: title.to_string(),
            message,
            code_snippet: None,
            doc_link: None,
        }
    }

    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.code_snippet = Some(snippet.to_string());
        self
    }

    pub fn with_doc_link(mut self, link: &str) -> Self {
        self.doc_link = Some(link.to_string());
        self
    }
}

/// The outcome of one scoring category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub name: String,
    /// Always in 0..=100 (scorers clamp with min)
    pub score: u8,
    pub description: String,
    pub explanation: String,
    /// Ordered: the scorer appends these in check order
    pub recommendations: Vec<Recommendation>,
}

/// The terminal artifact of one audit - never mutated after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    /// ISO-8601 timestamp of when the audit finished
    pub timestamp: String,
    pub overall_score: u8,
    pub modules: Vec<ModuleResult>,
    /// How trustworthy the analysis is, in [0, 1] - not a quality score
    pub confidence: f64,
    /// Display label ("Excellent", ..., or "Invalid Website" on failure)
    pub label: String,
    /// Top 10 recommendations merged across all modules
    pub recommendations: Vec<Recommendation>,
    pub analysis_time_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Maps a 0-100 score to its display label
///
/// Applies to both the overall score and per-module scores.
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent",
        80..=89 => "Good",
        60..=79 => "Fair",
        40..=59 => "Poor",
        _ => "Critical",
    }
}

/// Overall score = arithmetic mean of the module scores, rounded
pub fn overall_score(modules: &[ModuleResult]) -> u8 {
    if modules.is_empty() {
        return 0;
    }

    let sum: u32 = modules.iter().map(|m| u32::from(m.score)).sum();
    let mean = f64::from(sum) / modules.len() as f64;
    mean.round() as u8
}

// How many merged recommendations the report carries at most
const MAX_MERGED_RECOMMENDATIONS: usize = 10;

/// Builds the merged recommendation list for the report
///
/// The lists are concatenated in module order, then stable-sorted by
/// priority rank. Stability matters: among recommendations with the same
/// priority, the original module order is preserved. Truncated to the
/// top 10 so the report stays digestible.
pub fn merge_recommendations(modules: &[ModuleResult]) -> Vec<Recommendation> {
    let mut merged: Vec<Recommendation> = modules
        .iter()
        .flat_map(|m| m.recommendations.iter().cloned())
        .collect();

    // sort_by_key is a stable sort, so ties keep their relative order
    merged.sort_by_key(|r| r.priority.rank());
    merged.truncate(MAX_MERGED_RECOMMENDATIONS);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with(name: &str, score: u8, recs: Vec<Recommendation>) -> ModuleResult {
        ModuleResult {
            name: name.to_string(),
            score,
            description: String::new(),
            explanation: String::new(),
            recommendations: recs,
        }
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(100), "Excellent");
        assert_eq!(score_label(90), "Excellent");
        assert_eq!(score_label(89), "Good");
        assert_eq!(score_label(80), "Good");
        assert_eq!(score_label(79), "Fair");
        assert_eq!(score_label(60), "Fair");
        assert_eq!(score_label(59), "Poor");
        assert_eq!(score_label(40), "Poor");
        assert_eq!(score_label(39), "Critical");
        assert_eq!(score_label(0), "Critical");
    }

    #[test]
    fn test_overall_score_rounds_mean() {
        let modules = vec![
            module_with("a", 100, vec![]),
            module_with("b", 90, vec![]),
            module_with("c", 80, vec![]),
            module_with("d", 71, vec![]),
            module_with("e", 60, vec![]),
        ];
        // mean = 401 / 5 = 80.2 -> 80
        assert_eq!(overall_score(&modules), 80);

        let modules = vec![module_with("a", 33, vec![]), module_with("b", 34, vec![])];
        // mean = 33.5 -> rounds to 34
        assert_eq!(overall_score(&modules), 34);
    }

    #[test]
    fn test_overall_score_empty_modules() {
        assert_eq!(overall_score(&[]), 0);
    }

    #[test]
    fn test_merge_sorts_by_priority_and_stays_stable() {
        let modules = vec![
            module_with(
                "first",
                50,
                vec![
                    Recommendation::new(Priority::Medium, "m1", String::new()),
                    Recommendation::new(Priority::Low, "l1", String::new()),
                ],
            ),
            module_with(
                "second",
                50,
                vec![
                    Recommendation::new(Priority::High, "h1", String::new()),
                    Recommendation::new(Priority::Medium, "m2", String::new()),
                ],
            ),
        ];

        let merged = merge_recommendations(&modules);
        let titles: Vec<&str> = merged.iter().map(|r| r.title.as_str()).collect();

        // No Medium before a High, no Low before a Medium, and m1 (from the
        // first module) keeps its place ahead of m2 (same priority).
        assert_eq!(titles, vec!["h1", "m1", "m2", "l1"]);
    }

    #[test]
    fn test_merge_truncates_to_ten() {
        let recs: Vec<Recommendation> = (0..15)
            .map(|i| Recommendation::new(Priority::Medium, &format!("rec {}", i), String::new()))
            .collect();
        let modules = vec![module_with("only", 10, recs)];

        assert_eq!(merge_recommendations(&modules).len(), 10);
    }

    #[test]
    fn test_audit_result_json_round_trip() {
        let result = AuditResult {
            url: "https://example.com/".to_string(),
            timestamp: "2024-05-01T12:00:00+00:00".to_string(),
            overall_score: 73,
            modules: vec![module_with(
                "SEO & Metadata",
                65,
                vec![Recommendation::new(
                    Priority::High,
                    "Add Page Title",
                    "Add a descriptive title tag.".to_string(),
                )
                .with_snippet("<title>Your Page Title Here</title>")
                .with_doc_link("https://developers.google.com/search/docs/appearance/title-link")],
            )],
            confidence: 0.85,
            label: "Fair".to_string(),
            recommendations: vec![],
            analysis_time_seconds: 1.25,
            error: None,
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: AuditResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);

        // The canonical JSON field names are camelCase
        assert!(json.contains("\"overallScore\":73"));
        assert!(json.contains("\"analysisTimeSeconds\":1.25"));
        assert!(json.contains("\"codeSnippet\""));
        assert!(json.contains("\"docLink\""));
    }

    #[test]
    fn test_priority_serializes_as_plain_string() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"High\"");
    }
}
