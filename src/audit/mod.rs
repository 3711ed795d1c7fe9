// src/audit/mod.rs
// =============================================================================
// This module is the audit orchestrator - the pipeline that ties everything
// together:
//
//   validate -> fetch -> extract features -> score -> assemble report
//
// Failure handling is deliberate: the pipeline NEVER bubbles an Err to the
// caller. Every failure mode collapses into an AuditResult with an empty
// module list, overall score 0 and a label naming the failure stage
// ("Invalid Website" or "Analysis Failed"). The caller always gets one
// serializable artifact, success or not.
//
// Stage timings are collected by a StageTimer the orchestrator owns. There
// is no global metrics registry: each audit carries its own timer, so two
// concurrent audits can never mix their numbers.
//
// Rust concepts:
// - Early returns: Each failure path exits with a fully-formed result
// - Ownership of the timer: No statics, no lazy_static, no singletons
// =============================================================================

use crate::error::AuditError;
use crate::features::{self, FeatureSet};
use crate::fetcher;
use crate::report::{
    merge_recommendations, overall_score, score_label, AuditResult, Recommendation,
};
use crate::scoring;
use crate::validator;
use chrono::Utc;
use std::time::Instant;

// Labels for the two failure stages - distinct from the score labels
const LABEL_INVALID: &str = "Invalid Website";
const LABEL_FAILED: &str = "Analysis Failed";

// Confidence never exceeds this ceiling: a single-page heuristic audit is
// never a certainty, no matter how clean the validation looked
const ANALYSIS_CONFIDENCE_CEILING: f64 = 0.85;

/// Elapsed wall-clock time of one pipeline stage
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: &'static str,
    pub seconds: f64,
}

/// Per-audit stage timer, owned by the pipeline that created it
///
/// Each call to mark() closes the current stage and starts the next one.
struct StageTimer {
    started: Instant,
    last: Instant,
    timings: Vec<StageTiming>,
}

impl StageTimer {
    fn start() -> Self {
        let now = Instant::now();
        StageTimer {
            started: now,
            last: now,
            timings: Vec::new(),
        }
    }

    fn mark(&mut self, stage: &'static str) {
        let now = Instant::now();
        self.timings.push(StageTiming {
            stage,
            seconds: (now - self.last).as_secs_f64(),
        });
        self.last = now;
    }

    fn total_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

/// What one audit produced: the report plus the per-stage timings
#[derive(Debug)]
pub struct AuditOutcome {
    pub result: AuditResult,
    pub timings: Vec<StageTiming>,
}

// Everything the scorers need about one fetched page, gathered in one
// place before scoring starts
struct WebsiteData {
    url: String,
    raw_content: String,
    features: FeatureSet,
    load_time_seconds: f64,
}

/// Runs the full audit pipeline against one user-supplied URL
///
/// Never returns an Err and never panics: validation failures, network
/// failures and analysis failures all come back as an AuditResult with
/// an error message and a failure label.
pub async fn audit_website(input: &str) -> AuditOutcome {
    let mut timer = StageTimer::start();

    // Stage 1: validation
    let validation = validator::validate(input).await;
    timer.mark("validate");

    // On failure, report the normalized URL when normalization got that
    // far, otherwise echo the raw input back
    let url = validation
        .normalized_url
        .clone()
        .unwrap_or_else(|| input.trim().to_string());

    if !validation.is_valid {
        let error = validation
            .error
            .unwrap_or_else(|| "validation failed".to_string());
        return failure(url, LABEL_INVALID, error, timer);
    }

    // Stage 2: fetch
    let page = match fetcher::fetch(&url).await {
        Ok(page) => page,
        Err(e) => {
            let error = AuditError::Fetch(e).to_string();
            timer.mark("fetch");
            return failure(url, LABEL_FAILED, error, timer);
        }
    };
    timer.mark("fetch");

    // Stage 3: feature extraction
    let data = WebsiteData {
        url: page.metadata.final_url.clone(),
        load_time_seconds: page.metadata.load_time_seconds,
        features: features::extract(&page.raw_content, &page.metadata),
        raw_content: page.raw_content,
    };
    timer.mark("extract");

    // Guard against data that slipped past the fetch gates but cannot be
    // scored meaningfully
    if data.raw_content.is_empty() || !data.load_time_seconds.is_finite() {
        let error = AuditError::Analysis("fetched page has no usable content".to_string());
        return failure(data.url, LABEL_FAILED, error.to_string(), timer);
    }
    if let Err(reason) = data.features.validate() {
        let error = AuditError::Analysis(reason);
        return failure(data.url, LABEL_FAILED, error.to_string(), timer);
    }

    // Stage 4: scoring
    let modules = scoring::run_all(&data.features);
    timer.mark("score");

    let overall = overall_score(&modules);
    let recommendations = merge_recommendations(&modules);

    let result = AuditResult {
        url: data.url,
        timestamp: Utc::now().to_rfc3339(),
        overall_score: overall,
        modules,
        confidence: validation.confidence.min(ANALYSIS_CONFIDENCE_CEILING),
        label: score_label(overall).to_string(),
        recommendations,
        analysis_time_seconds: timer.total_seconds(),
        error: None,
    };

    AuditOutcome {
        timings: timer.timings,
        result,
    }
}

// Assembles the uniform failure artifact: empty modules, zero scores, the
// failure label and the error message
fn failure(url: String, label: &str, error: String, timer: StageTimer) -> AuditOutcome {
    let result = AuditResult {
        url,
        timestamp: Utc::now().to_rfc3339(),
        overall_score: 0,
        modules: Vec::new(),
        confidence: 0.0,
        label: label.to_string(),
        recommendations: Vec::<Recommendation>::new(),
        analysis_time_seconds: timer.total_seconds(),
        error: Some(error),
    };

    AuditOutcome {
        timings: timer.timings,
        result,
    }
}
