// src/scoring/security.rs
// =============================================================================
// Security scoring.
//
// Weight table (sums to exactly 100):
//   HTTPS ............................ 30 (missing -> High recommendation)
//   Content-Security-Policy header ... 25 (missing -> Medium)
//   X-Frame-Options header ........... 20 (missing -> Medium)
//   Strict-Transport-Security ........ 25 (missing -> Low)
//
// Known limitation, kept on purpose: header checks test PRESENCE only. A
// CSP of `default-src *` scores the same as a strict policy. Validating
// directive values would need a policy parser and is out of scope.
// =============================================================================

use crate::features::FeatureSet;
use crate::report::{ModuleResult, Priority, Recommendation};

/// Scores the page's transport security and security response headers
pub fn analyze(features: &FeatureSet) -> ModuleResult {
    let mut score: u32 = 0;
    let mut recommendations = Vec::new();

    // HTTPS: 30 points
    if features.ssl_certificate_valid {
        score += 30;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::High,
                "Enable HTTPS",
                "Secure your website with SSL/TLS encryption for all pages.".to_string(),
            )
            .with_doc_link(
                "https://developers.google.com/web/fundamentals/security/encrypt-in-transit/why-https",
            ),
        );
    }

    // Content-Security-Policy: 25 points
    if features.has_csp_header {
        score += 25;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Add Content Security Policy",
                "Implement CSP to prevent XSS attacks and other code injection \
                 vulnerabilities."
                    .to_string(),
            )
            .with_snippet(
                "Content-Security-Policy: default-src 'self'; script-src 'self' 'unsafe-inline'",
            )
            .with_doc_link("https://developer.mozilla.org/en-US/docs/Web/HTTP/CSP"),
        );
    }

    // X-Frame-Options: 20 points
    if features.has_x_frame_options {
        score += 20;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Medium,
                "Add X-Frame-Options Header",
                "Prevent clickjacking attacks by controlling iframe embedding.".to_string(),
            )
            .with_snippet("X-Frame-Options: DENY")
            .with_doc_link(
                "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/X-Frame-Options",
            ),
        );
    }

    // Strict-Transport-Security: 25 points
    if features.has_hsts_header {
        score += 25;
    } else {
        recommendations.push(
            Recommendation::new(
                Priority::Low,
                "Add HSTS Header",
                "Implement HTTP Strict Transport Security to prevent protocol \
                 downgrade attacks."
                    .to_string(),
            )
            .with_snippet("Strict-Transport-Security: max-age=31536000; includeSubDomains")
            .with_doc_link(
                "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Strict-Transport-Security",
            ),
        );
    }

    ModuleResult {
        name: "Security".to_string(),
        score: score.min(100) as u8,
        description: "HTTPS and security implementation".to_string(),
        explanation: explanation(score.min(100) as u8),
        recommendations,
    }
}

fn explanation(score: u8) -> String {
    let tier = if score >= 90 {
        "Excellent security implementation with HTTPS and comprehensive security headers."
    } else if score >= 70 {
        "Good security foundation with HTTPS enabled, but some security headers could be added."
    } else if score >= 40 {
        "Basic security in place, but important security headers are missing."
    } else {
        "Poor security implementation. HTTPS and security headers need immediate attention."
    };

    format!("{} Header checks verify presence only, not directive strength.", tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_hardened_page_scores_100() {
        let features = FeatureSet {
            ssl_certificate_valid: true,
            has_csp_header: true,
            has_x_frame_options: true,
            has_hsts_header: true,
            ..Default::default()
        };

        let result = analyze(&features);
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_bare_http_page_scores_zero_with_four_recommendations() {
        let result = analyze(&FeatureSet::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_missing_check_priorities() {
        // HTTPS -> High, CSP -> Medium, X-Frame-Options -> Medium, HSTS -> Low
        let result = analyze(&FeatureSet::default());
        let priorities: Vec<(String, Priority)> = result
            .recommendations
            .iter()
            .map(|r| (r.title.clone(), r.priority))
            .collect();

        assert_eq!(
            priorities,
            vec![
                ("Enable HTTPS".to_string(), Priority::High),
                ("Add Content Security Policy".to_string(), Priority::Medium),
                ("Add X-Frame-Options Header".to_string(), Priority::Medium),
                ("Add HSTS Header".to_string(), Priority::Low),
            ]
        );
    }

    #[test]
    fn test_https_only_page() {
        let features = FeatureSet {
            ssl_certificate_valid: true,
            ..Default::default()
        };
        let result = analyze(&features);
        assert_eq!(result.score, 30);
        assert_eq!(result.recommendations.len(), 3);
    }
}
