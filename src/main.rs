// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run the audit pipeline against the given URL
// 3. Print the report (table or JSON)
// 4. Exit with proper code (0 = audit done, 1 = audit failed, 2 = error)
//
// Rust concepts used:
// - async/await: The audit makes network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching on the CLI flags and score labels
// =============================================================================

// Module declarations - tells Rust about our other source files
mod audit; // src/audit/ - the orchestrator pipeline
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - the error taxonomy
mod features; // src/features/ - HTML feature extraction
mod fetcher; // src/fetcher/ - page download and gating
mod report; // src/report/ - report types and merging
mod scoring; // src/scoring/ - the five scoring categories
mod validator; // src/validator/ - URL validation

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use report::AuditResult;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = audit completed
//   Ok(1) = audit failed (invalid URL, unreachable site, bad content)
//   Err = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // In JSON mode, stdout carries nothing but the report so the output
    // can be piped straight into jq or another tool
    if !cli.json {
        println!("🔍 Auditing website: {}", cli.url);
    }

    let outcome = audit::audit_website(&cli.url).await;

    if cli.verbose {
        // Timings go to stderr so they never corrupt a piped JSON report
        for timing in &outcome.timings {
            eprintln!("⏱️  {}: {:.3}s", timing.stage, timing.seconds);
        }
        eprintln!(
            "⏱️  total: {:.3}s",
            outcome.result.analysis_time_seconds
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        print_report(&outcome.result);
    }

    // The audit itself decides success: any failure path leaves an error
    // message on the result
    if outcome.result.error.is_some() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the human-readable report to the terminal
fn print_report(result: &AuditResult) {
    println!();

    // A failed audit has no modules to show - print the error and stop
    if let Some(error) = &result.error {
        println!("❌ {}: {}", result.label.red().bold(), error);
        println!("   URL: {}", result.url);
        println!("   Time: {:.2}s", result.analysis_time_seconds);
        return;
    }

    println!(
        "📊 Overall score: {} ({})",
        result.overall_score.to_string().bold(),
        colorize_label(&result.label)
    );
    println!("   URL: {}", result.url);
    println!(
        "   Confidence: {:.0}%   Time: {:.2}s",
        result.confidence * 100.0,
        result.analysis_time_seconds
    );
    println!();

    // Per-module table
    println!("{:<22} {:>5}  {:<10}", "CATEGORY", "SCORE", "LABEL");
    println!("{}", "=".repeat(42));
    for module in &result.modules {
        println!(
            "{:<22} {:>5}  {:<10}",
            module.name,
            module.score,
            colorize_label(report::score_label(module.score))
        );
    }
    println!();

    if result.recommendations.is_empty() {
        println!("✅ No recommendations - this page is in great shape");
        return;
    }

    println!("💡 Top recommendations:");
    for rec in &result.recommendations {
        let priority = match rec.priority {
            report::Priority::High => "HIGH".red().bold(),
            report::Priority::Medium => "MEDIUM".yellow(),
            report::Priority::Low => "LOW".normal(),
        };
        println!("   [{}] {}", priority, rec.title.bold());
        println!("          {}", rec.message);
        if let Some(snippet) = &rec.code_snippet {
            println!("          e.g. {}", snippet.dimmed());
        }
        if let Some(link) = &rec.doc_link {
            println!("          see {}", link.dimmed());
        }
    }
}

// Maps a score label to a terminal color
fn colorize_label(label: &str) -> colored::ColoredString {
    match label {
        "Excellent" | "Good" => label.green(),
        "Fair" => label.yellow(),
        _ => label.red(),
    }
}
