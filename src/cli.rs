// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The interface is deliberately small: one positional URL plus two flags.
// Everything else (timeouts, scoring weights) is fixed by the engine.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-auditor",
    version = "0.1.0",
    about = "A CLI tool that audits a website for SEO, performance, security, mobile and crawlability issues",
    long_about = "site-auditor fetches a single page, extracts its on-page signals and scores it \
                  across five categories (SEO & Metadata, Performance, Security, Mobile Friendliness, \
                  Crawlability), producing an overall score and prioritized recommendations."
)]
pub struct Cli {
    /// Website URL to audit (e.g., https://example.com)
    ///
    /// A missing scheme is fine: "example.com" is normalized to
    /// "https://example.com" before anything else happens
    pub url: String,

    /// Output the full report as JSON instead of a table
    ///
    /// This is an optional flag: --json
    /// #[arg(long)] creates a flag from the field name
    #[arg(long)]
    pub json: bool,

    /// Print per-stage timings (validate, fetch, extract, score)
    #[arg(long)]
    pub verbose: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why no subcommands?
//    - The tool does exactly one thing: audit one URL
//    - clap's derive API handles a flat argument list with just a struct;
//      an enum of subcommands would be ceremony with no payoff here
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic (including --help and --version)
//    - Debug: generates code to print the struct for debugging
//
// 3. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because the struct needs to own the CLI arguments
// -----------------------------------------------------------------------------
