// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the derive API: the CLI structure is described with structs and
// enums, and clap generates the parsing code, --help, and --version.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-warden",
    version = "0.1.0",
    about = "Verify a static site deployment: broken links, PDF links, redirect pages",
    long_about = "site-warden checks a deployed (or locally staged) static website: it extracts \
                  outbound links from HTML and PDF documents, validates their reachability, and \
                  verifies that redirect pages point where they should. Built for CI gates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract and validate every outbound link in the given documents
    ///
    /// Documents can be URLs (the live site) or local paths (the staged
    /// site). Example:
    ///   site-warden links https://www.example.com/ static/resume.pdf
    Links {
        /// Documents to check: URLs or local file paths
        #[arg(required = true)]
        documents: Vec<String>,

        /// Base URL for resolving relative links in local files
        ///
        /// Remote documents default to their own URL as the base context.
        #[arg(long)]
        base: Option<String>,

        /// Path to a JSON config file (skip hosts, markers, limits)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// How many probes run at once (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Retry budget for indeterminate probe failures (overrides config)
        #[arg(long)]
        retries: Option<u32>,

        /// Do not follow redirects when probing
        #[arg(long)]
        no_redirects: bool,
    },

    /// Verify redirect pages against a declared redirect table
    ///
    /// Example: site-warden redirects --table redirects.json
    Redirects {
        /// JSON object file mapping page URL -> expected refresh target
        #[arg(long)]
        table: PathBuf,

        /// Path to a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}
