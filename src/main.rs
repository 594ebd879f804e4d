// src/main.rs
// =============================================================================
// Entry point of the CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load configuration and dispatch to the subcommand handler
// 3. Print results as a table (or JSON) with a summary
// 4. Exit with a proper code (0 = clean, 1 = failures found, 2 = error)
// =============================================================================

mod checker;
mod cli;
mod config;
mod error;
mod fetch;
mod pipeline;

use anyhow::Result;
use clap::Parser;

use checker::LinkStatus;
use cli::{Cli, Commands};
use config::CheckConfig;
use pipeline::{DocumentReport, RedirectReport};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Links {
            documents,
            base,
            config,
            json,
            timeout,
            concurrency,
            retries,
            no_redirects,
        } => {
            let mut config = CheckConfig::load(config.as_deref())?;
            // CLI flags win over the config file.
            if let Some(timeout) = timeout {
                config.timeout_secs = timeout;
            }
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            if let Some(retries) = retries {
                config.retries = retries;
            }
            if no_redirects {
                config.follow_redirects = false;
            }
            handle_links(&documents, base.as_deref(), &config, json).await
        }
        Commands::Redirects {
            table,
            config,
            json,
        } => {
            let config = CheckConfig::load(config.as_deref())?;
            let table = config::load_redirect_table(&table)?;
            handle_redirects(&table, &config, json).await
        }
    }
}

// Handles the 'links' subcommand: the full extract/validate pipeline.
async fn handle_links(
    documents: &[String],
    base: Option<&str>,
    config: &CheckConfig,
    json: bool,
) -> Result<i32> {
    println!("🔍 Checking {} document(s)...\n", documents.len());

    let reports = pipeline::check_documents(documents, base, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_document_report(report);
        }
        print_links_summary(&reports);
    }

    let clean = reports.iter().all(|r| r.is_clean());
    Ok(if clean { 0 } else { 1 })
}

// Handles the 'redirects' subcommand: table verification.
async fn handle_redirects(
    table: &config::RedirectTable,
    config: &CheckConfig,
    json: bool,
) -> Result<i32> {
    println!("🔍 Verifying {} redirect page(s)...\n", table.len());

    let reports = pipeline::verify_redirects(table, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_redirect_table(&reports);
    }

    let clean = reports.iter().all(|r| r.ok);
    Ok(if clean { 0 } else { 1 })
}

// Prints one document's results as a human-readable table.
fn print_document_report(report: &DocumentReport) {
    println!("📄 {}", report.location);

    if let Some(error) = &report.error {
        println!("   ❌ {}\n", error);
        return;
    }

    for url in &report.skipped {
        println!("   ⏭️  SKIPPED  {}", url);
    }

    for result in &report.results {
        let status = format_status(&result.status);
        let message = result.message.as_deref().unwrap_or("");
        println!("   {:<14} {:<60} {}", status, truncate(&result.url, 57), message);
    }

    println!();
}

// Prints the aggregate summary across all documents.
fn print_links_summary(reports: &[DocumentReport]) {
    let checked: usize = reports.iter().map(|r| r.results.len()).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped.len()).sum();
    let broken: usize = reports.iter().map(|r| r.broken_count()).sum();
    let errors: usize = reports.iter().map(|r| r.error_count()).sum();
    let failed_docs = reports.iter().filter(|r| r.error.is_some()).count();

    println!("📊 Summary:");
    println!("   ✅ Reachable: {}", checked - broken - errors);
    println!("   ❌ Broken: {}", broken);
    println!("   ⚠️  Errors: {}", errors);
    println!("   ⏭️  Skipped: {}", skipped);
    if failed_docs > 0 {
        println!("   💥 Documents failed: {}", failed_docs);
    }
}

// Prints redirect verification results as a table.
fn print_redirect_table(reports: &[RedirectReport]) {
    for report in reports {
        if report.ok {
            println!("   ✅ {} -> {}", report.url, report.expected);
        } else {
            let message = report.message.as_deref().unwrap_or("mismatch");
            println!("   ❌ {} ({})", report.url, message);
        }
    }

    let ok_count = reports.iter().filter(|r| r.ok).count();
    println!("\n📊 Summary: {}/{} redirect page(s) correct", ok_count, reports.len());
}

fn format_status(status: &LinkStatus) -> String {
    match status {
        LinkStatus::Reachable => "✅ OK".to_string(),
        LinkStatus::Unreachable => "❌ BROKEN".to_string(),
        LinkStatus::Error => "⚠️  ERROR".to_string(),
    }
}

// Truncates a URL to at most `max` characters for table display.
// Cuts on a char boundary so multibyte URLs never panic the printer.
fn truncate(url: &str, max: usize) -> String {
    match url.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}
