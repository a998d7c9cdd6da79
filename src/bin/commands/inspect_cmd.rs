use anyhow::{Context, Result};
use netblock::{CatalogueLoader, IndexKind};
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::format_number;

pub fn cmd_inspect(catalogue: PathBuf, json_output: bool, verbose: bool) -> Result<()> {
    let loaded = CatalogueLoader::new(IndexKind::Trie)
        .load_path(&catalogue)
        .with_context(|| format!("Failed to load catalogue: {}", catalogue.display()))?;
    let report = &loaded.report;

    if json_output {
        let output = json!({
            "file": catalogue.display().to_string(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Catalogue: {}", catalogue.display());
    println!();
    println!("Entries:");
    println!("  Accepted:   {}", format_number(report.accepted));
    println!("    IPv4:     {}", format_number(report.ipv4));
    println!("    IPv6:     {}", format_number(report.ipv6));
    println!("  Skipped:    {}", format_number(report.skipped.len()));
    println!();
    println!("Providers:    {}", report.providers.len());
    for (provider, count) in &report.providers {
        println!("  {:<24} {}", provider, format_number(*count));
    }

    if !report.skipped.is_empty() {
        println!();
        if verbose {
            println!("Skipped entries:");
            for entry in &report.skipped {
                println!("  [{}] {}", entry.provider, entry.reason);
            }
        } else {
            println!(
                "{} malformed entries skipped (use --verbose to list them)",
                format_number(report.skipped.len())
            );
        }
    }

    Ok(())
}
