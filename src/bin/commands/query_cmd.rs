use anyhow::{Context, Result};
use netblock::{CatalogueLoader, IndexKind, LookupService};
use std::path::PathBuf;

pub fn cmd_query(catalogue: PathBuf, ips: Vec<String>, index: IndexKind, quiet: bool) -> Result<()> {
    let loaded = CatalogueLoader::new(index)
        .load_path(&catalogue)
        .with_context(|| format!("Failed to load catalogue: {}", catalogue.display()))?;
    let service = LookupService::new(loaded.into_shared());

    // Fail-fast: one malformed address rejects the whole query
    let responses = service.lookup_many(&ips).context("Query failed")?;

    let found = responses.iter().any(|r| !r.is_empty());

    if quiet {
        // Quiet mode: no output, just exit code
        std::process::exit(if found { 0 } else { 1 });
    }

    // One address prints its response object, several print an array in input order
    if let [response] = responses.as_slice() {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&responses)?);
    }

    Ok(())
}
