use anyhow::{bail, Context, Result};
use netblock::catalogue::CatalogueSource;
use netblock::{
    file_reader, Address, AddressFamily, CatalogueLoader, LinearIndex, Network, PrefixIndex,
    TrieIndex,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cli_utils::{address_from_bits, address_in, format_number, format_qps, match_set};

pub fn cmd_bench(catalogue: PathBuf, query_count: usize, hit_rate: usize) -> Result<()> {
    if hit_rate > 100 {
        bail!("--hit-rate must be between 0 and 100, got {}", hit_rate);
    }

    println!("=== Netblock Index Benchmark ===\n");
    println!("Configuration:");
    println!("  Catalogue:         {}", catalogue.display());
    println!("  Query iterations:  {}", format_number(query_count));
    println!("  Hit rate:          {}% (queries drawn from catalogued networks)", hit_rate);
    println!();

    let reader = file_reader::open(&catalogue)
        .with_context(|| format!("Failed to open catalogue: {}", catalogue.display()))?;
    let source: CatalogueSource = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse catalogue: {}", catalogue.display()))?;

    println!("--- Phase 1: Build ---");
    let (linear, linear_build) = build(&source, LinearIndex::new());
    let (trie, trie_build) = build(&source, TrieIndex::new());
    println!("  Records:     {}", format_number(trie.len()));
    println!("  Linear:      {:.3}ms", millis(linear_build));
    println!("  Trie:        {:.3}ms", millis(trie_build));
    println!(
        "  Trie nodes:  {} (IPv4) / {} (IPv6)",
        format_number(trie.node_count(AddressFamily::V4)),
        format_number(trie.node_count(AddressFamily::V6))
    );
    println!();

    let networks: Vec<Network> = source
        .values()
        .flatten()
        .flat_map(|group| group.prefixes.iter())
        .filter_map(|prefix| prefix.parse().ok())
        .collect();
    let queries = generate_queries(&networks, query_count, hit_rate);

    println!("--- Phase 2: Cross-check ---");
    for addr in &queries {
        let expected = match_set(&linear.lookup(addr));
        let actual = match_set(&trie.lookup(addr));
        if expected != actual {
            bail!(
                "Backends disagree for {}: linear={:?} trie={:?}",
                addr,
                expected,
                actual
            );
        }
    }
    println!("  ✓ {} queries agree", format_number(queries.len()));
    println!();

    println!("--- Phase 3: Query Performance ---");
    let backends: [(&str, &dyn PrefixIndex); 2] = [("Linear", &linear), ("Trie", &trie)];
    for (name, index) in backends {
        let start = Instant::now();
        let mut found = 0usize;
        for addr in &queries {
            if !index.lookup(addr).is_empty() {
                found += 1;
            }
        }
        let elapsed = start.elapsed();
        let qps = queries.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

        println!("  {}:", name);
        println!("    Total time:  {:.3}ms", millis(elapsed));
        println!("    QPS:         {} queries/sec", format_qps(qps));
        println!(
            "    Found:       {}/{}",
            format_number(found),
            format_number(queries.len())
        );
    }
    println!();
    println!("✓ Benchmark complete");

    Ok(())
}

fn build<I: PrefixIndex>(source: &CatalogueSource, mut index: I) -> (I, Duration) {
    let start = Instant::now();
    CatalogueLoader::default().populate(source, &mut index);
    (index, start.elapsed())
}

/// Deterministic query mix: `hit_rate`% inside catalogued networks, the
/// rest spread over both address spaces
fn generate_queries(networks: &[Network], count: usize, hit_rate: usize) -> Vec<Address> {
    (0..count)
        .map(|i| {
            let salt = (i as u128).wrapping_mul(0x9E37_79B9_7F4A_7C15_F39C_C060_5CED_C835);
            if !networks.is_empty() && i % 100 < hit_rate {
                address_in(&networks[(i * 7919) % networks.len()], salt)
            } else if i % 2 == 0 {
                address_from_bits(AddressFamily::V4, salt >> 96)
            } else {
                address_from_bits(AddressFamily::V6, salt)
            }
        })
        .collect()
}

fn millis(d: Duration) -> f64 {
    d.as_micros() as f64 / 1000.0
}
