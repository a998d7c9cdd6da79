use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a netblock command
fn netblock_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("netblock"))
}

const CATALOGUE: &str = r#"{
    "ProviderA": [
        { "tags": ["Tag1"], "prefixes": ["192.168.1.0/24"] },
        { "tags": ["Wide"], "prefixes": ["10.0.0.0/8"] }
    ],
    "ProviderB": [
        { "tags": ["Tag2"], "prefixes": ["2001:db8::/32", "10.0.0.0/16", "invalid_subnet"] }
    ]
}"#;

fn write_catalogue(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("prefixes.json");
    fs::write(&path, CATALOGUE).unwrap();
    path
}

#[test]
fn test_help() {
    netblock_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provider-tagged CIDR blocks"));
}

#[test]
fn test_version() {
    netblock_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netblock"));
}

#[test]
fn test_query_help() {
    netblock_cmd()
        .arg("query")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Look up one or more IP addresses"));
}

#[test]
fn test_inspect_help() {
    netblock_cmd()
        .arg("inspect")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped entries"));
}

#[test]
fn test_query_single_ip() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("192.168.1.10")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"subnet\": \"192.168.1.0/24\""))
        .stdout(predicate::str::contains("\"provider\": \"ProviderA\""))
        .stdout(predicate::str::contains("Tag1"));
}

#[test]
fn test_query_overlapping_networks() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("10.0.0.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.0/8"))
        .stdout(predicate::str::contains("10.0.0.0/16"));
}

#[test]
fn test_query_no_match() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("8.8.8.8")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": []"));
}

#[test]
fn test_query_multiple_ips_keep_order() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    let output = netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("2001:db8::1")
        .arg("192.168.1.10")
        .output()
        .unwrap();
    assert!(output.status.success());

    let responses: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let responses = responses.as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"][0]["provider"], "ProviderB");
    assert_eq!(responses[1]["result"][0]["provider"], "ProviderA");
}

#[test]
fn test_query_linear_backend() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("2001:db8::1")
        .arg("--index")
        .arg("linear")
        .assert()
        .success()
        .stdout(predicate::str::contains("2001:db8::/32"));
}

#[test]
fn test_query_invalid_ip() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("192.168.1.10")
        .arg("invalid_ip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid IP address: invalid_ip"));
}

#[test]
fn test_query_quiet_mode() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("192.168.1.10")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    netblock_cmd()
        .arg("query")
        .arg(&catalogue)
        .arg("8.8.8.8")
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_query_gzip_catalogue() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefixes.json.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(CATALOGUE.as_bytes()).unwrap();
    encoder.finish().unwrap();

    netblock_cmd()
        .arg("query")
        .arg(&path)
        .arg("192.168.1.10")
        .assert()
        .success()
        .stdout(predicate::str::contains("ProviderA"));
}

#[test]
fn test_query_catalogue_from_stdin() {
    netblock_cmd()
        .arg("query")
        .arg("-")
        .arg("192.168.1.10")
        .write_stdin(CATALOGUE)
        .assert()
        .success()
        .stdout(predicate::str::contains("ProviderA"));
}

#[test]
fn test_missing_catalogue_file() {
    netblock_cmd()
        .arg("query")
        .arg("/nonexistent/prefixes.json")
        .arg("192.168.1.10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalogue"));
}

#[test]
fn test_malformed_catalogue_aborts() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, r#"{ "ProviderA": { "prefixes": [] } }"#).unwrap();

    netblock_cmd()
        .arg("query")
        .arg(&path)
        .arg("192.168.1.10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed catalogue"));
}

#[test]
fn test_inspect_catalogue() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("inspect")
        .arg(&catalogue)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted:   4"))
        .stdout(predicate::str::contains("Skipped:    1"))
        .stdout(predicate::str::contains("ProviderA"))
        .stdout(predicate::str::contains("use --verbose"));
}

#[test]
fn test_inspect_verbose_lists_skipped() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("inspect")
        .arg(&catalogue)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped entries:"))
        .stdout(predicate::str::contains("[ProviderB] Invalid subnet: invalid_subnet"));
}

#[test]
fn test_inspect_json() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    let output = netblock_cmd()
        .arg("inspect")
        .arg(&catalogue)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["accepted"], 4);
    assert_eq!(json["report"]["ipv6"], 1);
    assert_eq!(json["report"]["providers"]["ProviderB"], 2);
    assert_eq!(json["report"]["skipped"][0]["prefix"], "invalid_subnet");
}

#[test]
fn test_bench_small() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("bench")
        .arg(&catalogue)
        .arg("-n")
        .arg("500")
        .assert()
        .success()
        .stdout(predicate::str::contains("queries agree"))
        .stdout(predicate::str::contains("Benchmark complete"));
}

#[test]
fn test_bench_rejects_bad_hit_rate() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("bench")
        .arg(&catalogue)
        .arg("--hit-rate")
        .arg("150")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--hit-rate"));
}

#[test]
fn test_log_level_info_reports_load_on_stderr() {
    let temp = TempDir::new().unwrap();
    let catalogue = write_catalogue(&temp);

    netblock_cmd()
        .arg("--log-level")
        .arg("info")
        .arg("query")
        .arg(&catalogue)
        .arg("192.168.1.10")
        .assert()
        .success()
        .stderr(predicate::str::contains("catalogue loaded"))
        .stdout(predicate::str::contains("ProviderA"));
}
