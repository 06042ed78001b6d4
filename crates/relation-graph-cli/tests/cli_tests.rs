//! Integration tests for the `relation-graph` binary.
//!
//! These run the REAL binary against relation lists written to temporary
//! directories and check stdout, stderr and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_CLUSTERING_FAILED: i32 = 3;

struct CliOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

fn run_cli(args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_relation-graph"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("RELATION_GRAPH_CONFIG")
        .env_remove("RELATION_GRAPH_CATEGORIES")
        .env_remove("RELATION_GRAPH_SEED")
        .env_remove("RELATION_GRAPH_TOLERANCE")
        .env_remove("RELATION_GRAPH_MAX_ITERATIONS")
        .env_remove("RELATION_GRAPH_NORMALIZATION")
        .env_remove("RELATION_GRAPH_CANONICALIZE")
        .output()
        .expect("Failed to run relation-graph binary");

    CliOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn category_of(report: &Value, name: &str) -> u64 {
    report["entities"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == name)
        .unwrap_or_else(|| panic!("entity {} missing", name))["category"]
        .as_u64()
        .unwrap()
}

const TWO_TRIANGLES: &str = "A, B, C\nD, E, F\n";

// =============================================================================
// partition
// =============================================================================

#[test]
fn test_partition_two_triangles_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", TWO_TRIANGLES);

    let out = run_cli(&["partition", file.to_str().unwrap(), "-k", "2", "--format", "json"]);

    assert_eq!(out.exit_code, EXIT_SUCCESS, "stderr: {}", out.stderr);
    let report: Value = serde_json::from_str(&out.stdout).expect("stdout is JSON");

    assert_eq!(report["entities"].as_array().unwrap().len(), 6);
    assert_eq!(category_of(&report, "A"), category_of(&report, "B"));
    assert_eq!(category_of(&report, "A"), category_of(&report, "C"));
    assert_eq!(category_of(&report, "D"), category_of(&report, "F"));
    assert_ne!(category_of(&report, "A"), category_of(&report, "D"));
    assert_eq!(report["category_sizes"], serde_json::json!([3, 3]));
    assert_eq!(report["near_zero_eigenvalues"], 2);
    assert_eq!(report["normalization"], "random-walk");
    assert_eq!(report["coincident"].as_array().unwrap().len(), 2);
    assert!(report["entities"][0].get("coordinates").is_none());

    println!("[VERIFIED] partition recovers both triangles: {}", report["categories"]);
}

#[test]
fn test_partition_text_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", TWO_TRIANGLES);

    let out = run_cli(&["partition", file.to_str().unwrap(), "-k", "2"]);

    assert_eq!(out.exit_code, EXIT_SUCCESS, "stderr: {}", out.stderr);
    assert!(out.stdout.contains("category 0 (3)"));
    assert!(out.stdout.contains("category 1 (3)"));
    assert!(out.stdout.contains("near-zero eigenvalues: 2"));
    assert!(out.stdout.contains("coincident: A = B = C"));
}

#[test]
fn test_partition_with_embedding_and_pre_normalized() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", TWO_TRIANGLES);

    let out = run_cli(&[
        "partition",
        file.to_str().unwrap(),
        "--categories",
        "2",
        "--normalization",
        "pre-normalized",
        "--no-canonicalize",
        "--with-embedding",
        "--format",
        "json",
    ]);

    assert_eq!(out.exit_code, EXIT_SUCCESS, "stderr: {}", out.stderr);
    let report: Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(report["normalization"], "pre-normalized");
    assert_eq!(report["canonicalized"], false);
    for entity in report["entities"].as_array().unwrap() {
        assert_eq!(entity["coordinates"].as_array().unwrap().len(), 2);
    }
}

#[test]
fn test_partition_reads_config_file_and_flags_override() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", TWO_TRIANGLES);
    let config = write_file(
        dir.path(),
        "relation-graph.toml",
        "[spectral]\nnum_categories = 2\n\n[kmeans]\nseed = 5\n",
    );

    let from_file = run_cli(&[
        "partition",
        file.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(from_file.exit_code, EXIT_SUCCESS, "stderr: {}", from_file.stderr);
    let report: Value = serde_json::from_str(&from_file.stdout).unwrap();
    assert_eq!(report["num_categories"], 2);

    let overridden = run_cli(&[
        "partition",
        file.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "-k",
        "1",
        "--format",
        "json",
    ]);
    assert_eq!(overridden.exit_code, EXIT_SUCCESS, "stderr: {}", overridden.stderr);
    let report: Value = serde_json::from_str(&overridden.stdout).unwrap();
    assert_eq!(report["num_categories"], 1);

    println!("[VERIFIED] config file applied, command-line flag wins");
}

#[test]
fn test_partition_isolated_entity_exit_2() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", "A, B\nC, D\nIceland\n");

    let out = run_cli(&["partition", file.to_str().unwrap(), "-k", "2"]);

    assert_eq!(out.exit_code, EXIT_INVALID_INPUT, "stderr: {}", out.stderr);
    assert!(out.stderr.contains("Iceland"), "stderr: {}", out.stderr);
}

#[test]
fn test_partition_malformed_line_exit_2() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", "A, B\nC, , D\n");

    let out = run_cli(&["partition", file.to_str().unwrap()]);

    assert_eq!(out.exit_code, EXIT_INVALID_INPUT);
    assert!(out.stderr.contains("line 2"), "stderr: {}", out.stderr);
}

#[test]
fn test_partition_missing_file_exit_1() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("nope.txt");

    let out = run_cli(&["partition", missing.to_str().unwrap()]);

    assert_eq!(out.exit_code, EXIT_FAILURE);
    assert!(out.stderr.contains("nope.txt"));
}

#[test]
fn test_partition_too_many_categories_exit_1() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", TWO_TRIANGLES);

    let out = run_cli(&["partition", file.to_str().unwrap(), "-k", "10"]);

    assert_eq!(out.exit_code, EXIT_FAILURE);
    assert!(out.stderr.contains("num_categories (10)"), "stderr: {}", out.stderr);
}

#[test]
fn test_partition_non_convergence_exit_3() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", "A, B, C, D\nD, E\nE, F, G, H\n");

    let out = run_cli(&[
        "partition",
        file.to_str().unwrap(),
        "-k",
        "2",
        "--max-iterations",
        "1",
        "--tolerance",
        "1e-300",
    ]);

    assert_eq!(out.exit_code, EXIT_CLUSTERING_FAILED, "stderr: {}", out.stderr);
    assert!(out.stderr.contains("did not converge"), "stderr: {}", out.stderr);
    println!("[VERIFIED] non-convergence surfaces as exit code 3");
}

#[test]
fn test_partition_bad_normalization_flag_rejected() {
    let out = run_cli(&["partition", "whatever.txt", "--normalization", "symmetric"]);

    // Argument errors are reported by clap before any file access.
    assert_ne!(out.exit_code, EXIT_SUCCESS);
    assert!(out.stderr.contains("symmetric"));
}

// =============================================================================
// edges
// =============================================================================

#[test]
fn test_edges_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", "A, B, C\nC, D\n");

    let out = run_cli(&["edges", file.to_str().unwrap(), "--format", "json"]);

    assert_eq!(out.exit_code, EXIT_SUCCESS, "stderr: {}", out.stderr);
    let report: Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(report["entities"], 4);
    let edges = report["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 8);
    let a_to_b = edges
        .iter()
        .find(|e| e["source"] == "A" && e["target"] == "B")
        .unwrap();
    assert!((a_to_b["weight"].as_f64().unwrap() - 0.5).abs() < 1e-15);
}

#[test]
fn test_edges_text() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_file(dir.path(), "relations.txt", "A, B\n");

    let out = run_cli(&["edges", file.to_str().unwrap()]);

    assert_eq!(out.exit_code, EXIT_SUCCESS);
    assert_eq!(out.stdout, "A\tB\t1.000000\nB\tA\t1.000000\n");
}
