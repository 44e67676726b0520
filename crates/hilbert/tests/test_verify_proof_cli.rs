//! Integration tests for the verify_proof command-line checker.
//!
//! Each test writes a proof to a scratch file (or pipes it on stdin), runs
//! the built binary, and checks its exit status and report.

use hilbert::{Formula, Proof, Prover, Schema};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn formula(s: &str) -> Formula {
    Formula::parse(s).unwrap()
}

/// Proof of `b=a` from `a=b`: 5 lines, line 2 is modus ponens from lines 0 and 1
fn flipped_proof() -> Proof {
    let mut prover = Prover::new([Schema::fixed(formula("a=b"))]);
    let line = prover.add_assumption(formula("a=b")).unwrap();
    prover.add_flipped_equality(formula("b=a"), line).unwrap();
    prover.qed().unwrap()
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hilbert_{}_{}.json", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn verify_proof(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_verify_proof"))
        .args(args)
        .output()
        .unwrap()
}

fn verify_proof_stdin(input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_verify_proof"))
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =========================================================================
// Exit status and report
// =========================================================================

#[test]
fn test_valid_proof_file() {
    let proof = flipped_proof();
    assert_eq!(proof.len(), 5);
    let path = scratch_file("valid", &proof.to_json_string().unwrap());

    let output = verify_proof(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Valid proof of b=a (5 lines)");
}

#[test]
fn test_valid_proof_on_stdin() {
    let output = verify_proof_stdin(&flipped_proof().to_json_string().unwrap());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Valid proof of b=a"));
}

#[test]
fn test_self_referencing_line_is_reported() {
    let mut json: serde_json::Value =
        serde_json::from_str(&flipped_proof().to_json_string().unwrap()).unwrap();
    assert_eq!(json["lines"][2]["rule"], "MP");
    json["lines"][2]["antecedent"] = serde_json::json!(2);
    let path = scratch_file("self_reference", &json.to_string());

    let output = verify_proof(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    let report = stdout(&output);
    assert!(report.starts_with("Invalid proof: line 2 "), "report: {}", report);
}

#[test]
fn test_malformed_json() {
    let output = verify_proof_stdin("{");
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Cannot load proof"));
}

#[test]
fn test_missing_file() {
    let output = verify_proof(&["/nonexistent/hilbert/proof.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot read"));
}

// =========================================================================
// Usage errors
// =========================================================================

#[test]
fn test_unknown_option_is_a_usage_error() {
    let path = scratch_file("unknown_option", &flipped_proof().to_json_string().unwrap());

    let output = verify_proof(&[path.to_str().unwrap(), "--bogus"]);
    std::fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let message = stderr(&output);
    assert!(message.contains("Unknown option: --bogus"));
    assert!(message.contains("Usage:"));
}

#[test]
fn test_no_arguments_is_a_usage_error() {
    let output = verify_proof(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage:"));
}

#[test]
fn test_print_option() {
    let path = scratch_file("print", &flipped_proof().to_json_string().unwrap());

    let output = verify_proof(&[path.to_str().unwrap(), "--print"]);
    std::fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(0));
    let report = stdout(&output);
    assert!(report.starts_with("Proof of b=a from assumptions/axioms:"));
    assert!(report.contains("QED"));
    assert!(report.trim_end().ends_with("Valid proof of b=a (5 lines)"));
}
