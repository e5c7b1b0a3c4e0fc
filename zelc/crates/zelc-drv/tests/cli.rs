//! End-to-end tests for the `zelc` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".zl")
        .tempfile()
        .expect("create temp source file");
    write!(file, "{content}").expect("write temp source file");
    file
}

#[test]
fn lexes_a_valid_file() {
    let file = write_source("let x = 42;\n");

    Command::cargo_bin("zelc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("KW_LET"))
        .stdout(predicate::str::contains("LIT_INT"))
        .stdout(predicate::str::contains("TOKEN_EOF"));
}

#[test]
fn json_output_is_well_formed() {
    let file = write_source("fn main() {}\n");

    let output = Command::cargo_bin("zelc")
        .unwrap()
        .arg("--json")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(doc["success"], true);
    assert_eq!(doc["tokens"][0]["type"], "KW_FN");
}

#[test]
fn missing_file_is_an_operational_failure() {
    Command::cargo_bin("zelc")
        .unwrap()
        .arg("/no/such/input.zl")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn lexer_errors_set_exit_code_and_report() {
    let file = write_source("let s = \"unterminated\nlet x = 1;\n");

    Command::cargo_bin("zelc")
        .unwrap()
        .arg("--no-color")
        .arg(file.path())
        .assert()
        .code(1)
        // Tokens after the broken string are still produced.
        .stdout(predicate::str::contains("DELIM_SEMICOLON"))
        .stderr(predicate::str::contains("error[L1012]"))
        .stderr(predicate::str::contains("unterminated string literal"));
}

#[test]
fn trivia_flag_annotates_output() {
    let file = write_source("x // note\n");

    Command::cargo_bin("zelc")
        .unwrap()
        .arg("--trivia")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(trailing trivia: comment)"));
}

#[test]
fn no_input_prints_usage_error() {
    Command::cargo_bin("zelc")
        .unwrap()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no input file"));
}

#[test]
fn help_prints_usage() {
    Command::cargo_bin("zelc")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: zelc"));
}
