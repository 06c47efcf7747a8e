//! Integration tests for the dv CLI.

#![allow(deprecated)] // cargo_bin deprecation doesn't affect standard builds

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BLUEPRINT: &str = "tests/fixtures/plutus.json";
const UNTITLED: &str = "tests/fixtures/untitled.json";
const PAYMENT_HEX: &str = "tests/fixtures/payment.hex";

/// `[h'414243', 5, [1, 2]]`
const PAYMENT: &str = "834341424305820102";

/// dv with the blueprint store disabled.
fn dv() -> Command {
    let mut cmd = Command::cargo_bin("dv").unwrap();
    cmd.env_remove("DV_FORMAT").env_remove("DV_LOG").arg("--no-store");
    cmd
}

/// dv against a store file inside `dir`.
fn dv_with_store(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dv").unwrap();
    cmd.env_remove("DV_FORMAT")
        .env_remove("DV_LOG")
        .env("DV_STORE", dir.join("blueprints.json"));
    cmd
}

#[test]
fn test_show_help() {
    Command::cargo_bin("dv")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plutus datum viewer for Cardano"));
}

#[test]
fn test_show_version() {
    Command::cargo_bin("dv")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dv"));
}

#[test]
fn test_integer_from_hex() {
    dv().arg("182a").assert().success().stdout("42\n");
}

#[test]
fn test_unmatched_list_is_positional() {
    dv().args(["820102", "--json"])
        .assert()
        .success()
        .stdout("[\n  1,\n  2\n]\n");
}

#[test]
fn test_constructor_json() {
    // 121([5])
    dv().args(["d8798105", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tag\": 0"))
        .stdout(predicate::str::contains("\"fields\""));
}

#[test]
fn test_blueprint_names_fields_json() {
    dv().args([PAYMENT, "--json", "--blueprint", BLUEPRINT])
        .assert()
        .success()
        .stdout(concat!(
            "{\n",
            "  \"value\": \"414243\",\n",
            "  \"amount\": 5,\n",
            "  \"fee\": {\n",
            "    \"numerator\": 1,\n",
            "    \"denominator\": 2\n",
            "  }\n",
            "}\n"
        ));
}

#[test]
fn test_blueprint_names_fields_yaml() {
    dv().args([PAYMENT, "-b", BLUEPRINT])
        .assert()
        .success()
        .stdout(concat!(
            "value: '414243' # ABC\n",
            "amount: 5\n",
            "fee:\n",
            "  # ≈ 0.5\n",
            "  numerator: 1\n",
            "  denominator: 2\n",
        ));
}

#[test]
fn test_format_from_env() {
    dv().env("DV_FORMAT", "json")
        .args(["820102", "-b", BLUEPRINT])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"numerator\": 1"));
}

#[test]
fn test_hex_with_prefix() {
    dv().arg("0x182a").assert().success().stdout("42\n");
}

#[test]
fn test_hex_file() {
    dv().args([PAYMENT_HEX, "--json", "-b", BLUEPRINT])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 5"));
}

#[test]
fn test_binary_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datum.cbor");
    fs::write(&path, hex::decode(PAYMENT).unwrap()).unwrap();

    dv().arg(&path)
        .args(["--json", "-b", BLUEPRINT])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"414243\""));
}

#[test]
fn test_stdin_hex() {
    dv().arg("--json")
        .write_stdin(format!("{}\n", PAYMENT))
        .assert()
        .success()
        .stdout(predicate::str::contains("414243"));
}

#[test]
fn test_stdin_binary() {
    dv().write_stdin(hex::decode("182a").unwrap())
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn test_empty_stdin() {
    dv().write_stdin("")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No input provided"));
}

#[test]
fn test_file_not_found() {
    dv().arg("/nonexistent/datum.cbor")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_malformed_cbor() {
    dv().arg("8201")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to decode CBOR"));
}

#[test]
fn test_unsupported_arity() {
    // tag 1401 carries alternative 128
    dv().arg("d9057980")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported constructor arity"));
}

#[test]
fn test_invalid_blueprint_flag_is_left_out() {
    dv().args([PAYMENT, "--json", "-b", BLUEPRINT, "-b", UNTITLED])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 5"))
        .stderr(predicate::str::contains(
            "Invalid blueprint tests/fixtures/untitled.json: preamble.title: is required",
        ));
}

#[test]
fn test_missing_blueprint_file_is_left_out() {
    dv().args(["182a", "-b", "/nonexistent/plutus.json"])
        .assert()
        .success()
        .stdout("42\n")
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_check_mode() {
    dv().args([PAYMENT, "--check"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    dv().args(["d9057980", "--check"]).assert().failure().code(1);
}

#[test]
fn test_diagnostic_mode() {
    dv().args([PAYMENT, "--diagnostic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("h'414243'"));
}

#[test]
fn test_store_lifecycle() {
    let dir = TempDir::new().unwrap();

    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "add", BLUEPRINT])
        .assert()
        .success()
        .stdout(predicate::str::contains("added #1 acme/escrow"));

    dv_with_store(dir.path())
        .args(["blueprint", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 1"))
        .stdout(predicate::str::contains("\"title\": \"acme/escrow\""));

    // Stored blueprints apply without -b
    dv_with_store(dir.path())
        .args([PAYMENT, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 5"));

    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("escrow/Payment"))
        .stdout(predicate::str::contains("value, amount, fee"));

    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed #1"));

    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No blueprints stored"));

    // Ids are not reused
    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "add", BLUEPRINT])
        .assert()
        .success()
        .stdout(predicate::str::contains("added #2"));
}

#[test]
fn test_add_reports_each_file() {
    let dir = TempDir::new().unwrap();

    dv_with_store(dir.path())
        .args(["--no-color", "blueprint", "add", UNTITLED, BLUEPRINT])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::contains("added #1 acme/escrow"))
        .stderr(predicate::str::contains("rejected tests/fixtures/untitled.json"))
        .stderr(predicate::str::contains("preamble.title: is required"))
        .stderr(predicate::str::contains("1 of 2 blueprint file(s) rejected"));
}

#[test]
fn test_show_missing_blueprint() {
    let dir = TempDir::new().unwrap();

    dv_with_store(dir.path())
        .args(["blueprint", "show", "9"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Blueprint #9 not found"));
}

#[test]
fn test_no_store_ignores_stored_blueprints() {
    let dir = TempDir::new().unwrap();

    dv_with_store(dir.path())
        .args(["blueprint", "add", BLUEPRINT])
        .assert()
        .success();

    dv_with_store(dir.path())
        .args([PAYMENT, "--json", "--no-store"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\"").not());
}

#[test]
fn test_tampered_store_entry_is_left_out() {
    let dir = TempDir::new().unwrap();

    dv_with_store(dir.path())
        .args(["blueprint", "add", BLUEPRINT, BLUEPRINT])
        .assert()
        .success();

    // Break the second entry by hand
    let path = dir.path().join("blueprints.json");
    let mut registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    registry["entries"][1]["document"]["preamble"] = serde_json::json!({});
    fs::write(&path, serde_json::to_string(&registry).unwrap()).unwrap();

    dv_with_store(dir.path())
        .args([PAYMENT, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 5"))
        .stderr(predicate::str::contains("Invalid blueprint #2"));
}

#[test]
fn test_corrupt_store() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blueprints.json"), "not json").unwrap();

    dv_with_store(dir.path())
        .arg("182a")
        .assert()
        .failure()
        .code(6);
}
