use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INVOICE: &str = "INSPECTION WORKS INVOICE Order #10234 Invoice Date: 03/14/2024 \
    Bill To: Jane O'Neil Property: 42 Maple Ave, Toronto ON Date: 03/14/2024 \
    jane.oneil@example.com (416) 555-0199 \
    Home Inspection CAD$ 450.00 Radon Test CAD$ 150.00 \
    Technology Fee (online booking) CAD$ 25.00 Subtotal CAD$ 625.00 \
    GST 5% CAD$ 31.25 TOTAL CAD$ 1,656.25 Paid (Visa) CAD$ 656.25";

/// Command pointed at a config file inside `dir`, so the user's own config is never read.
fn iwb(dir: &Path) -> Command {
    let config = dir.join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("iwb").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn write_invoice(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn process_text_invoice_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = write_invoice(dir.path(), "invoice.txt", INVOICE);

    iwb(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\":\"1656.25\""))
        .stdout(predicate::str::contains("\"client\":\"Jane O'Neil\""))
        .stdout(predicate::str::contains("\"revenue_total\":\"1631.25\""));
}

#[test]
fn process_csv_format() {
    let dir = TempDir::new().unwrap();
    let input = write_invoice(dir.path(), "invoice.txt", INVOICE);

    iwb(dir.path())
        .args(["process", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("client,email,phone"));
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_invoice(dir.path(), "invoice.txt", INVOICE);
    let output = dir.path().join("out.json");

    iwb(dir.path())
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["order_number"], "10234");
    assert_eq!(json["phone"], "416-555-0199");
}

#[test]
fn process_missing_file_reports_retrieval_failure() {
    let dir = TempDir::new().unwrap();

    iwb(dir.path())
        .arg("process")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not retrieve"));
}

#[test]
fn process_short_document_reports_text_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_invoice(dir.path(), "short.txt", "hi");

    iwb(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read text"));
}

#[test]
fn process_warns_on_low_confidence() {
    let dir = TempDir::new().unwrap();
    let input = write_invoice(
        dir.path(),
        "letter.txt",
        "Thank you for your business. See you next spring!",
    );

    iwb(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"technology_fee\":\"0\""))
        .stderr(predicate::str::contains("Low confidence"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    fs::create_dir_all(&inputs).unwrap();
    write_invoice(&inputs, "a.txt", INVOICE);
    write_invoice(&inputs, "b.txt", "x");

    let out = dir.path().join("out");
    let pattern = format!("{}/*.txt", inputs.display());

    iwb(dir.path())
        .args(["batch", &pattern, "--summary", "--continue-on-error"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("a.json").exists());
    assert!(!out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status"));
    assert!(summary.contains("a.txt,success"));
    assert!(summary.contains("b.txt,error"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = TempDir::new().unwrap();
    write_invoice(dir.path(), "bad.txt", "x");
    let pattern = format!("{}/*.txt", dir.path().display());

    iwb(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");

    Command::cargo_bin("iwb")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    Command::cargo_bin("iwb")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "fetch.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn config_path_reports_location() {
    let dir = TempDir::new().unwrap();

    iwb(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
