use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn bridge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("budgetbridge").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env("RUST_LOG", "info");
    cmd
}

fn write_export(path: &Path) {
    std::fs::write(
        path,
        "Date,Account,Category,Amount,Income/Expense,Description\n\
         01/15/2024 14:30:00,Checking,Groceries,45.50,Expense,Market\n\
         02/01/2024,Savings,Salary,2000,Income,Paycheck\n\
         02/02/2024,Savings,Misc,abc,Expense,Broken\n",
    )
    .unwrap();
}

fn write_rows(path: &Path, n: usize) {
    let mut content = String::from("id,value\n");
    for i in 1..=n {
        content.push_str(&format!("{i},v{i}\n"));
    }
    std::fs::write(path, content).unwrap();
}

fn data_rows(path: &Path) -> usize {
    std::fs::read_to_string(path).unwrap().lines().count() - 1
}

#[test]
fn convert_writes_target_file_and_skips_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("export.csv");
    let output = dir.path().join("processed").join("budget.csv");
    write_export(&input);

    bridge(dir.path())
        .args(["convert", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 converted, 1 skipped"))
        .stderr(predicate::str::contains("Invalid amount: abc"));

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.split("\r\n").collect();
    assert_eq!(lines[0], "Date,Payment Mode,Category,Amount,Note,Type,Tag");
    assert_eq!(
        lines[1],
        "01/15/2024,Checking,Groceries,-45.50,Time: 14:30:00 —— Market,Expense,Money Out"
    );
    assert_eq!(
        lines[2],
        "02/01/2024,Savings,Salary,2000.00,Time: No time data —— Paycheck,Income,Money In"
    );
    assert_eq!(lines[3], "");
    assert_eq!(lines.len(), 4);
}

#[test]
fn convert_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("budget.csv");

    bridge(dir.path())
        .args(["convert", "does-not-exist.csv", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found: does-not-exist.csv"));

    assert!(!output.exists());
}

#[test]
fn split_into_three_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.csv");
    let out = dir.path().join("chunks");
    write_rows(&input, 110);

    bridge(dir.path())
        .args(["split", input.to_str().unwrap(), "--rows-per-file", "50"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("110 rows in 3 files"));

    assert_eq!(data_rows(&out.join("chunk_1.csv")), 50);
    assert_eq!(data_rows(&out.join("chunk_2.csv")), 50);
    assert_eq!(data_rows(&out.join("chunk_3.csv")), 10);
    assert!(!out.join("chunk_4.csv").exists());
}

#[test]
fn split_failure_is_reported_with_success_status() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chunks");

    bridge(dir.path())
        .args(["split", "missing.csv"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Split failed:"));
}

#[test]
fn split_uses_saved_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.csv");
    let out = dir.path().join("from-settings");
    write_rows(&input, 30);

    bridge(dir.path())
        .args(["config", "--rows-per-file", "25"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows per file: 25"));

    assert!(dir.path().join(".config").join("budgetbridge").join("settings.json").exists());

    bridge(dir.path())
        .args(["split", input.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(data_rows(&out.join("chunk_1.csv")), 25);
    assert_eq!(data_rows(&out.join("chunk_2.csv")), 5);
}

#[test]
fn config_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();

    bridge(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows per file: 110"))
        .stdout(predicate::str::contains("Encoding:      utf-8"))
        .stdout(predicate::str::contains("Output dir:    ./processed"));
}

#[test]
fn config_rejects_unknown_encoding() {
    let dir = tempfile::tempdir().unwrap();

    bridge(dir.path())
        .args(["config", "--encoding", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported encoding: klingon"));
}

#[test]
fn split_latin1_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("export.csv");
    let out = dir.path().join("chunks");
    std::fs::write(&input, b"name,city\nJos\xe9,Z\xfcrich\n").unwrap();

    bridge(dir.path())
        .args(["split", input.to_str().unwrap(), "--encoding", "latin-1"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rows in 1 files"));

    assert_eq!(
        std::fs::read(out.join("chunk_1.csv")).unwrap(),
        b"name,city\r\nJos\xe9,Z\xfcrich\r\n".to_vec()
    );
}
