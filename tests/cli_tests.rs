mod common;

use common::*;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CONFIG: &str = r#"
[a4-24]
type = "profile"
description = "70x37mm, 24 per A4 sheet"
rows = 8
columns = 3
width = 70
height = 37
unit = "mm"
page-size = "A4"
"#;

fn labelsheet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_labelsheet"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run labelsheet")
}

fn write_inputs(dir: &Path, csv: &str) -> (String, String) {
    let config = dir.join("labels.toml");
    let data = dir.join("collection.csv");
    fs::write(&config, CONFIG).unwrap();
    fs::write(&data, csv).unwrap();
    (
        config.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_cli_generates_pdf() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (config, data) = write_inputs(dir.path(), &collection_csv(25));
    let out = dir.path().join("labels.pdf");
    let out_arg = out.to_string_lossy().into_owned();

    let output = labelsheet(&["-c", &config, "-f", &data, "-o", &out_arg, "-p", "a4-24"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = GeneratedPdf::from_bytes(fs::read(&out)?)?;
    assert_eq!(pdf.page_count(), 2);
    Ok(())
}

#[test]
fn test_cli_lists_profiles() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (config, _) = write_inputs(dir.path(), "");

    let output = labelsheet(&["-c", &config, "--list-profiles"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a4-24"));
    assert!(stdout.contains("24 per A4 sheet"));
    Ok(())
}

#[test]
fn test_cli_fails_for_unknown_profile() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (config, data) = write_inputs(dir.path(), &collection_csv(1));
    let out = dir.path().join("labels.pdf");
    let out_arg = out.to_string_lossy().into_owned();

    let output = labelsheet(&["-c", &config, "-f", &data, "-o", &out_arg, "-p", "herma"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("a4-24"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_cli_fails_for_missing_csv() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (config, _) = write_inputs(dir.path(), "");
    let missing = dir.path().join("nope.csv").to_string_lossy().into_owned();
    let out = dir.path().join("labels.pdf");
    let out_arg = out.to_string_lossy().into_owned();

    let output = labelsheet(&["-c", &config, "-f", &missing, "-o", &out_arg, "-p", "a4-24"]);
    assert!(!output.status.success());
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_cli_requires_profile_unless_listing() {
    let output = labelsheet(&["-c", "labels.toml", "-f", "in.csv", "-o", "out.pdf"]);
    assert!(!output.status.success());
}
