// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const FIXTURE: &str = "tests/fixtures/sample_invoice.json";

#[test]
fn render_binary_writes_thermal_pdf() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("receipt.pdf");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("render_invoice"));
    cmd.arg(FIXTURE)
        .args(["--layout", "thermal", "--output"])
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let data = std::fs::read(&output)?;
    assert!(data.starts_with(b"%PDF"));

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("analyze_pdf"));
    cmd.arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PDF ANALYSIS"))
        .stdout(predicate::str::contains("Number of pages: 1"))
        .stdout(predicate::str::contains("MediaBox: 226.00 x"))
        .stdout(predicate::str::contains("Helvetica"));

    Ok(())
}

#[test]
fn render_binary_prints_download_link() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let theme = dir.path().join("theme.json");
    std::fs::write(&theme, r#"{ "link_label": "Get invoice" }"#)?;

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("render_invoice"));
    cmd.arg(FIXTURE).arg("--link").arg("--theme").arg(&theme);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<a href=\"data:application/pdf;base64,JVBER",
        ))
        .stdout(predicate::str::contains(
            "download=\"invoice.pdf\">Get invoice</a>",
        ));

    Ok(())
}

#[test]
fn render_binary_reports_missing_input() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("render_invoice"));
    cmd.arg("tests/fixtures/does_not_exist.json");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does_not_exist.json"));
}

#[test]
fn analyze_binary_rejects_missing_file() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("analyze_pdf"));
    cmd.arg("tests/fixtures/does_not_exist.pdf");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
