//! End-to-end tests for the `ytm` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REFERENCE: [&str; 6] = ["--price", "97.76", "--coupon", "11.0088", "--years", "5"];

/// A `ytm` command isolated from the caller's environment and config dir.
fn ytm(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ytm").unwrap();
    cmd.env_remove("YTM_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path());
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("ytm.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_solve_minimal() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["--format", "minimal", "solve"])
        .args(REFERENCE)
        .assert()
        .success()
        .stdout("11.61\n");
}

#[test]
fn test_solve_table() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .arg("solve")
        .args(REFERENCE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bond-Equivalent Yield"))
        .stdout(predicate::str::contains("11.61%"))
        .stdout(predicate::str::contains("11.95%"))
        .stdout(predicate::str::contains("5.81%"));
}

#[test]
fn test_solve_json() {
    let home = TempDir::new().unwrap();
    let output = ytm(&home)
        .args(["--format", "json", "solve"])
        .args(REFERENCE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["periods"], 10);
    assert_eq!(value["cashflows"].as_array().unwrap().len(), 10);

    let bey = value["bondEquivalentYield"].as_f64().unwrap();
    assert!((bey - 0.116_119_048_400_112).abs() < 1e-12);
    let rate = value["periodRate"].as_f64().unwrap();
    assert!((bey - 2.0 * rate).abs() < 1e-15);
    assert!(value["effectiveAnnualRate"].is_number());
}

#[test]
fn test_solve_csv() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["--format", "csv", "solve"])
        .args(REFERENCE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "price,couponRatePercent,years,face,periods,periodRate",
        ));
}

#[test]
fn test_price_out_of_range() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["solve", "--price", "20", "--coupon", "5", "--years", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Price must be between 50 and 150"));
}

#[test]
fn test_years_not_half_year() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["solve", "--price", "100", "--coupon", "5", "--years", "2.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Years must be a multiple of 0.5"));
}

#[test]
fn test_clamped_yield_warns() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["solve", "--price", "150", "--coupon", "0", "--years", "10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("clamped"));
}

#[test]
fn test_clamped_yield_quiet() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["--quiet", "--format", "minimal", "solve"])
        .args(["--price", "150", "--coupon", "0", "--years", "10"])
        .assert()
        .success()
        .stdout("0.00\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_zero_coupon_at_par_does_not_warn() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["--format", "minimal", "solve"])
        .args(["--price", "100", "--coupon", "0", "--years", "5"])
        .assert()
        .success()
        .stdout("0.00\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_reject_out_of_bounds() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["solve", "--reject", "--price", "150", "--coupon", "0", "--years", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lies outside"));
}

#[test]
fn test_schedule_csv() {
    let home = TempDir::new().unwrap();
    let output = ytm(&home)
        .args(["--format", "csv", "schedule"])
        .args(REFERENCE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "period,coupon,principal,cfType");
    assert!(lines[10].starts_with("10,"));
    assert!(lines[10].ends_with("CouponAndPrincipal"));
}

#[test]
fn test_schedule_minimal() {
    let home = TempDir::new().unwrap();
    let output = ytm(&home)
        .args(["--format", "minimal", "schedule"])
        .args(REFERENCE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[..9].iter().all(|line| *line == "5.5044"));
    assert_eq!(lines[9], "105.5044");
}

#[test]
fn test_chart_json() {
    let home = TempDir::new().unwrap();
    let output = ytm(&home)
        .args(["--format", "json", "chart"])
        .args(REFERENCE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = value["points"].as_array().unwrap();
    assert_eq!(points.len(), 11);
    assert_eq!(points[0]["purchase"].as_f64().unwrap(), -97.76);
    assert_eq!(points[10]["principal"].as_f64().unwrap(), 100.0);

    let yield_percent = value["yieldPercent"].as_f64().unwrap();
    assert!((yield_percent - 11.611_904_840_011_2).abs() < 1e-9);
}

#[test]
fn test_config_precision_applies() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "[display]\nyield_precision = 4\n");

    ytm(&home)
        .arg("--config")
        .arg(&path)
        .args(["--format", "minimal", "solve"])
        .args(REFERENCE)
        .assert()
        .success()
        .stdout("11.6119\n");
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();
    ytm(&home)
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed_iterations"))
        .stdout(predicate::str::contains("\"boundary_policy\": \"clamp\""));
}

#[test]
fn test_config_validate_reports_fields() {
    let home = TempDir::new().unwrap();
    let path = write_config(
        &home,
        "[display]\nyield_precision = 40\n\n[limits.price]\nmin = 150.0\nmax = 50.0\n",
    );

    ytm(&home)
        .args(["config", "validate", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("display.yield_precision"))
        .stderr(predicate::str::contains("limits.price.min"));
}

#[test]
fn test_config_validate_reports_fields_of_active_config() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "[solver.convergence]\nrule = \"converged\"\nmax_iterations = 50\n");

    ytm(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solver.convergence.max_iterations"));

    ytm(&home)
        .arg("--config")
        .arg(&path)
        .arg("solve")
        .args(REFERENCE)
        .assert()
        .failure();
}

#[test]
fn test_converged_rule_prints_same_yield() {
    let home = TempDir::new().unwrap();
    let path = write_config(
        &home,
        "[solver.convergence]\nrule = \"converged\"\nmax_iterations = 1100\n\n[display]\nyield_precision = 10\n",
    );

    ytm(&home)
        .arg("--config")
        .arg(&path)
        .args(["--format", "minimal", "solve"])
        .args(REFERENCE)
        .assert()
        .success()
        .stdout("11.6119048400\n");
}

#[test]
fn test_config_validate_ok() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "[solver]\nboundary_policy = \"reject\"\n");

    ytm(&home)
        .args(["config", "validate", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_default_config_dir_is_used() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("ytm")).unwrap();
    std::fs::write(
        home.path().join("ytm").join("config.toml"),
        "[display]\nyield_precision = 3\n",
    )
    .unwrap();

    ytm(&home)
        .args(["--format", "minimal", "solve"])
        .args(REFERENCE)
        .assert()
        .success()
        .stdout("11.612\n");
}
