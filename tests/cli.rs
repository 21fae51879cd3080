use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/grades.csv")
}

fn grade_audit(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grade-audit"))
        .args(args)
        .current_dir(dir)
        .env_remove("GRADE_AUDIT_BATCH_YEAR")
        .output()
        .expect("binary runs")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grade-audit-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir created");
    dir
}

#[test]
fn missing_path_exits_with_usage_error() {
    let dir = scratch_dir("no-path");
    let output = grade_audit(&[], &dir);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please provide the file path"));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    let dir = scratch_dir("bad-flag");
    let output = grade_audit(&["--bogus"], &dir);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn export_flag_without_value_exits_with_usage_error() {
    let dir = scratch_dir("bare-export");
    let path = fixture();
    let path = path.to_str().expect("utf-8 fixture path");
    let output = grade_audit(&["--path", path, "--export"], &dir);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.join("report.json").exists());
}

#[test]
fn help_exits_successfully() {
    let dir = scratch_dir("help");
    let output = grade_audit(&["--help"], &dir);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--path"));
}

#[test]
fn unmatched_class_exits_with_no_data() {
    let dir = scratch_dir("no-data");
    let path = fixture();
    let path = path.to_str().expect("utf-8 fixture path");
    let output = grade_audit(&["--path", path, "--class", "Z9", "--export", "yes"], &dir);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No data found"));
    assert!(!dir.join("report.json").exists());
}

#[test]
fn export_writes_report_and_exits_successfully() {
    let dir = scratch_dir("export");
    let path = fixture();
    let path = path.to_str().expect("utf-8 fixture path");
    let output = grade_audit(&["--path", path, "--class", "C1", "--export", "yes"], &dir);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Filtering for class C1"));
    assert!(stdout.contains("Parsed 4 rows"));
    assert!(stdout.contains("Report exported to report.json"));
    assert!(!stdout.contains("Discrepancy"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("2023B004"));

    let report = dir.join("report.json");
    let text = std::fs::read_to_string(&report).expect("report written");
    std::fs::remove_dir_all(&dir).ok();
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["Averages"]["Total"], 102.0);
}
