//! Command-line tests for the `predef-catalog` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const QUALS: &str = r#"{
  "TypeFullName": "CommandCentral.Entities.ReferenceLists.WatchQualification",
  "Definitions": [
    { "Id": "91B60F40-C991-4DB6-A51F-3889989C2D33", "Value": "OOD", "Description": "" }
  ]
}"#;

const SHIFTS: &str = r#"{
  "TypeFullName": "CommandCentral.Entities.ReferenceLists.Watchbill.WatchShiftType",
  "Definitions": [
    {
      "Id": "858F6B78-5508-4A59-97A0-6E45AADAB2A9",
      "Value": "JOOD",
      "Description": "This watch shift is for JOODs.",
      "RequiredWatchQualifications": [ { "Id": "726A2088-AE51-4E41-B10A-952F0CBD73C3" } ]
    }
  ]
}"#;

fn bin() -> Command {
    Command::cargo_bin("predef-catalog").unwrap()
}

#[test]
fn test_validate_embedded() {
    bin()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 lists"))
        .stdout(predicate::str::contains(
            "qualifications from CommandCentral.Entities.ReferenceLists.WatchQualification",
        ));
}

#[test]
fn test_validate_reports_unresolved_reference() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quals.json"), QUALS).unwrap();
    std::fs::write(dir.path().join("shifts.json"), SHIFTS).unwrap();

    bin()
        .args(["validate", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[unresolved_reference]"))
        .stderr(predicate::str::contains("726A2088-AE51-4E41-B10A-952F0CBD73C3"))
        .stderr(predicate::str::contains("validation failed with 1 violation(s)"));
}

#[test]
fn test_validate_json_violations() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quals.json"), QUALS).unwrap();
    std::fs::write(dir.path().join("shifts.json"), SHIFTS).unwrap();

    let output = bin()
        .args(["validate", "--format", "json", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["violations"][0]["kind"], "unresolved_reference");
    assert_eq!(json["violations"][0]["entry_value"], "JOOD");
}

#[test]
fn test_list_entries() {
    bin()
        .args(["list", "DutyStatus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C06D1123-60D9-4F06-B4DE-DD15EAE724A2  Active"));
}

#[test]
fn test_list_unknown_type() {
    bin()
        .args(["list", "Paygrade"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown reference list 'Paygrade'"));
}

#[test]
fn test_tsv_rows_keep_their_columns() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("duty.json"),
        r#"{"TypeFullName": "DutyStatus", "Definitions": [
            {"Id": "C06D1123-60D9-4F06-B4DE-DD15EAE724A2", "Value": "Active",
             "Description": "On duty\tfull time\nsecond line"}
        ]}"#,
    )
    .unwrap();

    let output = bin()
        .args(["list", "DutyStatus", "--format", "tsv", "--dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.split('\t').count() == 4));
    assert!(lines[1].contains("On duty full time second line"));
}

#[test]
fn test_show_by_value_and_id() {
    bin()
        .args(["show", "WatchShiftType", "OOD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("F3F818F8-55D3-45DC-AF2F-1528ED290384"))
        .stdout(predicate::str::contains("Required qualifications:"));

    bin()
        .args(["show", "DutyStatus", "c06d1123-60d9-4f06-b4de-dd15eae724a2", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tActive\t"));
}

#[test]
fn test_export_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bundle.json");

    bin().arg("export").arg(&out).assert().success();
    let exported = std::fs::read_to_string(&out).unwrap();
    assert!(exported.contains("\"TypeFullName\""));

    bin()
        .arg("export")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    // The bundle loads back on its own
    bin()
        .args(["validate", "--file"])
        .arg(&out)
        .assert()
        .success();
}
