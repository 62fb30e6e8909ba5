//! CLI tests for gradebook commands.
//!
//! Spawns the gradebook binary against a temporary data directory and checks
//! stdout, persisted files and exit codes.

use std::fs;
use std::process::{Command, Output};

use gradebook::exit_codes;
use gradebook::io::storage::{DOCUMENT_KEY, SELECTED_SEMESTER_KEY, Storage};
use gradebook::test_support::TestDataDir;
use gradebook::transfer;

fn gradebook(dir: &TestDataDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gradebook"))
        .current_dir(dir.path())
        .arg("--data-dir")
        .arg(dir.data_dir())
        .args(args)
        .output()
        .expect("run gradebook")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn init_seeds_document_and_config() {
    let dir = TestDataDir::new().expect("tempdir");
    let output = gradebook(&dir, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout(&output).contains("semesters=10"));

    assert!(dir.data_dir().join("config.toml").exists());
    let stored = dir.storage().get(DOCUMENT_KEY).expect("get").expect("stored");
    let doc = transfer::import(&stored).expect("parse");
    assert_eq!(doc.semesters[4].id, "ST-1");
}

#[test]
fn add_then_stats_reports_term_and_cumulative() {
    let dir = TestDataDir::new().expect("tempdir");
    let add_a = gradebook(&dir, &["add", "CS F111 - Computer Programming", "-g", "A", "-c", "4"]);
    assert_eq!(add_a.status.code(), Some(exit_codes::OK));
    assert!(stdout(&add_a).starts_with("added: 1-1/"));
    let add_b = gradebook(&dir, &["add", "MATH F111 - Calculus", "-g", "B", "-c", "3"]);
    assert_eq!(add_b.status.code(), Some(exit_codes::OK));

    let stats = gradebook(&dir, &["stats"]);
    let text = stdout(&stats);
    assert!(text.contains("sgpa: 9.14"), "{text}");
    assert!(text.contains("cgpa: 9.14"), "{text}");
    assert!(text.contains("credits: 7"), "{text}");
}

#[test]
fn add_to_unknown_semester_fails_without_writing() {
    let dir = TestDataDir::new().expect("tempdir");
    gradebook(&dir, &["init"]);
    let before = dir.storage().get(DOCUMENT_KEY).expect("get");

    let output = gradebook(&dir, &["add", "X - Y", "--semester", "9-9"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert_eq!(dir.storage().get(DOCUMENT_KEY).expect("get"), before);
}

#[test]
fn select_changes_default_semester() {
    let dir = TestDataDir::new().expect("tempdir");
    let output = gradebook(&dir, &["select", "2-1"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        dir.storage().get(SELECTED_SEMESTER_KEY).expect("get").as_deref(),
        Some("2-1")
    );

    let add = gradebook(&dir, &["add", "EEE F111 - Electrical Sciences"]);
    assert!(stdout(&add).starts_with("added: 2-1/"));
}

#[test]
fn update_with_sentinel_grade_zeroes_credits() {
    let dir = TestDataDir::new().expect("tempdir");
    let add = gradebook(&dir, &["add", "BITS F423T - Thesis", "-c", "5"]);
    let added = stdout(&add);
    let course_id = added.trim().rsplit('/').next().expect("id").to_string();

    let update = gradebook(&dir, &["update", &course_id, "--grade", "GD"]);
    assert_eq!(update.status.code(), Some(exit_codes::OK));

    let list = stdout(&gradebook(&dir, &["list"]));
    let line = list.lines().find(|line| line.starts_with(&course_id)).expect("row");
    let fields: Vec<&str> = line.split('\t').collect();
    assert_eq!(fields[3], "0");
    assert_eq!(fields[4], "GD");
}

#[test]
fn delete_twice_is_reported_as_unchanged() {
    let dir = TestDataDir::new().expect("tempdir");
    let add = stdout(&gradebook(&dir, &["add", "X - Y"]));
    let course_id = add.trim().rsplit('/').next().expect("id").to_string();

    let first = gradebook(&dir, &["delete", &course_id]);
    assert!(stdout(&first).starts_with("deleted:"));
    let second = gradebook(&dir, &["delete", &course_id]);
    assert_eq!(second.status.code(), Some(exit_codes::OK));
    assert!(stdout(&second).starts_with("unchanged:"));
}

#[test]
fn export_import_round_trip_between_directories() {
    let source = TestDataDir::new().expect("tempdir");
    gradebook(&source, &["add", "CS F211 - Data Structures", "-s", "2-1", "-g", "A-"]);
    let exported = source.path().join("backup.json");
    let export = gradebook(&source, &["export", "-o", exported.to_str().expect("utf8")]);
    assert_eq!(export.status.code(), Some(exit_codes::OK));

    let target = TestDataDir::new().expect("tempdir");
    let import = gradebook(&target, &["import", exported.to_str().expect("utf8")]);
    assert_eq!(import.status.code(), Some(exit_codes::OK));
    assert!(stdout(&import).contains("courses=1"));

    let source_doc = transfer::import(&fs::read_to_string(&exported).expect("read")).expect("doc");
    let target_doc = transfer::import(
        &target.storage().get(DOCUMENT_KEY).expect("get").expect("stored"),
    )
    .expect("doc");
    assert_eq!(source_doc, target_doc);
}

#[test]
fn rejected_import_keeps_existing_record() {
    let dir = TestDataDir::new().expect("tempdir");
    gradebook(&dir, &["add", "X - Y"]);
    let before = dir.storage().get(DOCUMENT_KEY).expect("get");

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"not_semesters": []}"#).expect("write");
    let output = gradebook(&dir, &["import", bad.to_str().expect("utf8")]);
    assert_eq!(output.status.code(), Some(exit_codes::REJECTED));
    assert_eq!(dir.storage().get(DOCUMENT_KEY).expect("get"), before);
}

#[test]
fn corrupt_store_is_reseeded_on_open() {
    let dir = TestDataDir::new().expect("tempdir");
    fs::create_dir_all(dir.data_dir()).expect("mkdir");
    fs::write(dir.data_dir().join(DOCUMENT_KEY), "{{{").expect("write");

    let output = gradebook(&dir, &["semesters"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output).lines().count(), 10);
}

#[test]
fn check_reports_duplicate_ids() {
    let dir = TestDataDir::new().expect("tempdir");
    fs::create_dir_all(dir.data_dir()).expect("mkdir");
    let doc = r#"{"semesters": [
        {"id": "1-1", "name": "1-1", "courses": []},
        {"id": "1-1", "name": "dup", "courses": []}
    ]}"#;
    fs::write(dir.data_dir().join(DOCUMENT_KEY), doc).expect("write");

    let output = gradebook(&dir, &["check"]);
    assert_eq!(output.status.code(), Some(exit_codes::VIOLATIONS));
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate semester id"));
}

#[test]
fn summary_json_reports_progress() {
    let dir = TestDataDir::new().expect("tempdir");
    gradebook(&dir, &["add", "A - One", "-c", "36", "-t", "HuEL"]);
    let output = gradebook(&dir, &["summary", "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["progress"]["earned"], 36);
    assert_eq!(value["progress"]["percent"], 25);
    let categories: Vec<&str> = value["breakdown"]
        .as_array()
        .expect("breakdown")
        .iter()
        .filter_map(|stats| stats["category"].as_str())
        .collect();
    assert_eq!(categories, vec!["CDC", "OpEL", "HuEL", "DEL"]);
    assert_eq!(value["breakdown"][2]["credits"], 36);
}
