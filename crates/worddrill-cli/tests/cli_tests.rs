//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NOUNS: &str = "\u{feff}Sr No.,Noun,German Word,Article,Gender,Plural,Example\n\
1,dog,Hund,der,Masculine,Hunde,\"Der Hund bellt, laut.\"\n\
2,,Katze,die,Feminine,Katzen,\n";

const PERSONS: &str = "Sr No,Verb,German Word,Person,Conjugation,Example\n\
1,to go,gehen,er/sie/es,geht,Er geht nach Hause.\n";

/// A command isolated from any user or working-directory config.
fn worddrill(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("worddrill").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("WORDDRILL_NOUNS_URL")
        .env_remove("WORDDRILL_VERBS_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sheet(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn practice_gender_from_file() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(&dir, "nouns.csv", NOUNS);

    worddrill(dir.path())
        .args(["practice", "--mode", "gender", "--seed", "1", "--file"])
        .arg(&sheet)
        .write_stdin("1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 1 items."))
        .stdout(predicate::str::contains("Skipped 1 unusable rows."))
        .stdout(predicate::str::contains("1) Masculine"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Session complete! Score: 1/1 (100%)"));
}

#[test]
fn practice_writes_summary() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(&dir, "nouns.csv", NOUNS);
    let summary = dir.path().join("summary.json");

    worddrill(dir.path())
        .args(["practice", "--mode", "translation", "--file"])
        .arg(&sheet)
        .arg("--summary")
        .arg(&summary)
        .write_stdin("Hund\n\n")
        .assert()
        .success();

    let raw = std::fs::read_to_string(&summary).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["mode"], "translation");
    assert_eq!(json["score"], 1);
    assert_eq!(json["total_answered"], 1);
    assert_eq!(json["accuracy_percent"], 100);
    assert_eq!(json["completed"], true);
}

#[test]
fn practice_person_mode() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(&dir, "persons.csv", PERSONS);

    worddrill(dir.path())
        .args(["practice", "--mode", "person", "--file"])
        .arg(&sheet)
        .write_stdin("er/sie/es\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] geht"))
        .stdout(predicate::str::contains("gehen (to go)"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Final score: 1/1 (100%)"));
}

#[test]
fn practice_wrong_sheet_reports_no_items() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(&dir, "nouns.csv", NOUNS);

    worddrill(dir.path())
        .args(["practice", "--mode", "person", "--file"])
        .arg(&sheet)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No items to practice."))
        .stdout(predicate::str::contains("looks like a nouns sheet"));
}

#[test]
fn practice_person_needs_a_dataset() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .args(["practice", "--mode", "person"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no verb-persons dataset configured"));
}

#[test]
fn practice_unknown_mode() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .args(["practice", "--mode", "spelling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown drill mode"));
}

#[test]
fn practice_named_dataset_from_config() {
    let dir = TempDir::new().unwrap();
    write_sheet(&dir, "persons.csv", PERSONS);
    std::fs::write(
        dir.path().join("worddrill.toml"),
        "[datasets.persons]\nkind = \"verb-persons\"\npath = \"persons.csv\"\n",
    )
    .unwrap();

    worddrill(dir.path())
        .args(["practice", "--mode", "person", "--dataset", "persons"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 1 items."));
}

#[test]
fn dataset_kind_mismatch_is_an_error() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .args(["practice", "--mode", "gender", "--dataset", "verbs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dataset 'verbs' holds verbs"));
}

#[test]
fn inspect_prints_table() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(&dir, "nouns.csv", NOUNS);

    worddrill(dir.path())
        .args(["inspect", "--kind", "nouns", "--file"])
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("German Word"))
        .stdout(predicate::str::contains("Hund"))
        .stdout(predicate::str::contains("[line 3] WARNING: skipped (MissingRequiredValue)"))
        .stdout(predicate::str::contains("1 records from 2 rows, 1 skipped."));
}

#[test]
fn inspect_missing_file() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .args(["inspect", "--file", "nonexistent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("nonexistent.csv"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created worddrill.toml"));

    let config = std::fs::read_to_string(dir.path().join("worddrill.toml")).unwrap();
    assert!(config.contains("[datasets.nouns]"));
    assert!(config.contains("gid=1459632609"));

    worddrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();

    worddrill(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("practice"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("init"));
}
