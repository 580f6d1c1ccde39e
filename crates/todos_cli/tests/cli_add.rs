use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todos-{nanos}-{name}"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_todos"))
        .args(args)
        .env("TODOS_STORAGE_DIR", dir)
        .env("TODOS_CONFIG_PATH", dir.join("missing-config.json"))
        .output()
        .expect("failed to run todos")
}

fn stored(dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn add_command_succeeds() {
    let dir = temp_dir("cli-add");
    let output = run(&dir, &["add", "Buy milk"]);
    let tasks = stored(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk"));

    let tasks = tasks.as_array().expect("array of tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert!(tasks[0]["id"].is_u64());
}

#[test]
fn add_command_trims_text() {
    let dir = temp_dir("cli-add-trim");
    let output = run(&dir, &["add", "   padded  "]);
    let tasks = stored(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    assert_eq!(tasks[0]["text"], "padded");
}

#[test]
fn add_command_ignores_blank_text() {
    let dir = temp_dir("cli-add-blank");
    let output = run(&dir, &["add", "   "]);
    let exists = dir.join("todos.json").exists();
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!exists);
}

#[test]
fn add_command_appends_in_order() {
    let dir = temp_dir("cli-add-order");
    run(&dir, &["add", "A"]);
    run(&dir, &["add", "B"]);
    let tasks = stored(&dir);
    std::fs::remove_dir_all(&dir).ok();

    let texts: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["A", "B"]);
    assert_ne!(tasks[0]["id"], tasks[1]["id"]);
}

#[test]
fn add_command_json_outputs_task() {
    let dir = temp_dir("cli-add-json");
    let output = run(&dir, &["add", "demo", "--json"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["text"], "demo");
    assert_eq!(json["completed"], false);
}

#[test]
fn add_command_rejects_missing_text() {
    let dir = temp_dir("cli-add-missing");
    let output = run(&dir, &["add"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
