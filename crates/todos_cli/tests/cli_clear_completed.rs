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

fn write_store(dir: &Path, tasks: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("todos.json"),
        serde_json::to_string(&tasks).unwrap(),
    )
    .unwrap();
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_todos"))
        .args(args)
        .env("TODOS_STORAGE_DIR", dir)
        .env("TODOS_CONFIG_PATH", dir.join("missing-config.json"))
        .output()
        .expect("failed to run todos")
}

#[test]
fn clear_completed_removes_all_and_only_completed() {
    let dir = temp_dir("cli-clear");
    write_store(
        &dir,
        serde_json::json!([
            { "id": 1, "text": "a", "completed": true },
            { "id": 2, "text": "b", "completed": false },
            { "id": 3, "text": "c", "completed": true },
            { "id": 4, "text": "d", "completed": false }
        ]),
    );

    let output = run(&dir, &["clear-completed"]);
    let content = std::fs::read_to_string(dir.join("todos.json")).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared 2 completed tasks"));
    let tasks: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        tasks,
        serde_json::json!([
            { "id": 2, "text": "b", "completed": false },
            { "id": 4, "text": "d", "completed": false }
        ])
    );
}

#[test]
fn clear_completed_json_reports_zero_when_nothing_completed() {
    let dir = temp_dir("cli-clear-none");
    write_store(
        &dir,
        serde_json::json!([{ "id": 1, "text": "a", "completed": false }]),
    );

    let output = run(&dir, &["clear-completed", "--json"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["removed"], 0);
}
