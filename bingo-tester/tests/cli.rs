use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "bingo-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_bingo-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("race"));
}

#[test]
fn cli_json_report_passes_on_bundled_fixtures() {
    let exe = env!("CARGO_BIN_EXE_bingo-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "all",
            "--iterations",
            "2",
            "--seeds",
            "1,game",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = results.as_array().expect("array");
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_exits_nonzero_on_broken_game() {
    let exe = env!("CARGO_BIN_EXE_bingo-tester");
    let game_path = temp_path("broken-game");
    let fixture = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/sample_game.json");
    let mut game: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixture).expect("fixture")).expect("json");
    game["teamBoards"][0]["points"] = serde_json::json!(9999);
    std::fs::write(&game_path, game.to_string()).expect("write game");

    let output = Command::new(exe)
        .args(["--report", "json", "--scenarios", "scoring", "--game"])
        .arg(&game_path)
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    let _ = std::fs::remove_file(game_path);
}

#[test]
fn cli_rejects_missing_game_file() {
    let exe = env!("CARGO_BIN_EXE_bingo-tester");
    let output = Command::new(exe)
        .args(["--game", "/definitely/not/a/game.json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/definitely/not/a/game.json"));
}

#[test]
fn cli_rejects_zero_iterations() {
    let exe = env!("CARGO_BIN_EXE_bingo-tester");
    let output = Command::new(exe)
        .args(["--report", "json", "--iterations", "0"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--iterations"));
}
