use std::process::Command;

use serde_json::Value;

fn search_bench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_search_bench"))
}

#[test]
fn json_output_reports_move_value_and_time() {
    let output = search_bench()
        .args([
            "--algorithm",
            "all",
            "--game",
            "take-away",
            "--stones",
            "7",
            "--depth",
            "8",
            "--seed",
            "3",
            "--json",
        ])
        .output()
        .expect("run search_bench");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let results: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let results = results.as_array().expect("array of results");
    assert_eq!(results.len(), 5);
    for result in results {
        let first = &result["moves"][0];
        // 7石・最大3: 3石取る (7 -> 4) のが唯一の勝ち手
        assert_eq!(first["mv"]["to"]["file"], 4, "{result}");
        assert_eq!(first["value"], 32000, "{result}");
        assert!(first["elapsed"].is_object());
        assert_eq!(first["side"], "red");
    }
    assert_eq!(results[4]["algorithm"], "hybrid");
    assert_eq!(results[4]["moves"][0]["route"], "minimax_fallback");
}

#[test]
fn text_output_for_random_tree() {
    let output = search_bench()
        .args([
            "--algorithm",
            "mtdf",
            "--game",
            "random",
            "--tree-seed",
            "5",
            "--depth",
            "3",
            "--plies",
            "2",
        ])
        .output()
        .expect("run search_bench");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== MTD(f) (depth 3) =="), "{stdout}");
    assert!(stdout.contains("tt:"));
}

#[test]
fn rejects_zero_depth() {
    let output = search_bench()
        .args(["--algorithm", "negamax", "--depth", "0"])
        .output()
        .expect("run search_bench");
    assert!(!output.status.success());
}
