//! Integration tests for CLI commands

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Helper to run pkgsift against the fixture config
fn pkgsift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkgsift"))
        .args(args)
        .env("PKGSIFT_CONFIG", fixture("config.yaml"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pkgsift")
}

/// Get the fixtures path
fn fixtures_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures")
}

fn fixture(name: &str) -> String {
    format!("{}/{}", fixtures_path(), name)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn visible_names(json: &serde_json::Value) -> Vec<String> {
    json["visible"]
        .as_array()
        .expect("visible should be an array")
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

mod filter_command {
    use super::*;

    #[test]
    fn test_query_matches_full_text() {
        let output = pkgsift(&["filter", &fixture("catalog.yaml"), "--query", "ACME"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let stdout = stdout(&output);
        assert!(stdout.contains("acme/widgets"));
        assert!(stdout.contains("acme/gadgets"));
        // Matches through its description
        assert!(stdout.contains("other/tools"));
        assert!(!stdout.contains("labs/parser"));
        assert!(stdout.contains("3 of 4 packages shown"));
    }

    #[test]
    fn test_field_scope_narrows_matches() {
        let output = pkgsift(&[
            "filter",
            &fixture("catalog.yaml"),
            "--query",
            "acme",
            "--field",
            "name",
            "--json",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let json: serde_json::Value =
            serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");

        assert_eq!(json["scope"], "name");
        assert_eq!(visible_names(&json), vec!["acme/widgets", "acme/gadgets"]);
    }

    #[test]
    fn test_own_packages_only() {
        let output = pkgsift(&["filter", &fixture("catalog.yaml"), "--own", "--json"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

        assert_eq!(json["ownOnly"], true);
        assert_eq!(json["total"], 4);
        assert_eq!(visible_names(&json), vec!["acme/widgets", "acme/gadgets"]);
    }

    #[test]
    fn test_url_fragment_seeds_query() {
        let output = pkgsift(&[
            "filter",
            &fixture("catalog.yaml"),
            "--url",
            "https://packages.example.com/list#incremental%20parser",
            "--json",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

        assert_eq!(json["query"], "incremental parser");
        assert_eq!(visible_names(&json), vec!["labs/parser"]);
        assert_eq!(
            json["url"],
            "https://packages.example.com/list#incremental%20parser"
        );
    }

    #[test]
    fn test_query_is_written_to_url() {
        let output = pkgsift(&[
            "filter",
            &fixture("catalog.yaml"),
            "--query",
            "gadget toolkit",
            "--url",
            "https://packages.example.com/",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("https://packages.example.com/#gadget%20toolkit"));
    }

    #[test]
    fn test_unknown_field_suggests_correction() {
        let output = pkgsift(&[
            "filter",
            &fixture("catalog.yaml"),
            "--query",
            "acme",
            "--field",
            "descripton",
        ]);

        assert_eq!(output.status.code(), Some(4));
        assert!(stderr(&output).contains("Did you mean `description`?"));
    }

    #[test]
    fn test_missing_catalog() {
        let output = pkgsift(&["filter", &fixture("nope.yaml"), "--query", "acme"]);

        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("Catalog not found"));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "debounce: 0s\n").unwrap();

        let output = pkgsift(&[
            "filter",
            &fixture("catalog.yaml"),
            "--config",
            config.to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(3));
    }
}

mod fields_command {
    use super::*;

    #[test]
    fn test_lists_shared_fields() {
        let output = pkgsift(&["fields", &fixture("catalog.yaml")]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
        assert!(lines.iter().any(|l| l == "name"));
        assert!(lines.iter().any(|l| l == "version"));
        assert!(lines.iter().any(|l| l == "description"));
        assert!(stdout(&output).contains("3 fields shared by 4 packages"));
    }
}

mod replay_command {
    use super::*;

    #[test]
    fn test_replay_json() {
        let output = pkgsift(&[
            "replay",
            &fixture("catalog.yaml"),
            &fixture("typing.yaml"),
            "--json",
        ]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        let passes = json.as_array().unwrap();

        // One debounced pass for the typing burst, then own-toggle and escape
        assert_eq!(passes.len(), 3);
        assert_eq!(passes[0]["trigger"], "debounce");
        assert_eq!(passes[0]["at"], "600ms");
        assert_eq!(passes[0]["visible"], serde_json::json!(["acme/gadgets"]));
        assert_eq!(passes[1]["visible"], serde_json::json!(["acme/gadgets"]));
        assert_eq!(passes[2]["query"], "");
        assert_eq!(
            passes[2]["visible"],
            serde_json::json!(["acme/widgets", "acme/gadgets"])
        );
    }

    #[test]
    fn test_replay_rejects_unordered_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.yaml");
        std::fs::write(&script, "- at: 1s\n  type: escape\n- at: 0s\n  type: escape\n").unwrap();

        let output = pkgsift(&[
            "replay",
            &fixture("catalog.yaml"),
            script.to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(64));
    }
}

mod watch_command {
    use super::*;

    fn watch(input: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_pkgsift"))
            .arg("watch")
            .arg(fixture("catalog.yaml"))
            .args(["--url", "https://packages.example.com/"])
            .env("PKGSIFT_CONFIG", fixture("config.yaml"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn pkgsift");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }

    #[test]
    fn test_typing_runs_one_debounced_pass() {
        let output = watch("type p\ntype pa\ntype parser\n");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let stdout = stdout(&output);
        assert_eq!(stdout.matches("pass ").count(), 1);
        assert!(stdout.contains("query=\"parser\" 1/4 visible"));
        assert!(stdout.contains("labs/parser"));
        assert!(stdout.trim_end().ends_with("https://packages.example.com/#parser"));
    }

    #[test]
    fn test_bad_command_is_reported_and_skipped() {
        let output = watch("jump\nown on\n");

        assert!(output.status.success());
        assert!(stderr(&output).contains("unknown command `jump`"));
        assert!(stdout(&output).contains("2/4 visible"));
    }
}
