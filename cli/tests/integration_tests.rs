use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// Config directory with an optional pre-written API key.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    fn configured(api_key: &str) -> Self {
        let workspace = Self::new();
        fs::write(workspace.config_path(), format!("api_key: {api_key}\n"))
            .expect("failed to write config");
        workspace
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yml")
    }

    fn tcs(&self, args: &[&str]) -> Output {
        run_tcs(&self.config_path(), args)
    }
}

fn run_tcs(config: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_tcs"))
        .args(args)
        .env("TCS_CONFIG", config)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tcs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[test]
fn unconfigured_tool_refuses_service_commands() {
    let ws = Workspace::new();
    let output = ws.tcs(&["flip", "factories", "list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Firstly you should configure credentials"));
}

#[test]
fn configure_writes_credentials() {
    let ws = Workspace::new();
    let output = ws.tcs(&["configure", "my-secret-key"]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("Credentials saved"));
    let written = fs::read_to_string(ws.config_path()).unwrap();
    assert!(written.contains("api_key: my-secret-key"));
}

#[test]
fn configure_without_key_lists_required_flag() {
    let ws = Workspace::new();
    let output = ws.tcs(&["configure"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Required flags for configure:"));
    assert!(out.contains("-api_key <API_KEY> (required)"));
    assert!(!ws.config_path().exists());
}

#[test]
fn add_flags_works_without_credentials() {
    let ws = Workspace::new();
    let output = ws.tcs(&["add_flags"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Additional flags all commands:"));
    assert!(out.contains("-header_key <HEADER_KEY> - additive http header key"));
    assert!(out.contains("-header_val <HEADER_VAL> - additive http header value"));
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn bare_program_lists_commands() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&[]);

    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("Available commands for tcs:"));
    assert!(out.contains("flip (factories|profiles|videos|encodings) - manage your flip service"));
    assert!(out.contains("tts (projects|jobs|corpora) - manage your tts service"));
    assert!(out.contains("add_flags - prints additional flags for all commands"));
}

#[test]
fn unknown_resource_lists_group_children() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["tts", "voices"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Available commands for tts:"));
    assert!(!out.contains("Available commands for tcs:"));
}

#[test]
fn describe_with_positional_id() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["flip", "videos", "describe", "v1", "-factory_id", "f1"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("method: GET"));
    assert!(out.contains("path: /flip/videos/v1"));
    assert!(out.contains("factory_id: f1"));
    assert!(out.contains("api_key: ****1234"));
}

#[test]
fn side_channel_header_reaches_request() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&[
        "--header_key",
        "X-Trace",
        "tts",
        "jobs",
        "describe",
        "j1",
        "-project_id=p1",
        "-header_val=abc",
    ]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("path: /tts/jobs/j1"));
    assert!(out.contains("headers: X-Trace=abc"));
}

#[test]
fn list_renders_table_with_default_page() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["flip", "videos", "list", "-factory_id", "f1", "-per_page", "10"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("METHOD"));
    assert!(out.contains("factory_id=f1&page=1&per_page=10"));
}

#[test]
fn invalid_paging_fails() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["flip", "factories", "list", "-page", "two"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("invalid value 'two' for -page"));
}

#[test]
fn help_lists_all_flags_and_succeeds() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["flip", "profiles", "update", "help"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Flags for update:"));
    assert!(out.contains("-profile_id <PROFILE_ID> (required)"));
    assert!(out.contains("-video_codec <VIDEO_CODEC>"));
}

#[test]
fn missing_required_flag_fails_without_request() {
    let ws = Workspace::configured("key-1234");
    let output = ws.tcs(&["tts", "corpora", "create", "-project_id", "p1"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Required flags for create:"));
    assert!(out.contains("-corpus_body <CORPUS_BODY> (required)"));
    assert!(!out.contains("method:"));
}

#[test]
fn json_output_from_config() {
    let ws = Workspace::new();
    fs::write(ws.config_path(), "api_key: key-1234\noutput: json\ncolor: never\n").unwrap();
    let output = ws.tcs(&["flip", "encodings", "cancel", "e1", "-factory_id", "f1"]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["info"], "POST /flip/encodings/e1/cancel (dry run)");
}
