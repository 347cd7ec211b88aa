//! Integration tests that run the CLI binary.

fn bin() -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_idx", "-", "browser"));
    let mut cmd = std::process::Command::new(bin);
    for var in [
        "IDX_API_BASE_URL",
        "IDX_PAGE_SIZE",
        "IDX_REQUEST_TIMEOUT_SECS",
        "IDX_SHOW_TIMESTAMPS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("idx-browser"), "expected usage text in output");
    assert!(stdout.contains("IDX_API_BASE_URL"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("idx-browser"));
}

#[test]
fn cli_bad_base_url_exits_with_error() {
    // Run from temp dir so dotenv() won't load .env from project root
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["--base-url", "not-a-url", "health"])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success(), "expected failure for a bad base URL");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid API base URL"),
        "expected base URL error message, got: {}",
        stderr
    );
}

#[test]
fn cli_bad_page_size_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("config")
        .env("IDX_PAGE_SIZE", "0")
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IDX_PAGE_SIZE"), "got: {}", stderr);
}
