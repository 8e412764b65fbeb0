//! End-to-end tests for the toolman binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A toolman command isolated from the user's environment and config files
fn toolman(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("toolman").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("TOOLMAN_PROFILE")
        .env_remove("TOOLMAN_NO_SUDO")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

/// Config whose package manager is `sh -c <package>`, so packages are scripts
fn shell_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("toolman.json");
    fs::write(
        &path,
        r#"{
            "profile": "dev",
            "package_manager": {
                "program": "sh",
                "install_verb": "-c",
                "upgrade_verb": "-c",
                "assume_yes_flag": null,
                "use_sudo": false
            },
            "extra_tools": [
                { "id": "streaming", "package": "echo a; echo b; echo c" },
                { "id": "failing", "package": "echo broken >&2; exit 3" },
                {
                    "id": "fakever",
                    "version_command": { "program": "sh", "args": ["-c", "printf 'fake 1.2.3\\nextra\\n'"] }
                }
            ]
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn test_list_json() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--profile", "dev", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "gcc""#))
        .stdout(predicate::str::contains(r#""install_command": "sudo apt install gcc -y""#))
        .stdout(predicate::str::contains("scilab").not());
}

#[test]
fn test_list_human_readable() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--profile", "esim", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eSim Tools"))
        .stdout(predicate::str::contains("sudo apt install ghdl -y"));
}

#[test]
fn test_dry_run_install() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--profile", "esim", "install", "ngspice"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "would run: sudo apt install ngspice -y",
        ))
        .stdout(predicate::str::contains("ngspice installed successfully!"));
}

#[test]
fn test_dry_run_install_all_without_sudo() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--no-sudo", "--profile", "esim", "install-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "would run: apt install ngspice kicad verilator gtkwave scilab openmodelica nghdl freehdl -y",
        ));
}

#[test]
fn test_dry_run_install_esim() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--profile", "esim", "install-esim"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "would run: git clone --depth=1 https://github.com/FOSSEE/eSim.git eSim",
        ))
        .stdout(predicate::str::contains("would run: ./install.sh"))
        .stdout(predicate::str::contains("eSim installed successfully!"));
}

#[test]
fn test_dry_run_version_shows_command() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--profile", "dev", "version", "git"])
        .assert()
        .success()
        .stdout(predicate::str::diff("would run: git --version\n"));
}

#[test]
fn test_config_tool_replaces_builtin() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("toolman.json"),
        r#"{ "profile": "esim", "extra_tools": [{ "id": "kicad", "package": "kicad-nightly" }] }"#,
    )
    .unwrap();

    toolman(&dir)
        .args(["--dry-run", "install", "kicad"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "would run: sudo apt install kicad-nightly -y",
        ));
}

#[test]
fn test_unknown_tool() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--profile", "dev", "install", "emacs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would run").not())
        .stderr(predicate::str::contains("Unknown tool: emacs"));
}

#[test]
fn test_missing_tool_without_terminal() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No tool selected"));
}

#[test]
fn test_action_not_in_profile() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .args(["--dry-run", "--profile", "dev", "install-all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available in the 'dev' profile"));
}

#[test]
fn test_profile_from_environment() {
    let dir = TempDir::new().unwrap();
    toolman(&dir)
        .env("TOOLMAN_PROFILE", "esim")
        .args(["--dry-run", "install-all"])
        .assert()
        .success();
}

#[test]
fn test_streamed_output_and_success() {
    let dir = TempDir::new().unwrap();
    let config = shell_config(&dir);
    toolman(&dir)
        .arg("--config")
        .arg(&config)
        .args(["install", "streaming"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)a\nb\nc\n.*streaming installed successfully!").unwrap());
}

#[test]
fn test_failed_command_exit_code_passthrough() {
    let dir = TempDir::new().unwrap();
    let config = shell_config(&dir);
    toolman(&dir)
        .arg("--config")
        .arg(&config)
        .args(["install", "failing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("broken"))
        .stderr(predicate::str::contains("Failed to install failing"));
}

#[test]
fn test_launch_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("toolman.json");
    fs::write(
        &path,
        r#"{ "package_manager": { "program": "/nonexistent/toolman-pm", "use_sudo": false } }"#,
    )
    .unwrap();

    // Picked up from the working directory
    toolman(&dir)
        .args(["install", "gcc"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("Failed to launch"));
}

#[test]
fn test_version_first_line() {
    let dir = TempDir::new().unwrap();
    let config = shell_config(&dir);
    toolman(&dir)
        .arg("--config")
        .arg(&config)
        .args(["version", "fakever"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fakever: fake 1.2.3"))
        .stdout(predicate::str::contains("extra").not());
}
